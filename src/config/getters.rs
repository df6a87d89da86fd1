//! Getter methods for `EngineConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from an `EngineConfig` instance.

use std::path::PathBuf;

use super::types::{EngineConfig, SelectionStrategy, TimingProfileName};

impl EngineConfig {
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    #[must_use]
    pub fn max_retries(&self) -> u8 {
        self.max_retries
    }

    #[must_use]
    pub fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    #[must_use]
    pub fn results_per_page(&self) -> u32 {
        self.results_per_page
    }

    #[must_use]
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }

    #[must_use]
    pub fn max_redirects(&self) -> u8 {
        self.max_redirects
    }

    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    #[must_use]
    pub fn selection_strategy(&self) -> SelectionStrategy {
        self.selection_strategy
    }

    #[must_use]
    pub fn max_fail_count(&self) -> u32 {
        self.max_fail_count
    }

    #[must_use]
    pub fn quarantine_threshold(&self) -> u32 {
        self.quarantine_threshold
    }

    #[must_use]
    pub fn quarantine_duration_ms(&self) -> u64 {
        self.quarantine_duration_ms
    }

    #[must_use]
    pub fn error_cooldown_ms(&self) -> u64 {
        self.error_cooldown_ms
    }

    #[must_use]
    pub fn captcha_cooldown_ms(&self) -> u64 {
        self.captcha_cooldown_ms
    }

    #[must_use]
    pub fn block_cooldown_ms(&self) -> u64 {
        self.block_cooldown_ms
    }

    #[must_use]
    pub fn slow_threshold_ms(&self) -> u64 {
        self.slow_threshold_ms
    }

    #[must_use]
    pub fn one_in_flight_per_proxy(&self) -> bool {
        self.one_in_flight_per_proxy
    }

    #[must_use]
    pub fn health_check_interval_ms(&self) -> Option<u64> {
        self.health_check_interval_ms
    }

    #[must_use]
    pub fn timing_profile(&self) -> TimingProfileName {
        self.timing_profile
    }

    #[must_use]
    pub fn pin_fingerprint_per_proxy(&self) -> bool {
        self.pin_fingerprint_per_proxy
    }

    #[must_use]
    pub fn rotate_every(&self) -> u32 {
        self.rotate_every
    }

    #[must_use]
    pub fn min_url_length(&self) -> usize {
        self.min_url_length
    }

    #[must_use]
    pub fn max_url_length(&self) -> usize {
        self.max_url_length
    }

    #[must_use]
    pub fn parameters_only(&self) -> bool {
        self.parameters_only
    }

    #[must_use]
    pub fn anti_public_enabled(&self) -> bool {
        self.anti_public_enabled
    }

    #[must_use]
    pub fn url_dedup_enabled(&self) -> bool {
        self.url_dedup_enabled
    }

    #[must_use]
    pub fn domain_dedup_enabled(&self) -> bool {
        self.domain_dedup_enabled
    }

    #[must_use]
    pub fn tld_whitelist(&self) -> Option<&[String]> {
        self.tld_whitelist.as_deref()
    }

    #[must_use]
    pub fn tld_blacklist(&self) -> &[String] {
        &self.tld_blacklist
    }

    #[must_use]
    pub fn keyword_include(&self) -> &[String] {
        &self.keyword_include
    }

    #[must_use]
    pub fn keyword_exclude(&self) -> &[String] {
        &self.keyword_exclude
    }

    #[must_use]
    pub fn url_bloom_expected_items(&self) -> usize {
        self.url_bloom_expected_items
    }

    #[must_use]
    pub fn domain_bloom_expected_items(&self) -> usize {
        self.domain_bloom_expected_items
    }

    #[must_use]
    pub fn bloom_false_positive_rate(&self) -> f64 {
        self.bloom_false_positive_rate
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}
