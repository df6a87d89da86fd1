//! Core configuration types for the scraper engine
//!
//! This module contains the main `EngineConfig` struct and its associated
//! types that define the tunable knobs shared across the proxy pool,
//! stealth controller, search backend, worker engine, and filter pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Named timing profile selecting a `(min_delay, max_delay, burst_size, ...)`
/// tuple for the stealth controller. See [`crate::stealth::timing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimingProfileName {
    Aggressive,
    #[default]
    Normal,
    Cautious,
    Stealth,
}

/// Proxy selection strategy used by [`crate::proxy_pool::ProxyPool::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionStrategy {
    #[default]
    RoundRobin,
    Random,
    LeastUsed,
    LeastLatency,
    WeightedSuccessRate,
}

/// Main configuration struct for a scrape run.
///
/// **INVARIANT:** all durations are stored in milliseconds as plain `u64`
/// fields so the struct round-trips losslessly through the ms-denominated
/// control envelope (see [`crate::control`]); callers convert to
/// `std::time::Duration` at the point of use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub(crate) workers: usize,
    pub(crate) buffer_size: usize,
    pub(crate) max_retries: u8,
    pub(crate) retry_delay_ms: u64,
    pub(crate) results_per_page: u32,
    pub(crate) request_timeout_ms: u64,
    pub(crate) max_redirects: u8,
    pub(crate) max_body_bytes: usize,

    pub(crate) selection_strategy: SelectionStrategy,
    pub(crate) max_fail_count: u32,
    pub(crate) quarantine_threshold: u32,
    pub(crate) quarantine_duration_ms: u64,
    pub(crate) error_cooldown_ms: u64,
    pub(crate) captcha_cooldown_ms: u64,
    pub(crate) block_cooldown_ms: u64,
    pub(crate) slow_threshold_ms: u64,
    pub(crate) one_in_flight_per_proxy: bool,
    pub(crate) health_check_interval_ms: Option<u64>,

    pub(crate) timing_profile: TimingProfileName,
    pub(crate) pin_fingerprint_per_proxy: bool,
    pub(crate) rotate_every: u32,

    pub(crate) min_url_length: usize,
    pub(crate) max_url_length: usize,
    pub(crate) parameters_only: bool,
    pub(crate) anti_public_enabled: bool,
    pub(crate) url_dedup_enabled: bool,
    pub(crate) domain_dedup_enabled: bool,
    pub(crate) tld_whitelist: Option<Vec<String>>,
    pub(crate) tld_blacklist: Vec<String>,
    pub(crate) keyword_include: Vec<String>,
    pub(crate) keyword_exclude: Vec<String>,
    pub(crate) url_bloom_expected_items: usize,
    pub(crate) domain_bloom_expected_items: usize,
    pub(crate) bloom_false_positive_rate: f64,

    pub(crate) output_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            buffer_size: 1000,
            max_retries: 3,
            retry_delay_ms: 500,
            results_per_page: 10,
            request_timeout_ms: 15_000,
            max_redirects: 4,
            max_body_bytes: 2 * 1024 * 1024,

            selection_strategy: SelectionStrategy::default(),
            max_fail_count: 5,
            quarantine_threshold: 3,
            quarantine_duration_ms: 30 * 60_000,
            error_cooldown_ms: 5_000,
            captcha_cooldown_ms: 60_000,
            block_cooldown_ms: 5 * 60_000,
            slow_threshold_ms: 3_000,
            one_in_flight_per_proxy: true,
            health_check_interval_ms: None,

            timing_profile: TimingProfileName::default(),
            pin_fingerprint_per_proxy: true,
            rotate_every: 100,

            min_url_length: 10,
            max_url_length: 2048,
            parameters_only: false,
            anti_public_enabled: true,
            url_dedup_enabled: true,
            domain_dedup_enabled: false,
            tld_whitelist: None,
            tld_blacklist: Vec::new(),
            keyword_include: Vec::new(),
            keyword_exclude: Vec::new(),
            url_bloom_expected_items: 10_000_000,
            domain_bloom_expected_items: 1_000_000,
            bloom_false_positive_rate: 0.001,

            output_dir: PathBuf::from("./output"),
        }
    }
}
