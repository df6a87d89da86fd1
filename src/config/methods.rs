//! Derived values and cross-cutting helpers for `EngineConfig`
//!
//! Values computed from more than one field, or that convert a stored
//! ms-denominated field into a `Duration`, live here rather than in
//! `getters.rs` so the two concerns (raw field access vs. derived value)
//! stay separated.

use std::time::Duration;

use super::types::EngineConfig;
use crate::stealth::timing::TimingProfile;

impl EngineConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    #[must_use]
    pub fn quarantine_duration(&self) -> Duration {
        Duration::from_millis(self.quarantine_duration_ms)
    }

    #[must_use]
    pub fn error_cooldown(&self) -> Duration {
        Duration::from_millis(self.error_cooldown_ms)
    }

    #[must_use]
    pub fn captcha_cooldown(&self) -> Duration {
        Duration::from_millis(self.captcha_cooldown_ms)
    }

    #[must_use]
    pub fn block_cooldown(&self) -> Duration {
        Duration::from_millis(self.block_cooldown_ms)
    }

    #[must_use]
    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }

    #[must_use]
    pub fn health_check_interval(&self) -> Option<Duration> {
        self.health_check_interval_ms.map(Duration::from_millis)
    }

    /// Resolve the configured named timing profile into its concrete tuning
    /// tuple.
    #[must_use]
    pub fn resolve_timing_profile(&self) -> TimingProfile {
        TimingProfile::named(self.timing_profile)
    }

    /// `true` when any dedup/suppression stage of the filter pipeline is
    /// active; a fully-disabled pipeline is valid but worth flagging since
    /// it silently turns off the invariant "adding stages can only reduce
    /// the output set" (there are no stages to reduce with).
    #[must_use]
    pub fn any_filter_stage_enabled(&self) -> bool {
        self.anti_public_enabled
            || self.url_dedup_enabled
            || self.domain_dedup_enabled
            || self.parameters_only
            || self.tld_whitelist.is_some()
            || !self.tld_blacklist.is_empty()
            || !self.keyword_include.is_empty()
            || !self.keyword_exclude.is_empty()
    }
}
