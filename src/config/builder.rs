//! Fluent builder for `EngineConfig`
//!
//! Every field has a sane default (see `EngineConfig::default`), so this
//! builder validates *ranges* at `build()` time rather than enforcing
//! presence of required fields at compile time.

use anyhow::{Result, bail};

use super::types::{EngineConfig, SelectionStrategy, TimingProfileName};

#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

impl EngineConfigBuilder {
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    #[must_use]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: u8) -> Self {
        self.config.max_retries = retries;
        self
    }

    #[must_use]
    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.config.retry_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn results_per_page(mut self, n: u32) -> Self {
        self.config.results_per_page = n;
        self
    }

    #[must_use]
    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.config.request_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn selection_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.config.selection_strategy = strategy;
        self
    }

    #[must_use]
    pub fn max_fail_count(mut self, count: u32) -> Self {
        self.config.max_fail_count = count;
        self
    }

    #[must_use]
    pub fn quarantine_threshold(mut self, count: u32) -> Self {
        self.config.quarantine_threshold = count;
        self
    }

    #[must_use]
    pub fn one_in_flight_per_proxy(mut self, enabled: bool) -> Self {
        self.config.one_in_flight_per_proxy = enabled;
        self
    }

    #[must_use]
    pub fn health_check_interval_ms(mut self, ms: Option<u64>) -> Self {
        self.config.health_check_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn timing_profile(mut self, profile: TimingProfileName) -> Self {
        self.config.timing_profile = profile;
        self
    }

    #[must_use]
    pub fn pin_fingerprint_per_proxy(mut self, pin: bool) -> Self {
        self.config.pin_fingerprint_per_proxy = pin;
        self
    }

    #[must_use]
    pub fn rotate_every(mut self, n: u32) -> Self {
        self.config.rotate_every = n;
        self
    }

    #[must_use]
    pub fn url_length_bounds(mut self, min: usize, max: usize) -> Self {
        self.config.min_url_length = min;
        self.config.max_url_length = max;
        self
    }

    #[must_use]
    pub fn parameters_only(mut self, enabled: bool) -> Self {
        self.config.parameters_only = enabled;
        self
    }

    #[must_use]
    pub fn anti_public_enabled(mut self, enabled: bool) -> Self {
        self.config.anti_public_enabled = enabled;
        self
    }

    #[must_use]
    pub fn url_dedup_enabled(mut self, enabled: bool) -> Self {
        self.config.url_dedup_enabled = enabled;
        self
    }

    #[must_use]
    pub fn domain_dedup_enabled(mut self, enabled: bool) -> Self {
        self.config.domain_dedup_enabled = enabled;
        self
    }

    #[must_use]
    pub fn tld_whitelist(mut self, list: Vec<String>) -> Self {
        self.config.tld_whitelist = Some(list);
        self
    }

    #[must_use]
    pub fn tld_blacklist(mut self, list: Vec<String>) -> Self {
        self.config.tld_blacklist = list;
        self
    }

    #[must_use]
    pub fn keyword_include(mut self, list: Vec<String>) -> Self {
        self.config.keyword_include = list;
        self
    }

    #[must_use]
    pub fn keyword_exclude(mut self, list: Vec<String>) -> Self {
        self.config.keyword_exclude = list;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Validate range invariants (`workers` upper bound of 1000, a
    /// non-empty URL length window) and produce the final config.
    ///
    /// `workers == 0` is accepted even though the natural reading of the
    /// bound is `1..1000`: a zero-worker engine is useful for
    /// deterministically filling the task channel with nothing draining
    /// it (buffer-full behavior under test), so the lower bound is
    /// enforced only as "no negative count" (`usize` already guarantees
    /// that), not as "at least one".
    ///
    /// # Errors
    /// Returns an error if `workers` exceeds `1000`, or if
    /// `min_url_length > max_url_length`.
    pub fn build(self) -> Result<EngineConfig> {
        let cfg = self.config;

        if cfg.workers > 1000 {
            bail!("workers must be <= 1000, got {}", cfg.workers);
        }
        if cfg.min_url_length > cfg.max_url_length {
            bail!(
                "min_url_length ({}) must be <= max_url_length ({})",
                cfg.min_url_length,
                cfg.max_url_length
            );
        }

        Ok(cfg)
    }
}
