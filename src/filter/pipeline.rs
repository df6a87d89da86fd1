//! The filter pipeline: seven independently-toggleable stages applied in
//! order to each result URL.
//!
//! Stages only ever remove candidates — never add or reorder survivors —
//! so the pipeline is monotone: enabling more stages can only shrink the
//! output set for a fixed input stream.

use super::bloom::BloomSet;
use super::public_domain;
use super::redirect;
use super::normalize;
use super::stats::{DropReason, FilterStats, FilterStatsSnapshot};
use crate::config::EngineConfig;

pub struct FilterPipeline {
    cfg: std::sync::Arc<EngineConfig>,
    url_bloom: BloomSet,
    domain_bloom: BloomSet,
    stats: FilterStats,
}

impl FilterPipeline {
    #[must_use]
    pub fn new(cfg: std::sync::Arc<EngineConfig>) -> Self {
        let url_bloom = BloomSet::new(cfg.url_bloom_expected_items(), cfg.bloom_false_positive_rate());
        let domain_bloom =
            BloomSet::new(cfg.domain_bloom_expected_items(), cfg.bloom_false_positive_rate());
        FilterPipeline {
            cfg,
            url_bloom,
            domain_bloom,
            stats: FilterStats::new(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> FilterStatsSnapshot {
        self.stats.snapshot()
    }

    /// Replace both bloom filters with fresh, empty ones of the same
    /// sizing. Does not reset stage counters — those describe the whole
    /// run, not just the current filter generation.
    pub fn reset(&self) {
        self.url_bloom.reset();
        self.domain_bloom.reset();
    }

    /// Run one URL through every enabled stage. Returns `Some(url)` if it
    /// survives (possibly rewritten by the redirect-unwrap stage),
    /// `None` if any stage dropped it.
    pub fn process(&self, url: &str) -> Option<String> {
        self.stats.record_input();

        // Stage 1: length.
        if url.len() < self.cfg.min_url_length() || url.len() > self.cfg.max_url_length() {
            self.stats.record_drop(DropReason::LengthBounds);
            return None;
        }

        // Stage 2: redirect unwrap.
        let unwrapped = redirect::unwrap(url);

        let parsed = match url::Url::parse(&unwrapped) {
            Ok(u) => u,
            Err(_) => {
                self.stats.record_drop(DropReason::MalformedUrl);
                return None;
            }
        };
        let Some(host) = parsed.host_str().map(str::to_string) else {
            self.stats.record_drop(DropReason::MalformedUrl);
            return None;
        };

        // Stage 3: URL dedup.
        if self.cfg.url_dedup_enabled() {
            let Some(key) = normalize::normalize(&unwrapped) else {
                self.stats.record_drop(DropReason::MalformedUrl);
                return None;
            };
            if self.url_bloom.check_and_insert(&key) {
                self.stats.record_drop(DropReason::UrlDuplicate);
                return None;
            }
        }

        // Stage 4: anti-public.
        if self.cfg.anti_public_enabled() && public_domain::is_public(&host) {
            self.stats.record_drop(DropReason::PublicDomain);
            return None;
        }

        // Stage 5: domain dedup.
        let registrable = public_domain::registrable_domain(&host);
        if self.cfg.domain_dedup_enabled() {
            if self.domain_bloom.check_and_insert(&registrable) {
                self.stats.record_drop(DropReason::DomainDuplicate);
                return None;
            }
        }

        // Stage 6: parameters-only.
        if self.cfg.parameters_only() && parsed.query().unwrap_or("").is_empty() {
            self.stats.record_drop(DropReason::ParametersOnly);
            return None;
        }

        // Stage 7: TLD whitelist/blacklist, keyword include/exclude.
        let tld = registrable.rsplit('.').next().unwrap_or(&registrable);
        if self.cfg.tld_blacklist().iter().any(|t| t == tld) {
            self.stats.record_drop(DropReason::TldBlacklist);
            return None;
        }
        if let Some(whitelist) = self.cfg.tld_whitelist() {
            if !whitelist.iter().any(|t| t == tld) {
                self.stats.record_drop(DropReason::TldNotWhitelisted);
                return None;
            }
        }
        if !self.cfg.keyword_exclude().is_empty()
            && self
                .cfg
                .keyword_exclude()
                .iter()
                .any(|k| unwrapped.contains(k.as_str()))
        {
            self.stats.record_drop(DropReason::KeywordExcluded);
            return None;
        }
        if !self.cfg.keyword_include().is_empty()
            && !self
                .cfg
                .keyword_include()
                .iter()
                .any(|k| unwrapped.contains(k.as_str()))
        {
            self.stats.record_drop(DropReason::KeywordNotIncluded);
            return None;
        }

        self.stats.record_survivor();
        Some(unwrapped)
    }

    /// Run a batch through [`process`], preserving first-seen order among
    /// survivors.
    pub fn process_all<I: IntoIterator<Item = S>, S: AsRef<str>>(&self, urls: I) -> Vec<String> {
        urls.into_iter()
            .filter_map(|u| self.process(u.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> FilterPipeline {
        FilterPipeline::new(std::sync::Arc::new(EngineConfig::default()))
    }

    #[test]
    fn end_to_end_scenario() {
        let cfg = EngineConfig::builder()
            .anti_public_enabled(true)
            .url_dedup_enabled(true)
            .build()
            .unwrap();
        let pipeline = FilterPipeline::new(std::sync::Arc::new(cfg));

        let input = [
            "https://example.com/a",
            "https://example.com/a/",
            "https://example.com/b?utm_source=x",
            "https://example.com/b",
            "https://www.facebook.com/foo",
        ];
        let survivors = pipeline.process_all(input);

        assert_eq!(survivors.len(), 2);
        assert!(survivors.iter().any(|u| u.contains("/a")));
        assert!(survivors.iter().any(|u| u.contains("/b")));
        assert!(!survivors.iter().any(|u| u.contains("facebook")));
    }

    #[test]
    fn domain_dedup_collapses_to_one_survivor() {
        let cfg = EngineConfig::builder()
            .anti_public_enabled(true)
            .url_dedup_enabled(true)
            .domain_dedup_enabled(true)
            .build()
            .unwrap();
        let pipeline = FilterPipeline::new(std::sync::Arc::new(cfg));

        let input = [
            "https://example.com/a",
            "https://example.com/a/",
            "https://example.com/b?utm_source=x",
            "https://example.com/b",
            "https://www.facebook.com/foo",
        ];
        let survivors = pipeline.process_all(input);
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn adding_stages_only_shrinks_output() {
        let input = vec![
            "https://example.com/a".to_string(),
            "https://example.com/a".to_string(),
            "https://www.facebook.com/x".to_string(),
        ];

        let lenient = FilterPipeline::new(std::sync::Arc::new(
            EngineConfig::builder()
                .url_dedup_enabled(false)
                .anti_public_enabled(false)
                .build()
                .unwrap(),
        ));
        let strict = FilterPipeline::new(std::sync::Arc::new(
            EngineConfig::builder()
                .url_dedup_enabled(true)
                .anti_public_enabled(true)
                .build()
                .unwrap(),
        ));

        let lenient_out = lenient.process_all(input.clone());
        let strict_out = strict.process_all(input);
        assert!(strict_out.len() <= lenient_out.len());
    }

    #[test]
    fn rejects_out_of_bounds_length() {
        let pipeline = pipeline();
        assert_eq!(pipeline.process("http://a"), None);
    }

    #[test]
    fn unwraps_redirect_before_dedup() {
        let pipeline = pipeline();
        let survivor = pipeline
            .process("https://www.google.com/url?q=https%3A%2F%2Fexample.com%2Fpage123&sa=U")
            .unwrap();
        assert_eq!(survivor, "https://example.com/page123");
    }
}
