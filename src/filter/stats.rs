//! Filter pipeline statistics: input count, survivors, and reason-coded
//! drop counts per stage.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    LengthBounds,
    UrlDuplicate,
    PublicDomain,
    DomainDuplicate,
    ParametersOnly,
    TldBlacklist,
    TldNotWhitelisted,
    KeywordExcluded,
    KeywordNotIncluded,
    MalformedUrl,
}

impl DropReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::LengthBounds => "length_bounds",
            DropReason::UrlDuplicate => "url_duplicate",
            DropReason::PublicDomain => "public_domain",
            DropReason::DomainDuplicate => "domain_duplicate",
            DropReason::ParametersOnly => "parameters_only",
            DropReason::TldBlacklist => "tld_blacklist",
            DropReason::TldNotWhitelisted => "tld_not_whitelisted",
            DropReason::KeywordExcluded => "keyword_excluded",
            DropReason::KeywordNotIncluded => "keyword_not_included",
            DropReason::MalformedUrl => "malformed_url",
        }
    }
}

#[derive(Default)]
pub struct FilterStats {
    input: AtomicU64,
    survivors: AtomicU64,
    drop_length_bounds: AtomicU64,
    drop_url_duplicate: AtomicU64,
    drop_public_domain: AtomicU64,
    drop_domain_duplicate: AtomicU64,
    drop_parameters_only: AtomicU64,
    drop_tld_blacklist: AtomicU64,
    drop_tld_not_whitelisted: AtomicU64,
    drop_keyword_excluded: AtomicU64,
    drop_keyword_not_included: AtomicU64,
    drop_malformed_url: AtomicU64,
}

impl FilterStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_input(&self) {
        self.input.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_survivor(&self) {
        self.survivors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drop(&self, reason: DropReason) {
        let counter = match reason {
            DropReason::LengthBounds => &self.drop_length_bounds,
            DropReason::UrlDuplicate => &self.drop_url_duplicate,
            DropReason::PublicDomain => &self.drop_public_domain,
            DropReason::DomainDuplicate => &self.drop_domain_duplicate,
            DropReason::ParametersOnly => &self.drop_parameters_only,
            DropReason::TldBlacklist => &self.drop_tld_blacklist,
            DropReason::TldNotWhitelisted => &self.drop_tld_not_whitelisted,
            DropReason::KeywordExcluded => &self.drop_keyword_excluded,
            DropReason::KeywordNotIncluded => &self.drop_keyword_not_included,
            DropReason::MalformedUrl => &self.drop_malformed_url,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> FilterStatsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        FilterStatsSnapshot {
            input: load(&self.input),
            survivors: load(&self.survivors),
            drop_length_bounds: load(&self.drop_length_bounds),
            drop_url_duplicate: load(&self.drop_url_duplicate),
            drop_public_domain: load(&self.drop_public_domain),
            drop_domain_duplicate: load(&self.drop_domain_duplicate),
            drop_parameters_only: load(&self.drop_parameters_only),
            drop_tld_blacklist: load(&self.drop_tld_blacklist),
            drop_tld_not_whitelisted: load(&self.drop_tld_not_whitelisted),
            drop_keyword_excluded: load(&self.drop_keyword_excluded),
            drop_keyword_not_included: load(&self.drop_keyword_not_included),
            drop_malformed_url: load(&self.drop_malformed_url),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterStatsSnapshot {
    pub input: u64,
    pub survivors: u64,
    pub drop_length_bounds: u64,
    pub drop_url_duplicate: u64,
    pub drop_public_domain: u64,
    pub drop_domain_duplicate: u64,
    pub drop_parameters_only: u64,
    pub drop_tld_blacklist: u64,
    pub drop_tld_not_whitelisted: u64,
    pub drop_keyword_excluded: u64,
    pub drop_keyword_not_included: u64,
    pub drop_malformed_url: u64,
}
