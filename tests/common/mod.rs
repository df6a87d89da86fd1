//! Shared test doubles for worker-engine integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dork_scraper::proxy_pool::ProxyEntry;
use dork_scraper::proxy_pool::proxy::Protocol;
use dork_scraper::search_backend::{SearchBackend, SearchOutcome};
use dork_scraper::stealth::Fingerprint;
use dork_scraper::EngineConfig;

/// A backend whose classification sequence is scripted up front; each
/// call to `search` returns the next scripted classification, holding the
/// last one once exhausted.
pub struct ScriptedBackend {
    script: Vec<dork_scraper::search_backend::Classification>,
    call: AtomicUsize,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new(script: Vec<dork_scraper::search_backend::Classification>) -> Self {
        ScriptedBackend {
            script,
            call: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(
        &self,
        _url: &str,
        _proxy: &ProxyEntry,
        _fingerprint: Fingerprint,
        _cfg: &EngineConfig,
    ) -> anyhow::Result<SearchOutcome> {
        let idx = self.call.fetch_add(1, Ordering::SeqCst);
        let classification = self
            .script
            .get(idx)
            .copied()
            .unwrap_or_else(|| *self.script.last().expect("script is non-empty"));

        use dork_scraper::search_backend::Classification;
        let urls = if classification == Classification::Success {
            vec!["https://example.com/result".to_string()]
        } else {
            Vec::new()
        };

        Ok(SearchOutcome {
            urls,
            has_next_page: false,
            classification,
            latency: std::time::Duration::from_millis(1),
            status_code: Some(200),
        })
    }
}

#[must_use]
pub fn fake_proxy(id: &str) -> ProxyEntry {
    ProxyEntry::new(
        id.to_string(),
        Protocol::Http,
        "203.0.113.1".to_string(),
        8080,
        None,
        None,
    )
}

pub fn fast_test_config() -> EngineConfig {
    EngineConfig::builder()
        .timing_profile(dork_scraper::config::TimingProfileName::Aggressive)
        .build()
        .expect("valid test config")
}

pub fn arc_config(cfg: EngineConfig) -> Arc<EngineConfig> {
    Arc::new(cfg)
}
