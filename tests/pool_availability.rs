//! Pool availability transitions: cooldown, recovery, and permanent death.

use std::time::{Duration, Instant};

use dork_scraper::config::EngineConfig;
use dork_scraper::proxy_pool::ProxyPool;
use dork_scraper::proxy_pool::proxy::{Protocol, ProxyEntry};

fn entry() -> ProxyEntry {
    ProxyEntry::new(
        "http_203.0.113.1_8080".to_string(),
        Protocol::Http,
        "203.0.113.1".to_string(),
        8080,
        None,
        None,
    )
}

#[tokio::test]
async fn cooldown_then_recovery() {
    let cfg = EngineConfig::default();
    let pool = ProxyPool::new();
    pool.register(entry());

    let proxy = pool.get("http_203.0.113.1_8080").unwrap();
    proxy.report_failure(&cfg);

    assert!(pool.acquire(&cfg).await.is_err(), "should be on cooldown");

    // The default error cooldown (5s) is too long for a fast test; reach
    // in and confirm the `is_available` contract directly instead of
    // sleeping out the real cooldown window.
    assert!(!proxy.is_available(Instant::now()));
    assert!(proxy.is_available(Instant::now() + Duration::from_secs(6)));
}

#[tokio::test]
async fn dead_proxy_never_becomes_available_again() {
    let cfg = EngineConfig::builder().max_fail_count(1).build().unwrap();
    let pool = ProxyPool::new();
    pool.register(entry());

    let proxy = pool.get("http_203.0.113.1_8080").unwrap();
    proxy.report_failure(&cfg);

    assert!(!proxy.is_available(Instant::now() + Duration::from_secs(3600)));
    assert!(pool.acquire(&cfg).await.is_err());
}
