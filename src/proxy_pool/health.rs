//! Background health checker.
//!
//! Runs as a detached tokio task so it never blocks `ProxyPool::acquire`;
//! it only ever writes back through the same `report_success`/
//! `report_failure` paths a real request would use, so the state machine
//! has a single entry point regardless of who observed the outcome.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;

use super::ProxyPool;
use crate::config::EngineConfig;

/// Spawn the periodic prober. Returns a handle the caller can abort on
/// shutdown; dropping the handle does not stop the task (use
/// `JoinHandle::abort`).
#[must_use]
pub fn spawn(pool: Arc<ProxyPool>, cfg: Arc<EngineConfig>) -> Option<JoinHandle<()>> {
    let interval = cfg.health_check_interval()?;
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            probe_all(&pool, &cfg).await;
        }
    }))
}

async fn probe_all(pool: &Arc<ProxyPool>, cfg: &Arc<EngineConfig>) {
    let ids = pool.all_ids();
    for id in ids {
        let Some(entry) = pool.get(&id) else {
            continue;
        };
        let client = match reqwest::Client::builder()
            .proxy(reqwest::Proxy::all(entry.to_url()).unwrap_or_else(|_| {
                reqwest::Proxy::all("http://invalid.invalid").expect("static proxy url parses")
            }))
            .timeout(cfg.request_timeout())
            .build()
        {
            Ok(c) => c,
            Err(_) => continue,
        };

        let started = Instant::now();
        match client.head("https://www.google.com").send().await {
            Ok(resp) if resp.status().is_success() || resp.status().is_redirection() => {
                entry.report_success(started.elapsed(), cfg);
            }
            _ => entry.report_failure(cfg),
        }
    }
}
