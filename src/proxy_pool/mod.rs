//! Proxy pool: parsing, health state, and selection strategies.
//!
//! The one-in-flight-per-proxy lease is the same pattern the crawl engine
//! uses for its per-domain concurrency limiter: a `Semaphore` keyed by
//! entity id, acquired as an `OwnedSemaphorePermit` so the lease outlives
//! the borrow and releases itself on drop.

pub mod error;
pub mod health;
pub mod parse;
pub mod proxy;

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use rand::seq::SliceRandom;
use tokio::sync::{Semaphore, OwnedSemaphorePermit};

pub use error::{ParseLineError, ProxyPoolError};
pub use proxy::{Counters, Protocol, ProxyEntry, ProxyStatus};

use crate::config::{EngineConfig, SelectionStrategy};

/// A leased proxy. Holding this guarantees exclusive use of the proxy for
/// as long as `one_in_flight_per_proxy` is enabled; the lease is released
/// automatically when the guard drops.
pub struct ProxyGuard {
    pub entry: Arc<ProxyEntry>,
    _permit: Option<OwnedSemaphorePermit>,
}

impl std::ops::Deref for ProxyGuard {
    type Target = ProxyEntry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}

pub struct ProxyPool {
    entries: DashMap<String, Arc<ProxyEntry>>,
    leases: DashMap<String, Arc<Semaphore>>,
    rr_cursor: AtomicUsize,
}

impl Default for ProxyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyPool {
    #[must_use]
    pub fn new() -> Self {
        ProxyPool {
            entries: DashMap::new(),
            leases: DashMap::new(),
            rr_cursor: AtomicUsize::new(0),
        }
    }

    /// Parse and register every non-blank, non-comment line of a proxy
    /// list file. Lines that fail to parse are skipped and their errors
    /// collected, rather than failing the whole load — a bad line in a
    /// 10,000-line list should not cost the other 9,999.
    pub fn load_file(path: &Path) -> Result<(Self, Vec<ParseLineError>), std::io::Error> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let pool = Self::new();
        let mut errors = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match parse::parse_line(trimmed, idx + 1) {
                Ok(entry) => pool.register(entry),
                Err(e) => errors.push(e),
            }
        }

        Ok((pool, errors))
    }

    /// Insert or replace an entry by id — later registrations win.
    pub fn register(&self, entry: ProxyEntry) {
        let id = entry.id.clone();
        self.leases
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Semaphore::new(1)));
        self.entries.insert(id, Arc::new(entry));
    }

    pub fn remove(&self, id: &str) {
        self.entries.remove(id);
        self.leases.remove(id);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<ProxyEntry>> {
        self.entries.get(id).map(|e| e.clone())
    }

    #[must_use]
    pub fn all_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn available_ids(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|e| e.value().is_available(now))
            .map(|e| e.key().clone())
            .collect()
    }

    fn select_id(&self, candidates: &[String], cfg: &EngineConfig) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }
        match cfg.selection_strategy() {
            SelectionStrategy::RoundRobin => {
                let idx = self.rr_cursor.fetch_add(1, Ordering::Relaxed) % candidates.len();
                Some(candidates[idx].clone())
            }
            SelectionStrategy::Random => {
                candidates.choose(&mut rand::rng()).cloned()
            }
            SelectionStrategy::LeastUsed => candidates
                .iter()
                .min_by_key(|id| self.get(id).map(|e| e.counters.total()).unwrap_or(0))
                .cloned(),
            SelectionStrategy::LeastLatency => candidates
                .iter()
                .min_by_key(|id| {
                    self.get(id)
                        .and_then(|e| e.counters.avg_latency())
                        .unwrap_or(std::time::Duration::MAX)
                })
                .cloned(),
            SelectionStrategy::WeightedSuccessRate => {
                let weights: Vec<(String, f64)> = candidates
                    .iter()
                    .map(|id| {
                        let rate = self
                            .get(id)
                            .map(|e| e.counters.success_rate())
                            .unwrap_or(1.0);
                        (id.clone(), rate.max(0.01))
                    })
                    .collect();
                let total: f64 = weights.iter().map(|(_, w)| w).sum();
                let mut pick = rand::rng().random::<f64>() * total;
                for (id, w) in &weights {
                    if pick <= *w {
                        return Some(id.clone());
                    }
                    pick -= w;
                }
                weights.last().map(|(id, _)| id.clone())
            }
        }
    }

    /// Acquire an available proxy according to the configured selection
    /// strategy. When `one_in_flight_per_proxy` is set, the returned guard
    /// holds the per-proxy permit until dropped; if every available
    /// candidate is already leased, the first candidate with a free permit
    /// wins, trying candidates in selection order.
    pub async fn acquire(&self, cfg: &EngineConfig) -> Result<ProxyGuard, ProxyPoolError> {
        let candidates = self.available_ids();
        if candidates.is_empty() {
            return Err(ProxyPoolError::NoProxyAvailable);
        }

        if !cfg.one_in_flight_per_proxy() {
            let id = self
                .select_id(&candidates, cfg)
                .ok_or(ProxyPoolError::NoProxyAvailable)?;
            let entry = self.get(&id).ok_or(ProxyPoolError::NoProxyAvailable)?;
            return Ok(ProxyGuard {
                entry,
                _permit: None,
            });
        }

        let mut remaining = candidates;
        while !remaining.is_empty() {
            let id = self
                .select_id(&remaining, cfg)
                .ok_or(ProxyPoolError::NoProxyAvailable)?;
            let Some(sem) = self.leases.get(&id).map(|s| s.clone()) else {
                remaining.retain(|c| c != &id);
                continue;
            };
            if let Ok(permit) = sem.try_acquire_owned() {
                let entry = self.get(&id).ok_or(ProxyPoolError::NoProxyAvailable)?;
                return Ok(ProxyGuard {
                    entry,
                    _permit: Some(permit),
                });
            }
            remaining.retain(|c| c != &id);
        }

        Err(ProxyPoolError::NoProxyAvailable)
    }

    /// Log a one-line summary of proxy health: counts by status plus the
    /// pool-wide success rate. Intended for a periodic call from a host
    /// loop, not from the hot request path.
    pub fn log_statistics(&self) {
        let mut alive = 0u64;
        let mut slow = 0u64;
        let mut dead = 0u64;
        let mut quarantined = 0u64;
        let mut unknown = 0u64;
        let mut total_requests = 0u64;
        let mut total_success = 0u64;

        for entry in self.entries.iter() {
            let proxy = entry.value();
            match proxy.status() {
                ProxyStatus::Alive => alive += 1,
                ProxyStatus::Slow => slow += 1,
                ProxyStatus::Dead => dead += 1,
                ProxyStatus::Quarantined => quarantined += 1,
                ProxyStatus::Unknown => unknown += 1,
            }
            total_requests += proxy.counters.total();
            total_success += proxy.counters.success();
        }

        let success_rate = if total_requests == 0 {
            1.0
        } else {
            total_success as f64 / total_requests as f64
        };

        tracing::info!(
            total = self.len(),
            alive,
            slow,
            dead,
            quarantined,
            unknown,
            success_rate,
            "proxy pool health summary"
        );
    }
}
