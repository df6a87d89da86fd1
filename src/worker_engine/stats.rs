//! Atomic run statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct Stats {
    started_at: Instant,
    tasks_total: AtomicU64,
    tasks_completed: AtomicU64,
    tasks_failed: AtomicU64,
    urls_found: AtomicU64,
    captcha_count: AtomicU64,
    block_count: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Stats {
            started_at: Instant::now(),
            tasks_total: AtomicU64::new(0),
            tasks_completed: AtomicU64::new(0),
            tasks_failed: AtomicU64::new(0),
            urls_found: AtomicU64::new(0),
            captcha_count: AtomicU64::new(0),
            block_count: AtomicU64::new(0),
        }
    }

    pub fn incr_submitted(&self) {
        self.tasks_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_completed(&self, urls_found: usize) {
        self.tasks_completed.fetch_add(1, Ordering::Relaxed);
        self.urls_found
            .fetch_add(urls_found as u64, Ordering::Relaxed);
    }

    pub fn incr_failed(&self) {
        self.tasks_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_captcha(&self) {
        self.captcha_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_block(&self) {
        self.block_count.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let elapsed = self.started_at.elapsed();
        let completed = self.tasks_completed.load(Ordering::Relaxed);
        let requests_per_sec = if elapsed.as_secs_f64() > 0.0 {
            completed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        StatsSnapshot {
            tasks_total: self.tasks_total.load(Ordering::Relaxed),
            tasks_completed: completed,
            tasks_failed: self.tasks_failed.load(Ordering::Relaxed),
            urls_found: self.urls_found.load(Ordering::Relaxed),
            captcha_count: self.captcha_count.load(Ordering::Relaxed),
            block_count: self.block_count.load(Ordering::Relaxed),
            elapsed,
            requests_per_sec,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    pub tasks_total: u64,
    pub tasks_completed: u64,
    pub tasks_failed: u64,
    pub urls_found: u64,
    pub captcha_count: u64,
    pub block_count: u64,
    pub elapsed: std::time::Duration,
    pub requests_per_sec: f64,
}
