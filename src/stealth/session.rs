//! Per-proxy session pacing state.
//!
//! `cooldown_until` here tracks local pacing policy (captcha/error/block
//! cooldowns from this controller's own observations) and is distinct
//! from the proxy pool's `cooldown_until`, which reflects upstream
//! adversary signals. The effective wait a caller experiences is the max
//! of the two, since the pool gates `acquire()` independently.

use std::time::Instant;

use parking_lot::Mutex;

use super::fingerprint::{self, Fingerprint};
use super::timing::{SessionCounters, TimingProfile};

pub struct SessionState {
    counters: Mutex<SessionCounters>,
    fingerprint: Mutex<Option<Fingerprint>>,
    rotate_every: u32,
    request_count_for_rotation: std::sync::atomic::AtomicU64,
}

impl SessionState {
    #[must_use]
    pub fn new(rotate_every: u32) -> Self {
        let now = Instant::now();
        SessionState {
            counters: Mutex::new(SessionCounters::new(now)),
            fingerprint: Mutex::new(None),
            rotate_every,
            request_count_for_rotation: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// The fingerprint to present for the next request. When `pin` is
    /// set, the same fingerprint is reused until `rotate_every` requests
    /// have elapsed on this session.
    #[must_use]
    pub fn fingerprint(&self, pin: bool) -> Fingerprint {
        if !pin {
            return fingerprint::random();
        }
        use std::sync::atomic::Ordering;
        let count = self.request_count_for_rotation.load(Ordering::Relaxed);
        let mut slot = self.fingerprint.lock();
        let needs_rotation =
            slot.is_none() || (self.rotate_every > 0 && count % u64::from(self.rotate_every) == 0);
        if needs_rotation {
            *slot = Some(fingerprint::random());
        }
        slot.expect("just set above")
    }

    /// Run the six-step delay computation and sleep for the result.
    pub async fn throttle(&self, profile: &TimingProfile) {
        let now = Instant::now();
        let delay = {
            let mut counters = self.counters.lock();
            super::timing::next_delay(profile, &mut counters, now)
        };
        self.request_count_for_rotation
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn record_success(&self) {}

    pub fn record_captcha(&self, profile: &TimingProfile) {
        let mut counters = self.counters.lock();
        counters.cooldown_until = Some(Instant::now() + profile.captcha_cooldown);
    }

    pub fn record_error(&self, profile: &TimingProfile) {
        let mut counters = self.counters.lock();
        counters.cooldown_until = Some(Instant::now() + profile.error_cooldown);
    }

    pub fn record_block(&self, profile: &TimingProfile) {
        let mut counters = self.counters.lock();
        counters.cooldown_until = Some(Instant::now() + profile.block_cooldown);
    }
}
