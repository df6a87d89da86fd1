//! Named timing profiles and the delay computation.
//!
//! `next_delay` is the engine's six-step pacing computation: a Gaussian
//! base delay, a slowdown factor driven by how far into the session the
//! proxy is, a burst pause every `burst_size` requests, a full session
//! cooldown every `session_max_requests` requests, a final jitter
//! multiply, and a short-circuit when an outstanding captcha/error/block
//! cooldown on the session hasn't elapsed yet.

use std::time::{Duration, Instant};

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::TimingProfileName;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingProfile {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub burst_size: u32,
    pub burst_pause: Duration,
    pub session_max_requests: u32,
    pub session_cooldown: Duration,
    pub jitter_pct: f64,
    pub error_cooldown: Duration,
    pub captcha_cooldown: Duration,
    pub block_cooldown: Duration,
    /// Multiplier applied at `session_max_requests` via the slowdown
    /// factor in step 2; profiles that favor patience ramp this higher.
    pub slowdown_factor: f64,
}

impl TimingProfile {
    #[must_use]
    pub fn named(name: TimingProfileName) -> Self {
        match name {
            TimingProfileName::Aggressive => TimingProfile {
                min_delay: Duration::from_millis(100),
                max_delay: Duration::from_millis(500),
                burst_size: 5,
                burst_pause: Duration::from_millis(300),
                session_max_requests: 200,
                session_cooldown: Duration::from_secs(10),
                jitter_pct: 0.1,
                error_cooldown: Duration::from_secs(5),
                captcha_cooldown: Duration::from_secs(30),
                block_cooldown: Duration::from_secs(120),
                slowdown_factor: 1.5,
            },
            TimingProfileName::Normal => TimingProfile {
                min_delay: Duration::from_millis(500),
                max_delay: Duration::from_millis(2_000),
                burst_size: 8,
                burst_pause: Duration::from_secs(2),
                session_max_requests: 100,
                session_cooldown: Duration::from_secs(30),
                jitter_pct: 0.2,
                error_cooldown: Duration::from_secs(10),
                captcha_cooldown: Duration::from_secs(60),
                block_cooldown: Duration::from_secs(300),
                slowdown_factor: 2.0,
            },
            TimingProfileName::Cautious => TimingProfile {
                min_delay: Duration::from_millis(2_000),
                max_delay: Duration::from_millis(6_000),
                burst_size: 4,
                burst_pause: Duration::from_secs(5),
                session_max_requests: 50,
                session_cooldown: Duration::from_secs(60),
                jitter_pct: 0.3,
                error_cooldown: Duration::from_secs(20),
                captcha_cooldown: Duration::from_secs(120),
                block_cooldown: Duration::from_secs(600),
                slowdown_factor: 2.5,
            },
            TimingProfileName::Stealth => TimingProfile {
                min_delay: Duration::from_millis(5_000),
                max_delay: Duration::from_millis(15_000),
                burst_size: 2,
                burst_pause: Duration::from_secs(15),
                session_max_requests: 25,
                session_cooldown: Duration::from_secs(180),
                jitter_pct: 0.4,
                error_cooldown: Duration::from_secs(30),
                captcha_cooldown: Duration::from_secs(300),
                block_cooldown: Duration::from_secs(1_800),
                slowdown_factor: 3.0,
            },
        }
    }

    /// Step 1: Gaussian base delay, mean `(min+max)/2`, stddev
    /// `(max-min)/4`, clamped to `[min, max]`.
    fn base_delay(&self) -> Duration {
        let min = self.min_delay.as_secs_f64();
        let max = self.max_delay.as_secs_f64();
        let mean = (min + max) / 2.0;
        let std_dev = ((max - min) / 4.0).max(0.001);
        let sampled = Normal::new(mean, std_dev)
            .map(|dist| dist.sample(&mut rand::rng()))
            .unwrap_or(mean);
        Duration::from_secs_f64(sampled.clamp(min, max))
    }
}

/// Mutable per-session bookkeeping the six-step computation reads and
/// updates. Lives behind a single lock in [`super::session::SessionState`]
/// since every step depends on the previous one's output.
#[derive(Debug, Clone, Copy)]
pub struct SessionCounters {
    pub request_count: u32,
    pub burst_count: u32,
    pub session_start: Instant,
    pub cooldown_until: Option<Instant>,
}

impl SessionCounters {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        SessionCounters {
            request_count: 0,
            burst_count: 0,
            session_start: now,
            cooldown_until: None,
        }
    }

    fn reset(&mut self, now: Instant) {
        self.request_count = 0;
        self.burst_count = 0;
        self.session_start = now;
    }
}

/// Run the six-step computation, mutating `counters` in place, and return
/// the delay to sleep before the next request.
pub fn next_delay(profile: &TimingProfile, counters: &mut SessionCounters, now: Instant) -> Duration {
    // Step 6 first: an outstanding cooldown from a captcha/error/block
    // short-circuits the whole computation.
    if let Some(until) = counters.cooldown_until {
        if now < until {
            return until - now;
        }
        counters.cooldown_until = None;
    }

    // Step 1.
    let mut delay = profile.base_delay().as_secs_f64();

    // Step 2: slowdown factor.
    if profile.session_max_requests > 0 {
        let progress = f64::from(counters.request_count) / f64::from(profile.session_max_requests);
        delay *= 1.0 + progress * (profile.slowdown_factor - 1.0);
    }

    // Step 3: burst pause.
    counters.burst_count += 1;
    if counters.burst_count >= profile.burst_size {
        delay += profile.burst_pause.as_secs_f64();
        counters.burst_count = 0;
    }

    // Step 4: session cooldown and reset.
    counters.request_count += 1;
    if counters.request_count >= profile.session_max_requests {
        delay += profile.session_cooldown.as_secs_f64();
        counters.reset(now);
    }

    // Step 5: jitter multiply.
    let jitter = rand::rng().random_range(-1.0..=1.0);
    delay *= 1.0 + profile.jitter_pct * jitter;

    Duration::from_secs_f64(delay.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cooldown_short_circuits_computation() {
        let profile = TimingProfile::named(TimingProfileName::Normal);
        let now = Instant::now();
        let mut counters = SessionCounters::new(now);
        counters.cooldown_until = Some(now + Duration::from_secs(5));
        let delay = next_delay(&profile, &mut counters, now);
        assert!(delay >= Duration::from_secs(4));
    }

    #[test]
    fn session_resets_after_max_requests() {
        let profile = TimingProfile::named(TimingProfileName::Aggressive);
        let now = Instant::now();
        let mut counters = SessionCounters::new(now);
        counters.request_count = profile.session_max_requests - 1;
        let _ = next_delay(&profile, &mut counters, now);
        assert_eq!(counters.request_count, 0);
    }

    #[test]
    fn delay_never_negative() {
        let profile = TimingProfile::named(TimingProfileName::Stealth);
        let now = Instant::now();
        let mut counters = SessionCounters::new(now);
        for _ in 0..50 {
            let d = next_delay(&profile, &mut counters, now);
            assert!(d >= Duration::ZERO);
        }
    }
}
