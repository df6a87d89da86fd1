//! Stealth/timing controller: fingerprint rotation and request cadence
//! shaping.

pub mod fingerprint;
pub mod session;
pub mod timing;

use std::sync::Arc;

use dashmap::DashMap;

pub use fingerprint::Fingerprint;
pub use session::SessionState;
pub use timing::TimingProfile;

use crate::config::EngineConfig;

/// Owns one `SessionState` per proxy id, created lazily on first use.
pub struct StealthController {
    sessions: DashMap<String, Arc<SessionState>>,
    profile: TimingProfile,
    rotate_every: u32,
    pin_fingerprint: bool,
}

impl StealthController {
    #[must_use]
    pub fn new(cfg: &EngineConfig) -> Self {
        StealthController {
            sessions: DashMap::new(),
            profile: cfg.resolve_timing_profile(),
            rotate_every: cfg.rotate_every(),
            pin_fingerprint: cfg.pin_fingerprint_per_proxy(),
        }
    }

    fn session(&self, proxy_id: &str) -> Arc<SessionState> {
        self.sessions
            .entry(proxy_id.to_string())
            .or_insert_with(|| Arc::new(SessionState::new(self.rotate_every)))
            .clone()
    }

    /// Wait out this proxy's pacing delay, then return the fingerprint to
    /// present for the upcoming request.
    pub async fn prepare(&self, proxy_id: &str) -> Fingerprint {
        let session = self.session(proxy_id);
        session.throttle(&self.profile).await;
        session.fingerprint(self.pin_fingerprint)
    }

    pub fn record_success(&self, proxy_id: &str) {
        self.session(proxy_id).record_success();
    }

    pub fn record_captcha(&self, proxy_id: &str) {
        self.session(proxy_id).record_captcha(&self.profile);
    }

    pub fn record_error(&self, proxy_id: &str) {
        self.session(proxy_id).record_error(&self.profile);
    }

    pub fn record_block(&self, proxy_id: &str) {
        self.session(proxy_id).record_block(&self.profile);
    }
}
