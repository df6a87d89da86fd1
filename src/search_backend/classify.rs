//! Response classification. First match wins.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    NoResults,
    Captcha,
    Blocked,
    RateLimit,
    Error,
}

impl Classification {
    #[must_use]
    pub fn is_retriable(self) -> bool {
        !matches!(self, Classification::Success | Classification::NoResults)
    }

    /// `true` when this outcome should also trigger the proxy's cooldown,
    /// as opposed to only the stealth session's.
    #[must_use]
    pub fn triggers_proxy_cooldown(self) -> bool {
        matches!(
            self,
            Classification::Blocked | Classification::RateLimit | Classification::Captcha
        )
    }
}

static CAPTCHA_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)g-recaptcha|recaptcha|unusual traffic|/recaptcha/|captcha-form")
        .expect("static pattern compiles")
});

static BLOCK_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)/sorry/|detected unusual traffic|access denied|forbidden"#)
        .expect("static pattern compiles")
});

/// Classify a completed HTTP exchange. `extracted_count` is the number of
/// URLs the extractor found in `body`, computed by the caller up front
/// since both classification and the final `success`/`no_results` split
/// need it.
#[must_use]
pub fn classify(status: u16, body: &str, extracted_count: usize) -> Classification {
    if status == 429 {
        return Classification::RateLimit;
    }
    if status == 503 {
        return Classification::Blocked;
    }
    if !(200..400).contains(&status) {
        return Classification::Error;
    }
    if CAPTCHA_MARKERS.is_match(body) {
        return Classification::Captcha;
    }
    if BLOCK_MARKERS.is_match(body) {
        return Classification::Blocked;
    }
    if extracted_count >= 1 {
        return Classification::Success;
    }
    Classification::NoResults
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_wins_over_everything_else() {
        assert_eq!(classify(429, "g-recaptcha", 3), Classification::RateLimit);
    }

    #[test]
    fn service_unavailable_is_blocked() {
        assert_eq!(classify(503, "", 0), Classification::Blocked);
    }

    #[test]
    fn non_2xx_3xx_is_error() {
        assert_eq!(classify(500, "", 0), Classification::Error);
    }

    #[test]
    fn captcha_marker_detected() {
        assert_eq!(
            classify(200, "please solve this g-recaptcha challenge", 0),
            Classification::Captcha
        );
    }

    #[test]
    fn block_marker_detected() {
        assert_eq!(
            classify(200, "we have detected unusual traffic from your computer", 0),
            Classification::Blocked
        );
    }

    #[test]
    fn urls_found_is_success() {
        assert_eq!(classify(200, "<html></html>", 5), Classification::Success);
    }

    #[test]
    fn zero_urls_no_markers_is_no_results() {
        assert_eq!(classify(200, "did not match any documents", 0), Classification::NoResults);
    }
}
