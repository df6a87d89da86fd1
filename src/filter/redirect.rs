//! Redirect unwrap stage.
//!
//! Engine redirect wrappers (`/url?q=…`) are already handled at extraction
//! time (see [`crate::search_backend::extract`]); this stage catches the
//! same family of wrapper parameters on URLs that reach the filter from
//! any other source, so the pipeline does not depend on the extractor
//! having already unwrapped them.

const REDIRECT_PARAMS: &[&str] = &["q", "url", "u", "redirect", "goto", "target", "link"];

/// If `url`'s path ends in `/url` (or any path) and carries one of the
/// known redirect-wrapper query parameters, return the percent-decoded
/// target. Otherwise return `url` unchanged. Idempotent outside the
/// recognized patterns: a URL with no matching parameter is returned
/// as-is, and the target of an unwrap never itself carries the same
/// wrapper parameter by construction of the engines this targets.
#[must_use]
pub fn unwrap(url: &str) -> String {
    let Some(query_start) = url.find('?') else {
        return url.to_string();
    };
    let query = &url[query_start + 1..];
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if REDIRECT_PARAMS.contains(&key) {
            if let Ok(decoded) = urlencoding::decode(value) {
                return decoded.into_owned();
            }
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_q_param() {
        let out = unwrap("https://www.google.com/url?q=https%3A%2F%2Fexample.com%2Fa&sa=U");
        assert_eq!(out, "https://example.com/a");
    }

    #[test]
    fn unwraps_redirect_param() {
        let out = unwrap("https://example.com/out?redirect=https%3A%2F%2Ftarget.example%2Fp");
        assert_eq!(out, "https://target.example/p");
    }

    #[test]
    fn passes_through_plain_url() {
        let out = unwrap("https://example.com/a/b?x=1");
        assert_eq!(out, "https://example.com/a/b?x=1");
    }

    #[test]
    fn idempotent_outside_recognized_patterns() {
        let url = "https://example.com/a?x=1&y=2";
        assert_eq!(unwrap(url), unwrap(&unwrap(url)));
    }
}
