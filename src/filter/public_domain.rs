//! Registrable-domain extraction and the public-domain suppression set.
//!
//! No crate already in the dependency graph ships a public-suffix list,
//! so the multi-label suffix table below is a small curated subset
//! covering common second-level TLDs (`co.uk`, `com.au`, …) plus the
//! handful needed by the public domains below. This trades completeness
//! for not adding a dependency whose only use would be this one table.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Multi-label public suffixes — a domain ending in one of these needs an
/// extra label folded into the registrable domain (`foo.co.uk`, not
/// `co.uk`).
const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au",
    "co.jp", "co.nz", "co.za", "com.br", "com.mx", "co.in", "com.cn",
];

/// Destinations the pipeline intentionally excludes from output: major
/// social, search, cloud, and media hosts. Matching is by registrable
/// domain, so any subdomain of an entry here is also suppressed.
static PUBLIC_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "google.com", "google.co.uk", "youtube.com", "facebook.com", "instagram.com",
        "twitter.com", "x.com", "linkedin.com", "reddit.com", "pinterest.com", "tiktok.com",
        "wikipedia.org", "amazon.com", "amazonaws.com", "cloudfront.net", "github.com",
        "microsoft.com", "apple.com", "yahoo.com", "bing.com", "tumblr.com", "medium.com",
        "blogspot.com", "wordpress.com",
    ]
    .into_iter()
    .collect()
});

/// Extract the registrable domain from `host`: the shortest suffix owned
/// by one registrant, respecting the multi-label suffix table above.
/// Bare IP literals and single-label hosts are returned unchanged.
#[must_use]
pub fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return host;
    }

    for suffix in MULTI_LABEL_SUFFIXES {
        if host == *suffix || host.ends_with(&format!(".{suffix}")) {
            let suffix_labels = suffix.split('.').count();
            let take = suffix_labels + 1;
            if labels.len() >= take {
                return labels[labels.len() - take..].join(".");
            }
            return host;
        }
    }

    labels[labels.len() - 2..].join(".")
}

/// `true` if `host`'s registrable domain (or the domain itself) is in the
/// curated public-domain set.
#[must_use]
pub fn is_public(host: &str) -> bool {
    PUBLIC_DOMAINS.contains(registrable_domain(host).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_two_label_domain() {
        assert_eq!(registrable_domain("example.com"), "example.com");
    }

    #[test]
    fn subdomain_collapses_to_registrable() {
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("a.b.c.example.com"), "example.com");
    }

    #[test]
    fn multi_label_suffix_keeps_extra_label() {
        assert_eq!(registrable_domain("foo.co.uk"), "foo.co.uk");
        assert_eq!(registrable_domain("www.foo.co.uk"), "foo.co.uk");
    }

    #[test]
    fn public_domain_detection() {
        assert!(is_public("www.facebook.com"));
        assert!(is_public("facebook.com"));
        assert!(!is_public("example.com"));
    }
}
