//! Search request URL construction.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::imurl::ImUrl;

/// Regional mirror hosts the engine rotates across. A real deployment
/// would source this list from configuration; it is fixed here since the
/// engine itself treats it as an opaque rotation set.
const MIRRORS: &[(&str, &str)] = &[
    ("https", "www.google.com"),
    ("https", "www.google.co.uk"),
    ("https", "www.google.ca"),
    ("https", "www.google.com.au"),
];

const NUISANCE_PARAMS: &[(&str, &str)] = &[("pws", "0"), ("nfpr", "1")];

/// Build the fully-qualified search URL for one `(dork, page)` pair.
#[must_use]
pub fn build(dork: &str, page: u32, results_per_page: u32) -> ImUrl {
    let (scheme, host) = MIRRORS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(("https", "www.google.com"));

    let base = format!("{scheme}://{host}/search");
    let mut url = url::Url::parse(&base).expect("static base always parses");

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", dork);
        pairs.append_pair("num", &results_per_page.to_string());
        pairs.append_pair("hl", "en");
        pairs.append_pair("safe", "off");
        pairs.append_pair("filter", "0");

        let start = page * results_per_page;
        if start != 0 {
            pairs.append_pair("start", &start.to_string());
        }

        let mut rng = rand::rng();
        for (key, value) in NUISANCE_PARAMS {
            if rng.random_bool(0.15) {
                pairs.append_pair(key, value);
            }
        }
    }

    ImUrl::parse(url.as_str()).expect("constructed URL always reparses")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_start_on_first_page() {
        let url = build("site:example.com", 0, 10);
        assert!(!url.query().unwrap_or_default().contains("start="));
    }

    #[test]
    fn includes_start_on_later_pages() {
        let url = build("site:example.com", 2, 10);
        assert!(url.query().unwrap_or_default().contains("start=20"));
    }

    #[test]
    fn percent_encodes_dork() {
        let url = build("a b \"c\"", 0, 10);
        assert!(!url.as_str().contains(' '));
    }
}
