//! URL extraction from a search results page.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

const RESULT_CONTAINER_SELECTOR: &str = "div.g, div.tF2Cxc, article[data-testid='result']";
const NEXT_PAGE_SELECTOR: &str = "a#pnnext, a[aria-label='Next page']";

static RESULT_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector compiles"));
static ANY_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='http']").expect("static selector compiles"));

pub struct Extracted {
    pub urls: Vec<String>,
    pub has_next_page: bool,
}

/// `own_host` excludes links that point back at the search engine itself
/// (navigation chrome, "cached" links, etc.) from the bare-anchor fallback
/// pass.
#[must_use]
pub fn extract(html: &str, own_host: &str, cap: usize) -> Extracted {
    let doc = Html::parse_document(html);
    let mut seen = std::collections::HashSet::new();
    let mut urls = Vec::new();

    if let Ok(container_sel) = Selector::parse(RESULT_CONTAINER_SELECTOR) {
        for container in doc.select(&container_sel) {
            for link in container.select(&RESULT_LINK) {
                if let Some(href) = link.value().attr("href") {
                    push_candidate(href, own_host, &mut seen, &mut urls, cap);
                }
                if urls.len() >= cap {
                    break;
                }
            }
            if urls.len() >= cap {
                break;
            }
        }
    }

    if urls.is_empty() {
        for link in doc.select(&ANY_LINK) {
            if let Some(href) = link.value().attr("href") {
                push_candidate(href, own_host, &mut seen, &mut urls, cap);
            }
            if urls.len() >= cap {
                break;
            }
        }
    }

    let has_next_page = Selector::parse(NEXT_PAGE_SELECTOR)
        .map(|sel| doc.select(&sel).next().is_some())
        .unwrap_or(false);

    Extracted {
        urls,
        has_next_page,
    }
}

fn push_candidate(
    href: &str,
    own_host: &str,
    seen: &mut std::collections::HashSet<String>,
    urls: &mut Vec<String>,
    cap: usize,
) {
    if urls.len() >= cap {
        return;
    }
    let Some(target) = resolve_redirect(href) else {
        return;
    };
    if target.contains(own_host) {
        return;
    }
    if seen.insert(target.clone()) {
        urls.push(target);
    }
}

/// If `href` is an engine redirect wrapper (`/url?q=…` or `/url?url=…`),
/// decode and return the target; otherwise pass the href through as-is.
/// Returns `None` for hrefs that are neither (e.g. `javascript:` links).
fn resolve_redirect(href: &str) -> Option<String> {
    if let Some(query_start) = href.find('?') {
        if href[..query_start].ends_with("/url") {
            let query = &href[query_start + 1..];
            for pair in query.split('&') {
                if let Some(value) = pair.strip_prefix("q=").or_else(|| pair.strip_prefix("url=")) {
                    return urlencoding::decode(value).ok().map(|c| c.into_owned());
                }
            }
            return None;
        }
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_redirect_wrapper() {
        let html = r#"<html><body><a href="/url?q=https://example.com/page&sa=U">link</a></body></html>"#;
        let extracted = extract(html, "www.google.com", 20);
        assert_eq!(extracted.urls, vec!["https://example.com/page"]);
    }

    #[test]
    fn excludes_own_host_links() {
        let html = r#"<html><body><a href="https://www.google.com/preferences">prefs</a></body></html>"#;
        let extracted = extract(html, "www.google.com", 20);
        assert!(extracted.urls.is_empty());
    }

    #[test]
    fn dedupes_within_one_response() {
        let html = r#"<html><body>
            <a href="https://example.com/a">a</a>
            <a href="https://example.com/a">a again</a>
        </body></html>"#;
        let extracted = extract(html, "www.google.com", 20);
        assert_eq!(extracted.urls.len(), 1);
    }

    #[test]
    fn detects_next_page_affordance() {
        let html = r#"<html><body><a id="pnnext" href="/search?start=10">Next</a></body></html>"#;
        let extracted = extract(html, "www.google.com", 20);
        assert!(extracted.has_next_page);
    }

    #[test]
    fn respects_cap() {
        let mut body = String::from("<html><body>");
        for i in 0..10 {
            body.push_str(&format!(r#"<a href="https://example.com/{i}">x</a>"#));
        }
        body.push_str("</body></html>");
        let extracted = extract(&body, "www.google.com", 3);
        assert_eq!(extracted.urls.len(), 3);
    }
}
