//! Filter pipeline end-to-end, plus property tests
//! backing the normalize/redirect idempotence claims.

use std::sync::Arc;

use dork_scraper::config::EngineConfig;
use dork_scraper::filter::FilterPipeline;
use proptest::prelude::*;

#[test]
fn full_stage_set_collapses_duplicates_and_rejects_public_domains() {
    let cfg = EngineConfig::builder()
        .anti_public_enabled(true)
        .url_dedup_enabled(true)
        .domain_dedup_enabled(true)
        .build()
        .unwrap();
    let pipeline = FilterPipeline::new(Arc::new(cfg));

    let input = [
        "https://example.com/a?id=1",
        "https://example.com/a/?id=1&utm_source=newsletter",
        "https://example.com/b",
        "https://www.google.com/url?q=https%3A%2F%2Fexample.org%2Fc&sa=U",
        "https://www.facebook.com/some-page",
        "https://twitter.com/someone",
    ];

    let survivors = pipeline.process_all(input);

    // example.com/a and example.com/a?id=1 collapse onto one url key, and
    // example.com/b shares the same registrable domain so domain dedup
    // collapses it too; the redirected example.org survives as a distinct
    // domain; the social platforms are suppressed by the anti-public stage.
    assert_eq!(survivors.len(), 2);
    assert!(survivors.iter().any(|u| u.contains("example.com")));
    assert!(survivors.iter().any(|u| u.contains("example.org")));
    assert!(!survivors.iter().any(|u| u.contains("facebook")));
    assert!(!survivors.iter().any(|u| u.contains("twitter")));

    let stats = pipeline.stats();
    assert_eq!(stats.input, 6);
    assert_eq!(stats.survivors, 2);
}

#[test]
fn disabling_every_toggle_is_the_identity_modulo_length_bounds() {
    let cfg = EngineConfig::builder()
        .anti_public_enabled(false)
        .url_dedup_enabled(false)
        .domain_dedup_enabled(false)
        .parameters_only(false)
        .url_length_bounds(0, 10_000)
        .build()
        .unwrap();
    let pipeline = FilterPipeline::new(Arc::new(cfg));

    let input = vec![
        "https://example.com/a".to_string(),
        "https://example.com/a".to_string(),
        "https://www.facebook.com/x".to_string(),
    ];
    let survivors = pipeline.process_all(input.clone());
    assert_eq!(survivors, input);
}

proptest! {
    #[test]
    fn normalize_is_idempotent_over_generated_hosts(
        host in "[a-z]{3,10}\\.(com|org|net)",
        path in "[a-z/]{0,10}",
        query_key in "[a-z]{1,6}",
        query_val in "[a-z0-9]{0,8}",
    ) {
        let url = format!("https://{host}/{path}?{query_key}={query_val}");
        prop_assert!(dork_scraper::filter::normalize::is_idempotent(&url));
    }

    #[test]
    fn redirect_unwrap_is_idempotent_outside_wrapper_params(
        host in "[a-z]{3,10}\\.(com|org|net)",
        path in "[a-z/]{0,10}",
    ) {
        let url = format!("https://{host}/{path}");
        let once = dork_scraper::filter::redirect::unwrap(&url);
        let twice = dork_scraper::filter::redirect::unwrap(&once);
        prop_assert_eq!(once, twice);
    }
}
