//! The control dispatcher reacts against a live engine and
//! produces the outbound messages a host process would forward as wire
//! lines.

mod common;

use std::sync::Arc;

use dork_scraper::control::{self, InboundMessage, OutboundMessage};
use dork_scraper::proxy_pool::ProxyPool;
use dork_scraper::search_backend::Classification;
use dork_scraper::stealth::StealthController;
use dork_scraper::WorkerEngine;

#[tokio::test]
async fn task_then_get_stats_round_trips_through_dispatch() {
    let cfg = Arc::new(common::fast_test_config());
    let pool = Arc::new(ProxyPool::new());
    pool.register(common::fake_proxy("http_203.0.113.1_8080"));
    let stealth = Arc::new(StealthController::new(&cfg));
    let backend = Arc::new(common::ScriptedBackend::new(vec![Classification::Success]));
    let engine = Arc::new(WorkerEngine::new(cfg, Arc::clone(&pool), stealth, backend));
    engine.start();

    let line = r#"{"type":"task","ts":0,"data":{"id":"t1","dork":"site:example.com","page":0}}"#;
    let inbound = InboundMessage::decode(line).expect("valid task envelope");
    let out = control::dispatch(&engine, &pool, inbound);
    assert!(out.is_empty() || matches!(out.as_slice(), [OutboundMessage::ProxyInfo(_)]));

    let stats_line = r#"{"type":"get_stats","ts":0}"#;
    let inbound = InboundMessage::decode(stats_line).unwrap();
    let out = control::dispatch(&engine, &pool, inbound);
    let stats_msg = out
        .into_iter()
        .find_map(|m| match m {
            OutboundMessage::Stats(s) => Some(s),
            _ => None,
        })
        .expect("dispatch should emit a stats message");
    assert_eq!(stats_msg.tasks_total, 1);

    engine.stop().await;
}

#[test]
fn unknown_message_type_surfaces_as_typed_error() {
    let err = InboundMessage::decode(r#"{"type":"bogus","ts":0}"#).unwrap_err();
    let outbound = control::error_to_outbound(&err);
    let encoded = outbound.encode(0).unwrap();
    assert!(encoded.contains("unknown_type"));
}
