//! Submit lifecycle and buffer-full behavior.

mod common;

use std::sync::Arc;

use dork_scraper::proxy_pool::ProxyPool;
use dork_scraper::search_backend::Classification;
use dork_scraper::stealth::StealthController;
use dork_scraper::{Task, WorkerEngine, WorkerEngineError};

#[tokio::test]
async fn submit_before_start_is_rejected() {
    let cfg = Arc::new(common::fast_test_config());
    let pool = Arc::new(ProxyPool::new());
    let stealth = Arc::new(StealthController::new(&cfg));
    let backend = Arc::new(common::ScriptedBackend::new(vec![Classification::Success]));

    let engine = Arc::new(WorkerEngine::new(
        Arc::clone(&cfg),
        pool,
        stealth,
        backend,
    ));

    let err = engine.submit(Task::new("rust async", 0)).unwrap_err();
    assert!(matches!(err, WorkerEngineError::NotRunning));
}

#[tokio::test]
async fn batch_submit_of_fifty_is_all_accounted_for() {
    let cfg = Arc::new(
        dork_scraper::EngineConfig::builder()
            .workers(4)
            .buffer_size(64)
            .build()
            .unwrap(),
    );
    let pool = Arc::new(ProxyPool::new());
    pool.register(common::fake_proxy("http_203.0.113.1_8080"));
    let stealth = Arc::new(StealthController::new(&cfg));
    let backend = Arc::new(common::ScriptedBackend::new(vec![Classification::Success]));

    let engine = Arc::new(WorkerEngine::new(
        Arc::clone(&cfg),
        pool,
        stealth,
        backend,
    ));
    engine.start();

    for n in 0..50 {
        engine
            .submit(Task::new(format!("dork {n}"), 0))
            .expect("buffer has ample headroom");
    }

    assert_eq!(engine.stats().tasks_total, 50);
    engine.stop().await;
}

#[tokio::test]
async fn buffer_full_with_zero_workers_is_deterministic() {
    let cfg = Arc::new(
        dork_scraper::EngineConfig::builder()
            .workers(0)
            .buffer_size(2)
            .build()
            .unwrap(),
    );
    let pool = Arc::new(ProxyPool::new());
    let stealth = Arc::new(StealthController::new(&cfg));
    let backend = Arc::new(common::ScriptedBackend::new(vec![Classification::Success]));

    let engine = Arc::new(WorkerEngine::new(cfg, pool, stealth, backend));
    engine.start();

    engine.submit(Task::new("a", 0)).expect("slot 1 of 2");
    engine.submit(Task::new("b", 0)).expect("slot 2 of 2");

    let err = engine.submit(Task::new("c", 0)).unwrap_err();
    assert!(matches!(err, WorkerEngineError::BufferFull));
    assert_eq!(engine.stats().tasks_total, 2);

    engine.stop().await;
}
