//! A thin dispatcher stub a host process can drive.
//!
//! This is deliberately not a full host-embedding runtime loop — reading
//! the inbound stream, writing the outbound stream, and the interactive
//! dashboard are host-process concerns out of scope for the core (spec
//! §1). What's here is the boundary: decode one line, react against the
//! engine, and produce zero or more outbound messages.

use std::sync::Arc;

use super::error::ControlError;
use super::message::{
    ErrorData, InboundMessage, OutboundMessage, ProxyInfoData, ResultData, StatsData, StatusKind,
    TaskData,
};
use crate::proxy_pool::{ProxyPool, ProxyStatus};
use crate::worker_engine::{ResultStatus, Task, WorkerEngine};

/// Dispatches one decoded inbound message against a running engine and
/// returns the outbound messages it produces, in order.
pub fn dispatch(
    engine: &Arc<WorkerEngine>,
    pool: &Arc<ProxyPool>,
    message: InboundMessage,
) -> Vec<OutboundMessage> {
    match message {
        InboundMessage::Init(_) => vec![OutboundMessage::Status(StatusKind::Initialized)],
        InboundMessage::Task(task_data) => {
            submit_one(engine, task_data);
            Vec::new()
        }
        InboundMessage::TaskBatch(tasks) => {
            for task_data in tasks {
                submit_one(engine, task_data);
            }
            Vec::new()
        }
        InboundMessage::Pause => {
            // Stop() drains in-flight work; a host process that wants to
            // resume later is expected to call Start() again on `resume`.
            let engine = Arc::clone(engine);
            tokio::spawn(async move { engine.stop().await });
            vec![OutboundMessage::Status(StatusKind::Paused)]
        }
        InboundMessage::Resume => {
            engine.start();
            vec![OutboundMessage::Status(StatusKind::Resumed)]
        }
        InboundMessage::GetStats => {
            let snapshot = engine.stats();
            vec![OutboundMessage::Stats(StatsData {
                tasks_total: snapshot.tasks_total,
                tasks_completed: snapshot.tasks_completed,
                tasks_failed: snapshot.tasks_failed,
                urls_found: snapshot.urls_found,
                captcha_count: snapshot.captcha_count,
                block_count: snapshot.block_count,
                elapsed_ms: snapshot.elapsed.as_millis() as u64,
                requests_per_sec: snapshot.requests_per_sec,
            })]
        }
        InboundMessage::Shutdown => {
            let engine = Arc::clone(engine);
            tokio::spawn(async move { engine.stop().await });
            vec![OutboundMessage::Status(StatusKind::Shutdown)]
        }
    }
    .into_iter()
    .chain(proxy_info_if_relevant(pool))
    .collect()
}

fn submit_one(engine: &Arc<WorkerEngine>, task_data: TaskData) {
    let task = Task::new(task_data.dork, task_data.page);
    let _ = engine.submit(task);
}

fn proxy_info_if_relevant(_pool: &Arc<ProxyPool>) -> Vec<OutboundMessage> {
    // Emitted on an explicit cadence by the host loop, not per-dispatch;
    // left as a pure helper so that loop can call it directly.
    Vec::new()
}

/// Build the `proxy_info` snapshot: counts of proxies by health bucket.
#[must_use]
pub fn proxy_info(pool: &ProxyPool) -> OutboundMessage {
    let mut alive = 0u64;
    let mut dead = 0u64;
    let mut quarantined = 0u64;
    let mut total = 0u64;
    for id in pool.all_ids() {
        let Some(entry) = pool.get(&id) else { continue };
        total += 1;
        match entry.status() {
            ProxyStatus::Alive | ProxyStatus::Slow | ProxyStatus::Unknown => alive += 1,
            ProxyStatus::Dead => dead += 1,
            ProxyStatus::Quarantined => quarantined += 1,
        }
    }
    OutboundMessage::ProxyInfo(ProxyInfoData {
        alive,
        dead,
        quarantined,
        total,
    })
}

#[must_use]
pub fn result_to_outbound(result: &crate::worker_engine::TaskResult) -> OutboundMessage {
    let status = match result.status {
        ResultStatus::Success => "success",
        ResultStatus::NoResults => "no_results",
        ResultStatus::Captcha => "captcha",
        ResultStatus::Blocked => "blocked",
        ResultStatus::Error => "error",
    };
    OutboundMessage::Result(ResultData {
        task_id: result.task_id.to_string(),
        dork: result.dork.clone(),
        status: status.to_string(),
        urls: result.urls.clone(),
        error: result.error.clone(),
        proxy_id: result.proxy_id.clone(),
        duration_ms: result.duration.as_millis() as u64,
    })
}

#[must_use]
pub fn error_to_outbound(err: &ControlError) -> OutboundMessage {
    OutboundMessage::Error(ErrorData {
        code: err.code().to_string(),
        message: err.to_string(),
    })
}
