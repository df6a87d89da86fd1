//! Task and Result types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A unit of work. `retry` is mutated only by workers, never by the
/// producer, and only ever increases.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub dork: String,
    pub page: u32,
    pub retry: u8,
}

impl Task {
    #[must_use]
    pub fn new(dork: impl Into<String>, page: u32) -> Self {
        Task {
            id: Uuid::new_v4(),
            dork: dork.into(),
            page,
            retry: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Success,
    NoResults,
    Captcha,
    Blocked,
    Error,
}

/// Immutable once emitted.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task_id: Uuid,
    pub dork: String,
    pub status: ResultStatus,
    pub urls: Vec<String>,
    pub error: Option<String>,
    pub proxy_id: Option<String>,
    pub duration: std::time::Duration,
    pub timestamp: DateTime<Utc>,
}

impl TaskResult {
    #[must_use]
    pub fn terminal(
        task: &Task,
        status: ResultStatus,
        urls: Vec<String>,
        error: Option<String>,
        proxy_id: Option<String>,
        duration: std::time::Duration,
    ) -> Self {
        TaskResult {
            task_id: task.id,
            dork: task.dork.clone(),
            status,
            urls,
            error,
            proxy_id,
            duration,
            timestamp: Utc::now(),
        }
    }
}
