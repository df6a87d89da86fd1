//! Worker engine error kinds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerEngineError {
    #[error("worker engine is not running")]
    NotRunning,

    #[error("task buffer is full")]
    BufferFull,
}
