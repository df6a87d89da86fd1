//! Error types for the proxy pool.

use thiserror::Error;

/// A single rejected proxy line, carrying its 1-based line number so batch
/// parsing can report every bad line without failing the whole file.
#[derive(Debug, Clone, Error)]
#[error("line {line}: {reason}")]
pub struct ParseLineError {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ProxyPoolError {
    #[error(transparent)]
    ParseLine(#[from] ParseLineError),

    #[error("no proxy available")]
    NoProxyAvailable,

    #[error("proxy not found: {0}")]
    ProxyNotFound(String),
}
