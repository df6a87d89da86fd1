//! Control-interface error kinds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("parse_error: {0}")]
    ParseError(String),

    #[error("unknown_type: {0}")]
    UnknownType(String),
}

impl ControlError {
    /// The wire error `code` field — a stable string a host process can
    /// pattern-match on.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ControlError::ParseError(_) => "parse_error",
            ControlError::UnknownType(_) => "unknown_type",
        }
    }
}
