//! Search-engine response classifier and URL extractor.

pub mod classify;
pub mod extract;
pub mod http_backend;
pub mod url_builder;

pub use classify::Classification;
pub use http_backend::{HttpSearchBackend, SearchBackend, SearchOutcome};
