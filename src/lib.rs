//! Concurrent search-query scraper engine: proxy pool, stealth timing
//! controller, search backend, worker pool, and filter pipeline.
//!
//! The command-line front-end, interactive dashboard, checkpoint I/O, and
//! output-file formatting beyond a plain URL list are external-collaborator
//! concerns and are intentionally thin or absent here.

pub mod cli;
pub mod config;
pub mod control;
pub mod filter;
pub mod imurl;
pub mod proxy_pool;
pub mod search_backend;
pub mod stealth;
pub mod worker_engine;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use filter::FilterPipeline;
pub use imurl::ImUrl;
pub use proxy_pool::{ProxyEntry, ProxyPool, ProxyPoolError};
pub use search_backend::{HttpSearchBackend, SearchBackend};
pub use stealth::StealthController;
pub use worker_engine::{Task, TaskResult, WorkerEngine, WorkerEngineError};
