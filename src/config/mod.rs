//! Configuration module for the scraper engine
//!
//! This module provides the `EngineConfig` struct and its builder for
//! configuring the proxy pool, stealth controller, search backend, worker
//! engine, and filter pipeline with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::EngineConfigBuilder;
pub use types::{EngineConfig, SelectionStrategy, TimingProfileName};
