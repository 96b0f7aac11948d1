//! Client entry point and configuration.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Client`] | Owns handlers, runs one connection per `start` |
//! | [`ClientBuilder`] | Fluent configuration builder |
//! | [`Config`] | Endpoint and keepalive interval |
//!
//! # Example
//!
//! ```no_run
//! use seismic_portal::{Client, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = Client::builder()
//!     .endpoint("wss://www.seismicportal.eu/standing_order/websocket")
//!     .keepalive_interval_secs(15)
//!     .build()?;
//!
//! client.start().await
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Configuration values and validation.
pub mod config;

/// Core client implementation.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use config::{Config, DEFAULT_ENDPOINT, DEFAULT_KEEPALIVE_INTERVAL_SECS};
pub use self::core::Client;
