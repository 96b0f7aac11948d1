//! SeismicPortal streaming client.
//!
//! This library keeps one WebSocket connection open to a real-time event
//! feed, pings it on a fixed interval, classifies every inbound payload as
//! JSON or text, and hands each result to a registered handler.
//!
//! # Architecture
//!
//! Each run of a [`Client`] owns exactly one connection and two loops:
//!
//! - **Keepalive loop**: pings the endpoint, raises `keepalive_completed`
//! - **Receive loop**: reads frames, raises `message_received`
//!
//! Key design principles:
//!
//! - At most one handler per event category, first registration wins
//! - Handlers are awaited before their loop continues
//! - The first loop failure ends the run; the other loop is cancelled and
//!   the connection is released before the error is returned
//! - No reconnects, no buffering, no replay
//!
//! # Quick Start
//!
//! ```no_run
//! use seismic_portal::{Client, EventEnvelope, HandlerResult, MESSAGE_RECEIVED, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::builder()
//!         .endpoint("wss://www.seismicportal.eu/standing_order/websocket")
//!         .keepalive_interval_secs(15)
//!         .build()?;
//!
//!     client.register_handler(MESSAGE_RECEIVED, |envelope: EventEnvelope| async move {
//!         if let Some(message) = envelope.as_message() {
//!             println!("{:?}: {:?}", message.format(), message.payload());
//!         }
//!         HandlerResult::Ok(())
//!     });
//!
//!     client.start().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`Client`], [`ClientBuilder`], [`Config`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`events`] | Handler trait and registry |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Event envelopes and payload classification |
//! | [`transport`] | WebSocket connection and loops |

// ============================================================================
// Modules
// ============================================================================

/// Client entry point and configuration.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Handler registration and dispatch.
pub mod events;

/// Type-safe identifiers.
pub mod identifiers;

/// Event envelopes and payload classification.
pub mod protocol;

/// WebSocket transport layer.
///
/// Connection handling plus the keepalive and receive loops.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Handler implementations use this attribute
pub use async_trait::async_trait;

// Client types
pub use client::{Client, ClientBuilder, Config};

// Error types
pub use error::{Error, HandlerError, HandlerResult, Result};

// Event types
pub use events::{EventHandler, EventRegistry, KEEPALIVE_COMPLETED, MESSAGE_RECEIVED};

// Identifier types
pub use identifiers::RunId;

// Protocol types
pub use protocol::{
    EventEnvelope, KeepaliveEvent, MessageClassifier, MessageEvent, MessageFormat, Payload,
    RawPayload,
};
