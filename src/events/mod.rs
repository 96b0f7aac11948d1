//! Handler registration and dispatch.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventHandler`] | Async callback receiving one [`EventEnvelope`](crate::protocol::EventEnvelope) |
//! | [`EventRegistry`] | At most one handler per category, first registration wins |
//!
//! # Built-in Categories
//!
//! | Category | Raised by |
//! |----------|-----------|
//! | [`MESSAGE_RECEIVED`] | receive loop, once per non-empty inbound payload |
//! | [`KEEPALIVE_COMPLETED`] | keepalive loop, once per flushed ping |
//!
//! Any other string is a legal category; nothing raises it unless the
//! caller dispatches it.

// ============================================================================
// Submodules
// ============================================================================

/// Event handler trait.
pub mod handler;

/// Category-keyed handler table.
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use handler::EventHandler;
pub use registry::{EventRegistry, KEEPALIVE_COMPLETED, MESSAGE_RECEIVED};
