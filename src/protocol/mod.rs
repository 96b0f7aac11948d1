//! Event envelopes and inbound payload classification.
//!
//! # Envelope Overview
//!
//! | Envelope | Raised by | Purpose |
//! |----------|-----------|---------|
//! | [`MessageEvent`] | receive loop | One inbound payload, tagged JSON or text |
//! | [`KeepaliveEvent`] | keepalive loop | A keepalive ping was flushed |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `classify` | JSON-or-text detection for inbound payloads |
//! | `event` | Envelope value types |

// ============================================================================
// Submodules
// ============================================================================

/// Payload classification.
pub mod classify;

/// Event envelope types.
pub mod event;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::MessageClassifier;
pub use event::{EventEnvelope, KeepaliveEvent, MessageEvent, MessageFormat, Payload, RawPayload};
