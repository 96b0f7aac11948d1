//! WebSocket transport layer.
//!
//! This module owns the connection to the feed and the two loops that share
//! it for the duration of one run.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐                        ┌─────────────────┐
//! │  Client (Rust)       │                        │  Feed endpoint  │
//! │                      │       WebSocket        │                 │
//! │  KeepaliveLoop ──────┼── ping ───────────────►│                 │
//! │  ReceiveLoop   ◄─────┼── text / binary ───────│                 │
//! └──────────────────────┘                        └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `Connection::open` - Dial the endpoint, no retry
//! 2. `Connection::split` - Write half to keepalive, read half to receive
//! 3. Both loops run until either fails
//! 4. The surviving loop is aborted and both halves are dropped
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket dial and split |
//! | `keepalive` | Periodic ping loop |
//! | `receive` | Inbound frame loop |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection.
pub mod connection;

/// Keepalive ping loop.
pub mod keepalive;

/// Inbound message loop.
pub mod receive;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, WsReader, WsStream, WsWriter};
pub use keepalive::KeepaliveLoop;
pub use receive::ReceiveLoop;
