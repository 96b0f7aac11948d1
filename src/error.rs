//! Error types for the SeismicPortal streaming client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use seismic_portal::{Client, Result};
//!
//! async fn example(client: &Client) -> Result<()> {
//!     client.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::Json`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`], [`Error::WebSocket`] |
//! | Handler | [`Error::Handler`] |
//! | External | [`Error::Io`] |
//!
//! A payload that fails to decode as JSON is not an error. It is delivered
//! to handlers as text (see [`crate::protocol::MessageClassifier`]).

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

/// Error raised by a registered event handler.
///
/// Any error type can be boxed into this, so handlers may use `?` freely.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of event handlers.
pub type HandlerResult = StdResult<(), HandlerError>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// A failing run surfaces exactly one of these.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned before any network activity when the endpoint or the
    /// keepalive interval is invalid. Never retried.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    ///
    /// Returned when the connection cannot be established.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// WebSocket connection closed by the remote end.
    ///
    /// Returned when a close frame arrives or the stream ends.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Handler Errors
    // ========================================================================
    /// A registered handler failed while processing an event.
    ///
    /// Terminates the run exactly like a connection failure.
    #[error("Handler for '{category}' failed: {source}")]
    Handler {
        /// Category the failing handler was registered under.
        category: String,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON deserialization error (configuration loading only).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket transport error while reading or writing.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a handler error for the given category.
    #[inline]
    pub fn handler(category: impl Into<String>, source: HandlerError) -> Self {
        Self::Handler {
            category: category.into(),
            source,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Json(_))
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if a registered handler caused this error.
    #[inline]
    #[must_use]
    pub fn is_handler_error(&self) -> bool {
        matches!(self, Self::Handler { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    use tokio_tungstenite::tungstenite::error::ProtocolError;

    use crate::client::Config;

    #[test]
    fn test_unreachable_endpoint_message() {
        let err = Error::connection("ws://127.0.0.1:9: connection refused");
        assert_eq!(
            err.to_string(),
            "Connection failed: ws://127.0.0.1:9: connection refused"
        );
        assert!(err.is_connection_error());
        assert!(!err.is_handler_error());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("endpoint must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: endpoint must not be empty"
        );
        assert!(err.is_config_error());
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_handler_error_keeps_category_and_source() {
        let err = Error::handler("message_received", "boom".into());
        assert_eq!(err.to_string(), "Handler for 'message_received' failed: boom");
        assert!(err.is_handler_error());
        assert!(!err.is_connection_error());

        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "boom");
    }

    #[test]
    fn test_broken_stream_errors_end_a_run_as_connection_errors() {
        let closed = Error::ConnectionClosed;
        assert_eq!(closed.to_string(), "Connection closed");
        assert!(closed.is_connection_error());

        let protocol: Error = WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake).into();
        assert!(matches!(protocol, Error::WebSocket(_)));
        assert!(protocol.is_connection_error());
        assert!(!protocol.is_config_error());
    }

    #[test]
    fn test_malformed_config_json_is_config_error() {
        let err = Config::from_json_str(r#"{"endpoint": "wss://feed", "keepaliveIntervalSeconds": }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_config_error());
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_runtime_setup_failure_is_io() {
        let err: Error = IoError::new(ErrorKind::Other, "no reactor threads").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "IO error: no reactor threads");
        assert!(!err.is_config_error());
        assert!(!err.is_connection_error());
        assert!(!err.is_handler_error());
    }
}
