//! Payload classification.
//!
//! Every inbound payload is tried as a JSON document. Anything that does
//! not decode is passed through untouched and tagged as text. Decode
//! failure is routine input, never an error.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, from_slice};
use tracing::trace;

use super::event::{MessageEvent, Payload, RawPayload};

// ============================================================================
// MessageClassifier
// ============================================================================

/// Tags inbound payloads as JSON or text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageClassifier;

impl MessageClassifier {
    /// Creates a classifier.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classifies one raw payload.
    ///
    /// Returns a structured event holding the decoded document when the
    /// payload is valid JSON, otherwise a text event holding `raw` as-is.
    #[must_use]
    pub fn classify(&self, raw: RawPayload) -> MessageEvent {
        match from_slice::<Value>(raw.as_bytes()) {
            Ok(value) => MessageEvent::new(Payload::Structured(value)),
            Err(e) => {
                trace!(error = %e, len = raw.as_bytes().len(), "Payload is not JSON, keeping as text");
                MessageEvent::new(Payload::Raw(raw))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
