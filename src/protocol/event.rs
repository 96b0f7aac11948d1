//! Event envelope types.
//!
//! Envelopes are immutable values handed to registered handlers. They carry
//! no identity beyond their fields.
//!
//! # Serialized Form
//!
//! ```json
//! { "type": "message", "format": "json", "data": { "id": "eq1" } }
//! { "type": "message", "format": "text", "data": "not json" }
//! { "type": "keepalive", "time": "2026-10-18T07:04:00.123Z" }
//! ```

// ============================================================================
// Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// MessageFormat
// ============================================================================

/// Format tag assigned by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageFormat {
    /// Payload decoded as a JSON document.
    #[serde(rename = "json")]
    Structured,
    /// Payload did not decode and is kept verbatim.
    #[serde(rename = "text")]
    Text,
}

impl MessageFormat {
    /// Returns the serialized tag.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "json",
            Self::Text => "text",
        }
    }
}

// ============================================================================
// RawPayload
// ============================================================================

/// An inbound payload exactly as it came off the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    /// Text frame content.
    Text(String),
    /// Binary frame content.
    Binary(Vec<u8>),
}

impl RawPayload {
    /// Returns the payload bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Returns `true` if the payload carries no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Returns the text content for text payloads.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

impl Serialize for RawPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Binary(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
        }
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Content of a [`MessageEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Decoded JSON document.
    Structured(Value),
    /// Original bytes, unchanged.
    Raw(RawPayload),
}

impl Payload {
    /// Returns the format tag matching this payload.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> MessageFormat {
        match self {
            Self::Structured(_) => MessageFormat::Structured,
            Self::Raw(_) => MessageFormat::Text,
        }
    }
}

// ============================================================================
// MessageEvent
// ============================================================================

/// One classified inbound payload.
///
/// The format tag is derived from the payload, so the two never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageEvent {
    format: MessageFormat,
    #[serde(rename = "data")]
    payload: Payload,
}

impl MessageEvent {
    /// Creates a message event from a classified payload.
    #[inline]
    #[must_use]
    pub fn new(payload: Payload) -> Self {
        Self {
            format: payload.format(),
            payload,
        }
    }

    /// Returns the format tag.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> MessageFormat {
        self.format
    }

    /// Returns the payload.
    #[inline]
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consumes the event and returns the payload.
    #[inline]
    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Returns the decoded document for structured messages.
    #[inline]
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Structured(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }

    /// Returns the raw payload for text messages.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> Option<&RawPayload> {
        match &self.payload {
            Payload::Structured(_) => None,
            Payload::Raw(raw) => Some(raw),
        }
    }
}

// ============================================================================
// KeepaliveEvent
// ============================================================================

/// A keepalive ping was flushed to the remote end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeepaliveEvent {
    time: DateTime<Utc>,
}

impl KeepaliveEvent {
    /// Creates a keepalive event stamped with the current time.
    #[inline]
    #[must_use]
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a keepalive event with an explicit timestamp.
    #[inline]
    #[must_use]
    pub const fn at(time: DateTime<Utc>) -> Self {
        Self { time }
    }

    /// Returns when the keepalive completed.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.time
    }
}

// ============================================================================
// EventEnvelope
// ============================================================================

/// The value passed to a registered handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// An inbound message was classified.
    Message(MessageEvent),
    /// A keepalive round completed.
    Keepalive(KeepaliveEvent),
}

impl EventEnvelope {
    /// Returns the message event, if this is one.
    #[inline]
    #[must_use]
    pub fn as_message(&self) -> Option<&MessageEvent> {
        match self {
            Self::Message(event) => Some(event),
            Self::Keepalive(_) => None,
        }
    }

    /// Returns the keepalive event, if this is one.
    #[inline]
    #[must_use]
    pub fn as_keepalive(&self) -> Option<&KeepaliveEvent> {
        match self {
            Self::Message(_) => None,
            Self::Keepalive(event) => Some(event),
        }
    }

    /// Converts the envelope into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the envelope cannot be represented
    /// as JSON.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl From<MessageEvent> for EventEnvelope {
    fn from(event: MessageEvent) -> Self {
        Self::Message(event)
    }
}

impl From<KeepaliveEvent> for EventEnvelope {
    fn from(event: KeepaliveEvent) -> Self {
        Self::Keepalive(event)
    }
}

// ============================================================================
// Tests
// ============================================================================
