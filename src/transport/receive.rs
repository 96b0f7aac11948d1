//! Inbound message consumption.
//!
//! Reads one frame at a time from the read half, classifies data frames,
//! and raises [`MESSAGE_RECEIVED`]. Each message is fully dispatched before
//! the next frame is read.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::events::{EventRegistry, MESSAGE_RECEIVED};
use crate::protocol::{MessageClassifier, RawPayload};

// ============================================================================
// ReceiveLoop
// ============================================================================

/// Consumes inbound frames until the connection or a handler fails.
#[derive(Debug, Clone)]
pub struct ReceiveLoop {
    classifier: MessageClassifier,
    registry: Arc<EventRegistry>,
}

impl ReceiveLoop {
    /// Creates a receive loop dispatching into `registry`.
    #[inline]
    #[must_use]
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self {
            classifier: MessageClassifier::new(),
            registry,
        }
    }

    /// Runs the loop on `reader`.
    ///
    /// Never returns `Ok`. A read error, a close frame, the end of the
    /// stream, or a failed handler ends the loop; there is no retry.
    pub async fn run<R>(self, mut reader: R) -> Result<()>
    where
        R: Stream<Item = std::result::Result<Message, WsError>> + Unpin,
    {
        debug!("Receive loop started");

        let mut received: u64 = 0;
        loop {
            let message = match reader.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    error!(error = %e, received, "WebSocket read failed");
                    return Err(e.into());
                }
                None => {
                    debug!(received, "WebSocket stream ended");
                    return Err(Error::ConnectionClosed);
                }
            };

            let raw = match message {
                Message::Text(text) => RawPayload::Text(text.as_str().to_owned()),
                Message::Binary(bytes) => RawPayload::Binary(bytes.to_vec()),
                Message::Close(frame) => {
                    debug!(?frame, received, "WebSocket closed by remote");
                    return Err(Error::ConnectionClosed);
                }
                // Control frames are answered by tungstenite itself.
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
                    trace!("Control frame consumed");
                    continue;
                }
            };

            if raw.is_empty() {
                trace!("Skipping empty payload");
                continue;
            }

            let event = self.classifier.classify(raw);
            trace!(format = event.format().as_str(), "Message classified");

            self.registry
                .dispatch(MESSAGE_RECEIVED, event.into())
                .await?;
            received += 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
