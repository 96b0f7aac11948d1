//! Periodic keepalive pings.
//!
//! Each round sends a ping on the write half, raises
//! [`KEEPALIVE_COMPLETED`], then sleeps for the configured interval. The
//! cadence is wall-clock based and independent of inbound traffic.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::{Sink, SinkExt};
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::events::{EventRegistry, KEEPALIVE_COMPLETED};
use crate::protocol::KeepaliveEvent;

// ============================================================================
// KeepaliveLoop
// ============================================================================

/// Sends keepalive pings until the connection or a handler fails.
#[derive(Debug, Clone)]
pub struct KeepaliveLoop {
    interval: Duration,
    registry: Arc<EventRegistry>,
}

impl KeepaliveLoop {
    /// Creates a keepalive loop with the given interval.
    #[inline]
    #[must_use]
    pub fn new(interval: Duration, registry: Arc<EventRegistry>) -> Self {
        Self { interval, registry }
    }

    /// Runs the loop on `writer`.
    ///
    /// Never returns `Ok`. A failed send or a failed handler ends the loop
    /// with that error; there is no retry.
    pub async fn run<W>(self, mut writer: W) -> Result<()>
    where
        W: Sink<Message, Error = WsError> + Unpin,
    {
        debug!(interval_secs = self.interval.as_secs(), "Keepalive loop started");

        let mut rounds: u64 = 0;
        loop {
            // `send` flushes, so the ping is on the wire before the event fires.
            if let Err(e) = writer.send(Message::Ping(Default::default())).await {
                warn!(error = %e, rounds, "Keepalive ping failed");
                return Err(e.into());
            }
            rounds += 1;
            trace!(rounds, "Keepalive ping sent");

            self.registry
                .dispatch(KEEPALIVE_COMPLETED, KeepaliveEvent::now().into())
                .await?;

            sleep(self.interval).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
