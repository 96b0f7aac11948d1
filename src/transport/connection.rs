//! Outbound WebSocket connection.
//!
//! One [`Connection`] is opened per client run. It is split into a write
//! half (owned by the keepalive loop) and a read half (owned by the
//! receive loop). Dropping both halves closes the socket.

// ============================================================================
// Imports
// ============================================================================

use futures_util::StreamExt;
use futures_util::stream::{SplitSink, SplitStream};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info};

use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// Underlying WebSocket stream, plain or TLS.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of a split connection.
pub type WsWriter = SplitSink<WsStream, Message>;

/// Read half of a split connection.
pub type WsReader = SplitStream<WsStream>;

// ============================================================================
// Connection
// ============================================================================

/// A live WebSocket session to the feed endpoint.
pub struct Connection {
    /// The connected stream.
    stream: WsStream,
    /// Endpoint the stream was opened against.
    endpoint: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Dials `endpoint` and completes the WebSocket handshake.
    ///
    /// No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the TCP, TLS, or WebSocket
    /// handshake fails.
    pub async fn open(endpoint: &str) -> Result<Self> {
        install_crypto_provider();

        debug!(endpoint, "Connecting");

        let (stream, response) = connect_async(endpoint)
            .await
            .map_err(|e| Error::connection(format!("{endpoint}: {e}")))?;

        info!(endpoint, status = %response.status(), "WebSocket connection established");

        Ok(Self {
            stream,
            endpoint: endpoint.to_string(),
        })
    }

    /// Returns the endpoint this connection was opened against.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Splits the connection into its write and read halves.
    #[must_use]
    pub fn split(self) -> (WsWriter, WsReader) {
        self.stream.split()
    }
}

/// Selects the ring provider for `wss://` endpoints.
///
/// Installing twice is harmless; later calls are rejected and ignored.
fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_open_refused_is_connection_error() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let err = Connection::open(&format!("ws://127.0.0.1:{port}"))
            .await
            .expect_err("nothing is listening");
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_open_and_split() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            tokio_tungstenite::accept_async(stream).await.expect("upgrade")
        });

        let endpoint = format!("ws://127.0.0.1:{port}");
        let connection = Connection::open(&endpoint).await.expect("open");
        assert_eq!(connection.endpoint(), endpoint);

        let (_writer, _reader) = connection.split();
        server.await.expect("server task");
    }
}
