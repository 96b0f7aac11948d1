//! Shared helpers for integration tests.
//!
//! Provides a one-shot local WebSocket server and handler recorders.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::StreamExt;
use parking_lot::Mutex;
use seismic_portal::{Client, EventEnvelope, HandlerResult};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Logging
// ============================================================================

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Server
// ============================================================================

/// Server side of one accepted WebSocket connection.
pub type ServerSocket = WebSocketStream<TcpStream>;

/// Binds a local port and runs `script` on the first connection.
///
/// Returns the `ws://` endpoint and the server task, which yields whatever
/// `script` returns.
pub async fn serve_once<F, Fut, T>(script: F) -> anyhow::Result<(String, JoinHandle<T>)>
where
    F: FnOnce(ServerSocket) -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = format!("ws://{}", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let socket = tokio_tungstenite::accept_async(stream)
            .await
            .expect("websocket upgrade");
        script(socket).await
    });

    Ok((endpoint, handle))
}

/// Reads until the client's next keepalive ping arrives.
pub async fn wait_for_ping(socket: &mut ServerSocket) {
    while let Some(Ok(message)) = socket.next().await {
        if message.is_ping() {
            return;
        }
    }
}

/// Reads until the client side of the connection is gone.
///
/// Returns `true` if the client sent a close frame first.
pub async fn drain_until_closed(socket: &mut ServerSocket) -> bool {
    let mut saw_close = false;
    while let Some(Ok(message)) = socket.next().await {
        saw_close |= message.is_close();
    }
    saw_close
}

// ============================================================================
// Recorders
// ============================================================================

/// Collects every envelope dispatched to one category.
#[derive(Clone, Default)]
pub struct Recorder {
    envelopes: Arc<Mutex<Vec<EventEnvelope>>>,
}

impl Recorder {
    /// Registers this recorder on `client` under `category`.
    pub fn attach(&self, client: &Client, category: &str) {
        let envelopes = Arc::clone(&self.envelopes);
        client.register_handler(category, move |envelope: EventEnvelope| {
            envelopes.lock().push(envelope);
            async { HandlerResult::Ok(()) }
        });
    }

    /// Returns a snapshot of the recorded envelopes.
    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.envelopes.lock().clone()
    }

    /// Returns how many envelopes were recorded.
    pub fn len(&self) -> usize {
        self.envelopes.lock().len()
    }
}

/// Counts invocations for one category.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    /// Registers this counter on `client` under `category`.
    pub fn attach(&self, client: &Client, category: &str) {
        let count = Arc::clone(&self.0);
        client.register_handler(category, move |_envelope: EventEnvelope| {
            count.fetch_add(1, Ordering::SeqCst);
            async { HandlerResult::Ok(()) }
        });
    }

    /// Returns the current count.
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
