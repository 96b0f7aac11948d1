//! Streaming client.
//!
//! The [`Client`] owns a [`Config`] and an [`EventRegistry`]. Each call to
//! [`Client::start`] opens one connection and runs the keepalive and
//! receive loops on it until either of them fails.
//!
//! # Example
//!
//! ```no_run
//! use seismic_portal::{Client, EventEnvelope, HandlerResult, MESSAGE_RECEIVED};
//!
//! # async fn example() -> seismic_portal::Result<()> {
//! let client = Client::builder().build()?;
//!
//! client.register_handler(MESSAGE_RECEIVED, |envelope: EventEnvelope| async move {
//!     println!("{}", envelope.to_value()?);
//!     HandlerResult::Ok(())
//! });
//!
//! client.start().await
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::SinkExt;
use tokio::runtime::Builder as RuntimeBuilder;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::{JoinError, JoinSet};
use tokio::time::timeout;
use tracing::{Instrument, debug, error, info, info_span};

use crate::error::{Error, HandlerResult, Result};
use crate::events::{EventHandler, EventRegistry, KEEPALIVE_COMPLETED, MESSAGE_RECEIVED};
use crate::identifiers::RunId;
use crate::protocol::EventEnvelope;
use crate::transport::{Connection, KeepaliveLoop, ReceiveLoop};

use super::builder::ClientBuilder;
use super::config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Upper bound on the closing handshake when a run ends.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the client.
pub(crate) struct ClientInner {
    /// Immutable configuration.
    pub config: Config,

    /// Handler table shared with both loops.
    pub registry: Arc<EventRegistry>,
}

/// The two loops of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopKind {
    Keepalive,
    Receive,
}

impl LoopKind {
    /// Category of the events this loop raises.
    const fn category(self) -> &'static str {
        match self {
            Self::Keepalive => KEEPALIVE_COMPLETED,
            Self::Receive => MESSAGE_RECEIVED,
        }
    }
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keepalive => f.write_str("keepalive"),
            Self::Receive => f.write_str("receive"),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Streaming client for one feed endpoint.
///
/// Cloning is cheap and clones share handlers. Independent clients built
/// separately share nothing and may run side by side.
#[derive(Clone)]
pub struct Client {
    /// Shared inner state.
    pub(crate) inner: Arc<ClientInner>,
}

// ============================================================================
// Client - Display
// ============================================================================

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("handler_count", &self.inner.registry.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Client - Public API
// ============================================================================

impl Client {
    /// Creates a configuration builder for the client.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from `config`.
    ///
    /// The configuration is checked when [`start`](Self::start) is called.
    /// Use [`Client::builder`] to check it up front.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                registry: Arc::new(EventRegistry::new()),
            }),
        }
    }

    /// Returns the client configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Returns the handler registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &EventRegistry {
        &self.inner.registry
    }

    /// Registers an async closure for `category`.
    ///
    /// The first handler registered for a category stays bound; later
    /// registrations for the same category are ignored. May be called
    /// before or during a run.
    pub fn register_handler<F, Fut>(&self, category: impl Into<String>, handler: F)
    where
        F: Fn(EventEnvelope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.inner.registry.register(category, handler);
    }

    /// Registers an [`EventHandler`] implementation for `category`.
    ///
    /// Same first-registration-wins policy as
    /// [`register_handler`](Self::register_handler).
    pub fn register_event_handler(
        &self,
        category: impl Into<String>,
        handler: impl EventHandler + 'static,
    ) {
        self.inner.registry.register(category, handler);
    }

    /// Connects and streams events until the connection or a handler fails.
    ///
    /// Both loops are stopped and the connection is released before this
    /// returns. Dropping the returned future stops both loops as well.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the configuration is invalid (no I/O happens)
    /// - [`Error::Connection`] if the endpoint cannot be reached
    /// - [`Error::WebSocket`] or [`Error::ConnectionClosed`] when the
    ///   connection breaks
    /// - [`Error::Handler`] if a registered handler fails
    pub async fn start(&self) -> Result<()> {
        self.inner.config.validate()?;

        let run_id = RunId::generate();
        let span = info_span!("run", %run_id, endpoint = %self.inner.config.endpoint());

        self.run_connection().instrument(span).await
    }

    /// Runs [`start`](Self::start) on a new multi-threaded runtime.
    ///
    /// Blocks the calling thread. Must not be called from inside a Tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the runtime cannot be created, otherwise
    /// whatever [`start`](Self::start) returns.
    pub fn run(&self) -> Result<()> {
        let runtime = RuntimeBuilder::new_multi_thread().enable_all().build()?;
        runtime.block_on(self.start())
    }
}

// ============================================================================
// Client - Internal
// ============================================================================

impl Client {
    /// Opens the connection and supervises both loops.
    async fn run_connection(&self) -> Result<()> {
        let config = &self.inner.config;
        let registry = &self.inner.registry;

        let connection = Connection::open(config.endpoint()).await?;
        let (writer, reader) = connection.split();

        // The keepalive task holds the write half through this lock; it is
        // reclaimed below for the close frame.
        let writer = Arc::new(AsyncMutex::new(writer));
        let keepalive_writer = Arc::clone(&writer);

        let keepalive = KeepaliveLoop::new(config.keepalive_interval(), Arc::clone(registry));
        let receive = ReceiveLoop::new(Arc::clone(registry));

        let mut loops = JoinSet::new();
        let keepalive_id = loops
            .spawn(
                async move {
                    let mut writer = keepalive_writer.lock().await;
                    let result = keepalive.run(&mut *writer).await;
                    (LoopKind::Keepalive, result)
                }
                .in_current_span(),
            )
            .id();
        loops.spawn(async move { (LoopKind::Receive, receive.run(reader).await) }.in_current_span());

        debug!("Keepalive and receive loops spawned");

        let first = loops.join_next().await;

        // Both loops must be gone before the socket is closed and the
        // error surfaces.
        loops.abort_all();
        while loops.join_next().await.is_some() {}

        let mut writer = writer.lock().await;
        match timeout(CLOSE_TIMEOUT, writer.close()).await {
            Ok(Ok(())) => debug!("Close frame sent"),
            Ok(Err(e)) => debug!(error = %e, "Close frame not sent"),
            Err(_) => debug!("Closing handshake timed out"),
        }
        drop(writer);
        info!("Connection released");

        let err = match first {
            Some(Ok((kind, Err(e)))) => {
                error!(loop_kind = %kind, error = %e, "Loop failed");
                e
            }
            Some(Ok((kind, Ok(())))) => {
                error!(loop_kind = %kind, "Loop stopped unexpectedly");
                Error::connection(format!("{kind} loop stopped"))
            }
            Some(Err(join_err)) => {
                let kind = if join_err.id() == keepalive_id {
                    LoopKind::Keepalive
                } else {
                    LoopKind::Receive
                };
                error!(loop_kind = %kind, error = %join_err, "Loop task failed");
                join_error(kind, join_err)
            }
            None => Error::ConnectionClosed,
        };

        Err(err)
    }
}

/// Converts a failed loop task into a crate error.
///
/// A panic can only come from a handler, so it is reported against the
/// category the loop raises.
fn join_error(kind: LoopKind, join_err: JoinError) -> Error {
    if join_err.is_panic() {
        let message = panic_message(join_err.into_panic());
        Error::handler(kind.category(), format!("handler panicked: {message}").into())
    } else {
        Error::connection(format!("{kind} loop cancelled"))
    }
}

/// Extracts the message from a panic payload.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
