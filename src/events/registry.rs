//! Category-keyed handler table.
//!
//! Holds at most one handler per category. A second registration under a
//! taken category is ignored and the first handler stays bound.

// ============================================================================
// Imports
// ============================================================================

use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::EventEnvelope;

use super::handler::EventHandler;

// ============================================================================
// Constants
// ============================================================================

/// Category raised for every classified inbound message.
pub const MESSAGE_RECEIVED: &str = "message_received";

/// Category raised after every keepalive ping.
pub const KEEPALIVE_COMPLETED: &str = "keepalive_completed";

// ============================================================================
// Types
// ============================================================================

/// Map of categories to their handler.
type HandlerMap = FxHashMap<String, Arc<dyn EventHandler>>;

// ============================================================================
// EventRegistry
// ============================================================================

/// Handler table shared by the client and both of its loops.
///
/// # Thread Safety
///
/// Registration takes a write lock; dispatch holds a read lock only long
/// enough to clone the handler, never across the handler's await.
#[derive(Default)]
pub struct EventRegistry {
    handlers: RwLock<HandlerMap>,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("categories", &self.handlers.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EventRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `category` unless a handler is already bound.
    ///
    /// Returns `true` if the handler was stored. A duplicate registration
    /// is not an error; it is dropped and `false` is returned.
    pub fn register(&self, category: impl Into<String>, handler: impl EventHandler + 'static) -> bool {
        match self.handlers.write().entry(category.into()) {
            Entry::Occupied(entry) => {
                warn!(category = %entry.key(), "Handler already registered, ignoring");
                false
            }
            Entry::Vacant(entry) => {
                debug!(category = %entry.key(), "Handler registered");
                entry.insert(Arc::new(handler));
                true
            }
        }
    }

    /// Invokes the handler bound to `category` and waits for it to finish.
    ///
    /// Returns immediately when no handler is bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Handler`] if the handler fails.
    pub async fn dispatch(&self, category: &str, envelope: EventEnvelope) -> Result<()> {
        let handler = self.handlers.read().get(category).cloned();

        let Some(handler) = handler else {
            trace!(category, "No handler registered");
            return Ok(());
        };

        handler
            .handle(envelope)
            .await
            .map_err(|source| Error::handler(category, source))
    }

    /// Returns `true` if a handler is bound to `category`.
    #[inline]
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.handlers.read().contains_key(category)
    }

    /// Returns the number of bound categories.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Returns `true` if no handler is bound.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
