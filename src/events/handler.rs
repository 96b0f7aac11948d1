//! Event handler trait.

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;

use async_trait::async_trait;

use crate::error::HandlerResult;
use crate::protocol::EventEnvelope;

// ============================================================================
// EventHandler
// ============================================================================

/// Callback invoked with each dispatched envelope.
///
/// The triggering loop awaits the returned future before it continues, so a
/// slow handler only delays its own loop. Returning an error ends the run.
///
/// Async closures taking an [`EventEnvelope`] implement this trait
/// automatically.
///
/// # Example
///
/// ```ignore
/// struct Printer;
///
/// #[async_trait]
/// impl EventHandler for Printer {
///     async fn handle(&self, envelope: EventEnvelope) -> HandlerResult {
///         println!("{}", envelope.to_value()?);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one envelope.
    async fn handle(&self, envelope: EventEnvelope) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> EventHandler for F
where
    F: Fn(EventEnvelope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, envelope: EventEnvelope) -> HandlerResult {
        (self)(envelope).await
    }
}
