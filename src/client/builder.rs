//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and creating [`Client`] instances.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use seismic_portal::Client;
//!
//! # fn example() -> seismic_portal::Result<()> {
//! let client = Client::builder()
//!     .endpoint("wss://www.seismicportal.eu/standing_order/websocket")
//!     .keepalive_interval(Duration::from_secs(15))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};

use super::config::{Config, DEFAULT_ENDPOINT, DEFAULT_KEEPALIVE_INTERVAL_SECS};
use super::core::Client;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`Client`] instance.
///
/// Use [`Client::builder()`] to create a new builder. Unset fields fall
/// back to the SeismicPortal defaults.
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    /// Feed endpoint.
    endpoint: Option<String>,
    /// Keepalive interval.
    keepalive_interval: Option<Duration>,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new client builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the WebSocket endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - `ws://` or `wss://` URL of the feed
    #[inline]
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the keepalive interval.
    ///
    /// The interval must be a whole number of seconds, at least one;
    /// [`build`](Self::build) rejects anything else rather than rounding.
    #[inline]
    #[must_use]
    pub fn keepalive_interval(mut self, interval: Duration) -> Self {
        self.keepalive_interval = Some(interval);
        self
    }

    /// Sets the keepalive interval in seconds.
    #[inline]
    #[must_use]
    pub fn keepalive_interval_secs(mut self, secs: u64) -> Self {
        self.keepalive_interval = Some(Duration::from_secs(secs));
        self
    }

    /// Replaces every field with the values from `config`.
    #[inline]
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.keepalive_interval = Some(config.keepalive_interval());
        self.endpoint = Some(config.endpoint().to_string());
        self
    }

    /// Builds the client with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the endpoint is
    /// invalid or the interval is zero or not a whole number of seconds.
    pub fn build(self) -> Result<Client> {
        let config = self.into_config()?;
        config.validate()?;

        Ok(Client::new(config))
    }

    /// Resolves the configured fields against the defaults.
    fn into_config(self) -> Result<Config> {
        let interval_secs = match self.keepalive_interval {
            Some(interval) if interval.subsec_nanos() != 0 => {
                return Err(Error::config(format!(
                    "keepalive interval must be whole seconds, got {interval:?}"
                )));
            }
            Some(interval) => interval.as_secs(),
            None => DEFAULT_KEEPALIVE_INTERVAL_SECS,
        };

        Ok(Config::new(
            self.endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            interval_secs,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
