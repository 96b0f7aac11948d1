//! Client configuration.
//!
//! A [`Config`] is fixed once a [`Client`](crate::Client) is created. It is
//! validated before any connection attempt, so an invalid configuration
//! never reaches the network.
//!
//! # JSON Form
//!
//! ```json
//! {
//!   "endpoint": "wss://www.seismicportal.eu/standing_order/websocket",
//!   "keepaliveIntervalSeconds": 15
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// SeismicPortal standing-order feed.
pub const DEFAULT_ENDPOINT: &str = "wss://www.seismicportal.eu/standing_order/websocket";

/// Default seconds between keepalive pings.
pub const DEFAULT_KEEPALIVE_INTERVAL_SECS: u64 = 15;

// ============================================================================
// Config
// ============================================================================

/// Endpoint and keepalive settings for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// WebSocket URL of the feed.
    endpoint: String,
    /// Seconds between keepalive pings.
    #[serde(rename = "keepaliveIntervalSeconds")]
    keepalive_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_KEEPALIVE_INTERVAL_SECS)
    }
}

impl Config {
    /// Creates a configuration without validating it.
    ///
    /// Validation happens in [`Config::validate`], which the client calls
    /// before connecting.
    #[inline]
    #[must_use]
    pub fn new(endpoint: impl Into<String>, keepalive_interval_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            keepalive_interval_secs,
        }
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the document is malformed or a field has the
    ///   wrong type (a negative interval included)
    /// - [`Error::Config`] if the values are invalid
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the keepalive interval in seconds.
    #[inline]
    #[must_use]
    pub const fn keepalive_interval_secs(&self) -> u64 {
        self.keepalive_interval_secs
    }

    /// Returns the keepalive interval.
    #[inline]
    #[must_use]
    pub const fn keepalive_interval(&self) -> Duration {
        Duration::from_secs(self.keepalive_interval_secs)
    }

    /// Checks the endpoint and interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is blank, is not a URL, or
    /// is not `ws`/`wss`, or if the interval is zero.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::config("endpoint must not be empty"));
        }

        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::config(format!("endpoint is not a valid URL: {e}")))?;

        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(Error::config(format!(
                "endpoint scheme must be ws or wss, got '{}'",
                url.scheme()
            )));
        }

        if self.keepalive_interval_secs == 0 {
            return Err(Error::config(
                "keepalive interval must be a positive number of seconds",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
