//! Streams the SeismicPortal feed and logs every event as JSON.
//!
//! Usage:
//!
//! ```text
//! cargo run --example stream -- [--endpoint URL] [--interval SECS] [--debug]
//! ```

// ============================================================================
// Imports
// ============================================================================

use seismic_portal::client::{DEFAULT_ENDPOINT, DEFAULT_KEEPALIVE_INTERVAL_SECS};
use seismic_portal::{
    Client, EventEnvelope, HandlerResult, KEEPALIVE_COMPLETED, MESSAGE_RECEIVED, Result,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone)]
struct Args {
    endpoint: String,
    interval_secs: u64,
    debug: bool,
}

impl Args {
    /// Parse command-line arguments.
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };

        Self {
            endpoint: value_of("--endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            interval_secs: value_of("--interval")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_KEEPALIVE_INTERVAL_SECS),
            debug: args.iter().any(|a| a == "--debug"),
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let client = Client::builder()
        .endpoint(args.endpoint)
        .keepalive_interval_secs(args.interval_secs)
        .build()?;

    client.register_handler(MESSAGE_RECEIVED, |envelope: EventEnvelope| async move {
        info!(event = %envelope.to_value()?, "Message");
        HandlerResult::Ok(())
    });

    client.register_handler(KEEPALIVE_COMPLETED, |envelope: EventEnvelope| async move {
        info!(event = %envelope.to_value()?, "Keepalive");
        HandlerResult::Ok(())
    });

    client.start().await
}
