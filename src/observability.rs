//! Structured logging initialisation.
//!
//! Controlled by the `RUST_LOG` environment variable; the default level
//! is `warn` so a clean run prints nothing beyond the report itself.
//!
//! - `warn!` - recoverable issues and skipped records
//! - `info!` - phase-level progress
//! - `debug!` - per-record detail
//! - `trace!` - very verbose output

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the tracing subscriber. Call once per binary, before any
/// engine work.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Initialise with an explicit filter string, for tests or programmatic
/// configuration. Ignores failure when a subscriber is already set.
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
