//! Logging backend for the binary.
//!
//! The library crates log through the `log` facade; the subscriber installed
//! here bridges those records and writes them to stderr so stdout stays
//! reserved for JSON output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber, honouring `RUST_LOG` when it is set.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
    if let Err(err) = installed {
        log::debug!("logging already initialised: {err}");
    }
}
