//! Structured logging setup via the `tracing` ecosystem.
//!
//! Library code only emits events; binaries decide whether and how to print them.
//!
//! ```rust,ignore
//! rust_tracking_sim::logging::init_logging("info");
//! tracing::info!(steps = 3000, "run complete");
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact stdout subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset. Calling this more than once
/// (or after another subscriber is installed) leaves the existing one in place.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init();
}
