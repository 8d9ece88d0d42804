//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding per-target log levels, e.g.
/// `EXPRMIG_LOG=exprmig::core=debug`.
pub const LOG_ENV: &str = "EXPRMIG_LOG";

static INIT: Once = Once::new();

/// Install the stderr subscriber.
///
/// Falls back to `exprmig=info` (`exprmig=debug` when verbose) if `EXPRMIG_LOG`
/// is unset or invalid. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "exprmig=debug" } else { "exprmig=info" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
