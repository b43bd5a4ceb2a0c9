//! Diagnostic output setup
//!
//! Diagnostics go to stderr, one line each, so they never interleave with the
//! reports written to stdout.

use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the default filter. Must be called at most
/// once per process.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "parcel_tally=debug,info"
    } else {
        "parcel_tally=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
