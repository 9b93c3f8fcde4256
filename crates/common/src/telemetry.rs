//! Tracing initialization for Scry binaries.
//!
//! Filtering follows `RUST_LOG` when set, falling back to the provided
//! default directive. Output goes to stderr so stdout stays reserved for
//! command output.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: keeps repeated initialization (tests, embedded use) harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
