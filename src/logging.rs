//! Logging setup using tracing and tracing-subscriber.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "agrowisata_booking=info,tower_http=info";

/// Initialize the global subscriber.
///
/// `RUST_LOG` overrides the default filter, e.g.
/// `RUST_LOG=agrowisata_booking=debug`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Debug-level subscriber writing through the test harness. Safe to call
/// from several tests.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
