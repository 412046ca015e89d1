//! Logging setup
//!
//! The crate itself only emits `tracing` events; hosts call one of these once
//! at startup to get them on stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "fitter_core=info";

/// Installs the global subscriber with the default filter.
///
/// Defaults to "info" for this crate, can be overridden with RUST_LOG.
pub fn init() {
    init_with_level(DEFAULT_FILTER)
}

/// Installs the global subscriber with a caller-chosen default filter.
///
/// Does nothing if a global subscriber is already set.
pub fn init_with_level(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Subscriber for tests; output is captured per test.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
