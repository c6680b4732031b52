//! Shared test utilities

use tracing_subscriber::EnvFilter;

/// Route the crate's logs through the test writer.
///
/// Filtered by `RUST_LOG`, `warn` otherwise. Only the first call in a test
/// binary installs the subscriber; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
