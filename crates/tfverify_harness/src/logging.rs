//! Test logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging for harness tests.
///
/// Safe to call from every test; a subscriber that is already installed
/// is left in place.
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("tfverify=info".parse().expect("static directive parses"))
                .add_directive("warn".parse().expect("static directive parses")),
        )
        .try_init();
}
