// --- File: crates/viewty_common/src/logging.rs ---
//! Logging utilities for the Viewty application.
//!
//! Provides a standardized tracing-subscriber setup used by the backend
//! binary and by tests that want log output.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Honors `RUST_LOG` for per-target overrides; the given level applies to
/// the `viewty` crates. Uses `try_init` so a second call (e.g. from another
/// test) is a no-op instead of a panic.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("viewty={}", level).parse().expect("valid directive"));

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
