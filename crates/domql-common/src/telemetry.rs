//! Logging bootstrap.
//!
//! Installs a `tracing-subscriber` formatter filtered by `RUST_LOG`. Output
//! goes to stderr so stdout stays free for command results.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber with [`DEFAULT_FILTER`] as fallback.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Install the global subscriber, falling back to `directives` when
/// `RUST_LOG` is unset or invalid.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_default(directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
