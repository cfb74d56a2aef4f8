//! Tracing initialization for binaries and integration tests.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
///
/// Admission denials are logged at debug level by `innkeep-auth`; keeping
/// that crate at debug makes authorization refusals visible out of the box.
const DEFAULT_DIRECTIVES: &str = "info,innkeep_auth=debug";

/// Initialize tracing with the default directives.
///
/// Safe to call multiple times (subsequent calls are no-ops), so every
/// integration test can call it without coordination.
pub fn init() {
    init_with(DEFAULT_DIRECTIVES);
}

/// Initialize tracing with explicit fallback directives.
///
/// `RUST_LOG` still wins when set.
pub fn init_with(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // JSON lines with module targets, so denial logs can be grepped by crate.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .try_init();
}
