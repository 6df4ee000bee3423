//! Logging bootstrap.
//!
//! The engine itself only emits `tracing` events; hosts that have no
//! subscriber of their own call [`init`] once at startup. Filtering is
//! controlled through `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
