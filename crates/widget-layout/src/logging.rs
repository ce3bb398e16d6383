#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! Layout code emits `tracing` events when the `tracing` feature is enabled:
//! `debug` for every planned layout, `warn` for overflowing widgets and
//! stacked fallbacks. Hosts normally install their own subscriber; the
//! `tracing-json` feature adds a ready-made JSON subscriber for services
//! that have none.

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Fails if a global subscriber is already set.
pub fn init_json_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
}
