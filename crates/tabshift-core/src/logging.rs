#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the standard `tracing` macros are re-exported
//! at the crate root so downstream crates can log through
//! `tabshift_core::debug!` without naming `tracing` themselves. With
//! `tracing-json`, [`init_json_logging`] installs a process-wide JSON
//! subscriber suitable for production log shipping.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Failure to install the global subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct LoggingInitError(String);

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.0)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a JSON-formatting global subscriber.
///
/// The filter honours `RUST_LOG` when set and falls back to
/// `default_directive` (for example `"tabshift_reorder=debug"`).
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(default_directive: &str) -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|err| LoggingInitError(err.to_string()))?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .map_err(|err| LoggingInitError(err.to_string()))
}
