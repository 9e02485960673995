//! Logging configuration using tracing
//!
//! Structured logging to stderr with support for the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a verbosity level
///
/// Negative is quiet (errors only), 0 is the normal CLI level (warnings),
/// 1 adds info and 2 or more adds debug.
pub fn default_filter(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over `verbosity` when set.
///
/// # Example RUST_LOG values
/// - `RUST_LOG=info` - Show info and above
/// - `RUST_LOG=submodule_importer=trace` - Trace level for the importer
/// - `RUST_LOG=submodule_importer=debug,gitsub=debug` - Include git invocations
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init(verbosity: i8) -> crate::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1),
        )
        .try_init()
        .map_err(|e| crate::ImporterError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init(2);
}
