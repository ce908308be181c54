#![forbid(unsafe_code)]

//! Logging setup and tracing re-exports.
//!
//! Library crates emit `tracing` events and never install a subscriber.
//! Binaries (the harness CLI) call [`init_logging`] once at startup. Output
//! goes to stderr so stdout stays free for frame dumps.
//!
//! The filter honours `RUST_LOG`; when it is unset, `default_directive` is used
//! (for example `"pagestack=info"`).

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, trace, trace_span, warn};

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Failure to install the global subscriber.
#[derive(Debug)]
pub enum LoggingInitError {
    /// The filter directive did not parse.
    InvalidFilter(String),
    /// A global subscriber was already installed.
    AlreadyInitialized(String),
}

impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInitialized(msg) => write!(f, "logging already initialized: {msg}"),
        }
    }
}

impl std::error::Error for LoggingInitError {}

/// Install a global `tracing` subscriber writing to stderr.
#[cfg(feature = "tracing-json")]
pub fn init_logging(format: LogFormat, default_directive: &str) -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| LoggingInitError::InvalidFilter(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| LoggingInitError::AlreadyInitialized(e.to_string()))
}
