#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

use crate::script::ScriptError;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Policy(#[from] pagestack::Error),

    #[error("{0}")]
    Script(#[from] ScriptError),

    #[error("script not found: {path}")]
    MissingScript { path: PathBuf },

    #[error("logging setup failed: {message}")]
    Logging { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{count} invariant violation(s); first: {first}")]
    InvariantViolated { count: usize, first: String },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Script(_) | Self::MissingScript { .. } => 2,
            Self::InvariantViolated { .. } => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
