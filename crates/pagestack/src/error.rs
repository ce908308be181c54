#![forbid(unsafe_code)]

//! Top-level error type for applications embedding a stack.
//!
//! The engine itself has no recoverable errors: out-of-range inputs become
//! [`Transition::Ignored`](crate::Transition::Ignored). Only the edges that
//! touch the outside world (policy files) can fail.

use std::fmt;

use pagestack_runtime::PolicyConfigError;

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside of policy loading.
    Io(std::io::Error),
    /// Policy file could not be read, parsed or validated.
    Policy(PolicyConfigError),
    /// Policy path has an extension other than `.toml` or `.json`.
    UnsupportedFormat(String),
}

impl Error {
    /// Stable label for logs and exit reporting.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Policy(PolicyConfigError::Validation(_)) => "policy_validation",
            Self::Policy(_) => "policy_load",
            Self::UnsupportedFormat(_) => "unsupported_format",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Policy(err) => write!(f, "policy: {err}"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported policy format {ext:?} (expected .toml or .json)")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Policy(err) => Some(err),
            Self::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PolicyConfigError> for Error {
    fn from(err: PolicyConfigError) -> Self {
        Self::Policy(err)
    }
}

/// Standard result type for pagestack APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load and validate a policy, picking the parser from the file extension.
#[cfg(feature = "policy-config")]
pub fn load_policy(path: impl AsRef<std::path::Path>) -> Result<pagestack_runtime::StackPolicy> {
    use pagestack_runtime::StackPolicy;

    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let policy = match ext.as_str() {
        "toml" => StackPolicy::from_toml_file(path)?,
        "json" => StackPolicy::from_json_file(path)?,
        _ => return Err(Error::UnsupportedFormat(ext)),
    };
    Ok(policy.validated()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_converts() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.error_type(), "io");
        assert_eq!(err.to_string(), "gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_error_labels() {
        let err: Error = PolicyConfigError::Validation(vec!["x".into()]).into();
        assert_eq!(err.error_type(), "policy_validation");
        assert_eq!(err.to_string(), "policy: validation errors: x");
    }

    #[test]
    fn unsupported_format_has_no_source() {
        let err = Error::UnsupportedFormat("yaml".into());
        assert!(err.source().is_none());
        assert!(err.to_string().contains("\"yaml\""));
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn load_policy_by_extension() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("policy.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(b"breakpoint_px = 1024\n")
            .unwrap();
        assert_eq!(load_policy(&toml_path).unwrap().breakpoint_px, 1024.0);

        let json_path = dir.path().join("policy.JSON");
        std::fs::write(&json_path, r#"{"default_card_width": 0}"#).unwrap();
        let err = load_policy(&json_path).unwrap_err();
        assert_eq!(err.error_type(), "policy_validation");

        let yaml_path = dir.path().join("policy.yaml");
        assert!(matches!(
            load_policy(&yaml_path),
            Err(Error::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }
}
