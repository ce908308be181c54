#![forbid(unsafe_code)]

//! Replay scripts: one [`StackInput`] per line, JSON tagged by `"kind"`.
//!
//! ```text
//! # open the second card, then hover the first
//! {"kind":"click","index":1}
//! {"kind":"hover_enter","index":0}
//! ```
//!
//! Blank lines and lines whose first non-space character is `#` are skipped.
//! Line numbers in [`ScriptStep`] and [`ScriptError`] are 1-based.

use std::fmt;
use std::path::Path;

use pagestack::StackInput;

use crate::error::{HarnessError, Result};

/// One parsed input with its source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub line: usize,
    pub input: StackInput,
}

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub detail: String,
}

impl ScriptError {
    #[must_use]
    pub fn new(line: usize, detail: impl Into<String>) -> Self {
        Self {
            line,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.detail)
    }
}

impl std::error::Error for ScriptError {}

/// Parse a whole script. Stops at the first malformed line.
pub fn parse_script(text: &str) -> std::result::Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let input = serde_json::from_str::<StackInput>(trimmed)
            .map_err(|e| ScriptError::new(line, e.to_string()))?;
        steps.push(ScriptStep { line, input });
    }
    Ok(steps)
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    if !path.exists() {
        return Err(HarnessError::MissingScript {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    Ok(parse_script(&text)?)
}

/// Render inputs back into script form.
pub fn to_script(inputs: &[StackInput]) -> Result<String> {
    let mut out = String::new();
    for input in inputs {
        out.push_str(&serde_json::to_string(input)?);
        out.push('\n');
    }
    Ok(out)
}
