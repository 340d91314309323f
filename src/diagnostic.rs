//! Diagnostic types for analysis results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Status of a passing diagnostic
pub const STATUS_PASS: i32 = 0;

/// Status assigned by the engine when a check or file read fails
/// unexpectedly, as opposed to a rule intentionally reporting a finding.
pub const STATUS_INTERNAL: i32 = 2;

/// A reported finding from a rule or from the engine itself.
///
/// `status` is `0` for a pass and nonzero for a failing finding; rules pick
/// their own nonzero codes. `rule` and `file` carry provenance so callers
/// can group or re-order diagnostics deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the rule that produced this diagnostic
    pub rule: String,

    /// File the finding refers to (if any)
    pub file: Option<PathBuf>,

    /// Formatted, human-readable message
    pub message: String,

    /// 0 = pass, nonzero = failure severity
    pub status: i32,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(rule: &str, message: &str, status: i32) -> Self {
        Self {
            rule: rule.to_string(),
            file: None,
            message: message.to_string(),
            status,
        }
    }

    /// Create a failing finding with status 1
    pub fn failure(rule: &str, message: &str) -> Self {
        Self::new(rule, message, 1)
    }

    /// Create an internal-failure diagnostic (check errored, file unreadable)
    pub fn internal(rule: &str, message: &str) -> Self {
        Self::new(rule, message, STATUS_INTERNAL)
    }

    /// Attach the file this finding refers to
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Check whether this diagnostic represents a failure
    pub fn is_failure(&self) -> bool {
        self.status != STATUS_PASS
    }

    /// Message in the `[rule] message` shape used for terminal output
    pub fn formatted(&self) -> String {
        format!("[{}] {}", self.rule, self.message)
    }
}
