//! Check capabilities and the registry that orders them.
//!
//! A check is a pure function of a file's bytes, its path and the declared
//! language list. It never touches process-wide state. A check may also
//! expose a [`Fix`], a second capability that proposes a corrected buffer.

pub mod builtin;
mod registry;

pub use registry::{CheckRegistry, Partition, RegistrySnapshot};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Severity of a single check result.
///
/// Ordered by severity: `Pass < Warn < Fail < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Warn,
    Fail,
    Error,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }

    /// Parse a status label. Anything unrecognized is `Error` (fail closed).
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "PASS" => Self::Pass,
            "WARN" | "WARNING" => Self::Warn,
            "FAIL" => Self::Fail,
            _ => Self::Error,
        }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// `Fail` or `Error`.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Fail | Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

/// Outcome of evaluating one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: Status,
    pub message: String,
}

impl CheckResult {
    #[must_use]
    pub fn new(name: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Pass, message)
    }

    #[must_use]
    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Warn, message)
    }

    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Fail, message)
    }

    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Error, message)
    }
}

/// Everything a check may look at.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub data: &'a [u8],
    pub path: &'a Path,
    pub langs: &'a [String],
}

impl<'a> CheckInput<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8], path: &'a Path, langs: &'a [String]) -> Self {
        Self { data, path, langs }
    }

    /// Same path and languages, different bytes.
    #[must_use]
    pub const fn with_data(self, data: &'a [u8]) -> Self {
        Self { data, ..self }
    }
}

/// Abnormal check termination. The runner turns it into an `Error` result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// A candidate corrected buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutput {
    pub data: Vec<u8>,
    pub note: String,
}

/// A rule that inspects file content.
pub trait Check: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Lower runs earlier. Ties are broken by name.
    fn priority(&self) -> i32;

    /// A non-pass result from a fail-fast check stops the file's run.
    fn fail_fast(&self) -> bool;

    /// Evaluate the check.
    ///
    /// # Errors
    /// Returns an error when the check cannot produce a verdict; the runner
    /// records it as an `Error` status.
    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError>;

    /// Optional fix capability.
    fn fixer(&self) -> Option<&dyn Fix> {
        None
    }
}

/// Corrective transformation paired with a check.
///
/// The returned buffer is only a candidate: the runner re-evaluates the
/// check against it.
pub trait Fix: Send + Sync {
    /// # Errors
    /// Returns an error when no candidate can be produced.
    fn fix(&self, input: &CheckInput<'_>) -> Result<FixOutput, CheckError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

#[cfg(test)]
pub(crate) mod test_fixtures;
