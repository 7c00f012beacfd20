use crate::engine::FileOutcome;
use crate::error::Result;

/// Pretty-printed array of per-file records.
pub struct JsonFormatter;

impl JsonFormatter {
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn format(&self, outcomes: &[FileOutcome]) -> Result<String> {
        Ok(serde_json::to_string_pretty(outcomes)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
