use std::collections::BTreeMap;

use serde::Deserialize;

use crate::checks::CheckRegistry;
use crate::error::{GuardError, Result};
use crate::output::OutputFormat;

/// Contents of `.glossary-guard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub validate: ValidateConfig,
    pub checks: ChecksConfig,
}

/// `[validate]`: defaults for `validate` flags. Unset keys defer to the CLI
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidateConfig {
    pub parallel: Option<usize>,
    pub langs: Vec<String>,
    pub fix: Option<bool>,
    pub rerun_after_fix: Option<bool>,
    pub hard_fail_on_error: Option<bool>,
    pub format: Option<OutputFormat>,
}

/// `[checks]`: registry adjustments applied before a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksConfig {
    pub disable: Vec<String>,
    pub priority: BTreeMap<String, i32>,
}

impl ChecksConfig {
    /// Remove disabled checks and override priorities.
    ///
    /// # Errors
    /// Returns a configuration error naming the first check the registry
    /// does not know.
    pub fn apply(&self, registry: &mut CheckRegistry) -> Result<()> {
        let mut names = self.disable.iter().chain(self.priority.keys());
        if let Some(unknown) = names.find(|name| !registry.contains(name)) {
            return Err(GuardError::Config(format!(
                "unknown check '{unknown}' in [checks]"
            )));
        }
        for (name, priority) in &self.priority {
            registry.set_priority(name, *priority);
        }
        for name in &self.disable {
            registry.remove(name);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
