use std::fmt::Write;

use serde::Serialize;

use crate::checks::RegistrySnapshot;
use crate::cli::{ChecksArgs, Cli};
use crate::error::Result;
use crate::output::OutputFormat;
use crate::{EXIT_OPERATION_ERROR, EXIT_SUCCESS};

use super::context::{build_registry, load_config};

/// One row of the `checks` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInfo {
    pub name: String,
    pub priority: i32,
    pub fail_fast: bool,
    pub fixable: bool,
}

/// Checks in execution order: critical first, then normal.
#[must_use]
pub fn list_checks(snapshot: &RegistrySnapshot) -> Vec<CheckInfo> {
    snapshot
        .iter()
        .map(|check| CheckInfo {
            name: check.name().to_string(),
            priority: check.priority(),
            fail_fast: check.fail_fast(),
            fixable: check.fixer().is_some(),
        })
        .collect()
}

#[must_use]
pub fn format_checks_text(checks: &[CheckInfo]) -> String {
    let width = checks.iter().map(|c| c.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for check in checks {
        let kind = if check.fail_fast { "critical" } else { "normal" };
        let fix = if check.fixable { "fix" } else { "-" };
        let _ = writeln!(
            out,
            "{:<width$}  priority={:<4} {kind:<8}  {fix}",
            check.name, check.priority
        );
    }
    out
}

#[must_use]
pub fn run_checks(args: &ChecksArgs, cli: &Cli) -> i32 {
    match run_checks_impl(args, cli) {
        Ok(text) => {
            print!("{text}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e.detail());
            EXIT_OPERATION_ERROR
        }
    }
}

fn run_checks_impl(args: &ChecksArgs, cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref(), cli.no_config)?;
    let registry = build_registry(&config)?;
    let checks = list_checks(&registry.snapshot());
    Ok(match args.format {
        OutputFormat::Text => format_checks_text(&checks),
        OutputFormat::Json => serde_json::to_string_pretty(&checks)? + "\n",
    })
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
