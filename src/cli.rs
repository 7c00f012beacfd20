use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "glossary-guard")]
#[command(author, version, about = "Validate glossary CSV files against ordered checks")]
#[command(long_about = "Validate semicolon-separated glossary files against a set of \
    ordered checks, optionally writing auto-fixed copies next to them.\n\n\
    Exit codes:\n  \
    0 - All files passed\n  \
    1 - Validation failures found\n  \
    2 - Operation, configuration or usage error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); `GLOSSARY_GUARD_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Path to configuration file (default: ./.glossary-guard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate glossary files
    Validate(ValidateArgs),

    /// List registered checks in execution order
    Checks(ChecksArgs),
}

#[derive(Parser, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidateArgs {
    /// Files to validate (repeatable, comma-separated, glob patterns allowed)
    #[arg(short, long = "files", value_name = "FILES")]
    pub files: Vec<String>,

    /// Files given positionally; merged after --files
    #[arg(value_name = "FILE")]
    pub paths: Vec<String>,

    /// Maximum files validated at once (default: number of CPUs)
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Declared language codes (comma-separated, repeatable)
    #[arg(short, long = "langs", value_name = "LANGS")]
    pub langs: Vec<String>,

    /// Apply fixes to failing checks and write `<name>_fixed.<ext>` copies
    #[arg(long)]
    pub fix: bool,

    /// Re-validate fixed content before deciding the verdict
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub rerun_after_fix: Option<bool>,

    /// Treat checks that errored as operation errors (exit code 2)
    #[arg(long)]
    pub hard_fail_on_error: bool,

    /// Output format [possible values: text, json]
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Disable colored output (same as --color never)
    #[arg(long)]
    pub no_color: bool,
}

impl ValidateArgs {
    /// `--files` values followed by positional ones.
    #[must_use]
    pub fn file_args(&self) -> Vec<String> {
        self.files.iter().chain(&self.paths).cloned().collect()
    }

    #[must_use]
    pub fn format_override(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else {
            self.format
        }
    }
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ChecksArgs {
    /// Output format [possible values: text, json]
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
