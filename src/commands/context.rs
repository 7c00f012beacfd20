use std::path::Path;

use crate::checks::CheckRegistry;
use crate::checks::builtin::default_registry;
use crate::cli::ColorChoice;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::Result;
use crate::output::ColorMode;

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load configuration honoring `--config` and `--no-config`.
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    load_config_with(&FileConfigLoader::new(), config_path, no_config)
}

pub(crate) fn load_config_with(
    loader: &dyn ConfigLoader,
    config_path: Option<&Path>,
    no_config: bool,
) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    match config_path {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

/// The built-in checks adjusted by `[checks]`.
///
/// # Errors
/// Returns an error if `[checks]` names an unknown check.
pub fn build_registry(config: &Config) -> Result<CheckRegistry> {
    let mut registry = default_registry();
    config.checks.apply(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
