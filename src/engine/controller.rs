use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CheckRunner, FixMode, RunOptions, Summary};

/// Inserted between stem and extension of a fixed file's name.
pub const FIXED_MARKER: &str = "_fixed";

/// Result of validating one file, including any post-fix rerun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// The authoritative summary: the rerun's when one happened.
    pub summary: Summary,
    /// The first run, kept when a rerun replaced it.
    pub pre_fix: Option<Summary>,
}

impl Validation {
    #[must_use]
    pub const fn reran(&self) -> bool {
        self.pre_fix.is_some()
    }
}

/// Run the checks once and, when fixes changed the buffer and reruns are
/// enabled, once more over the fixed bytes with fixing disabled.
#[must_use]
pub fn validate(
    runner: &CheckRunner<'_>,
    data: &[u8],
    path: &Path,
    langs: &[String],
    options: RunOptions,
) -> Validation {
    let first = runner.run(data, path, langs, options);
    if !(options.fixing() && options.rerun_after_fix && first.applied_fixes) {
        return Validation {
            summary: first,
            pre_fix: None,
        };
    }

    debug!(path = %path.display(), "rerunning checks over fixed data");
    let rerun_options = RunOptions {
        fix_mode: FixMode::None,
        ..options
    };
    let mut summary = runner.run(&first.final_data, path, langs, rerun_options);
    summary.applied_fixes = true;
    for outcome in &mut summary.outcomes {
        if let Some(prev) = first
            .outcomes
            .iter()
            .find(|o| o.result.name == outcome.result.name)
        {
            outcome.fix = prev.fix.clone();
        }
    }
    Validation {
        summary,
        pre_fix: Some(first),
    }
}

/// `dir/name.csv` becomes `dir/name_fixed.csv`; already-fixed names are
/// returned unchanged.
#[must_use]
pub fn fixed_file_path(path: &Path) -> PathBuf {
    let Some(stem) = path.file_stem() else {
        return path.to_path_buf();
    };
    if stem.as_encoded_bytes().ends_with(FIXED_MARKER.as_bytes()) {
        return path.to_path_buf();
    }
    let mut name = stem.to_os_string();
    name.push(FIXED_MARKER);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
