//! Resolves the `--files` and `--langs` arguments into concrete lists.

mod filter;

pub use filter::{FileFilter, GlobFilter};

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::error::{GuardError, Result};

const GLOB_META: &[char] = &['*', '?', '[', ']'];

/// Trait for expanding a glob pattern into matching files.
pub trait FileScanner {
    /// # Errors
    /// Returns an error if the pattern is invalid.
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// Expands patterns by walking the filesystem from their literal prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobScanner;

impl GlobScanner {
    /// Leading components without glob syntax, and whether the rest may
    /// descend arbitrarily deep.
    fn split_pattern(pattern: &str) -> (PathBuf, Option<usize>) {
        let mut root = PathBuf::new();
        let mut rest = 0;
        let mut recursive = false;
        for component in Path::new(pattern).components() {
            let text = component.as_os_str().to_string_lossy();
            if rest == 0 && !text.contains(GLOB_META) {
                root.push(component);
                continue;
            }
            rest += 1;
            recursive |= text == "**";
        }
        let depth = if recursive { None } else { Some(rest) };
        (root, depth)
    }
}

impl FileScanner for GlobScanner {
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
        let filter = GlobFilter::new(pattern)?;
        let (root, depth) = Self::split_pattern(pattern);
        let walk_root = if root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            root.as_path()
        };

        let mut walker = WalkDir::new(walk_root).sort_by_file_name();
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }
        Ok(walker
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| strip_cur_dir(e.path()))
            .filter(|p| filter.should_include(p))
            .map(|p| dunce::simplified(&p).to_path_buf())
            .collect())
    }
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect()
}

fn split_list(raw: &[String]) -> impl Iterator<Item = &str> {
    raw.iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Resolve `--files` values: comma lists are split, glob patterns expanded,
/// duplicates dropped keeping first-seen order.
///
/// Plain paths are kept even when they do not exist; reading them later
/// reports the problem per file.
///
/// # Errors
/// Returns a usage error when nothing remains, or an invalid-pattern error.
pub fn expand_files(raw: &[String], scanner: &dyn FileScanner) -> Result<Vec<PathBuf>> {
    let mut files = IndexSet::new();
    for entry in split_list(raw) {
        if entry.contains(GLOB_META) {
            files.extend(scanner.expand(entry)?);
        } else {
            files.insert(PathBuf::from(entry));
        }
    }
    if files.is_empty() {
        return Err(GuardError::Usage(
            "no input files (use --files, comma-separated or glob)".to_string(),
        ));
    }
    Ok(files.into_iter().collect())
}

/// Normalize `--langs` values: split, trim, de-duplicate, sort.
#[must_use]
pub fn preprocess_langs(raw: &[String]) -> Vec<String> {
    split_list(raw)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
