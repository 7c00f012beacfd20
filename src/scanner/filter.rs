use std::path::Path;

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::error::{GuardError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Matches walked paths against one glob pattern. `*` and `?` stay within
/// a path component; `**` crosses directories.
pub struct GlobFilter {
    matcher: GlobMatcher,
}

impl GlobFilter {
    /// # Errors
    /// Returns an error if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self> {
        let glob: Glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| GuardError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
