#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the glossary-guard binary.
#[macro_export]
macro_rules! glossary_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("glossary-guard"))
    };
}

/// A glossary that passes every built-in check.
pub const VALID_GLOSSARY: &str = "term;description;de;casesensitive\n\
Apple;A fruit;Apfel;no\n\
Pear;Another fruit;Birne;yes\n";

/// Header and rows fine, but one row repeats a term and a flag is spelled `true`.
pub const FIXABLE_GLOSSARY: &str = "term;description;casesensitive\n\
Apple;A fruit;true\n\
Pear;Another fruit;no\n\
Apple;A fruit;true\n";

/// Fails the header check, which stops the run.
pub const BAD_HEADER_GLOSSARY: &str = "description;term\nA fruit;Apple\n";

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".glossary-guard.toml", content);
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, relative_path: &str) -> Option<String> {
        fs::read_to_string(self.dir.path().join(relative_path)).ok()
    }
}
