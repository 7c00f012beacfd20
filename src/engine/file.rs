use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::checks::RegistrySnapshot;
use crate::error::GuardError;

use super::controller::{fixed_file_path, validate};
use super::scheduler::FileJob;
use super::{CheckRunner, RunOptions, Summary};

/// Byte-level access to the files of a batch.
pub trait FileStore: Send + Sync {
    /// # Errors
    /// Returns an error if the path is missing, unreadable or not a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// # Errors
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// Real filesystem implementation of `FileStore`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileStore;

impl FileStore for RealFileStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if fs::metadata(path)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                "path points to a directory",
            ));
        }
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }
}

/// Everything a renderer may need besides the outcome itself.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub checks: &'a RegistrySnapshot,
    pub options: RunOptions,
}

/// Turns one file's outcome into report text. Called on the worker thread.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, outcome: &FileOutcome, ctx: &RenderContext<'_>) -> String;
}

/// Renders nothing; for JSON mode and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ReportRenderer for NullRenderer {
    fn render(&self, _outcome: &FileOutcome, _ctx: &RenderContext<'_>) -> String {
        String::new()
    }
}

/// File-level verdict, as printed on the report's `Result:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileVerdict {
    Passed,
    PassedWithWarnings,
    Failed,
    /// Never validated: unreadable, or cancelled before dispatch.
    Errored,
}

/// Everything known about one input file after processing.
///
/// `passed`, `warned` and `failed` are file-level tallies: a validated file
/// sets exactly one of them. `errored` counts operation errors (read, fixed
/// file write, cancellation). Per-check counts live in `summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    #[serde(skip)]
    pub index: usize,
    pub path: PathBuf,
    #[serde(skip)]
    pub output: String,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub errored: usize,
    pub had_op_err: bool,
    pub had_val_fail: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_fix: Option<Summary>,
}

impl FileOutcome {
    fn empty(index: usize, path: PathBuf) -> Self {
        Self {
            index,
            path,
            output: String::new(),
            passed: 0,
            warned: 0,
            failed: 0,
            errored: 0,
            had_op_err: false,
            had_val_fail: false,
            error: None,
            fixed_path: None,
            cancelled: false,
            summary: None,
            pre_fix: None,
        }
    }

    /// A file that could not be processed at all.
    #[must_use]
    pub fn operation_error(index: usize, path: PathBuf, error: String) -> Self {
        Self {
            errored: 1,
            had_op_err: true,
            error: Some(error),
            ..Self::empty(index, path)
        }
    }

    /// A file never dispatched because the batch was cancelled.
    #[must_use]
    pub fn cancelled(index: usize, path: PathBuf) -> Self {
        Self {
            cancelled: true,
            ..Self::operation_error(index, path, "cancelled before processing".to_string())
        }
    }

    /// The file validated without failures or operation errors.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !self.had_op_err && !self.had_val_fail
    }

    #[must_use]
    pub const fn verdict(&self) -> FileVerdict {
        if self.summary.is_none() {
            FileVerdict::Errored
        } else if self.had_val_fail {
            FileVerdict::Failed
        } else if self.warned > 0 {
            FileVerdict::PassedWithWarnings
        } else {
            FileVerdict::Passed
        }
    }

    fn record(&mut self, summary: Summary, options: RunOptions) {
        self.had_val_fail = summary.has_failures();
        if self.had_val_fail {
            self.failed += 1;
        } else if summary.counts.warn > 0 {
            self.warned += 1;
        } else {
            self.passed += 1;
        }
        if options.hard_fail_on_error && summary.counts.error > 0 {
            self.had_op_err = true;
        }
        self.summary = Some(summary);
    }
}

/// One-line operation-error message for a failed read.
fn read_error(path: &Path, source: io::Error) -> String {
    let shown = path.display();
    match source.kind() {
        io::ErrorKind::NotFound => format!("file not found: {shown}"),
        io::ErrorKind::PermissionDenied => format!("permission denied: {shown}"),
        io::ErrorKind::IsADirectory => format!("path points to a directory: {shown}"),
        _ => GuardError::FileRead {
            path: path.to_path_buf(),
            source,
        }
        .detail(),
    }
}

/// Read, validate, persist fixes and render a single file.
pub struct FilePipeline<'a> {
    runner: CheckRunner<'a>,
    langs: &'a [String],
    options: RunOptions,
    store: &'a dyn FileStore,
    renderer: &'a dyn ReportRenderer,
}

impl<'a> FilePipeline<'a> {
    #[must_use]
    pub fn new(
        checks: &'a RegistrySnapshot,
        langs: &'a [String],
        options: RunOptions,
        store: &'a dyn FileStore,
        renderer: &'a dyn ReportRenderer,
    ) -> Self {
        Self {
            runner: CheckRunner::new(checks),
            langs,
            options,
            store,
            renderer,
        }
    }

    #[must_use]
    pub fn process(&self, job: &FileJob) -> FileOutcome {
        let mut outcome = self.evaluate(job);
        if outcome.had_op_err {
            warn!(
                path = %outcome.path.display(),
                error = outcome.error.as_deref().unwrap_or_default(),
                "operation error"
            );
        } else if let Some(summary) = &outcome.summary {
            let counts = summary.counts;
            info!(
                path = %outcome.path.display(),
                pass = counts.pass,
                warn = counts.warn,
                fail = counts.fail,
                error = counts.error,
                "file validated"
            );
        }
        let ctx = RenderContext {
            checks: self.runner.checks(),
            options: self.options,
        };
        outcome.output = self.renderer.render(&outcome, &ctx);
        outcome
    }

    fn evaluate(&self, job: &FileJob) -> FileOutcome {
        let data = match self.store.read(&job.path) {
            Ok(data) => data,
            Err(source) => {
                let message = read_error(&job.path, source);
                return FileOutcome::operation_error(job.index, job.path.clone(), message);
            }
        };

        let mut validation = validate(&self.runner, &data, &job.path, self.langs, self.options);
        let mut outcome = FileOutcome::empty(job.index, job.path.clone());

        if self.options.fixing() && validation.summary.applied_fixes {
            let target = fixed_file_path(&job.path);
            match self.store.write(&target, &validation.summary.final_data) {
                Ok(()) => {
                    validation.summary.final_path.clone_from(&target);
                    outcome.fixed_path = Some(target);
                }
                Err(source) => {
                    outcome.had_op_err = true;
                    outcome.errored += 1;
                    outcome.error = Some(
                        GuardError::FileWrite {
                            path: target,
                            source,
                        }
                        .detail(),
                    );
                }
            }
        }

        outcome.pre_fix = validation.pre_fix;
        outcome.record(validation.summary, self.options);
        outcome
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
