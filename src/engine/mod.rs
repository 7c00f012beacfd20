//! Check orchestration: per-file runs, fixes and reruns, and the worker pool
//! that fans files out and collects their outcomes in input order.

mod controller;
mod file;
mod runner;
mod scheduler;
mod supervise;

pub use controller::{FIXED_MARKER, Validation, fixed_file_path, validate};
pub use file::{
    FileOutcome, FilePipeline, FileStore, FileVerdict, NullRenderer, RealFileStore,
    RenderContext, ReportRenderer,
};
pub use runner::CheckRunner;
pub use scheduler::{BatchResult, CancelToken, FileJob, FileScheduler};
pub use supervise::{apply_fix, evaluate};

use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::checks::{CheckResult, Status};

/// Whether failing checks may rewrite the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FixMode {
    #[default]
    None,
    IfNotPass,
}

/// Per-invocation settings, fixed for the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    pub fix_mode: FixMode,
    pub rerun_after_fix: bool,
    pub hard_fail_on_error: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fix_mode: FixMode::None,
            rerun_after_fix: true,
            hard_fail_on_error: false,
        }
    }
}

impl RunOptions {
    #[must_use]
    pub const fn fixing(&self) -> bool {
        matches!(self.fix_mode, FixMode::IfNotPass)
    }
}

/// What a fix did to the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixRecord {
    pub did_change: bool,
    pub note: String,
}

/// One check's result plus its fix record, for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub result: CheckResult,
    pub fix: FixRecord,
}

impl Outcome {
    #[must_use]
    pub fn new(result: CheckResult) -> Self {
        Self {
            result,
            fix: FixRecord::default(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.result.status
    }
}

/// Per-status tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
    pub error: usize,
}

impl Counts {
    pub const fn add(&mut self, status: Status) {
        match status {
            Status::Pass => self.pass += 1,
            Status::Warn => self.warn += 1,
            Status::Fail => self.fail += 1,
            Status::Error => self.error += 1,
        }
    }

    #[must_use]
    pub fn tally(outcomes: &[Outcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            counts.add(outcome.status());
        }
        counts
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.pass + self.warn + self.fail + self.error
    }
}

/// The fail-fast check that stopped a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarlyExit {
    pub check: String,
    pub status: Status,
}

/// Ordered report of one run over one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub path: PathBuf,
    pub outcomes: Vec<Outcome>,
    #[serde(flatten)]
    pub counts: Counts,
    pub early_exit: Option<EarlyExit>,
    pub applied_fixes: bool,
    #[serde(rename = "final_len", serialize_with = "serialize_len")]
    pub final_data: Vec<u8>,
    pub final_path: PathBuf,
}

fn serialize_len<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

impl Summary {
    #[must_use]
    pub const fn early_exited(&self) -> bool {
        self.early_exit.is_some()
    }

    /// Any `Fail` or `Error`, or a fail-fast stop.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.counts.fail > 0 || self.counts.error > 0 || self.early_exited()
    }

    /// At least one check ran and nothing failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.outcomes.is_empty() && !self.has_failures()
    }

    /// Worst status among the outcomes.
    #[must_use]
    pub fn worst(&self) -> Option<Status> {
        self.outcomes.iter().map(Outcome::status).max()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
