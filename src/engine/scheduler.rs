use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, bounded};
use tracing::{debug, warn};

use super::FileOutcome;

const CANCEL_POLL: Duration = Duration::from_millis(25);

/// One file of a batch; `index` is its position in the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    pub index: usize,
    pub path: PathBuf,
}

/// Cooperative cancellation shared between the caller and the workers.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcomes of a whole batch, in input order.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<FileOutcome>,
    pub had_op_err: bool,
    pub had_val_fail: bool,
}

impl BatchResult {
    fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let had_op_err = outcomes.iter().any(|o| o.had_op_err);
        let had_val_fail = outcomes.iter().any(|o| o.had_val_fail);
        Self {
            outcomes,
            had_op_err,
            had_val_fail,
        }
    }

    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.outcomes.iter().filter(|o| o.cancelled).count()
    }
}

/// Fans files out to a bounded pool of workers.
///
/// Each file is handled by exactly one worker; completion order is
/// irrelevant because every outcome lands in the slot of its input index.
#[derive(Debug, Clone)]
pub struct FileScheduler {
    parallelism: usize,
    cancel: CancelToken,
}

impl FileScheduler {
    /// A parallelism of zero is treated as one.
    #[must_use]
    pub fn new(parallelism: usize) -> Self {
        Self {
            parallelism: parallelism.max(1),
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    #[must_use]
    pub fn worker_count(&self, files: usize) -> usize {
        self.parallelism.min(files).max(1)
    }

    /// Process every path with `process`, returning outcomes in input order.
    ///
    /// Files never handed to a worker because the batch was cancelled get a
    /// `cancelled` outcome.
    pub fn run<F>(&self, paths: &[PathBuf], process: F) -> BatchResult
    where
        F: Fn(&FileJob) -> FileOutcome + Sync,
    {
        if paths.is_empty() {
            return BatchResult::default();
        }
        let workers = self.worker_count(paths.len());
        debug!(files = paths.len(), workers, "starting batch");

        let slots: Vec<OnceLock<FileOutcome>> = paths.iter().map(|_| OnceLock::new()).collect();
        // Rendezvous: a job counts as dispatched only once a worker takes it.
        let (tx, rx) = bounded::<FileJob>(0);

        thread::scope(|scope| {
            for _ in 0..workers {
                let rx = rx.clone();
                let slots = &slots;
                let process = &process;
                scope.spawn(move || {
                    for job in rx {
                        let outcome = process(&job);
                        if slots[job.index].set(outcome).is_err() {
                            warn!(index = job.index, "file processed twice");
                        }
                    }
                });
            }
            drop(rx);
            self.dispatch(paths, &tx);
            drop(tx);
        });

        let outcomes = slots
            .into_iter()
            .zip(paths)
            .enumerate()
            .map(|(index, (slot, path))| {
                slot.into_inner()
                    .unwrap_or_else(|| FileOutcome::cancelled(index, path.clone()))
            })
            .collect();
        BatchResult::from_outcomes(outcomes)
    }

    fn dispatch(&self, paths: &[PathBuf], tx: &crossbeam_channel::Sender<FileJob>) {
        for (index, path) in paths.iter().enumerate() {
            let mut job = FileJob {
                index,
                path: path.clone(),
            };
            loop {
                if self.cancel.is_cancelled() {
                    debug!(remaining = paths.len() - index, "batch cancelled");
                    return;
                }
                match tx.send_timeout(job, CANCEL_POLL) {
                    Ok(()) => break,
                    Err(SendTimeoutError::Timeout(back)) => job = back,
                    Err(SendTimeoutError::Disconnected(_)) => return,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
