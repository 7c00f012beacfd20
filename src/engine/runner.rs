use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::checks::{Check, CheckInput, RegistrySnapshot};

use super::supervise::{apply_fix, evaluate};
use super::{Counts, EarlyExit, FixRecord, Outcome, RunOptions, Summary};

/// Runs a frozen set of checks against one file's bytes.
///
/// Critical checks run sequentially and stop the run at the first non-pass
/// result. Normal checks then run concurrently against the same snapshot of
/// the buffer; their fixes are applied afterwards, one at a time, in
/// `(priority, name)` order.
#[derive(Clone, Copy)]
pub struct CheckRunner<'a> {
    checks: &'a RegistrySnapshot,
}

/// Working state threaded through one run.
struct Pass<'a> {
    path: &'a Path,
    langs: &'a [String],
    fixing: bool,
    data: Vec<u8>,
}

impl Pass<'_> {
    fn input(&self) -> CheckInput<'_> {
        CheckInput::new(&self.data, self.path, self.langs)
    }

    /// Try the check's fix on the current buffer; adopt and re-evaluate on change.
    fn fix(&mut self, check: &dyn Check, outcome: &mut Outcome) {
        if !self.fixing || outcome.status().is_pass() {
            return;
        }
        let Some(fixer) = check.fixer() else {
            return;
        };
        match apply_fix(fixer, &self.input()) {
            Err(msg) => {
                outcome.fix.note = format!("fix failed: {msg}");
            }
            Ok(out) if out.data == self.data => {
                outcome.fix.note = out.note;
            }
            Ok(out) => {
                debug!(check = check.name(), note = %out.note, "fix changed data");
                self.data = out.data;
                outcome.fix = FixRecord {
                    did_change: true,
                    note: out.note,
                };
                outcome.result = evaluate(check, &self.input());
            }
        }
    }
}

impl<'a> CheckRunner<'a> {
    #[must_use]
    pub const fn new(checks: &'a RegistrySnapshot) -> Self {
        Self { checks }
    }

    #[must_use]
    pub const fn checks(&self) -> &'a RegistrySnapshot {
        self.checks
    }

    /// Run every applicable check once.
    ///
    /// An empty snapshot yields an empty summary; deciding whether that is
    /// acceptable is the caller's business.
    #[must_use]
    pub fn run(&self, data: &[u8], path: &Path, langs: &[String], options: RunOptions) -> Summary {
        let mut pass = Pass {
            path,
            langs,
            fixing: options.fixing(),
            data: data.to_vec(),
        };
        let mut outcomes = Vec::with_capacity(self.checks.len());

        let early_exit = self.run_critical(&mut pass, &mut outcomes);
        if early_exit.is_none() {
            self.run_normal(&mut pass, &mut outcomes);
        }

        let counts = Counts::tally(&outcomes);
        let applied_fixes = outcomes.iter().any(|o| o.fix.did_change);
        trace!(path = %path.display(), ?counts, applied_fixes, "run complete");
        Summary {
            path: path.to_path_buf(),
            outcomes,
            counts,
            early_exit,
            applied_fixes,
            final_data: pass.data,
            final_path: path.to_path_buf(),
        }
    }

    fn run_critical(&self, pass: &mut Pass<'_>, outcomes: &mut Vec<Outcome>) -> Option<EarlyExit> {
        for check in self.checks.critical() {
            let mut outcome = Outcome::new(evaluate(check.as_ref(), &pass.input()));
            pass.fix(check.as_ref(), &mut outcome);
            let status = outcome.status();
            outcomes.push(outcome);
            if !status.is_pass() {
                let skipped = self.checks.len() - outcomes.len();
                debug!(check = check.name(), %status, skipped, "fail-fast stop");
                return Some(EarlyExit {
                    check: check.name().to_string(),
                    status,
                });
            }
        }
        None
    }

    fn run_normal(&self, pass: &mut Pass<'_>, outcomes: &mut Vec<Outcome>) {
        let normal: &[Arc<dyn Check>] = self.checks.normal();
        let snapshot = pass.input();
        let mut evaluated: Vec<Outcome> = normal
            .par_iter()
            .map(|check| Outcome::new(evaluate(check.as_ref(), &snapshot)))
            .collect();

        for (check, outcome) in normal.iter().zip(evaluated.iter_mut()) {
            pass.fix(check.as_ref(), outcome);
        }

        evaluated.sort_by(|a, b| {
            a.result
                .name
                .cmp(&b.result.name)
                .then(a.status().cmp(&b.status()))
        });
        outcomes.extend(evaluated);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
