//! Scriptable checks shared by registry, runner and scheduler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Check, CheckError, CheckInput, CheckResult, Fix, FixOutput, Status};

#[derive(Clone)]
pub enum Behavior {
    Always(Status),
    /// Pass when the buffer contains the marker, otherwise fail.
    PassIfContains(&'static str),
    Errors,
    Panics,
}

#[derive(Clone)]
pub enum FixBehavior {
    Append(&'static str),
    Unchanged,
    Errors,
    Panics,
}

#[derive(Clone)]
pub struct StubCheck {
    name: String,
    priority: i32,
    fail_fast: bool,
    behavior: Behavior,
    fix: Option<StubFix>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl StubCheck {
    pub fn new(name: &str, priority: i32, fail_fast: bool, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            priority,
            fail_fast,
            behavior,
            fix: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn critical(name: &str, priority: i32, status: Status) -> Self {
        Self::new(name, priority, true, Behavior::Always(status))
    }

    pub fn normal(name: &str, priority: i32, status: Status) -> Self {
        Self::new(name, priority, false, Behavior::Always(status))
    }

    pub fn with_fix(mut self, behavior: FixBehavior) -> Self {
        self.fix = Some(StubFix {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        });
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared evaluation counter; survives moving the check into a registry.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn fix_calls(&self) -> Option<Arc<AtomicUsize>> {
        self.fix.as_ref().map(|f| Arc::clone(&f.calls))
    }
}

impl Check for StubCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match &self.behavior {
            Behavior::Always(status) => Ok(CheckResult::new(
                &self.name,
                *status,
                format!("{} says {status}", self.name),
            )),
            Behavior::PassIfContains(marker) => {
                let text = String::from_utf8_lossy(input.data);
                if text.contains(marker) {
                    Ok(CheckResult::pass(&self.name, "marker present"))
                } else {
                    Ok(CheckResult::fail(&self.name, "marker missing"))
                }
            }
            Behavior::Errors => Err(CheckError::Internal("scripted failure".to_string())),
            Behavior::Panics => panic!("scripted panic in {}", self.name),
        }
    }

    fn fixer(&self) -> Option<&dyn Fix> {
        self.fix.as_ref().map(|f| f as &dyn Fix)
    }
}

#[derive(Clone)]
pub struct StubFix {
    behavior: FixBehavior,
    calls: Arc<AtomicUsize>,
}

impl Fix for StubFix {
    fn fix(&self, input: &CheckInput<'_>) -> Result<FixOutput, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            FixBehavior::Append(marker) => {
                let mut data = input.data.to_vec();
                data.extend_from_slice(marker.as_bytes());
                Ok(FixOutput {
                    data,
                    note: format!("appended {marker}"),
                })
            }
            FixBehavior::Unchanged => Ok(FixOutput {
                data: input.data.to_vec(),
                note: "nothing to do".to_string(),
            }),
            FixBehavior::Errors => Err(CheckError::Internal("fix refused".to_string())),
            FixBehavior::Panics => panic!("scripted fix panic"),
        }
    }
}
