//! Containment boundary around check and fix code.
//!
//! Every call into a `Check` or `Fix` goes through here. An `Err` or a panic
//! becomes an `Error` result (or a failed fix) for that check only.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::checks::{Check, CheckInput, CheckResult, Fix, FixOutput};

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run a check, converting errors and panics into an `Error` result.
///
/// The returned result always carries the check's own name.
pub fn evaluate(check: &dyn Check, input: &CheckInput<'_>) -> CheckResult {
    let name = check.name();
    let mut result = match panic::catch_unwind(AssertUnwindSafe(|| check.run(input))) {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => CheckResult::error(name, format!("check failed: {err}")),
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            warn!(check = name, path = %input.path.display(), "check panicked: {msg}");
            CheckResult::error(name, format!("check panicked: {msg}"))
        }
    };
    if result.name != name {
        result.name = name.to_string();
    }
    debug!(check = name, status = %result.status, "evaluated");
    result
}

/// Invoke a fix, converting errors and panics into a message.
///
/// # Errors
/// Returns a one-line description when the fix could not produce a buffer.
pub fn apply_fix(fix: &dyn Fix, input: &CheckInput<'_>) -> Result<FixOutput, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| fix.fix(input))) {
        Ok(Ok(out)) => Ok(out),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            warn!(path = %input.path.display(), "fix panicked: {msg}");
            Err(format!("fix panicked: {msg}"))
        }
    }
}

#[cfg(test)]
#[path = "supervise_tests.rs"]
mod tests;
