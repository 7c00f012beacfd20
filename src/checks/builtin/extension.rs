use crate::checks::{Check, CheckError, CheckInput, CheckResult};

const NAME: &str = "ensure-csv-extension";

/// The file name must end in `.csv` (any case).
pub struct EnsureCsvExtension;

impl Check for EnsureCsvExtension {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        1
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        let ext = input
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        Ok(match ext.as_deref() {
            Some("csv") => CheckResult::pass(NAME, "File extension OK: .csv"),
            Some(other) => CheckResult::fail(
                NAME,
                format!("Invalid file extension: .{other} (expected .csv)"),
            ),
            None => CheckResult::fail(NAME, "Invalid file extension: (none) (expected .csv)"),
        })
    }
}
