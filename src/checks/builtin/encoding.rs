use crate::checks::{Check, CheckError, CheckInput, CheckResult, Fix, FixOutput};

const NAME: &str = "ensure-utf8-encoding";

/// Content must be valid UTF-8. The fix replaces invalid sequences with U+FFFD.
pub struct EnsureUtf8;

impl Check for EnsureUtf8 {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        2
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        Ok(match std::str::from_utf8(input.data) {
            Ok(_) => CheckResult::pass(NAME, "File encoding is valid UTF-8"),
            Err(e) => CheckResult::fail(
                NAME,
                format!(
                    "File encoding is not valid UTF-8 (first invalid byte at offset {})",
                    e.valid_up_to()
                ),
            ),
        })
    }

    fn fixer(&self) -> Option<&dyn Fix> {
        Some(self)
    }
}

impl Fix for EnsureUtf8 {
    fn fix(&self, input: &CheckInput<'_>) -> Result<FixOutput, CheckError> {
        Ok(FixOutput {
            data: String::from_utf8_lossy(input.data).into_owned().into_bytes(),
            note: "replaced invalid UTF-8 sequences with U+FFFD".to_string(),
        })
    }
}
