use std::sync::LazyLock;

use regex::Regex;

use crate::checks::{Check, CheckError, CheckInput, CheckResult};

use super::Table;

const NAME: &str = "ensure-lang-columns";

static LANG_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}([_-][A-Za-z0-9]{2,8})*$").expect("valid language code regex")
});

/// `true` for codes such as `en`, `de_DE`, `pt-BR`, `zh_Hant_TW`.
#[must_use]
pub fn is_valid_lang_code(code: &str) -> bool {
    LANG_CODE.is_match(code)
}

/// Every declared language needs a header column of the same name.
pub struct EnsureLangColumns;

impl Check for EnsureLangColumns {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        6
    }

    fn fail_fast(&self) -> bool {
        false
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        if input.langs.is_empty() {
            return Ok(CheckResult::pass(
                NAME,
                "No languages declared; language columns not checked",
            ));
        }
        let invalid: Vec<&str> = input
            .langs
            .iter()
            .map(String::as_str)
            .filter(|l| !is_valid_lang_code(l))
            .collect();
        if !invalid.is_empty() {
            return Ok(CheckResult::fail(
                NAME,
                format!("Invalid language code(s): {}", invalid.join(", ")),
            ));
        }
        let table = Table::parse(input)?;
        let missing: Vec<&str> = input
            .langs
            .iter()
            .map(String::as_str)
            .filter(|l| table.column(&l.to_lowercase()).is_none())
            .collect();
        if missing.is_empty() {
            Ok(CheckResult::pass(
                NAME,
                format!("All declared languages present: {}", input.langs.join(", ")),
            ))
        } else {
            Ok(CheckResult::fail(
                NAME,
                format!("Header missing language column(s): {}", missing.join(", ")),
            ))
        }
    }
}
