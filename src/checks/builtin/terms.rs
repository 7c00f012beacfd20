use std::collections::HashMap;

use crate::checks::{Check, CheckError, CheckInput, CheckResult, Fix, FixOutput};

use super::{Table, drop_spans, join_limited};

const NON_EMPTY: &str = "ensure-non-empty-term";
const UNIQUE: &str = "ensure-unique-terms";
const MAX_SHOWN: usize = 5;

fn term_column(table: &Table) -> Result<usize, CheckError> {
    table
        .column("term")
        .ok_or_else(|| CheckError::Malformed("header does not contain 'term' column".to_string()))
}

/// Every data row needs a term.
pub struct EnsureNonEmptyTerm;

impl Check for EnsureNonEmptyTerm {
    fn name(&self) -> &str {
        NON_EMPTY
    }

    fn priority(&self) -> i32 {
        4
    }

    fn fail_fast(&self) -> bool {
        false
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        let table = Table::parse(input)?;
        let col = term_column(&table)?;
        let blank: Vec<usize> = table
            .rows
            .iter()
            .filter(|r| r.fields.get(col).is_none_or(|t| t.trim().is_empty()))
            .map(|r| r.line)
            .collect();
        if blank.is_empty() {
            return Ok(CheckResult::pass(NON_EMPTY, "All term values are present"));
        }
        Ok(CheckResult::fail(
            NON_EMPTY,
            format!(
                "term value is required (blank found at line(s) {})",
                join_limited(&blank, MAX_SHOWN)
            ),
        ))
    }
}

/// Terms must be unique. Exact repeats fail; repeats differing only in case warn.
///
/// The fix keeps the first row for each exact term and drops later ones.
pub struct EnsureUniqueTerms;

struct Duplicates {
    /// `(term, first line, repeated line, span of repeated row)`
    exact: Vec<(String, usize, usize, std::ops::Range<usize>)>,
    case_only: Vec<(String, String)>,
}

fn find_duplicates(table: &Table, col: usize) -> Duplicates {
    let mut exact_seen: HashMap<&str, usize> = HashMap::new();
    let mut folded_seen: HashMap<String, &str> = HashMap::new();
    let mut dups = Duplicates {
        exact: Vec::new(),
        case_only: Vec::new(),
    };
    for row in &table.rows {
        let Some(term) = row.fields.get(col).map(|t| t.trim()) else {
            continue;
        };
        if term.is_empty() {
            continue;
        }
        if let Some(&first) = exact_seen.get(term) {
            dups.exact
                .push((term.to_string(), first, row.line, row.span.clone()));
            continue;
        }
        exact_seen.insert(term, row.line);
        match folded_seen.get(&term.to_lowercase()) {
            Some(&other) => dups.case_only.push((other.to_string(), term.to_string())),
            None => {
                folded_seen.insert(term.to_lowercase(), term);
            }
        }
    }
    dups
}

impl Check for EnsureUniqueTerms {
    fn name(&self) -> &str {
        UNIQUE
    }

    fn priority(&self) -> i32 {
        5
    }

    fn fail_fast(&self) -> bool {
        false
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        let table = Table::parse(input)?;
        let dups = find_duplicates(&table, term_column(&table)?);
        if !dups.exact.is_empty() {
            let shown: Vec<String> = dups
                .exact
                .iter()
                .map(|(t, first, again, _)| format!("'{t}' (lines {first} and {again})"))
                .collect();
            return Ok(CheckResult::fail(
                UNIQUE,
                format!("Duplicate terms: {}", join_limited(&shown, MAX_SHOWN)),
            ));
        }
        if !dups.case_only.is_empty() {
            let shown: Vec<String> = dups
                .case_only
                .iter()
                .map(|(a, b)| format!("'{a}' / '{b}'"))
                .collect();
            return Ok(CheckResult::warn(
                UNIQUE,
                format!(
                    "Terms differing only in case: {}",
                    join_limited(&shown, MAX_SHOWN)
                ),
            ));
        }
        Ok(CheckResult::pass(UNIQUE, "All terms are unique"))
    }

    fn fixer(&self) -> Option<&dyn Fix> {
        Some(self)
    }
}

impl Fix for EnsureUniqueTerms {
    fn fix(&self, input: &CheckInput<'_>) -> Result<FixOutput, CheckError> {
        let table = Table::parse(input)?;
        let dups = find_duplicates(&table, term_column(&table)?);
        let spans: Vec<_> = dups.exact.iter().map(|d| d.3.clone()).collect();
        let text = String::from_utf8_lossy(input.data);
        Ok(FixOutput {
            data: drop_spans(&text, &spans).into_bytes(),
            note: format!("dropped {} duplicate row(s)", spans.len()),
        })
    }
}

#[cfg(test)]
#[path = "terms_tests.rs"]
mod tests;
