use crate::checks::{Check, CheckError, CheckInput, CheckResult, Fix, FixOutput};

use super::records::join;
use super::{Table, join_limited};

const NAME: &str = "ensure-flag-values";
const FLAG_COLUMNS: [&str; 3] = ["casesensitive", "translatable", "forbidden"];
const MAX_SHOWN: usize = 5;

/// Flag columns, when present, hold `yes` or `no`. Empty cells are allowed.
///
/// The fix rewrites common spellings (`true`, `1`, `Y`, `No`, ...) to the
/// canonical lowercase form; unknown values are left alone.
pub struct EnsureFlagValues;

fn canonical(value: &str) -> Option<&'static str> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some("yes"),
        "no" | "n" | "false" | "0" => Some("no"),
        _ => None,
    }
}

fn flag_columns(table: &Table) -> Vec<(usize, &'static str)> {
    FLAG_COLUMNS
        .iter()
        .filter_map(|name| table.column(name).map(|i| (i, *name)))
        .collect()
}

impl Check for EnsureFlagValues {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        7
    }

    fn fail_fast(&self) -> bool {
        false
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        let table = Table::parse(input)?;
        let columns = flag_columns(&table);
        if columns.is_empty() {
            return Ok(CheckResult::pass(NAME, "No flag columns present"));
        }
        let mut bad = Vec::new();
        for row in &table.rows {
            for &(col, name) in &columns {
                let Some(value) = row.fields.get(col) else {
                    continue;
                };
                let value = value.trim();
                if !value.is_empty() && value != "yes" && value != "no" {
                    bad.push(format!("line {} {name}='{value}'", row.line));
                }
            }
        }
        if bad.is_empty() {
            Ok(CheckResult::pass(NAME, "Flag values are yes/no"))
        } else {
            Ok(CheckResult::fail(
                NAME,
                format!(
                    "Flag values must be 'yes' or 'no': {}",
                    join_limited(&bad, MAX_SHOWN)
                ),
            ))
        }
    }

    fn fixer(&self) -> Option<&dyn Fix> {
        Some(self)
    }
}

impl Fix for EnsureFlagValues {
    fn fix(&self, input: &CheckInput<'_>) -> Result<FixOutput, CheckError> {
        let table = Table::parse(input)?;
        let columns = flag_columns(&table);
        let text = String::from_utf8_lossy(input.data);
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        let mut rewritten = 0usize;
        for row in &table.rows {
            let mut fields = row.fields.clone();
            let mut touched = false;
            for &(col, _) in &columns {
                if let Some(cell) = fields.get_mut(col)
                    && let Some(canon) = canonical(cell)
                    && cell.as_str() != canon
                {
                    *cell = canon.to_string();
                    touched = true;
                }
            }
            if !touched {
                continue;
            }
            let raw = &text[row.span.clone()];
            let ending = &raw[raw.trim_end_matches(['\r', '\n']).len()..];
            out.push_str(&text[pos..row.span.start]);
            out.push_str(&join(&fields));
            out.push_str(ending);
            pos = row.span.end;
            rewritten += 1;
        }
        out.push_str(&text[pos..]);
        Ok(FixOutput {
            data: out.into_bytes(),
            note: format!("normalized flag values in {rewritten} row(s)"),
        })
    }
}
