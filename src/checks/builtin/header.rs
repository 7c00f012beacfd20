use std::ops::Range;

use crate::checks::{Check, CheckError, CheckInput, CheckResult, Fix, FixOutput};

use super::records::{self, Record, normalize_header};
use super::{drop_spans, join_limited};

const NAME: &str = "ensure-header-and-rows";
const MAX_SHOWN: usize = 10;

/// Header shape, delimiter and row structure.
///
/// The fix removes blank lines after the header. Lines inside a quoted
/// cell belong to their record and are never touched. Every other finding
/// needs a human.
pub struct EnsureHeaderAndRows;

impl Check for EnsureHeaderAndRows {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        3
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        let text = std::str::from_utf8(input.data)
            .map_err(|e| CheckError::Malformed(format!("not valid UTF-8: {e}")))?;
        let header_line = text.lines().next().unwrap_or("");
        if header_line.trim().is_empty() {
            return Ok(CheckResult::fail(NAME, "Empty file: header row is required"));
        }
        if let Some(problem) = delimiter_problem(header_line) {
            return Ok(CheckResult::fail(NAME, problem));
        }
        if let Some(problem) = header_problem(header_line) {
            return Ok(CheckResult::fail(NAME, problem));
        }
        let rows = match records::parse(text) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(CheckResult::fail(
                    NAME,
                    format!("CSV parse error on data (check delimiter/quoting): {e}"),
                ));
            }
        };
        let blank: Vec<usize> = blank_lines(text, &rows)
            .into_iter()
            .map(|(line, _)| line)
            .collect();
        if !blank.is_empty() {
            return Ok(CheckResult::fail(
                NAME,
                format!(
                    "Blank lines are not allowed after header. Found at row(s): {}",
                    join_limited(&blank, MAX_SHOWN)
                ),
            ));
        }
        Ok(rows_result(&rows))
    }

    fn fixer(&self) -> Option<&dyn Fix> {
        Some(self)
    }
}

impl Fix for EnsureHeaderAndRows {
    fn fix(&self, input: &CheckInput<'_>) -> Result<FixOutput, CheckError> {
        let text = std::str::from_utf8(input.data)
            .map_err(|e| CheckError::Malformed(format!("not valid UTF-8: {e}")))?;
        let rows = match records::parse(text) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(FixOutput {
                    data: input.data.to_vec(),
                    note: format!("left unchanged: {e}"),
                });
            }
        };
        let blank: Vec<Range<usize>> = blank_lines(text, &rows)
            .into_iter()
            .map(|(_, span)| span)
            .collect();
        Ok(FixOutput {
            data: drop_spans(text, &blank).into_bytes(),
            note: format!("removed {} blank line(s) after header", blank.len()),
        })
    }
}

fn delimiter_problem(header: &str) -> Option<&'static str> {
    let semicolon = header.contains(';');
    let comma = header.contains(',');
    let tab = header.contains('\t');
    match (semicolon, comma, tab) {
        (false, true, _) => Some("Header appears to use ',' as delimiter. Expected ';'."),
        (false, false, true) => Some("Header appears to use TAB as delimiter. Expected ';'."),
        (false, false, false) => Some("Header missing semicolons: expected ';' as delimiter"),
        (true, true, _) | (true, _, true) => {
            Some("Header uses mixed delimiters. Expected semicolons (';') only")
        }
        (true, false, false) => None,
    }
}

fn header_problem(header_line: &str) -> Option<String> {
    let parsed = match records::parse(header_line) {
        Ok(mut rows) if !rows.is_empty() => rows.remove(0).fields,
        Ok(_) => return Some("Empty file: header row is required".to_string()),
        Err(e) => return Some(format!("Cannot parse header: {}", e.message)),
    };
    if parsed.len() < 2 {
        return Some(
            "Malformed header: expected at least 2 semicolon-separated columns".to_string(),
        );
    }
    let header = normalize_header(&parsed);
    let missing: Vec<&str> = ["term", "description"]
        .into_iter()
        .filter(|req| !header.iter().any(|h| h == req))
        .collect();
    if !missing.is_empty() {
        return Some(format!(
            "Header missing required columns: {}",
            missing.join(", ")
        ));
    }
    if header[0] != "term" || header[1] != "description" {
        let pos = |name: &str| header.iter().position(|h| h == name).map_or(0, |i| i + 1);
        return Some(format!(
            "Invalid header order: expected first two columns to be 'term;description', got '{};{}' (found term at #{}, description at #{})",
            header[0],
            header[1],
            pos("term"),
            pos("description"),
        ));
    }
    None
}

/// Whitespace-only lines after the header that lie between records, as
/// 1-based line number and byte range.
fn blank_lines(text: &str, rows: &[Record]) -> Vec<(usize, Range<usize>)> {
    let header_end = rows.first().map_or(0, |r| r.span.end);
    let mut spans = rows.iter().map(|r| &r.span).peekable();
    let mut blanks = Vec::new();
    let mut offset = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        let range = offset..offset + line.len();
        offset = range.end;
        while spans.next_if(|s| s.end <= range.start).is_some() {}
        let in_record = spans.peek().is_some_and(|s| s.start <= range.start);
        if range.start >= header_end && !in_record && line.trim().is_empty() {
            blanks.push((i + 1, range));
        }
    }
    blanks
}

fn rows_result(rows: &[Record]) -> CheckResult {
    let Some((header, data)) = rows.split_first() else {
        return CheckResult::fail(NAME, "Empty file: header row is required");
    };
    for row in data {
        if row.fields.len() != header.fields.len() {
            return CheckResult::fail(
                NAME,
                format!(
                    "CSV parse error on data: line {} has {} field(s), expected {}",
                    row.line,
                    row.fields.len(),
                    header.fields.len()
                ),
            );
        }
        if row.fields.iter().all(|f| f.trim().is_empty()) {
            return CheckResult::fail(
                NAME,
                format!("Blank data row is not allowed (line {})", row.line),
            );
        }
    }
    if data.is_empty() {
        return CheckResult::fail(NAME, "No data rows found after header");
    }
    CheckResult::pass(
        NAME,
        "Header valid; required columns present; ';' delimiter confirmed; no blank lines; data parsed successfully",
    )
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
