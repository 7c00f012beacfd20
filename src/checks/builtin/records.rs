//! Minimal reader for semicolon-separated glossary rows.
//!
//! Handles double-quoted fields (with `""` escapes and embedded newlines),
//! CRLF line endings and leading spaces before a field. Whitespace-only
//! lines produce no record.

use std::ops::Range;

use thiserror::Error;

pub const DELIMITER: u8 = b';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line on which the record starts.
    pub line: usize,
    /// Byte range of the raw record, including its line terminator.
    pub span: Range<usize>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError {
            line: self.line,
            message: message.to_string(),
        }
    }

    fn quoted_field(&mut self, out: &mut Vec<u8>) -> Result<(), ParseError> {
        let start_line = self.line;
        self.pos += 1;
        loop {
            let Some(b) = self.peek() else {
                return Err(ParseError {
                    line: start_line,
                    message: "unterminated quoted field".to_string(),
                });
            };
            self.pos += 1;
            match b {
                b'"' if self.peek() == Some(b'"') => {
                    out.push(b'"');
                    self.pos += 1;
                }
                b'"' => break,
                b'\n' => {
                    self.line += 1;
                    out.push(b);
                }
                _ => out.push(b),
            }
        }
        match self.peek() {
            None | Some(DELIMITER | b'\r' | b'\n') => Ok(()),
            Some(_) => Err(self.error("unexpected character after closing quote")),
        }
    }

    fn bare_field(&mut self, out: &mut Vec<u8>) -> Result<(), ParseError> {
        while let Some(b) = self.peek() {
            match b {
                DELIMITER | b'\n' => break,
                b'"' => return Err(self.error("bare '\"' in unquoted field")),
                _ => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }
        if out.last() == Some(&b'\r') {
            out.pop();
        }
        Ok(())
    }

    fn record(&mut self) -> Result<Vec<String>, ParseError> {
        let mut fields = Vec::new();
        loop {
            while self.peek() == Some(b' ') {
                self.pos += 1;
            }
            let mut field = Vec::new();
            if self.peek() == Some(b'"') {
                self.quoted_field(&mut field)?;
            } else {
                self.bare_field(&mut field)?;
            }
            fields.push(String::from_utf8_lossy(&field).into_owned());

            match self.peek() {
                Some(DELIMITER) => self.pos += 1,
                Some(b'\r') => {
                    self.pos += 1;
                    if self.peek() == Some(b'\n') {
                        self.pos += 1;
                        self.line += 1;
                    }
                    return Ok(fields);
                }
                Some(b'\n') => {
                    self.pos += 1;
                    self.line += 1;
                    return Ok(fields);
                }
                _ => return Ok(fields),
            }
        }
    }
}

/// Parse every record in `text`.
///
/// # Errors
/// Returns the first quoting error with its line number.
pub fn parse(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut cursor = Cursor {
        bytes: text.as_bytes(),
        pos: 0,
        line: 1,
    };
    let mut records = Vec::new();
    while cursor.pos < cursor.bytes.len() {
        let start = cursor.pos;
        let line = cursor.line;
        let fields = cursor.record()?;
        let span = start..cursor.pos;
        if text[span.clone()].trim().is_empty() {
            continue;
        }
        records.push(Record { line, span, fields });
    }
    Ok(records)
}

/// Serialize fields back into one row, quoting where needed.
#[must_use]
pub fn join(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| {
            if f.contains([';', '"', '\n', '\r']) || f.starts_with(' ') {
                format!("\"{}\"", f.replace('"', "\"\""))
            } else {
                f.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Lowercased, trimmed header names with a leading BOM removed.
#[must_use]
pub fn normalize_header(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 {
                h.trim_start_matches('\u{feff}')
            } else {
                h.as_str()
            };
            h.trim().to_lowercase()
        })
        .collect()
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
