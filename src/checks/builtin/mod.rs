//! Default glossary rule set.
//!
//! | check                    | priority | fail-fast | fix |
//! |--------------------------|----------|-----------|-----|
//! | `ensure-csv-extension`   | 1        | yes       | no  |
//! | `ensure-utf8-encoding`   | 2        | yes       | yes |
//! | `ensure-header-and-rows` | 3        | yes       | yes |
//! | `ensure-non-empty-term`  | 4        | no        | no  |
//! | `ensure-unique-terms`    | 5        | no        | yes |
//! | `ensure-lang-columns`    | 6        | no        | no  |
//! | `ensure-flag-values`     | 7        | no        | yes |

mod encoding;
mod extension;
mod flags;
mod header;
mod languages;
pub mod records;
mod terms;

pub use encoding::EnsureUtf8;
pub use extension::EnsureCsvExtension;
pub use flags::EnsureFlagValues;
pub use header::EnsureHeaderAndRows;
pub use languages::EnsureLangColumns;
pub use terms::{EnsureNonEmptyTerm, EnsureUniqueTerms};

use std::fmt::Write;

use super::{CheckError, CheckInput, CheckRegistry};
use records::Record;

/// Registry holding every built-in check.
#[must_use]
pub fn default_registry() -> CheckRegistry {
    let mut registry = CheckRegistry::new();
    register_defaults(&mut registry);
    registry
}

pub fn register_defaults(registry: &mut CheckRegistry) {
    registry.register(EnsureCsvExtension);
    registry.register(EnsureUtf8);
    registry.register(EnsureHeaderAndRows);
    registry.register(EnsureNonEmptyTerm);
    registry.register(EnsureUniqueTerms);
    registry.register(EnsureLangColumns);
    registry.register(EnsureFlagValues);
}

/// Parsed header plus data rows, for checks that run after the structural ones.
struct Table {
    header: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    fn parse(input: &CheckInput<'_>) -> Result<Self, CheckError> {
        let text = std::str::from_utf8(input.data)
            .map_err(|e| CheckError::Malformed(format!("not valid UTF-8: {e}")))?;
        let mut records =
            records::parse(text).map_err(|e| CheckError::Malformed(e.to_string()))?;
        if records.is_empty() {
            return Err(CheckError::Malformed("missing header row".to_string()));
        }
        let header = records::normalize_header(&records.remove(0).fields);
        Ok(Self {
            header,
            rows: records,
        })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }
}

/// Rebuild `text` without the given record spans.
fn drop_spans(text: &str, drop: &[std::ops::Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for span in drop {
        out.push_str(&text[pos..span.start]);
        pos = span.end;
    }
    out.push_str(&text[pos..]);
    out
}

fn join_limited<T: ToString>(items: &[T], max: usize) -> String {
    let shown: Vec<String> = items.iter().take(max).map(ToString::to_string).collect();
    let mut out = shown.join(", ");
    if items.len() > max {
        let _ = write!(out, ", …and {} more", items.len() - max);
    }
    out
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
