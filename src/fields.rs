use tracing::trace;

use crate::error::ExtractError;
use crate::model::{FieldSet, LineKind};

/// Every keyword must appear somewhere on a line for it to count as a header line.
pub const HEADER_KEYWORDS: [&str; 2] = ["Header", "Data"];

/// Every keyword must appear somewhere on a line for it to count as a table line.
pub const TABLE_KEYWORDS: [&str; 4] = ["Column 1", "Column 2", "Column 3", "Column 4"];

fn contains_all(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().all(|keyword| line.contains(keyword))
}

/// Header keywords are checked first, so a line matching both sets is a header line.
#[must_use]
pub fn classify_line(line: &str) -> Option<LineKind> {
    if contains_all(line, &HEADER_KEYWORDS) {
        Some(LineKind::Header)
    } else if contains_all(line, &TABLE_KEYWORDS) {
        Some(LineKind::Table)
    } else {
        None
    }
}

fn value_after_separator(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value.trim())
}

/// Sorts the values of keyword lines in `text` into header and table values.
///
/// A value is everything after the first `:` on its line, trimmed, so
/// `"Header Data: Due: 10:30"` yields `"Due: 10:30"`.
///
/// # Errors
///
/// Returns [`ExtractError::MissingSeparator`] for a keyword line without a `:`.
pub fn split_fields(text: &str) -> Result<FieldSet, ExtractError> {
    let mut fields = FieldSet::default();

    for (index, line) in text.split('\n').enumerate() {
        let Some(kind) = classify_line(line) else {
            continue;
        };

        let value = value_after_separator(line).ok_or_else(|| ExtractError::MissingSeparator {
            line_number: index + 1,
            kind,
            line: line.trim_end().to_string(),
        })?;
        trace!(line = index + 1, %kind, value, "matched keyword line");

        match kind {
            LineKind::Header => fields.header_values.push(value.to_string()),
            LineKind::Table => fields.table_values.push(value.to_string()),
        }
    }

    Ok(fields)
}
