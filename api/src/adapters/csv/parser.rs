//! CSV reader for the published export
//!
//! Handles quoted fields (with `""` escapes), CRLF line endings and empty
//! lines. An unterminated quote runs to the end of the input.

use std::mem::take;

use crate::domain::entities::RawRow;

/// Split CSV text into rows of cells. Empty or whitespace-only lines produce no row.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut row: RawRow = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    rows
}

/// A line with no separators and nothing but whitespace is not a record;
/// `,,` is, and maps to a defaulted standing later.
fn push_row(rows: &mut Vec<RawRow>, row: RawRow) {
    let empty_line = row.len() == 1 && row[0].trim().is_empty();
    if !empty_line {
        rows.push(row);
    }
}
