//! Delimited-text (CSV/TSV) parsing.
//!
//! The first row names the columns. Every later row becomes an object keyed
//! by those names, with all values kept as strings.

use scrollyteller_core::error::StoryError;
use serde_json::{Map, Value};

/// Parses delimited `text` into an array of string-valued records.
///
/// Fields may be wrapped in double quotes, with `""` standing for a literal
/// quote; quoted fields may contain the delimiter and line breaks. Blank lines
/// are skipped, short rows are padded with `""`, and fields beyond the header
/// are dropped.
///
/// # Errors
///
/// Returns `StoryError::Parse` if a quoted field is never closed.
pub fn parse_delimited(text: &str, delimiter: char, path: &str) -> Result<Vec<Value>, StoryError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = split_rows(text, delimiter, path)?.into_iter();

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let records = rows
        .map(|fields| {
            let mut record = Map::with_capacity(header.len());
            for (i, column) in header.iter().enumerate() {
                let value = fields.get(i).cloned().unwrap_or_default();
                record.insert(column.clone(), Value::String(value));
            }
            Value::Object(record)
        })
        .collect();

    Ok(records)
}

fn split_rows(text: &str, delimiter: char, path: &str) -> Result<Vec<Vec<String>>, StoryError> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
            }
            c if c == delimiter => row.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }

    if in_quotes {
        return Err(StoryError::Parse {
            path: path.to_owned(),
            reason: "unterminated quoted field".to_owned(),
        });
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    Ok(rows)
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    // A blank line arrives as a single empty field.
    if row.len() == 1 && row[0].is_empty() {
        return;
    }
    rows.push(row);
}
