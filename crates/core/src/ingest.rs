//! CSV text ingestion: header + data rows → a row batch.
//!
//! Uploads arrive as CSV text in the request body; this module turns that
//! text into the column order and row mappings the classifier consumes.
//! Quoting follows RFC 4180: fields may be double-quoted, quoted fields may
//! contain commas, newlines, and doubled-quote escapes. All parsed values
//! are strings; typing is the rule evaluator's concern.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// A parsed upload: the stable column order plus one mapping per data row.
#[derive(Debug, Clone)]
pub struct RowBatch {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Parse CSV text into a row batch.
///
/// The first record is the header. Blank lines are skipped. A short data
/// row simply leaves its trailing columns absent (absent columns are "no
/// opinion" during classification); extra fields beyond the header are
/// dropped.
pub fn parse_csv(text: &str) -> Result<RowBatch, CoreError> {
    let mut records = parse_records(text).into_iter();

    let columns = records
        .next()
        .filter(|header| header.iter().any(|field| !field.is_empty()))
        .ok_or_else(|| CoreError::Validation("CSV data has no header row".to_string()))?;

    let rows = records
        .map(|record| {
            columns
                .iter()
                .zip(record)
                .map(|(column, field)| (column.clone(), Value::String(field)))
                .collect()
        })
        .collect();

    Ok(RowBatch { columns, rows })
}

/// Split CSV text into records of raw string fields.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
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
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_record(&mut records, &mut record, &mut field);
            }
            '\n' => flush_record(&mut records, &mut record, &mut field),
            _ => field.push(c),
        }
    }

    // Final record when the text does not end with a newline.
    if !field.is_empty() || !record.is_empty() {
        flush_record(&mut records, &mut record, &mut field);
    }

    records
}

/// Close out the current record, dropping blank lines.
fn flush_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    record.push(std::mem::take(field));
    if record.len() > 1 || !record[0].is_empty() {
        records.push(std::mem::take(record));
    } else {
        record.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
