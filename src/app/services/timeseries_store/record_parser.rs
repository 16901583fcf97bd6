//! Measurement record parsing
//!
//! Records are comma-separated lines of timestamp, value, and flags. The
//! value field may be empty (a recorded gap); the flags field may be absent.
//! Timestamps must be strictly increasing within a file.

use crate::app::models::TimeseriesRecord;
use crate::constants::{RECORD_TIMESTAMP_FORMAT, RECORD_TIMESTAMP_FORMAT_SECONDS};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::io::Read;

/// Parse all measurement records from a reader
///
/// `file_label` names the source in errors. Every fault is addressed to the
/// line it occurred on.
pub fn parse_records<R: Read>(reader: R, file_label: &str) -> Result<Vec<TimeseriesRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records: Vec<TimeseriesRecord> = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row = result.map_err(|e| {
            Error::csv_parsing(file_label, "Malformed CSV record", Some(e))
        })?;
        let line = row
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(index + 1);

        let record = parse_row(&row, file_label, line)?;

        if let Some(previous) = records.last() {
            if record.timestamp <= previous.timestamp {
                return Err(Error::record_format(
                    file_label,
                    line,
                    format!(
                        "timestamp {} does not increase over preceding {}",
                        record.timestamp, previous.timestamp
                    ),
                ));
            }
        }

        records.push(record);
    }

    Ok(records)
}

fn parse_row(row: &csv::StringRecord, file_label: &str, line: usize) -> Result<TimeseriesRecord> {
    if row.len() < 2 {
        return Err(Error::record_format(
            file_label,
            line,
            "expected at least timestamp and value fields",
        ));
    }

    let timestamp = parse_timestamp(row[0].trim())
        .map_err(|message| Error::record_format(file_label, line, message))?;

    let value_field = row[1].trim();
    let value = if value_field.is_empty() {
        None
    } else {
        Some(value_field.parse::<f64>().map_err(|_| {
            Error::record_format(
                file_label,
                line,
                format!("invalid value '{}'", value_field),
            )
        })?)
    };

    let flags = row.get(2).map(str::trim).unwrap_or("").to_string();

    Ok(TimeseriesRecord {
        timestamp,
        value,
        flags,
    })
}

/// Parse a record timestamp, with or without a seconds component
fn parse_timestamp(field: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(field, RECORD_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(field, RECORD_TIMESTAMP_FORMAT_SECONDS))
        .map_err(|_| format!("invalid timestamp '{}'", field))
}
