//! Time series measurement store
//!
//! Measurements live in the data directory under `timeseries/<id>.csv`, one
//! record per line as `YYYY-MM-DD HH:MM,<value>,<flags>` with naive local
//! timestamps in the owning series' time zone. This module scans the store,
//! parses the files into typed records, and answers the queries the report
//! builder needs: latest record, value at a timestamp, and window slices.

use crate::app::models::TimeseriesRecord;
use crate::constants::{timeseries_data_filename, timeseries_id_from_filename, TIMESERIES_DATA_DIR};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub mod record_parser;

#[cfg(test)]
pub mod tests;

/// File-backed store of per-series measurement data
#[derive(Debug, Clone)]
pub struct TimeseriesStore {
    /// Directory holding the `<id>.csv` measurement files
    data_dir: PathBuf,
}

impl TimeseriesStore {
    /// Create a store rooted at `<data_path>/timeseries`
    pub fn new(data_path: &Path) -> Self {
        Self {
            data_dir: data_path.join(TIMESERIES_DATA_DIR),
        }
    }

    /// The directory holding the measurement files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scan the store for available series ids, sorted
    ///
    /// Files that are not `<number>.csv` are ignored. A missing store
    /// directory scans as empty.
    pub fn scan(&self) -> Result<Vec<i32>> {
        if !self.data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.data_dir).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if let Some(id) = timeseries_id_from_filename(name) {
                    ids.push(id);
                }
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Whether a series has a measurement file
    pub fn has_data_file(&self, timeseries_id: i32) -> bool {
        self.data_dir
            .join(timeseries_data_filename(timeseries_id))
            .is_file()
    }

    /// Load the measurement data of one series
    ///
    /// A series without a measurement file loads as empty data; a file that
    /// exists but cannot be parsed is an error.
    pub fn load(&self, timeseries_id: i32) -> Result<TimeseriesData> {
        let path = self.data_dir.join(timeseries_data_filename(timeseries_id));

        if !path.is_file() {
            debug!("No measurement file for time series {}", timeseries_id);
            return Ok(TimeseriesData::empty());
        }

        let file = std::fs::File::open(&path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        let records = record_parser::parse_records(file, &path.display().to_string())?;

        debug!(
            "Loaded {} records for time series {}",
            records.len(),
            timeseries_id
        );
        Ok(TimeseriesData::new(records))
    }
}

/// Parsed measurement data of one series, ordered by timestamp
#[derive(Debug, Clone, Default)]
pub struct TimeseriesData {
    records: Vec<TimeseriesRecord>,
}

impl TimeseriesData {
    /// Wrap parsed records; the parser guarantees strictly increasing
    /// timestamps
    pub fn new(records: Vec<TimeseriesRecord>) -> Self {
        Self { records }
    }

    /// Data of a series with no measurements
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the series has no measurements
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// All records in timestamp order
    pub fn records(&self) -> &[TimeseriesRecord] {
        &self.records
    }

    /// The most recent record
    pub fn last_record(&self) -> Option<&TimeseriesRecord> {
        self.records.last()
    }

    /// The timestamp of the most recent record
    pub fn end_timestamp(&self) -> Option<NaiveDateTime> {
        self.last_record().map(|record| record.timestamp)
    }

    /// The value recorded at exactly the given timestamp
    pub fn value_at(&self, timestamp: NaiveDateTime) -> Option<f64> {
        self.records
            .binary_search_by_key(&timestamp, |record| record.timestamp)
            .ok()
            .and_then(|index| self.records[index].value)
    }

    /// Records with `start <= timestamp <= end`
    pub fn window(&self, start: NaiveDateTime, end: NaiveDateTime) -> &[TimeseriesRecord] {
        let from = self.records.partition_point(|record| record.timestamp < start);
        let to = self.records.partition_point(|record| record.timestamp <= end);
        &self.records[from..to]
    }
}
