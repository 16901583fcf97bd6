//! Application constants for the synoptic renderer
//!
//! This module contains configuration constants, default values, file name
//! conventions, and format strings used throughout the renderer.

// =============================================================================
// Data Directory Layout
// =============================================================================

/// Synoptic group configuration file inside the data directory
pub const SYNOPTIC_CONFIG_FILENAME: &str = "synoptic.toml";

/// Station records file inside the data directory
pub const STATIONS_FILENAME: &str = "stations.toml";

/// Time series records file inside the data directory
pub const TIMESERIES_FILENAME: &str = "timeseries.toml";

/// Subdirectory of the data directory holding per-series measurement files
pub const TIMESERIES_DATA_DIR: &str = "timeseries";

/// Extension of per-series measurement files
pub const TIMESERIES_DATA_EXTENSION: &str = "csv";

// =============================================================================
// Output Tree Layout
// =============================================================================

/// Group overview document inside the group's output directory
pub const GROUP_INDEX_FILENAME: &str = "index.json";

/// Subdirectory of a group's output directory holding station contexts
pub const STATION_OUTPUT_DIR: &str = "station";

/// Per-station context document name
pub const STATION_INDEX_FILENAME: &str = "index.json";

/// Subdirectory of the output root holding chart data documents
pub const CHART_OUTPUT_DIR: &str = "chart";

// =============================================================================
// Date and Value Formats
// =============================================================================

/// Timestamp format of time series records (naive local time)
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Timestamp format of time series records carrying seconds
pub const RECORD_TIMESTAMP_FORMAT_SECONDS: &str = "%Y-%m-%d %H:%M:%S";

/// Display format of last-update timestamps (English month abbreviations,
/// independent of the system locale)
pub const PRETTY_DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// Timestamp format of chart data points
pub const CHART_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Rendering Defaults
// =============================================================================

/// Default staleness threshold when a group does not configure one, in minutes
pub const DEFAULT_FRESH_TIME_LIMIT_MINUTES: u32 = 60;

/// Span of the chart window ending at the last common date, in hours
pub const CHART_WINDOW_HOURS: i64 = 24;

/// Default output directory name under the current working directory
pub const DEFAULT_OUTPUT_DIR: &str = "synoptic";

/// Slug pattern: lowercase alphanumeric runs separated by single hyphens
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the measurement file name for a time series
pub fn timeseries_data_filename(timeseries_id: i32) -> String {
    format!("{}.{}", timeseries_id, TIMESERIES_DATA_EXTENSION)
}

/// Get the chart document name for a synoptic time series
pub fn chart_filename(synoptic_timeseries_id: i32) -> String {
    format!("{}.json", synoptic_timeseries_id)
}

/// Extract the time series id from a measurement file name, if it is one
pub fn timeseries_id_from_filename(filename: &str) -> Option<i32> {
    let stem = filename.strip_suffix(&format!(".{}", TIMESERIES_DATA_EXTENSION))?;
    stem.parse::<i32>().ok()
}

/// Format a UTC offset in minutes as the conventional +HHMM / -HHMM notation
pub fn format_utc_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let abs = offset_minutes.unsigned_abs();
    format!("{}{:02}{:02}", sign, abs / 60, abs % 60)
}
