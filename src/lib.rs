//! Synoptic Renderer Library
//!
//! A Rust library for rendering static synoptic dashboards that summarize the
//! latest measurements of hydrological and meteorological station networks.
//!
//! This library provides tools for:
//! - Loading and indexing synoptic group configuration with O(1) lookups
//! - Enforcing the contiguous 1..N ordering invariant of station time series
//! - Parsing per-series measurement files with line-precise error reporting
//! - Classifying data recency ("recent"/"old") against per-group thresholds
//! - Classifying latest values ("ok"/"high"/"low") against configured bounds
//! - Writing render context and chart data as UTF-8 JSON documents

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod group_registry;
        pub mod report_builder;
        pub mod timeseries_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Freshness, Station, SynopticGroup, Timeseries, ValueStatus};
pub use config::Config;

/// Result type alias for the synoptic renderer
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for synoptic rendering operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error in a time series data file
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Malformed time series record at a specific line
    #[error("Bad record in file '{file}' line {line}: {message}")]
    RecordFormat {
        file: String,
        line: usize,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Configuration parsing error in file '{file}': {message}")]
    ConfigParsing {
        file: String,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    /// Group registry error
    #[error("Group registry error: {message}")]
    GroupRegistry { message: String },

    /// Synoptic group not found
    #[error("Synoptic group not found: slug = {slug}")]
    GroupNotFound { slug: String },

    /// Station not found
    #[error("Station not found: station_id = {station_id}")]
    StationNotFound { station_id: i32 },

    /// Time series not found
    #[error("Time series not found: timeseries_id = {timeseries_id}")]
    TimeseriesNotFound { timeseries_id: i32 },

    /// Position-index integrity violation on a station or group
    #[error("Integrity violation for {subject}: {message}")]
    IntegrityViolation { subject: String, message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Report writing error
    #[error("Report writing error: {message}")]
    ReportWriting {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Rendering interrupted
    #[error("Rendering interrupted: {reason}")]
    RenderInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a line-addressed record format error
    pub fn record_format(
        file: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::RecordFormat {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parsing error
    pub fn config_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: toml::de::Error,
    ) -> Self {
        Self::ConfigParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a group registry error
    pub fn group_registry(message: impl Into<String>) -> Self {
        Self::GroupRegistry {
            message: message.into(),
        }
    }

    /// Create a group not found error
    pub fn group_not_found(slug: impl Into<String>) -> Self {
        Self::GroupNotFound { slug: slug.into() }
    }

    /// Create a station not found error
    pub fn station_not_found(station_id: i32) -> Self {
        Self::StationNotFound { station_id }
    }

    /// Create a time series not found error
    pub fn timeseries_not_found(timeseries_id: i32) -> Self {
        Self::TimeseriesNotFound { timeseries_id }
    }

    /// Create a position-index integrity violation error
    pub fn integrity_violation(
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::IntegrityViolation {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a report writing error
    pub fn report_writing(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::ReportWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a rendering interrupted error
    pub fn render_interrupted(reason: impl Into<String>) -> Self {
        Self::RenderInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::ReportWriting {
            message: "JSON serialization failed".to_string(),
            source: Box::new(error),
        }
    }
}
