//! Configuration management and validation.
//!
//! Provides the runtime configuration for a render pass: where the data
//! directory lives, where the output tree is written, and how wide the chart
//! window is. Command-line arguments are resolved into a `Config` before any
//! service is constructed.

use crate::constants::{CHART_WINDOW_HOURS, DEFAULT_OUTPUT_DIR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for a render pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory holding configuration files and measurement data
    pub data_dir: PathBuf,

    /// Output root the rendered JSON tree is written to
    pub output_root: PathBuf,

    /// Span of the chart window ending at the last common date, in hours
    pub chart_window_hours: i64,

    /// Whether progress bars are displayed during rendering
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chart_window_hours: CHART_WINDOW_HOURS,
            show_progress: true,
        }
    }
}

impl Config {
    /// Create a configuration for the given data directory and output root
    pub fn new(data_dir: PathBuf, output_root: PathBuf) -> Self {
        Self {
            data_dir,
            output_root,
            ..Self::default()
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        if self.chart_window_hours <= 0 {
            return Err(Error::configuration(format!(
                "Chart window must be positive, got {} hours",
                self.chart_window_hours
            )));
        }

        Ok(())
    }
}

/// Default data directory when none is given on the command line
///
/// Resolves to `<platform data dir>/synoptic-renderer/data`, falling back to
/// `./data` when the platform directories cannot be determined.
pub fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(base) => base.join("synoptic-renderer").join("data"),
        None => PathBuf::from("data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chart_window_hours, 24);
        assert!(config.show_progress);
        assert_eq!(config.output_root, PathBuf::from("synoptic"));
    }

    #[test]
    fn test_validate_rejects_missing_data_dir() {
        let config = Config::new(
            PathBuf::from("/nonexistent/synoptic/data"),
            PathBuf::from("out"),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_chart_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path().to_path_buf(), PathBuf::from("out"));
        config.chart_window_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_existing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), PathBuf::from("out"));
        assert!(config.validate().is_ok());
    }
}
