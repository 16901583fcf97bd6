//! Registry metadata and load statistics

use std::path::PathBuf;
use std::time::Instant;

/// Metadata about a loaded registry
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    /// Path to the data directory the registry was loaded from
    pub data_path: PathBuf,

    /// Number of synoptic groups
    pub group_count: usize,

    /// Number of station records
    pub station_count: usize,

    /// Number of time series records
    pub timeseries_count: usize,

    /// Timestamp when the registry was loaded
    pub load_time: Instant,
}

impl RegistryMetadata {
    /// Age of the registry since it was loaded
    pub fn age(&self) -> std::time::Duration {
        self.load_time.elapsed()
    }
}

/// Statistics collected while loading the configuration files
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of configuration files read
    pub files_processed: usize,

    /// Number of groups loaded
    pub groups_loaded: usize,

    /// Number of station records loaded
    pub stations_loaded: usize,

    /// Number of time series records loaded
    pub timeseries_loaded: usize,

    /// Number of group-station memberships that passed integrity checks
    pub memberships_validated: usize,
}

impl LoadStats {
    /// Create empty load statistics
    pub fn new() -> Self {
        Self::default()
    }
}
