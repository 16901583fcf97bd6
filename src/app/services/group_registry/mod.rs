//! Group registry service for synoptic configuration lookups
//!
//! This module loads the synoptic group configuration, the referenced station
//! records, and the referenced time series records from the data directory,
//! validates them (including the contiguous 1..N ordering invariant of each
//! station's series), and indexes everything for O(1) access by slug or id.

use crate::app::models::{Station, SynopticGroup, Timeseries};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

pub mod integrity;
pub mod loader;
pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::{LoadStats, RegistryMetadata};

/// Registry of synoptic groups and the records they reference
///
/// Construct with [`GroupRegistry::load`], which reads and validates the
/// configuration files. A registry that exists is internally consistent: all
/// cross-references resolve and every station's series ordering is intact.
#[derive(Debug, Clone)]
pub struct GroupRegistry {
    /// Synoptic groups indexed by slug
    pub(crate) groups: HashMap<String, SynopticGroup>,

    /// Station records indexed by station_id
    pub(crate) stations: HashMap<i32, Station>,

    /// Time series records indexed by timeseries_id
    pub(crate) timeseries: HashMap<i32, Timeseries>,

    /// Path to the data directory the registry was loaded from
    pub(crate) data_path: PathBuf,

    /// Timestamp when the registry was loaded
    pub(crate) load_time: Instant,
}

impl GroupRegistry {
    /// Create a new empty registry
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            groups: HashMap::new(),
            stations: HashMap::new(),
            timeseries: HashMap::new(),
            data_path,
            load_time: Instant::now(),
        }
    }

    /// Get a synoptic group by slug (O(1) lookup)
    pub fn get_group(&self, slug: &str) -> Option<&SynopticGroup> {
        self.groups.get(slug)
    }

    /// Check if a group exists in the registry
    pub fn contains_group(&self, slug: &str) -> bool {
        self.groups.contains_key(slug)
    }

    /// Get a station record by id (O(1) lookup)
    pub fn get_station(&self, station_id: i32) -> Option<&Station> {
        self.stations.get(&station_id)
    }

    /// Get a time series record by id (O(1) lookup)
    pub fn get_timeseries(&self, timeseries_id: i32) -> Option<&Timeseries> {
        self.timeseries.get(&timeseries_id)
    }

    /// Number of groups in the registry
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of station records in the registry
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of time series records in the registry
    pub fn timeseries_count(&self) -> usize {
        self.timeseries.len()
    }

    /// Get registry metadata
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            data_path: self.data_path.clone(),
            group_count: self.groups.len(),
            station_count: self.stations.len(),
            timeseries_count: self.timeseries.len(),
            load_time: self.load_time,
        }
    }
}
