//! Configuration loading from the data directory
//!
//! Reads `synoptic.toml`, `stations.toml`, and `timeseries.toml`, validates
//! every record, resolves cross-references, and runs the position-index
//! integrity checks before handing out a registry. A load either yields a
//! fully consistent registry or fails with the first fault found.

use super::integrity::check_group_integrity;
use super::metadata::LoadStats;
use super::GroupRegistry;
use crate::app::models::{Station, SynopticGroup, Timeseries};
use crate::constants::{STATIONS_FILENAME, SYNOPTIC_CONFIG_FILENAME, TIMESERIES_FILENAME};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Top-level structure of `synoptic.toml`
#[derive(Debug, Deserialize)]
struct SynopticFile {
    #[serde(default)]
    groups: Vec<SynopticGroup>,
}

/// Top-level structure of `stations.toml`
#[derive(Debug, Deserialize)]
struct StationsFile {
    #[serde(default)]
    stations: Vec<Station>,
}

/// Top-level structure of `timeseries.toml`
#[derive(Debug, Deserialize)]
struct TimeseriesFile {
    #[serde(default)]
    timeseries: Vec<Timeseries>,
}

impl GroupRegistry {
    /// Load and validate the configuration from a data directory
    ///
    /// Returns the registry together with load statistics. Fails on the first
    /// malformed record, unresolved cross-reference, or integrity violation.
    pub async fn load(data_path: &Path) -> Result<(Self, LoadStats)> {
        let start = Instant::now();
        let mut stats = LoadStats::new();

        info!("Loading synoptic configuration from {}", data_path.display());

        let stations = load_stations(data_path, &mut stats).await?;
        let timeseries = load_timeseries(data_path, &mut stats, &stations).await?;
        let groups = load_groups(data_path, &mut stats, &stations, &timeseries).await?;

        info!(
            "Loaded {} groups, {} stations, {} time series in {:?}",
            groups.len(),
            stations.len(),
            timeseries.len(),
            start.elapsed()
        );

        let registry = GroupRegistry {
            groups,
            stations,
            timeseries,
            data_path: data_path.to_path_buf(),
            load_time: Instant::now(),
        };

        Ok((registry, stats))
    }
}

/// Read and parse one TOML configuration file
async fn read_config_file<T>(data_path: &Path, filename: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let path = data_path.join(filename);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    toml::from_str(&content)
        .map_err(|e| Error::config_parsing(path.display().to_string(), e.to_string(), e))
}

async fn load_stations(
    data_path: &Path,
    stats: &mut LoadStats,
) -> Result<HashMap<i32, Station>> {
    let file: StationsFile = read_config_file(data_path, STATIONS_FILENAME).await?;
    stats.files_processed += 1;

    let mut stations = HashMap::with_capacity(file.stations.len());
    for station in file.stations {
        station.validate()?;
        debug!("Loaded station {} ({})", station.station_id, station.name);
        if stations.insert(station.station_id, station).is_some() {
            return Err(Error::group_registry(format!(
                "Duplicate station record in {}",
                STATIONS_FILENAME
            )));
        }
        stats.stations_loaded += 1;
    }

    Ok(stations)
}

async fn load_timeseries(
    data_path: &Path,
    stats: &mut LoadStats,
    stations: &HashMap<i32, Station>,
) -> Result<HashMap<i32, Timeseries>> {
    let file: TimeseriesFile = read_config_file(data_path, TIMESERIES_FILENAME).await?;
    stats.files_processed += 1;

    let mut timeseries = HashMap::with_capacity(file.timeseries.len());
    for ts in file.timeseries {
        ts.validate()?;

        if !stations.contains_key(&ts.station_id) {
            return Err(Error::group_registry(format!(
                "Time series {} references unknown station {}",
                ts.timeseries_id, ts.station_id
            )));
        }

        let id = ts.timeseries_id;
        if timeseries.insert(id, ts).is_some() {
            return Err(Error::group_registry(format!(
                "Duplicate time series record {} in {}",
                id, TIMESERIES_FILENAME
            )));
        }
        stats.timeseries_loaded += 1;
    }

    Ok(timeseries)
}

async fn load_groups(
    data_path: &Path,
    stats: &mut LoadStats,
    stations: &HashMap<i32, Station>,
    timeseries: &HashMap<i32, Timeseries>,
) -> Result<HashMap<String, SynopticGroup>> {
    let file: SynopticFile = read_config_file(data_path, SYNOPTIC_CONFIG_FILENAME).await?;
    stats.files_processed += 1;

    let mut groups = HashMap::with_capacity(file.groups.len());
    for group in file.groups {
        group.validate()?;
        resolve_references(&group, stations, timeseries)?;
        check_group_integrity(&group)?;

        stats.memberships_validated += group.stations.len();
        debug!(
            "Loaded group '{}' with {} stations",
            group.slug,
            group.stations.len()
        );

        let slug = group.slug.clone();
        if groups.insert(slug.clone(), group).is_some() {
            return Err(Error::group_registry(format!(
                "Duplicate group slug '{}' in {}",
                slug, SYNOPTIC_CONFIG_FILENAME
            )));
        }
        stats.groups_loaded += 1;
    }

    Ok(groups)
}

/// Check that every station and series a group references exists, and that
/// each attached series belongs to the station it is attached to
fn resolve_references(
    group: &SynopticGroup,
    stations: &HashMap<i32, Station>,
    timeseries: &HashMap<i32, Timeseries>,
) -> Result<()> {
    for member in &group.stations {
        if !stations.contains_key(&member.station_id) {
            return Err(Error::station_not_found(member.station_id));
        }

        for sts in &member.timeseries {
            let ts = timeseries
                .get(&sts.timeseries_id)
                .ok_or_else(|| Error::timeseries_not_found(sts.timeseries_id))?;

            if ts.station_id != member.station_id {
                return Err(Error::group_registry(format!(
                    "Group '{}' attaches time series {} to station {} but it belongs to station {}",
                    group.slug, sts.timeseries_id, member.station_id, ts.station_id
                )));
            }
        }
    }

    Ok(())
}
