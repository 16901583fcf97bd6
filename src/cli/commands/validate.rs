//! Validate command implementation
//!
//! Loads the configuration (surfacing integrity faults), then checks every
//! referenced series against the measurement store: missing files are
//! warnings (a series may legitimately have no data yet), unparseable files
//! and orphan files are reported.

use super::shared::{resolve_data_dir, setup_logging};
use crate::app::services::group_registry::GroupRegistry;
use crate::app::services::report_builder::RenderStats;
use crate::app::services::timeseries_store::TimeseriesStore;
use crate::cli::args::ValidateArgs;
use crate::{Error, Result};
use colored::Colorize;
use std::collections::HashSet;
use tracing::{info, warn};

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<RenderStats> {
    setup_logging(&args.log_level, false)?;
    args.validate()?;

    let data_dir = resolve_data_dir(args.data_dir.clone());
    info!("Validating synoptic configuration in {}", data_dir.display());

    // A successful load already proves referential and ordering integrity
    let (registry, load_stats) = GroupRegistry::load(&data_dir).await?;
    let store = TimeseriesStore::new(&data_dir);

    let mut referenced: HashSet<i32> = HashSet::new();
    for group in registry.groups() {
        for member in &group.stations {
            for sts in &member.timeseries {
                referenced.insert(sts.timeseries_id);
            }
        }
    }

    let mut missing = 0usize;
    let mut unparseable = Vec::new();
    for &timeseries_id in &referenced {
        if !store.has_data_file(timeseries_id) {
            warn!("Time series {} has no measurement file", timeseries_id);
            missing += 1;
            continue;
        }
        if let Err(e) = store.load(timeseries_id) {
            unparseable.push((timeseries_id, e));
        }
    }

    let orphans: Vec<i32> = store
        .scan()?
        .into_iter()
        .filter(|id| !referenced.contains(id))
        .collect();
    for &id in &orphans {
        warn!("Measurement file {}.csv is referenced by no group", id);
    }

    println!();
    println!(
        "{}: {} groups, {} stations, {} time series",
        "Configuration OK".green().bold(),
        load_stats.groups_loaded,
        load_stats.stations_loaded,
        load_stats.timeseries_loaded
    );
    println!(
        "Measurement files: {} referenced, {} missing, {} orphan",
        referenced.len(),
        missing,
        orphans.len()
    );

    if !unparseable.is_empty() {
        println!();
        println!("{}", "Unparseable measurement files".red().bold());
        for (timeseries_id, error) in &unparseable {
            println!("  {}: {}", timeseries_id, error);
        }
        return Err(Error::data_validation(format!(
            "{} measurement files failed to parse",
            unparseable.len()
        )));
    }

    Ok(RenderStats::default())
}
