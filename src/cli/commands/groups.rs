//! Groups command implementation
//!
//! Reports the configured synoptic groups, optionally with per-station
//! freshness evaluated against the current time.

use super::shared::{resolve_data_dir, setup_logging};
use crate::app::models::Freshness;
use crate::app::services::group_registry::GroupRegistry;
use crate::app::services::report_builder::evaluation::{classify_freshness, last_common_date};
use crate::app::services::report_builder::RenderStats;
use crate::app::services::timeseries_store::TimeseriesStore;
use crate::cli::args::{GroupsArgs, OutputFormat};
use crate::Result;
use colored::Colorize;
use tracing::info;

/// Groups command runner
pub async fn run_groups(args: GroupsArgs) -> Result<RenderStats> {
    setup_logging(&args.log_level, false)?;
    args.validate()?;

    let data_dir = resolve_data_dir(args.data_dir.clone());
    info!("Loading synoptic configuration from {}", data_dir.display());

    let (registry, _) = GroupRegistry::load(&data_dir).await?;
    let store = TimeseriesStore::new(&data_dir);

    match args.format {
        OutputFormat::Text => print_text_report(&registry, &store, args.detailed)?,
        OutputFormat::Json => print_json_report(&registry, &store, args.detailed)?,
    }

    Ok(RenderStats::default())
}

fn print_text_report(
    registry: &GroupRegistry,
    store: &TimeseriesStore,
    detailed: bool,
) -> Result<()> {
    println!("{}", "Synoptic groups".bold());
    println!();

    for group in registry.groups() {
        println!(
            "{} ({}) - {} stations, threshold {} min, zone {}",
            group.name.bold(),
            group.slug,
            group.stations.len(),
            group.fresh_time_limit_minutes,
            group.time_zone
        );

        if !detailed {
            continue;
        }

        for (member, station) in registry.stations_in_group(&group.slug)? {
            let (freshness, last_update) = station_freshness(registry, store, member, group)?;
            let label = match freshness {
                Freshness::Recent => freshness.as_str().green(),
                Freshness::Old => freshness.as_str().red(),
            };
            println!(
                "    {:>2}. {} [{}] {}",
                member.order,
                station.name,
                label,
                last_update.unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn print_json_report(
    registry: &GroupRegistry,
    store: &TimeseriesStore,
    detailed: bool,
) -> Result<()> {
    let mut groups = Vec::new();

    for group in registry.groups() {
        let mut stations = Vec::new();
        for (member, station) in registry.stations_in_group(&group.slug)? {
            let mut entry = serde_json::json!({
                "station_id": station.station_id,
                "name": station.name,
                "order": member.order,
                "timeseries": member.timeseries.len(),
            });
            if detailed {
                let (freshness, last_update) =
                    station_freshness(registry, store, member, group)?;
                entry["freshness"] = serde_json::json!(freshness);
                entry["last_update"] = serde_json::json!(last_update);
            }
            stations.push(entry);
        }

        groups.push(serde_json::json!({
            "name": group.name,
            "slug": group.slug,
            "fresh_time_limit_minutes": group.fresh_time_limit_minutes,
            "time_zone": group.time_zone.code,
            "stations": stations,
        }));
    }

    println!("{}", serde_json::to_string_pretty(&groups)?);
    Ok(())
}

/// Evaluate one station's freshness against the real clock
fn station_freshness(
    registry: &GroupRegistry,
    store: &TimeseriesStore,
    member: &crate::app::models::SynopticGroupStation,
    group: &crate::app::models::SynopticGroup,
) -> Result<(Freshness, Option<String>)> {
    let attached = registry.timeseries_for_station(member)?;

    let mut loaded = Vec::with_capacity(attached.len());
    for (_, ts) in attached {
        loaded.push((ts, store.load(ts.timeseries_id)?));
    }
    let pairs: Vec<_> = loaded.iter().map(|(ts, data)| (*ts, data)).collect();

    let last_common = last_common_date(&pairs);
    let freshness = classify_freshness(last_common.as_ref(), group.fresh_time_limit());
    let last_update = last_common.map(|l| l.pretty_in(&group.time_zone));

    Ok((freshness, last_update))
}
