//! Render command implementation
//!
//! Runs one render pass over the synoptic groups, or repeats it on an
//! interval. Each pass reloads the configuration so edits to the data
//! directory are picked up, mirroring a scheduled dashboard regeneration job.

use super::shared::{build_config, print_render_summary, setup_logging};
use crate::app::services::group_registry::GroupRegistry;
use crate::app::services::report_builder::{RenderStats, ReportBuilder};
use crate::app::services::timeseries_store::TimeseriesStore;
use crate::cli::args::RenderArgs;
use crate::config::Config;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Render command runner
pub async fn run_render(args: RenderArgs) -> Result<RenderStats> {
    setup_logging(&args.log_level, args.quiet)?;

    info!("Starting synoptic renderer");
    args.validate()?;

    let config = build_config(
        args.data_dir.clone(),
        args.output_root.clone(),
        args.show_progress(),
    )?;
    let selected = args.get_groups();

    if args.dry_run {
        return run_dry_run(&config, selected.as_deref()).await;
    }

    let stats = run_pass(&config, selected.as_deref()).await?;
    if !args.quiet {
        print_render_summary(&stats);
    }

    if let Some(seconds) = args.interval {
        info!("Repeating the render pass every {} seconds", seconds);
        loop {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            // A failing pass is logged and retried on the next tick, like
            // any scheduled job
            match run_pass(&config, selected.as_deref()).await {
                Ok(stats) => {
                    if !args.quiet {
                        print_render_summary(&stats);
                    }
                }
                Err(e) => error!("Render pass failed: {}", e),
            }
        }
    }

    Ok(stats)
}

/// Run one complete render pass against a fresh registry
async fn run_pass(config: &Config, selected: Option<&[String]>) -> Result<RenderStats> {
    let (registry, _load_stats) = GroupRegistry::load(&config.data_dir).await?;
    let store = TimeseriesStore::new(&config.data_dir);
    let builder = ReportBuilder::new(Arc::new(registry), store, config.clone());
    builder.render_at(selected, chrono::Utc::now())
}

/// Report what a pass would render, without writing anything
async fn run_dry_run(config: &Config, selected: Option<&[String]>) -> Result<RenderStats> {
    let (registry, _) = GroupRegistry::load(&config.data_dir).await?;

    println!("Dry run - nothing will be written");
    println!("Output root: {}", config.output_root.display());
    println!();

    let groups = match selected {
        Some(slugs) => slugs
            .iter()
            .map(|slug| {
                registry
                    .get_group(slug)
                    .ok_or_else(|| crate::Error::group_not_found(slug.clone()))
            })
            .collect::<Result<Vec<_>>>()?,
        None => registry.groups(),
    };

    for group in &groups {
        let charts: usize = group
            .stations
            .iter()
            .map(|member| {
                member
                    .timeseries
                    .iter()
                    .filter(|sts| sts.is_chart_leader())
                    .count()
            })
            .sum();
        println!(
            "  {} ({}): {} stations, {} charts",
            group.name,
            group.slug,
            group.stations.len(),
            charts
        );
    }

    info!("Dry run complete: {} groups", groups.len());
    Ok(RenderStats::default())
}
