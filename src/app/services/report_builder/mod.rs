//! Report builder service: the render pass
//!
//! Orchestrates one pass over the synoptic groups: evaluates each station
//! (last common date, freshness, value statuses), assembles render context
//! and chart data, and writes the JSON tree to the output root. The pass is
//! single-threaded and synchronous; it holds no state between runs.

use crate::app::models::{SynopticGroup, Timeseries};
use crate::app::services::group_registry::GroupRegistry;
use crate::app::services::timeseries_store::{TimeseriesData, TimeseriesStore};
use crate::config::Config;
use crate::constants::{chart_filename, CHART_OUTPUT_DIR};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub mod charts;
pub mod context;
pub mod evaluation;
pub mod progress;
pub mod stats;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use context::{ChartContext, GroupContext, MeasurementContext, StationContext, StationSummary};
pub use evaluation::LastCommonDate;
pub use stats::RenderStats;
pub use writer::ReportWriter;

use charts::ResolvedSeries;
use progress::ProgressReporter;

/// Builder of the rendered output tree
pub struct ReportBuilder {
    registry: Arc<GroupRegistry>,
    store: TimeseriesStore,
    config: Config,
}

impl ReportBuilder {
    /// Create a builder over a loaded registry and measurement store
    pub fn new(registry: Arc<GroupRegistry>, store: TimeseriesStore, config: Config) -> Self {
        Self {
            registry,
            store,
            config,
        }
    }

    /// Render every group against the real clock
    pub fn render_all(&self) -> Result<RenderStats> {
        self.render_at(None, Utc::now())
    }

    /// Render the selected groups (all when `None`) as of `now`
    ///
    /// `now` is injected so the freshness boundary is deterministic in tests.
    pub fn render_at(&self, slugs: Option<&[String]>, now: DateTime<Utc>) -> Result<RenderStats> {
        let start = Instant::now();
        let writer = ReportWriter::new(&self.config.output_root);
        let mut stats = RenderStats::default();

        let groups: Vec<&SynopticGroup> = match slugs {
            Some(slugs) => slugs
                .iter()
                .map(|slug| {
                    self.registry
                        .get_group(slug)
                        .ok_or_else(|| Error::group_not_found(slug.clone()))
                })
                .collect::<Result<_>>()?,
            None => self.registry.groups(),
        };

        let total_stations: usize = groups.iter().map(|group| group.stations.len()).sum();
        let progress = ProgressReporter::new(self.config.show_progress, total_stations);

        info!(
            "Rendering {} groups ({} stations) to {}",
            groups.len(),
            total_stations,
            self.config.output_root.display()
        );

        for group in groups {
            self.render_group(group, now, &writer, &mut stats, &progress)?;
        }

        stats.render_time = start.elapsed();
        progress.finish("Render pass complete");

        info!(
            "Render pass complete: {} groups, {} stations, {} charts, {} in {:?}",
            stats.groups_rendered,
            stats.stations_rendered,
            stats.charts_rendered,
            RenderStats::format_size(stats.total_output_size()),
            stats.render_time
        );

        Ok(stats)
    }

    fn render_group(
        &self,
        group: &SynopticGroup,
        now: DateTime<Utc>,
        writer: &ReportWriter,
        stats: &mut RenderStats,
        progress: &ProgressReporter,
    ) -> Result<()> {
        progress.set_group(&group.slug);
        debug!("Rendering group '{}'", group.slug);

        let members = self.registry.stations_in_group(&group.slug)?;
        let mut summaries = Vec::with_capacity(members.len());

        for (member, station) in members {
            let rendered = self.render_station(group, member, station, now)?;

            let (relative, bytes) = writer.write_station_context(&rendered.station_context)?;
            stats.output_sizes.push((relative, bytes));
            stats.documents_written += 1;

            for chart in &rendered.charts {
                let (relative, bytes) = writer.write_chart(&group.slug, chart)?;
                stats.output_sizes.push((relative, bytes));
                stats.documents_written += 1;
                stats.charts_rendered += 1;
            }

            summaries.push(rendered.summary);
            stats.stations_rendered += 1;
            progress.station_done();
        }

        let group_context = GroupContext {
            name: group.name.clone(),
            slug: group.slug.clone(),
            time_zone: group.time_zone.code.clone(),
            stations: summaries,
        };

        let (relative, bytes) = writer.write_group_context(&group_context)?;
        stats.output_sizes.push((relative, bytes));
        stats.documents_written += 1;
        stats.groups_rendered += 1;

        Ok(())
    }

    fn render_station(
        &self,
        group: &SynopticGroup,
        member: &crate::app::models::SynopticGroupStation,
        station: &crate::app::models::Station,
        now: DateTime<Utc>,
    ) -> Result<RenderedStation> {
        let attached = self.registry.timeseries_for_station(member)?;

        let mut loaded: Vec<(
            &crate::app::models::SynopticTimeseries,
            &Timeseries,
            TimeseriesData,
        )> = Vec::with_capacity(attached.len());
        for (sts, ts) in attached {
            let data = self.store.load(ts.timeseries_id)?;
            loaded.push((sts, ts, data));
        }

        let pairs: Vec<(&Timeseries, &TimeseriesData)> =
            loaded.iter().map(|(_, ts, data)| (*ts, data)).collect();
        let last_common = evaluation::last_common_date(&pairs);
        let freshness =
            evaluation::classify_freshness_at(last_common.as_ref(), group.fresh_time_limit(), now);

        let resolved: Vec<ResolvedSeries> = loaded
            .iter()
            .map(|(sts, ts, data)| ResolvedSeries {
                synoptic: *sts,
                record: *ts,
                data,
            })
            .collect();

        let chart_groups = charts::chart_groups(&resolved);

        // Which chart document each series ends up in, for context linking
        let mut chart_of_order: HashMap<u16, i32> = HashMap::new();
        for chart in &chart_groups {
            for series in chart {
                chart_of_order.insert(series.synoptic.order, chart[0].record.timeseries_id);
            }
        }

        let measurements: Vec<MeasurementContext> = resolved
            .iter()
            .map(|series| {
                let value = last_common.as_ref().and_then(|last_common| {
                    series
                        .data
                        .value_at(last_common.naive_in(&series.record.time_zone))
                });

                MeasurementContext {
                    timeseries_id: series.record.timeseries_id,
                    title: series.synoptic.display_title(&series.record.name).to_string(),
                    subtitle: series.synoptic.subtitle.clone(),
                    unit: series.record.unit_of_measurement.clone(),
                    value,
                    value_display: evaluation::format_value(value, series.record.precision),
                    status: value.map(|value| {
                        evaluation::classify_value(
                            value,
                            series.synoptic.low_limit,
                            series.synoptic.high_limit,
                        )
                    }),
                    chart_file: chart_of_order.get(&series.synoptic.order).map(|leader_id| {
                        format!("{}/{}", CHART_OUTPUT_DIR, chart_filename(*leader_id))
                    }),
                }
            })
            .collect();

        let charts: Vec<ChartContext> = chart_groups
            .iter()
            .map(|chart| {
                charts::build_chart(chart, last_common.as_ref(), self.config.chart_window_hours)
            })
            .collect();

        let station_context = StationContext {
            station_id: station.station_id,
            name: station.name.clone(),
            group_slug: group.slug.clone(),
            freshness,
            last_update: last_common.as_ref().map(|l| l.pretty()),
            last_update_short: last_common.as_ref().map(|l| l.pretty_in(&group.time_zone)),
            measurements: measurements.clone(),
        };

        let summary = StationSummary {
            station_id: station.station_id,
            name: station.name.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            freshness,
            last_update: last_common.as_ref().map(|l| l.pretty_in(&group.time_zone)),
            measurements,
        };

        Ok(RenderedStation {
            summary,
            station_context,
            charts,
        })
    }
}

/// Everything the render pass produces for one station
struct RenderedStation {
    summary: StationSummary,
    station_context: StationContext,
    charts: Vec<ChartContext>,
}
