//! Chart grouping and data assembly
//!
//! Every series with no `group_with` reference leads its own chart; series
//! referencing a leader's order are drawn into that chart as additional
//! labelled point series. Chart data covers the window ending at the
//! station's last common date.

use super::context::{ChartContext, ChartPoint, ChartSeries};
use super::evaluation::LastCommonDate;
use crate::app::models::{SynopticTimeseries, Timeseries};
use crate::app::services::timeseries_store::TimeseriesData;
use crate::constants::CHART_TIMESTAMP_FORMAT;
use chrono::Duration;

/// A series attached to a station, resolved and loaded
pub struct ResolvedSeries<'a> {
    pub synoptic: &'a SynopticTimeseries,
    pub record: &'a Timeseries,
    pub data: &'a TimeseriesData,
}

/// Partition a station's series into chart groups: each leader followed by
/// the series grouping with it, all in position order
pub fn chart_groups<'a>(resolved: &'a [ResolvedSeries<'a>]) -> Vec<Vec<&'a ResolvedSeries<'a>>> {
    let mut groups = Vec::new();

    let mut ordered: Vec<&ResolvedSeries> = resolved.iter().collect();
    ordered.sort_unstable_by_key(|series| series.synoptic.order);

    for leader in ordered.iter().filter(|series| series.synoptic.is_chart_leader()) {
        let mut chart = vec![*leader];
        chart.extend(
            ordered
                .iter()
                .filter(|series| series.synoptic.group_with == Some(leader.synoptic.order))
                .copied(),
        );
        groups.push(chart);
    }

    groups
}

/// Assemble chart data for one chart group
///
/// The window spans `chart_window_hours` ending at the last common date,
/// evaluated in each member series' own zone. Without a last common date the
/// chart is written with empty point series.
pub fn build_chart(
    members: &[&ResolvedSeries<'_>],
    last_common: Option<&LastCommonDate>,
    chart_window_hours: i64,
) -> ChartContext {
    let leader = members[0];

    let mut series = Vec::with_capacity(members.len());
    let mut data_min: Option<f64> = None;
    let mut data_max: Option<f64> = None;

    for member in members {
        let points = match last_common {
            Some(last_common) => {
                let end = last_common.naive_in(&member.record.time_zone);
                let start = end - Duration::hours(chart_window_hours);
                member
                    .data
                    .window(start, end)
                    .iter()
                    .filter_map(|record| {
                        record.value.map(|value| ChartPoint {
                            timestamp: record.timestamp.format(CHART_TIMESTAMP_FORMAT).to_string(),
                            value,
                        })
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        for point in &points {
            data_min = Some(data_min.map_or(point.value, |m: f64| m.min(point.value)));
            data_max = Some(data_max.map_or(point.value, |m: f64| m.max(point.value)));
        }

        let label = if member.synoptic.subtitle.is_empty() {
            member.synoptic.display_title(&member.record.name).to_string()
        } else {
            member.synoptic.subtitle.clone()
        };

        series.push(ChartSeries {
            timeseries_id: member.record.timeseries_id,
            label,
            points,
        });
    }

    ChartContext {
        timeseries_id: leader.record.timeseries_id,
        title: leader.synoptic.display_title(&leader.record.name).to_string(),
        y_axis_min: expand_bound(leader.synoptic.default_chart_min, data_min, f64::min),
        y_axis_max: expand_bound(leader.synoptic.default_chart_max, data_max, f64::max),
        series,
    }
}

/// Expand a configured fixed bound to cover the observed data
///
/// No configured bound means auto-scale, regardless of the data.
fn expand_bound(
    configured: Option<f64>,
    observed: Option<f64>,
    pick: fn(f64, f64) -> f64,
) -> Option<f64> {
    let configured = configured?;
    Some(match observed {
        Some(observed) => pick(configured, observed),
        None => configured,
    })
}
