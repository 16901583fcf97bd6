//! Serializable render context
//!
//! The structures written to the output root as JSON documents. The template
//! renderer and the chart plotter consume these; neither is part of this
//! crate.

use crate::app::models::{Freshness, ValueStatus};
use serde::Serialize;

/// Group overview context, written to `<slug>/index.json`
#[derive(Debug, Clone, Serialize)]
pub struct GroupContext {
    /// Display name of the group
    pub name: String,

    /// Group slug
    pub slug: String,

    /// Zone code short-form timestamps are rendered in
    pub time_zone: String,

    /// Member stations in display order
    pub stations: Vec<StationSummary>,
}

/// One station's entry in the group overview (map overlay and station list)
#[derive(Debug, Clone, Serialize)]
pub struct StationSummary {
    pub station_id: i32,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Recency label: "recent" or "old"
    pub freshness: Freshness,

    /// Short-form last update in the group's zone, e.g. "22 Oct 2015 14:20"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,

    /// Latest value per attached series, for the map layer controls
    pub measurements: Vec<MeasurementContext>,
}

/// Per-station context, written to `<slug>/station/<station_id>/index.json`
#[derive(Debug, Clone, Serialize)]
pub struct StationContext {
    pub station_id: i32,
    pub name: String,

    /// Slug of the group this context was rendered for
    pub group_slug: String,

    /// Recency label: "recent" or "old"
    pub freshness: Freshness,

    /// Last update with zone annotation, e.g. "23 Oct 2015 15:20 EET (+0200)"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,

    /// Last update in the group's zone without annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_short: Option<String>,

    /// The "latest measurements" panel rows, in display order
    pub measurements: Vec<MeasurementContext>,
}

/// One series' latest measurement
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementContext {
    pub timeseries_id: i32,

    /// Resolved display title (explicit title or the series name)
    pub title: String,

    /// Legend/report annotation for grouped series; empty when not grouped
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,

    /// Unit of measurement, rendered after the value
    pub unit: String,

    /// Latest value at the station's last common date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Value formatted with the series' display precision; empty when missing
    pub value_display: String,

    /// Value status label; absent when there is no value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ValueStatus>,

    /// Chart document of this series' chart leader, relative to the group's
    /// output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_file: Option<String>,
}

/// Chart data, written to `<slug>/chart/<timeseries_id>.json`
#[derive(Debug, Clone, Serialize)]
pub struct ChartContext {
    /// Series id of the chart leader; names the document
    pub timeseries_id: i32,

    /// Chart title (the leader's resolved display title)
    pub title: String,

    /// Lower y-axis hint: the configured bound expanded to cover the data;
    /// absent means auto-scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_min: Option<f64>,

    /// Upper y-axis hint; absent means auto-scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_max: Option<f64>,

    /// One labelled point series per chart member, leader first
    pub series: Vec<ChartSeries>,
}

/// One labelled point series of a chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub timeseries_id: i32,

    /// Legend label: the subtitle when configured, else the display title
    pub label: String,

    /// Points within the chart window; records with missing values are
    /// skipped
    pub points: Vec<ChartPoint>,
}

/// A single chart point
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    /// Naive local timestamp in the series' zone
    pub timestamp: String,

    pub value: f64,
}
