//! Data models for synoptic rendering
//!
//! This module contains the core data structures for synoptic groups, their
//! member stations, and the time series attached to each station, together
//! with the referenced station and time series records consumed from the
//! data directory.

use crate::constants::{format_utc_offset, DEFAULT_FRESH_TIME_LIMIT_MINUTES, SLUG_PATTERN};
use crate::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// =============================================================================
// Time Zone Specification
// =============================================================================

/// A fixed-offset time zone reference
///
/// Groups and time series carry a zone code (e.g. "EET") together with a
/// fixed UTC offset in minutes. Measurement timestamps are naive local times
/// in the owning series' zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeZoneSpec {
    /// Zone code used in formatted output (e.g. "EET", "UTC")
    pub code: String,

    /// Offset from UTC in minutes, positive east of Greenwich
    pub utc_offset_minutes: i32,
}

impl TimeZoneSpec {
    /// Validate the zone for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::data_validation(
                "Time zone code cannot be empty".to_string(),
            ));
        }

        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(Error::data_validation(format!(
                "Invalid UTC offset {} minutes: must be within a day",
                self.utc_offset_minutes
            )));
        }

        Ok(())
    }

    /// Get the zone as a chrono fixed offset
    pub fn fixed_offset(&self) -> FixedOffset {
        // The offset is range-checked by validate(); a fallback to UTC keeps
        // this total for unvalidated values.
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }

    /// Attach this zone to a naive local timestamp
    pub fn localize(&self, naive: NaiveDateTime) -> DateTime<FixedOffset> {
        let offset = self.fixed_offset();
        let utc = naive - Duration::seconds(offset.local_minus_utc() as i64);
        DateTime::from_naive_utc_and_offset(utc, offset)
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (UTC{})",
            self.code,
            format_utc_offset(self.utc_offset_minutes)
        )
    }
}

// =============================================================================
// Referenced Records
// =============================================================================

/// A monitoring station referenced by synoptic groups
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Station {
    /// Unique station identifier
    pub station_id: i32,

    /// Human-readable station name
    pub name: String,

    /// Latitude in WGS84 decimal degrees, for the group map overlay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in WGS84 decimal degrees, for the group map overlay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Station {
    /// Validate station data for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::data_validation(format!(
                "Station {} has an empty name",
                self.station_id
            )));
        }

        if let Some(latitude) = self.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(Error::data_validation(format!(
                    "Invalid latitude {}: must be between -90 and 90 degrees",
                    latitude
                )));
            }
        }

        if let Some(longitude) = self.longitude {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(Error::data_validation(format!(
                    "Invalid longitude {}: must be between -180 and 180 degrees",
                    longitude
                )));
            }
        }

        // Coordinates must be provided as a pair
        match (self.latitude, self.longitude) {
            (Some(_), None) | (None, Some(_)) => Err(Error::data_validation(format!(
                "Station {} must provide latitude and longitude together",
                self.station_id
            ))),
            _ => Ok(()),
        }
    }
}

/// A time series record set reference
///
/// Describes one measured variable of a station. The actual measurements live
/// in the data directory under `timeseries/<timeseries_id>.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Timeseries {
    /// Unique time series identifier
    pub timeseries_id: i32,

    /// Station this series belongs to
    pub station_id: i32,

    /// Variable name (e.g. "Rain", "Air temperature"); may be empty when a
    /// synoptic title is always supplied
    #[serde(default)]
    pub name: String,

    /// Unit of measurement rendered next to values (e.g. "mm", "°C")
    #[serde(default)]
    pub unit_of_measurement: String,

    /// Number of decimal places for value display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// Zone of the series' naive measurement timestamps
    pub time_zone: TimeZoneSpec,
}

impl Timeseries {
    /// Validate time series data for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(precision) = self.precision {
            if precision > 10 {
                return Err(Error::data_validation(format!(
                    "Time series {} has an implausible precision of {} decimal places",
                    self.timeseries_id, precision
                )));
            }
        }

        self.time_zone.validate()
    }
}

/// A single measurement of a time series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesRecord {
    /// Naive local timestamp in the owning series' time zone
    pub timestamp: NaiveDateTime,

    /// Measured value; `None` for a recorded gap
    pub value: Option<f64>,

    /// Flags column of the record, verbatim
    pub flags: String,
}

// =============================================================================
// Synoptic Configuration
// =============================================================================

/// A time series attached to a group station, with display configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SynopticTimeseries {
    /// The referenced time series
    pub timeseries_id: i32,

    /// Position index, unique per station; the station's indices must form a
    /// contiguous 1..N sequence
    pub order: u16,

    /// Chart and report title; empty to use the time series name
    #[serde(default)]
    pub title: String,

    /// Legend/report annotation when series are grouped, shown in brackets
    #[serde(default)]
    pub subtitle: String,

    /// Fixed lower y-axis bound; the chart expands when the data goes lower
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_chart_min: Option<f64>,

    /// Fixed upper y-axis bound; the chart expands when the data goes higher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_chart_max: Option<f64>,

    /// Values below this bound classify as "low"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_limit: Option<f64>,

    /// Values above this bound classify as "high"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_limit: Option<f64>,

    /// Order of another series of the same station to share a chart with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_with: Option<u16>,
}

impl SynopticTimeseries {
    /// Resolve the display title: the explicit title, or the series name
    pub fn display_title<'a>(&'a self, timeseries_name: &'a str) -> &'a str {
        if self.title.is_empty() {
            timeseries_name
        } else {
            &self.title
        }
    }

    /// Full display name: `"<station> - <title>"`, with the subtitle in
    /// brackets when one is configured
    pub fn full_name(&self, station_name: &str, timeseries_name: &str) -> String {
        let title = self.display_title(timeseries_name);
        if self.subtitle.is_empty() {
            format!("{} - {}", station_name, title)
        } else {
            format!("{} - {} ({})", station_name, title, self.subtitle)
        }
    }

    /// Whether this series leads its own chart (is not grouped into another)
    pub fn is_chart_leader(&self) -> bool {
        self.group_with.is_none()
    }

    /// Validate display configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(Error::data_validation(format!(
                "Synoptic time series {} has order 0; position indices start at 1",
                self.timeseries_id
            )));
        }

        if let (Some(min), Some(max)) = (self.default_chart_min, self.default_chart_max) {
            if min > max {
                return Err(Error::data_validation(format!(
                    "Synoptic time series {}: chart minimum {} exceeds maximum {}",
                    self.timeseries_id, min, max
                )));
            }
        }

        if let (Some(low), Some(high)) = (self.low_limit, self.high_limit) {
            if low > high {
                return Err(Error::data_validation(format!(
                    "Synoptic time series {}: low limit {} exceeds high limit {}",
                    self.timeseries_id, low, high
                )));
            }
        }

        if self.group_with == Some(self.order) {
            return Err(Error::data_validation(format!(
                "Synoptic time series {} groups with itself",
                self.timeseries_id
            )));
        }

        Ok(())
    }
}

/// A station's membership in a synoptic group
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SynopticGroupStation {
    /// The referenced station
    pub station_id: i32,

    /// Position index controlling display sequence, unique per group
    pub order: u16,

    /// Series attached to this station, with their display configuration
    #[serde(default)]
    pub timeseries: Vec<SynopticTimeseries>,
}

impl SynopticGroupStation {
    /// Position indices of the attached series, in configuration order
    pub fn timeseries_orders(&self) -> Vec<u16> {
        self.timeseries.iter().map(|sts| sts.order).collect()
    }

    /// Find an attached series by its position index
    pub fn timeseries_by_order(&self, order: u16) -> Option<&SynopticTimeseries> {
        self.timeseries.iter().find(|sts| sts.order == order)
    }

    /// Validate the membership and each attached series
    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(Error::data_validation(format!(
                "Station {} has order 0; position indices start at 1",
                self.station_id
            )));
        }

        for sts in &self.timeseries {
            sts.validate()?;
        }

        Ok(())
    }
}

/// A named collection of stations displayed together
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SynopticGroup {
    /// Display name of the group
    pub name: String,

    /// Unique URL-safe identifier; names the group's output directory
    pub slug: String,

    /// Staleness threshold in minutes: data older than this is "old"
    #[serde(default = "default_fresh_time_limit")]
    pub fresh_time_limit_minutes: u32,

    /// Zone that short-form last-update timestamps are converted to
    pub time_zone: TimeZoneSpec,

    /// Member stations in display order
    #[serde(default)]
    pub stations: Vec<SynopticGroupStation>,
}

impl SynopticGroup {
    /// The staleness threshold as a duration
    pub fn fresh_time_limit(&self) -> Duration {
        Duration::minutes(self.fresh_time_limit_minutes as i64)
    }

    /// Validate the group and every membership it contains
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::data_validation(format!(
                "Group '{}' has an empty name",
                self.slug
            )));
        }

        if !is_valid_slug(&self.slug) {
            return Err(Error::data_validation(format!(
                "Invalid slug '{}': must be lowercase alphanumeric with single hyphens",
                self.slug
            )));
        }

        self.time_zone.validate()?;

        for station in &self.stations {
            station.validate()?;
        }

        Ok(())
    }
}

impl fmt::Display for SynopticGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn default_fresh_time_limit() -> u32 {
    DEFAULT_FRESH_TIME_LIMIT_MINUTES
}

/// Check a slug against the URL-safe pattern
pub fn is_valid_slug(slug: &str) -> bool {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    let re = SLUG_RE.get_or_init(|| {
        Regex::new(SLUG_PATTERN).expect("slug pattern is a valid regex")
    });
    re.is_match(slug)
}

// =============================================================================
// Classification Labels
// =============================================================================

/// Recency classification of a station's latest data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Elapsed time since the last common date is within the group threshold
    Recent,
    /// Elapsed time exceeds the threshold, or the station has no data
    Old,
}

impl Freshness {
    /// The label consumed by the rendering collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Recent => "recent",
            Freshness::Old => "old",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a latest value against configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueStatus {
    /// Within bounds, or no bounds configured
    Ok,
    /// Above the configured high limit
    High,
    /// Below the configured low limit
    Low,
}

impl ValueStatus {
    /// The label consumed by the rendering collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueStatus::Ok => "ok",
            ValueStatus::High => "high",
            ValueStatus::Low => "low",
        }
    }
}

impl fmt::Display for ValueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
