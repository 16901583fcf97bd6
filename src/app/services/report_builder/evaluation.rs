//! Freshness and value-status evaluation
//!
//! Pure, stateless classification re-evaluated on each render pass: the last
//! common date across a station's series, the "recent"/"old" freshness label,
//! the "ok"/"high"/"low" value status, and the formatted timestamp renderings
//! consumed by the template collaborator.
//!
//! # Clock injection
//! Classification takes `now` as an explicit parameter rather than reading the
//! system clock, which keeps the freshness boundary deterministic in tests; a
//! convenience wrapper uses the real clock.

use crate::app::models::{Freshness, TimeZoneSpec, Timeseries, ValueStatus};
use crate::app::services::timeseries_store::TimeseriesData;
use crate::constants::{format_utc_offset, PRETTY_DATE_FORMAT};
use chrono::{DateTime, Duration, FixedOffset, Utc};

// ---------------------------------------------------------------------------
// Last common date
// ---------------------------------------------------------------------------

/// The most recent timestamp available in all of a station's series
///
/// Carries the zone of the series that produced it, so the pretty rendering
/// can annotate the zone code and offset.
#[derive(Debug, Clone, PartialEq)]
pub struct LastCommonDate {
    /// The timestamp, localized in the producing series' zone
    pub local: DateTime<FixedOffset>,

    /// Zone of the series that produced the minimum
    pub time_zone: TimeZoneSpec,
}

impl LastCommonDate {
    /// Rendering with explicit zone annotation, e.g.
    /// `"23 Oct 2015 15:20 EET (+0200)"`
    ///
    /// Month abbreviations are English regardless of the system locale.
    pub fn pretty(&self) -> String {
        format!(
            "{} {} ({})",
            self.local.format(PRETTY_DATE_FORMAT),
            self.time_zone.code,
            format_utc_offset(self.time_zone.utc_offset_minutes)
        )
    }

    /// Rendering without zone annotation, converted to the given zone, e.g.
    /// `"23 Oct 2015 14:20"`
    pub fn pretty_in(&self, zone: &TimeZoneSpec) -> String {
        self.local
            .with_timezone(&zone.fixed_offset())
            .format(PRETTY_DATE_FORMAT)
            .to_string()
    }

    /// The timestamp as a naive local time in the given series' zone
    ///
    /// Used to address records of that series, whose timestamps are naive.
    pub fn naive_in(&self, series_zone: &TimeZoneSpec) -> chrono::NaiveDateTime {
        self.local
            .with_timezone(&series_zone.fixed_offset())
            .naive_local()
    }
}

/// Compute the last common date across a station's series
///
/// The minimum over series of each series' latest timestamp, compared as
/// instants. Series with no data are skipped; `None` when no series has data.
pub fn last_common_date(series: &[(&Timeseries, &TimeseriesData)]) -> Option<LastCommonDate> {
    let mut result: Option<LastCommonDate> = None;

    for (ts, data) in series {
        let Some(end) = data.end_timestamp() else {
            continue;
        };
        let localized = ts.time_zone.localize(end);

        let is_earlier = match &result {
            Some(current) => localized < current.local,
            None => true,
        };
        if is_earlier {
            result = Some(LastCommonDate {
                local: localized,
                time_zone: ts.time_zone.clone(),
            });
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Freshness classification
// ---------------------------------------------------------------------------

/// Classify data recency against a staleness threshold
///
/// "old" when the elapsed time since the last common date is strictly greater
/// than the threshold:
///   elapsed >  threshold  →  old
///   elapsed == threshold  →  recent
///
/// A station with no last common date is "old".
pub fn classify_freshness_at(
    last_common: Option<&LastCommonDate>,
    fresh_time_limit: Duration,
    now: DateTime<Utc>,
) -> Freshness {
    let Some(last_common) = last_common else {
        return Freshness::Old;
    };

    let elapsed = now.signed_duration_since(last_common.local);
    if elapsed > fresh_time_limit {
        Freshness::Old
    } else {
        Freshness::Recent
    }
}

/// Convenience wrapper that classifies against the real clock
///
/// Use [`classify_freshness_at`] in tests to keep them deterministic.
pub fn classify_freshness(
    last_common: Option<&LastCommonDate>,
    fresh_time_limit: Duration,
) -> Freshness {
    classify_freshness_at(last_common, fresh_time_limit, Utc::now())
}

// ---------------------------------------------------------------------------
// Value status classification
// ---------------------------------------------------------------------------

/// Classify a latest value against optional configured bounds
pub fn classify_value(
    value: f64,
    low_limit: Option<f64>,
    high_limit: Option<f64>,
) -> ValueStatus {
    if low_limit.is_some_and(|low| value < low) {
        ValueStatus::Low
    } else if high_limit.is_some_and(|high| value > high) {
        ValueStatus::High
    } else {
        ValueStatus::Ok
    }
}

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Format a value with the series' display precision
///
/// A missing value renders as an empty string, so templates can still emit
/// the unit (e.g. `" m/s"`).
pub fn format_value(value: Option<f64>, precision: Option<u32>) -> String {
    match (value, precision) {
        (None, _) => String::new(),
        (Some(v), Some(p)) => format!("{:.*}", p as usize, v),
        (Some(v), None) => format!("{}", v),
    }
}
