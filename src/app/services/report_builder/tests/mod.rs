//! Tests for the report builder service

pub mod evaluation_tests;

// Test helper functions and fixtures
use crate::app::models::{TimeZoneSpec, Timeseries, TimeseriesRecord};
use crate::app::services::timeseries_store::TimeseriesData;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

/// Build a naive timestamp for fixtures
pub fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

/// The Eastern European zone most fixtures use
pub fn eet() -> TimeZoneSpec {
    TimeZoneSpec {
        code: "EET".to_string(),
        utc_offset_minutes: 120,
    }
}

/// Create a time series record reference for in-memory evaluation tests
pub fn create_test_timeseries(timeseries_id: i32, zone: TimeZoneSpec) -> Timeseries {
    Timeseries {
        timeseries_id,
        station_id: 1334,
        name: "Rain".to_string(),
        unit_of_measurement: "mm".to_string(),
        precision: Some(1),
        time_zone: zone,
    }
}

/// Create measurement data from (timestamp, value) pairs
pub fn create_test_data(points: &[(NaiveDateTime, Option<f64>)]) -> TimeseriesData {
    let records = points
        .iter()
        .map(|(timestamp, value)| TimeseriesRecord {
            timestamp: *timestamp,
            value: *value,
            flags: String::new(),
        })
        .collect();
    TimeseriesData::new(records)
}

/// A complete render fixture on disk: one group ("arta", zone CET+0100,
/// one-hour threshold) with two stations.
///
/// Komboti carries rain, temperature (low limit 15), and wind speed with a
/// grouped wind gust series (high limit 4); its data ends 2015-10-22 15:20
/// EET. The second station carries a Greek name and data ending a day later.
pub fn write_render_fixture(dir: &Path) {
    std::fs::write(
        dir.join("stations.toml"),
        r#"
[[stations]]
station_id = 1334
name = "Komboti"
latitude = 39.09
longitude = 21.10

[[stations]]
station_id = 1335
name = "Άγιος Αθανάσιος"
latitude = 39.22
longitude = 20.98
"#,
    )
    .unwrap();

    std::fs::write(
        dir.join("timeseries.toml"),
        r#"
[[timeseries]]
timeseries_id = 9206
station_id = 1334
name = "Rain"
unit_of_measurement = "mm"
precision = 1
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[timeseries]]
timeseries_id = 9207
station_id = 1334
name = "Air temperature"
unit_of_measurement = "°C"
precision = 1
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[timeseries]]
timeseries_id = 9208
station_id = 1334
name = "Wind speed"
unit_of_measurement = "m/s"
precision = 1
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[timeseries]]
timeseries_id = 9209
station_id = 1334
name = "Wind gust"
unit_of_measurement = "m/s"
precision = 1
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[timeseries]]
timeseries_id = 9210
station_id = 1335
name = "Rain"
unit_of_measurement = "mm"
precision = 1
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[timeseries]]
timeseries_id = 9211
station_id = 1335
name = "Air temperature"
unit_of_measurement = "°C"
precision = 1
time_zone = { code = "EET", utc_offset_minutes = 120 }
"#,
    )
    .unwrap();

    std::fs::write(
        dir.join("synoptic.toml"),
        r#"
[[groups]]
name = "Arta basin"
slug = "arta"
fresh_time_limit_minutes = 60
time_zone = { code = "CET", utc_offset_minutes = 60 }

[[groups.stations]]
station_id = 1334
order = 1

[[groups.stations.timeseries]]
timeseries_id = 9206
order = 1

[[groups.stations.timeseries]]
timeseries_id = 9207
order = 2
low_limit = 15.0

[[groups.stations.timeseries]]
timeseries_id = 9208
order = 3
title = "Wind"
default_chart_min = 0.0
default_chart_max = 5.0

[[groups.stations.timeseries]]
timeseries_id = 9209
order = 4
title = "Wind"
subtitle = "gust"
group_with = 3
high_limit = 4.0

[[groups.stations]]
station_id = 1335
order = 2

[[groups.stations.timeseries]]
timeseries_id = 9210
order = 1

[[groups.stations.timeseries]]
timeseries_id = 9211
order = 2
"#,
    )
    .unwrap();

    let data_dir = dir.join("timeseries");
    std::fs::create_dir_all(&data_dir).unwrap();

    let files = [
        (
            9206,
            "2015-10-22 15:00,0,\n2015-10-22 15:10,0.1,\n2015-10-22 15:20,0.2,\n",
        ),
        (
            9207,
            "2015-10-22 15:00,14,\n2015-10-22 15:10,13.5,\n2015-10-22 15:20,13,\n",
        ),
        (
            9208,
            "2015-10-22 15:00,3.7,\n2015-10-22 15:10,4.5,\n2015-10-22 15:20,4.1,\n",
        ),
        (
            9209,
            "2015-10-22 15:00,2.9,\n2015-10-22 15:10,3.2,\n2015-10-22 15:20,4.5,\n",
        ),
        (
            9210,
            "2015-10-23 15:00,0,\n2015-10-23 15:10,0.1,\n2015-10-23 15:20,0.2,\n",
        ),
        (
            9211,
            "2015-10-23 15:00,40,\n2015-10-23 15:10,39,\n2015-10-23 15:20,38.5,\n",
        ),
    ];
    for (id, content) in files {
        std::fs::write(data_dir.join(format!("{}.csv", id)), content).unwrap();
    }
}
