//! Tests for the group registry service

pub mod loader_tests;

// Test helper functions and fixtures
use crate::app::models::{
    SynopticGroup, SynopticGroupStation, SynopticTimeseries, TimeZoneSpec,
};
use std::path::Path;

/// Create a fixed-offset test zone
pub fn create_test_zone(code: &str, utc_offset_minutes: i32) -> TimeZoneSpec {
    TimeZoneSpec {
        code: code.to_string(),
        utc_offset_minutes,
    }
}

/// Create a synoptic series attachment with the given position index
pub fn create_test_synoptic_timeseries(timeseries_id: i32, order: u16) -> SynopticTimeseries {
    SynopticTimeseries {
        timeseries_id,
        order,
        title: String::new(),
        subtitle: String::new(),
        default_chart_min: None,
        default_chart_max: None,
        low_limit: None,
        high_limit: None,
        group_with: None,
    }
}

/// Create a group membership for a station with the given attachments
pub fn create_test_member(
    station_id: i32,
    order: u16,
    timeseries: Vec<SynopticTimeseries>,
) -> SynopticGroupStation {
    SynopticGroupStation {
        station_id,
        order,
        timeseries,
    }
}

/// Create a test group with a one-hour staleness threshold
pub fn create_test_group(slug: &str, stations: Vec<SynopticGroupStation>) -> SynopticGroup {
    SynopticGroup {
        name: format!("Group {}", slug),
        slug: slug.to_string(),
        fresh_time_limit_minutes: 60,
        time_zone: create_test_zone("EET", 120),
        stations,
    }
}

/// A complete, valid configuration fixture: one group, two stations, three
/// series (rain and temperature on the first station, rain on the second)
pub fn write_valid_fixture(dir: &Path) {
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
name = "Agios Spyridon"
latitude = 39.12
longitude = 21.25
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
station_id = 1335
name = "Rain"
unit_of_measurement = "mm"
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
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[groups.stations]]
station_id = 1334
order = 1

[[groups.stations.timeseries]]
timeseries_id = 9206
order = 1

[[groups.stations.timeseries]]
timeseries_id = 9207
order = 2

[[groups.stations]]
station_id = 1335
order = 2

[[groups.stations.timeseries]]
timeseries_id = 9208
order = 1
"#,
    )
    .unwrap();
}
