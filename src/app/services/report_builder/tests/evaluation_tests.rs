//! Tests for freshness and value-status evaluation

use super::{create_test_data, create_test_timeseries, eet, ts};
use crate::app::models::{Freshness, TimeZoneSpec, ValueStatus};
use crate::app::services::report_builder::evaluation::{
    classify_freshness_at, classify_value, format_value, last_common_date,
};
use chrono::{Duration, TimeZone, Utc};

// --- Last common date ---------------------------------------------------

#[test]
fn test_last_common_date_is_the_earliest_series_end() {
    let rain = create_test_timeseries(9206, eet());
    let temperature = create_test_timeseries(9207, eet());

    let rain_data = create_test_data(&[
        (ts(2015, 10, 23, 15, 10), Some(0.1)),
        (ts(2015, 10, 23, 15, 20), Some(0.2)),
    ]);
    let temperature_data = create_test_data(&[(ts(2015, 10, 23, 16, 0), Some(38.5))]);

    let last_common = last_common_date(&[
        (&rain, &rain_data),
        (&temperature, &temperature_data),
    ])
    .unwrap();

    assert_eq!(last_common.local.naive_local(), ts(2015, 10, 23, 15, 20));
    assert_eq!(last_common.time_zone.code, "EET");
}

#[test]
fn test_last_common_date_compares_instants_across_zones() {
    let eet_series = create_test_timeseries(9206, eet());
    let cet_series = create_test_timeseries(
        9207,
        TimeZoneSpec {
            code: "CET".to_string(),
            utc_offset_minutes: 60,
        },
    );

    // 15:20 EET == 14:20 CET; the CET series ends at 14:00 CET == 15:00 EET,
    // which is the earlier instant.
    let eet_data = create_test_data(&[(ts(2015, 10, 23, 15, 20), Some(1.0))]);
    let cet_data = create_test_data(&[(ts(2015, 10, 23, 14, 0), Some(2.0))]);

    let last_common = last_common_date(&[(&eet_series, &eet_data), (&cet_series, &cet_data)])
        .unwrap();

    assert_eq!(last_common.time_zone.code, "CET");
    assert_eq!(last_common.local.naive_local(), ts(2015, 10, 23, 14, 0));
}

#[test]
fn test_series_without_data_are_skipped() {
    let rain = create_test_timeseries(9206, eet());
    let temperature = create_test_timeseries(9207, eet());

    let rain_data = create_test_data(&[(ts(2015, 10, 23, 15, 20), Some(0.2))]);
    let empty = create_test_data(&[]);

    let last_common =
        last_common_date(&[(&rain, &rain_data), (&temperature, &empty)]).unwrap();
    assert_eq!(last_common.local.naive_local(), ts(2015, 10, 23, 15, 20));
}

#[test]
fn test_no_series_with_data_yields_no_last_common_date() {
    let rain = create_test_timeseries(9206, eet());
    let empty = create_test_data(&[]);

    assert!(last_common_date(&[(&rain, &empty)]).is_none());
}

// --- Formatted rendering ------------------------------------------------

#[test]
fn test_pretty_carries_zone_code_and_offset() {
    let rain = create_test_timeseries(9206, eet());
    let data = create_test_data(&[(ts(2015, 10, 23, 15, 20), Some(0.2))]);

    let last_common = last_common_date(&[(&rain, &data)]).unwrap();
    assert_eq!(last_common.pretty(), "23 Oct 2015 15:20 EET (+0200)");
}

#[test]
fn test_pretty_in_converts_to_the_group_zone() {
    let rain = create_test_timeseries(9206, eet());
    let data = create_test_data(&[(ts(2015, 10, 23, 15, 20), Some(0.2))]);
    let group_zone = TimeZoneSpec {
        code: "CET".to_string(),
        utc_offset_minutes: 60,
    };

    let last_common = last_common_date(&[(&rain, &data)]).unwrap();
    assert_eq!(last_common.pretty_in(&group_zone), "23 Oct 2015 14:20");
}

// --- Freshness classification -------------------------------------------
//
// The fixture's last record is 2015-10-22 15:20 EET, i.e. 13:20 UTC, and the
// threshold is 60 minutes, so the boundary instant is 14:20 UTC.

fn fixture_last_common() -> crate::app::services::report_builder::LastCommonDate {
    let rain = create_test_timeseries(9206, eet());
    let data = create_test_data(&[(ts(2015, 10, 22, 15, 20), Some(0.0))]);
    last_common_date(&[(&rain, &data)]).unwrap()
}

#[test]
fn test_data_is_recent_just_before_the_boundary() {
    let now = Utc.with_ymd_and_hms(2015, 10, 22, 14, 19, 59).unwrap();
    let freshness = classify_freshness_at(
        Some(&fixture_last_common()),
        Duration::minutes(60),
        now,
    );
    assert_eq!(freshness, Freshness::Recent);
}

#[test]
fn test_data_is_old_just_after_the_boundary() {
    let now = Utc.with_ymd_and_hms(2015, 10, 22, 14, 20, 1).unwrap();
    let freshness = classify_freshness_at(
        Some(&fixture_last_common()),
        Duration::minutes(60),
        now,
    );
    assert_eq!(freshness, Freshness::Old);
}

#[test]
fn test_elapsed_equal_to_threshold_is_still_recent() {
    let now = Utc.with_ymd_and_hms(2015, 10, 22, 14, 20, 0).unwrap();
    let freshness = classify_freshness_at(
        Some(&fixture_last_common()),
        Duration::minutes(60),
        now,
    );
    assert_eq!(freshness, Freshness::Recent);
}

#[test]
fn test_station_without_data_is_old() {
    let now = Utc.with_ymd_and_hms(2015, 10, 22, 14, 0, 0).unwrap();
    assert_eq!(
        classify_freshness_at(None, Duration::minutes(60), now),
        Freshness::Old
    );
}

// --- Value status classification ----------------------------------------

#[test]
fn test_value_below_low_limit_is_low() {
    assert_eq!(classify_value(13.0, Some(15.0), None), ValueStatus::Low);
}

#[test]
fn test_value_above_high_limit_is_high() {
    assert_eq!(classify_value(4.5, None, Some(4.0)), ValueStatus::High);
}

#[test]
fn test_value_within_bounds_is_ok() {
    assert_eq!(classify_value(2.0, Some(1.0), Some(4.0)), ValueStatus::Ok);
}

#[test]
fn test_value_without_bounds_is_ok() {
    assert_eq!(classify_value(9000.0, None, None), ValueStatus::Ok);
}

#[test]
fn test_value_at_a_bound_is_ok() {
    assert_eq!(classify_value(4.0, None, Some(4.0)), ValueStatus::Ok);
    assert_eq!(classify_value(15.0, Some(15.0), None), ValueStatus::Ok);
}

// --- Value formatting ----------------------------------------------------

#[test]
fn test_format_value_applies_precision() {
    assert_eq!(format_value(Some(38.5), Some(1)), "38.5");
    assert_eq!(format_value(Some(38.54), Some(1)), "38.5");
    assert_eq!(format_value(Some(38.5), Some(0)), "38");
    assert_eq!(format_value(Some(0.2), Some(1)), "0.2");
}

#[test]
fn test_format_value_without_precision_is_unrounded() {
    assert_eq!(format_value(Some(38.5), None), "38.5");
}

#[test]
fn test_missing_value_formats_as_empty() {
    assert_eq!(format_value(None, Some(1)), "");
}
