//! Tests for the time series measurement store

pub mod store_tests;

use chrono::{NaiveDate, NaiveDateTime};

/// Build a naive timestamp for fixtures
pub fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}
