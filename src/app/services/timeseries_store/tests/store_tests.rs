//! Tests for store scanning and data queries

use super::ts;
use crate::app::services::timeseries_store::TimeseriesStore;

fn write_data_file(data_path: &std::path::Path, id: i32, content: &str) {
    let dir = data_path.join("timeseries");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{}.csv", id)), content).unwrap();
}

#[test]
fn test_scan_finds_sorted_series_ids() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(dir.path(), 9207, "2015-10-22 15:00,1,\n");
    write_data_file(dir.path(), 9206, "2015-10-22 15:00,0,\n");
    std::fs::write(dir.path().join("timeseries").join("notes.txt"), "x").unwrap();

    let store = TimeseriesStore::new(dir.path());
    assert_eq!(store.scan().unwrap(), vec![9206, 9207]);
}

#[test]
fn test_scan_of_missing_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = TimeseriesStore::new(dir.path());
    assert!(store.scan().unwrap().is_empty());
}

#[test]
fn test_load_missing_file_is_empty_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = TimeseriesStore::new(dir.path());

    let data = store.load(9206).unwrap();
    assert!(data.is_empty());
    assert!(data.end_timestamp().is_none());
}

#[test]
fn test_load_reads_records_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(
        dir.path(),
        9206,
        "2015-10-22 15:00,0,\n2015-10-22 15:10,0.1,\n2015-10-22 15:20,0.2,\n",
    );

    let store = TimeseriesStore::new(dir.path());
    let data = store.load(9206).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.end_timestamp(), Some(ts(2015, 10, 22, 15, 20)));
    assert_eq!(data.last_record().unwrap().value, Some(0.2));
}

#[test]
fn test_value_at_requires_an_exact_match() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(
        dir.path(),
        9206,
        "2015-10-22 15:00,0,\n2015-10-22 15:20,0.2,\n",
    );

    let store = TimeseriesStore::new(dir.path());
    let data = store.load(9206).unwrap();

    assert_eq!(data.value_at(ts(2015, 10, 22, 15, 20)), Some(0.2));
    assert_eq!(data.value_at(ts(2015, 10, 22, 15, 10)), None);
}

#[test]
fn test_value_at_a_gap_is_none() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(dir.path(), 9206, "2015-10-22 15:20,,\n");

    let store = TimeseriesStore::new(dir.path());
    let data = store.load(9206).unwrap();
    assert_eq!(data.value_at(ts(2015, 10, 22, 15, 20)), None);
}

#[test]
fn test_window_bounds_are_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(
        dir.path(),
        9206,
        "2015-10-22 14:50,1,\n2015-10-22 15:00,2,\n2015-10-22 15:10,3,\n2015-10-22 15:20,4,\n",
    );

    let store = TimeseriesStore::new(dir.path());
    let data = store.load(9206).unwrap();

    let window = data.window(ts(2015, 10, 22, 15, 0), ts(2015, 10, 22, 15, 20));
    assert_eq!(window.len(), 3);
    assert_eq!(window[0].value, Some(2.0));
    assert_eq!(window[2].value, Some(4.0));
}
