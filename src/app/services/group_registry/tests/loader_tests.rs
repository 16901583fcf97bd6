//! Tests for configuration loading and cross-reference validation

use super::write_valid_fixture;
use crate::app::services::group_registry::GroupRegistry;
use crate::Error;

#[tokio::test]
async fn test_load_valid_configuration() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());

    let (registry, stats) = GroupRegistry::load(dir.path()).await.unwrap();

    assert_eq!(registry.group_count(), 1);
    assert_eq!(registry.station_count(), 2);
    assert_eq!(registry.timeseries_count(), 3);
    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.groups_loaded, 1);
    assert_eq!(stats.memberships_validated, 2);

    let group = registry.get_group("arta").unwrap();
    assert_eq!(group.name, "Arta basin");
    assert_eq!(group.fresh_time_limit_minutes, 60);
    assert_eq!(group.stations.len(), 2);
}

#[tokio::test]
async fn test_missing_configuration_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::Io { .. }));
}

#[tokio::test]
async fn test_malformed_toml_is_a_parsing_error() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());
    std::fs::write(dir.path().join("stations.toml"), "[[stations]\nbroken").unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::ConfigParsing { .. }));
}

#[tokio::test]
async fn test_unknown_station_reference_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());
    std::fs::write(
        dir.path().join("synoptic.toml"),
        r#"
[[groups]]
name = "Arta basin"
slug = "arta"
fresh_time_limit_minutes = 60
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[groups.stations]]
station_id = 9999
order = 1
"#,
    )
    .unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::StationNotFound { station_id: 9999 }));
}

#[tokio::test]
async fn test_series_owned_by_another_station_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());
    // Attach station 1335's rain series to station 1334
    std::fs::write(
        dir.path().join("synoptic.toml"),
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
timeseries_id = 9208
order = 1
"#,
    )
    .unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::GroupRegistry { .. }));
}

#[tokio::test]
async fn test_order_gap_in_configuration_aborts_the_load() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());
    std::fs::write(
        dir.path().join("synoptic.toml"),
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
order = 3
"#,
    )
    .unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::IntegrityViolation { .. }));
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());
    std::fs::write(
        dir.path().join("synoptic.toml"),
        r#"
[[groups]]
name = "Arta basin"
slug = "arta"
fresh_time_limit_minutes = 60
time_zone = { code = "EET", utc_offset_minutes = 120 }

[[groups]]
name = "Arta basin again"
slug = "arta"
fresh_time_limit_minutes = 60
time_zone = { code = "EET", utc_offset_minutes = 120 }
"#,
    )
    .unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::GroupRegistry { .. }));
}

#[tokio::test]
async fn test_invalid_slug_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_fixture(dir.path());
    std::fs::write(
        dir.path().join("synoptic.toml"),
        r#"
[[groups]]
name = "Arta basin"
slug = "Arta Basin"
fresh_time_limit_minutes = 60
time_zone = { code = "EET", utc_offset_minutes = 120 }
"#,
    )
    .unwrap();

    let error = GroupRegistry::load(dir.path()).await.unwrap_err();
    assert!(matches!(error, Error::DataValidation { .. }));
}
