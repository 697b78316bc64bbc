use chrono::NaiveDate;

use super::*;
use crate::error::Error;

fn sample(minute: u32, cpu: f64) -> MetricSample {
    let timestamp = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap().and_hms_opt(9, minute, 0).unwrap();
    MetricSample::new(timestamp, cpu, 40.0, 0.0, 12.5)
}

fn profile(cpu_name: &str) -> HardwareProfile {
    HardwareProfile {
        cpu_name: cpu_name.to_string(),
        gpu_name: "Unavailable".to_string(),
        ram_size_gb: 16.0,
        os_name: "Linux 6.1".to_string(),
    }
}

#[test]
fn test_init_is_idempotent() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init().unwrap();
    store.init().unwrap();
    assert!(store.fetch_all_usage().unwrap().is_empty());
}

#[test]
fn test_usage_round_trip_keeps_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    let samples = vec![sample(0, 10.0), sample(1, 20.0), sample(2, 30.0)];

    store.insert_usage(&samples[0]).unwrap();
    store.insert_usage_batch(&samples[1..]).unwrap();

    assert_eq!(store.fetch_all_usage().unwrap(), samples);
}

#[test]
fn test_unparseable_time_is_malformed() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert_usage(&sample(0, 1.0)).unwrap();
    store
        .connection()
        .execute("INSERT INTO system_usage (time, cpu, memory, gpu, network_kb) VALUES ('soon', 1, 1, 0, 0)", [])
        .unwrap();

    match store.fetch_all_usage() {
        Err(Error::MalformedRecord { row, .. }) => assert_eq!(row, 2),
        other => panic!("expected malformed record, got {other:?}"),
    }
}

#[test]
fn test_text_in_numeric_column_is_malformed() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert_usage(&sample(0, 1.0)).unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO system_usage (time, cpu, memory, gpu, network_kb) VALUES ('2024-01-01 00:00:00', 'abc', 1, 0, 0)",
            [],
        )
        .unwrap();

    let err = store.fetch_all_usage().unwrap_err();
    assert!(err.is_malformed_record());
    match err {
        Error::MalformedRecord { row, message } => {
            assert_eq!(row, 2);
            assert!(message.contains("cpu"));
        },
        other => panic!("expected malformed record, got {other:?}"),
    }
}

#[test]
fn test_integer_values_are_accepted() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO system_usage (time, cpu, memory, gpu, network_kb) VALUES ('2024-01-01 00:00:00', 5, 6, 0, 2)",
            [],
        )
        .unwrap();

    let samples = store.fetch_all_usage().unwrap();
    assert_eq!(samples[0].cpu_percent(), 5.0);
    assert_eq!(samples[0].network_rate_kb_per_s(), 2.0);
}

#[test]
fn test_setting_upsert_last_write_wins() {
    let store = SqliteStore::open_in_memory().unwrap();

    store.upsert_setting(&Setting::new("tick_period_ms", "5000")).unwrap();
    store.upsert_setting(&Setting::new("theme", "dark")).unwrap();
    store.upsert_setting(&Setting::new("tick_period_ms", "1000")).unwrap();

    let settings = store.fetch_settings().unwrap();
    assert_eq!(settings, vec![Setting::new("tick_period_ms", "1000"), Setting::new("theme", "dark")]);
}

#[test]
fn test_latest_hardware_is_last_inserted() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.latest_hardware().unwrap(), None);

    store.insert_hardware(&profile("Old CPU")).unwrap();
    store.insert_hardware(&profile("New CPU")).unwrap();

    assert_eq!(store.fetch_hardware().unwrap().len(), 2);
    assert_eq!(store.latest_hardware().unwrap(), Some(profile("New CPU")));
}

