use serde_json::json;

use vitals_core::{DatasetLoadError, HourBucketKey};
use vitals_series::{load_dataset, load_records, resolve, DatasetCache};

use crate::helpers::{raw_record, sample_records, test_data_dir, write_dataset};

fn key(s: &str) -> HourBucketKey {
    HourBucketKey::parse(s).unwrap()
}

#[test]
fn test_load_index_resolve() {
    let dir = test_data_dir();
    let path = write_dataset(&dir, "P01Data.json", &sample_records());

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.series.len(), 3, "five readings collapse into three hours");
    assert_eq!(dataset.anchor, key("2019-05-10T00"));
    assert_eq!(
        dataset.series.get(&key("2019-05-01T00")),
        Some(&json!({"heart_rate": 58, "steps": 0})),
        "first reading of the hour wins"
    );

    let matched = resolve(&key("2019-05-01T00"), &key("2019-05-02T00"), &dataset.series);
    let keys: Vec<_> = matched.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["2019-05-01T00", "2019-05-02T00"]);
    assert!(!matched.contains_key(&key("2019-05-10T00")));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_records_keeps_raw_precision() {
    let dir = test_data_dir();
    let path = write_dataset(&dir, "P01Data.json", &sample_records());

    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[1].timestamp, "2019-05-01T00:40:00");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_anchor_uses_file_order_not_sort_order() {
    let dir = test_data_dir();
    let path = write_dataset(
        &dir,
        "unsorted.json",
        &[
            raw_record("2019-06-01T12:00:00", json!({})),
            raw_record("2019-05-01T12:00:00", json!({})),
        ],
    );

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.anchor, key("2019-05-01T12"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bad_record_aborts_whole_load() {
    let dir = test_data_dir();
    let mut records = sample_records();
    records.push(raw_record("2019-05-11", json!({})));
    let path = write_dataset(&dir, "bad.json", &records);

    let err = load_dataset(&path).unwrap_err();
    assert!(
        matches!(err, DatasetLoadError::InvalidTimestamp { index: 5, .. }),
        "unexpected error: {err}"
    );

    let mut cache = DatasetCache::new();
    assert!(cache.get_or_load(&path).is_err());
    assert!(cache.is_empty(), "no partial index is cached");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_cache_shares_one_index_per_file() {
    let dir = test_data_dir();
    let a = write_dataset(&dir, "a.json", &sample_records());
    let b = write_dataset(&dir, "b.json", &sample_records()[..2]);

    let mut cache = DatasetCache::new();
    let first_a = cache.get_or_load(&a).unwrap();
    let first_b = cache.get_or_load(&b).unwrap();
    let again_a = cache.get_or_load(&a).unwrap();

    assert!(std::sync::Arc::ptr_eq(&first_a, &again_a));
    assert_eq!(first_b.anchor, key("2019-05-01T00"));
    assert_eq!(cache.len(), 2);

    assert_eq!(cache.invalidate(&a), 1);
    assert_eq!(cache.len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}
