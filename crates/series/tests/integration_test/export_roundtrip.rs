use vitals_core::HourBucketKey;
use vitals_series::export::write_json;
use vitals_series::{load_dataset, TimeSeries};

use crate::helpers::{sample_records, test_data_dir, write_dataset};

#[test]
fn test_export_matched_range() {
    let dir = test_data_dir();
    let path = write_dataset(&dir, "P01Data.json", &sample_records());
    let dataset = load_dataset(&path).unwrap();

    let start = HourBucketKey::parse("2019-05-02T00").unwrap();
    let end = HourBucketKey::parse("2019-05-31T23").unwrap();
    let matched = dataset.series.resolve(&start, &end);

    let out = dir.join("health_data_timeframe.json");
    write_json(&matched, &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("{\n  \"2019-05-02T00\": {"));

    let back: TimeSeries = serde_json::from_str(&text).unwrap();
    assert_eq!(back, matched);
    assert_eq!(back.len(), 2);

    std::fs::remove_dir_all(&dir).ok();
}
