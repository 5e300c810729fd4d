use std::path::PathBuf;

use serde_json::{json, Value};
use uuid::Uuid;

/// Create a unique temp directory for each test.
pub fn test_data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vitals-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// One raw dataset entry as it appears in the source file.
pub fn raw_record(date_time: &str, payload: Value) -> Value {
    json!({ "dateTime": date_time, "healthDomain": payload })
}

/// Write `records` as a dataset file inside `dir`.
pub fn write_dataset(dir: &PathBuf, name: &str, records: &[Value]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(records).unwrap()).unwrap();
    path
}

/// A small wearable-style dataset with several readings per hour.
pub fn sample_records() -> Vec<Value> {
    vec![
        raw_record("2019-05-01T00:12:00", json!({"heart_rate": 58, "steps": 0})),
        raw_record("2019-05-01T00:40:00", json!({"heart_rate": 61, "steps": 12})),
        raw_record("2019-05-02T00:03:00", json!({"heart_rate": 64, "steps": 40})),
        raw_record("2019-05-02T00:59:59", json!({"heart_rate": 70, "steps": 88})),
        raw_record("2019-05-10T00:00:00", json!({"heart_rate": 77, "steps": 3})),
    ]
}
