use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use vitals_core::config::LlmConfig;
use vitals_llm::provider::mock::MockLlmProvider;
use vitals_llm::QueryExtractor;
use vitals_retrieval::{QueryPipeline, Session};
use vitals_series::DatasetCache;

/// Write a dataset file into a fresh temp directory.
pub fn write_dataset(records: &[Value]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vitals-retrieval-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("P01Data.json");
    std::fs::write(&path, serde_json::to_vec(records).unwrap()).unwrap();
    path
}

/// Three hours of data, two readings in each of the first two.
pub fn three_hour_dataset() -> Vec<Value> {
    vec![
        json!({"dateTime": "2019-05-01T00:05:00", "healthDomain": {"sleep": 7.5}}),
        json!({"dateTime": "2019-05-01T00:45:00", "healthDomain": {"sleep": 0.0}}),
        json!({"dateTime": "2019-05-02T00:15:00", "healthDomain": {"sleep": 6.0}}),
        json!({"dateTime": "2019-05-02T00:30:00", "healthDomain": {"sleep": 1.0}}),
        json!({"dateTime": "2019-05-10T00:00:00", "healthDomain": {"sleep": 8.0}}),
    ]
}

pub fn open_session(records: &[Value]) -> (Session, Arc<MockLlmProvider>) {
    let path = write_dataset(records);
    let mock = Arc::new(MockLlmProvider::new());
    let extractor = QueryExtractor::new(Box::new(Arc::clone(&mock)), &LlmConfig::default());
    let session = Session::open(DatasetCache::new(), &path, QueryPipeline::new(extractor)).unwrap();
    (session, mock)
}
