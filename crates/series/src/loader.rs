use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::info;

use vitals_core::{DatasetLoadError, HealthRecord, HourBucketKey};

use crate::indexer;
use crate::series::TimeSeries;

const TIMESTAMP_FIELD: &str = "dateTime";
const PAYLOAD_FIELD: &str = "healthDomain";

/// Identity of a dataset file: where it lives and what it contained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetKey {
    pub path: PathBuf,
    /// Hex SHA-256 of the file bytes.
    pub digest: String,
}

impl DatasetKey {
    pub fn compute(path: &Path, bytes: &[u8]) -> Self {
        Self {
            path: normalize_path(path),
            digest: hex::encode(Sha256::digest(bytes)),
        }
    }
}

/// A loaded dataset: the hour series plus its present-date anchor.
#[derive(Debug, Clone)]
pub struct IndexedDataset {
    pub key: DatasetKey,
    pub series: TimeSeries,
    /// Last key in file order, fixed for the lifetime of the load.
    pub anchor: HourBucketKey,
}

impl IndexedDataset {
    /// Decode, index and anchor an already-read dataset file.
    pub fn from_bytes(key: DatasetKey, bytes: &[u8]) -> Result<Self, DatasetLoadError> {
        let records = parse_records(&key.path, bytes)?;
        let series = indexer::index(&records)?;
        let anchor = series
            .last_key()
            .cloned()
            .ok_or_else(|| DatasetLoadError::Empty {
                path: key.path.clone(),
            })?;

        info!(
            path = %key.path.display(),
            records = records.len(),
            buckets = series.len(),
            anchor = %anchor,
            "Loaded health dataset"
        );
        Ok(Self { key, series, anchor })
    }

    pub fn path(&self) -> &Path {
        &self.key.path
    }
}

/// Read and index a dataset file.
pub fn load_dataset(path: &Path) -> Result<IndexedDataset, DatasetLoadError> {
    let bytes = read_bytes(path)?;
    let key = DatasetKey::compute(path, &bytes);
    IndexedDataset::from_bytes(key, &bytes)
}

/// Read a dataset file into records without indexing.
pub fn load_records(path: &Path) -> Result<Vec<HealthRecord>, DatasetLoadError> {
    let bytes = read_bytes(path)?;
    parse_records(path, &bytes)
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, DatasetLoadError> {
    fs::read(path).map_err(|source| DatasetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a JSON array of `{dateTime, healthDomain}` objects.
///
/// Any record lacking either field fails the whole decode.
pub fn parse_records(path: &Path, bytes: &[u8]) -> Result<Vec<HealthRecord>, DatasetLoadError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| DatasetLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(DatasetLoadError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(mut obj) = item else {
                return Err(DatasetLoadError::NotAnArray {
                    path: path.to_path_buf(),
                });
            };
            let timestamp = match obj.remove(TIMESTAMP_FIELD) {
                Some(Value::String(s)) => s,
                _ => {
                    return Err(DatasetLoadError::MissingField {
                        index,
                        field: TIMESTAMP_FIELD,
                    })
                }
            };
            let domain = obj
                .remove(PAYLOAD_FIELD)
                .ok_or(DatasetLoadError::MissingField {
                    index,
                    field: PAYLOAD_FIELD,
                })?;
            Ok(HealthRecord::new(timestamp, domain))
        })
        .collect()
}

pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
