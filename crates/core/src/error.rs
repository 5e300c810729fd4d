use std::path::PathBuf;

use thiserror::Error;

/// Failure to build an indexed dataset. Fatal for the session: nothing
/// downstream can run without a series and its anchor.
#[derive(Error, Debug)]
pub enum DatasetLoadError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset {path} must be a JSON array of record objects")]
    NotAnArray { path: PathBuf },

    #[error("record {index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index} has malformed timestamp '{value}' (expected %Y-%m-%dT%H:%M:%S)")]
    InvalidTimestamp { index: usize, value: String },

    #[error("dataset {path} contains no records")]
    Empty { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    DatasetLoad(#[from] DatasetLoadError),

    #[error("no matched range to export yet")]
    NoResult,

    #[error("{0}")]
    Other(String),
}
