use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use vitals_core::{DatasetLoadError, ExtractedQuery, VitalsError};
use vitals_series::{export, DatasetCache, IndexedDataset, TimeSeries};

use crate::pipeline::{QueryOutcome, QueryPipeline};

/// The most recent query that matched data.
#[derive(Debug, Clone, Serialize)]
pub struct LastRange {
    pub query: ExtractedQuery,
    pub records: TimeSeries,
}

/// One user's working state: the loaded dataset, the pipeline that queries
/// it, and the last range that produced a match.
pub struct Session {
    cache: DatasetCache,
    dataset_path: PathBuf,
    dataset: Arc<IndexedDataset>,
    pipeline: QueryPipeline,
    last_range: Option<LastRange>,
}

impl Session {
    /// Load `path` through `cache` and start with no last range.
    pub fn open(
        mut cache: DatasetCache,
        path: &Path,
        pipeline: QueryPipeline,
    ) -> Result<Self, DatasetLoadError> {
        let dataset = cache.get_or_load(path)?;
        Ok(Self {
            cache,
            dataset_path: path.to_path_buf(),
            dataset,
            pipeline,
            last_range: None,
        })
    }

    pub fn dataset(&self) -> &IndexedDataset {
        &self.dataset
    }

    /// Shared handle on the current dataset.
    pub fn dataset_handle(&self) -> Arc<IndexedDataset> {
        Arc::clone(&self.dataset)
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    pub fn last_range(&self) -> Option<&LastRange> {
        self.last_range.as_ref()
    }

    /// Run a query. Only a match replaces the last range; every other
    /// outcome leaves it as it was.
    pub async fn submit(&mut self, query: &str) -> QueryOutcome {
        let dataset = Arc::clone(&self.dataset);
        let outcome = self.pipeline.run(query, &dataset).await;

        if let QueryOutcome::Matched { query, records, .. } = &outcome {
            self.last_range = Some(LastRange {
                query: query.clone(),
                records: records.clone(),
            });
        }
        outcome
    }

    /// The last range rendered as two-space indented JSON.
    pub fn last_range_json(&self) -> Result<String, VitalsError> {
        let last = self.last_range.as_ref().ok_or(VitalsError::NoResult)?;
        export::to_pretty_json(&last.records)
    }

    /// Write the last range to `path`.
    pub fn export_last(&self, path: &Path) -> Result<(), VitalsError> {
        let last = self.last_range.as_ref().ok_or(VitalsError::NoResult)?;
        export::write_json(&last.records, path)
    }

    /// Re-read the dataset file and forget the last range, which may refer
    /// to data that no longer exists.
    pub fn reload_dataset(&mut self) -> Result<Arc<IndexedDataset>, DatasetLoadError> {
        let dataset = self.cache.reload(&self.dataset_path)?;
        self.dataset = Arc::clone(&dataset);
        self.last_range = None;
        info!(anchor = %dataset.anchor, buckets = dataset.series.len(), "Session dataset reloaded");
        Ok(dataset)
    }
}
