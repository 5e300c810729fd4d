use std::time::Duration;

use tracing::info;

use vitals_core::ExtractedQuery;
use vitals_llm::{ExtractionError, QueryExtractor};
use vitals_series::{IndexedDataset, TimeSeries};

use crate::validate;

/// What one natural-language query produced.
#[derive(Debug)]
pub enum QueryOutcome {
    /// At least one hour bucket fell inside the extracted timeframe.
    Matched {
        query: ExtractedQuery,
        records: TimeSeries,
        elapsed: Duration,
    },
    /// The query was understood but no data exists for its timeframe.
    EmptyRange {
        query: ExtractedQuery,
        elapsed: Duration,
    },
    /// The model answered but its reply was unusable.
    ExtractionFailed {
        error: ExtractionError,
        elapsed: Duration,
    },
    /// The model could not be reached or did not answer in time.
    ServiceUnavailable { error: ExtractionError },
}

impl QueryOutcome {
    /// User-facing summary.
    pub fn message(&self) -> String {
        match self {
            QueryOutcome::Matched { query, records, .. } => format!(
                "Found {} hourly records for '{}' from {} to {}",
                records.len(),
                query.ailment,
                query.start,
                query.end
            ),
            QueryOutcome::EmptyRange { query, .. } => format!(
                "No health data available for the selected timeframe ({} to {})",
                query.start, query.end
            ),
            QueryOutcome::ExtractionFailed { error, .. } => {
                format!("Could not extract ailment and timeframe from the query: {error}")
            }
            QueryOutcome::ServiceUnavailable { error } => {
                format!("Language model is not available ({error}). Is Ollama running?")
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            QueryOutcome::Matched { .. } => "matched",
            QueryOutcome::EmptyRange { .. } => "empty_range",
            QueryOutcome::ExtractionFailed { .. } => "extraction_failed",
            QueryOutcome::ServiceUnavailable { .. } => "service_unavailable",
        }
    }

    pub fn query(&self) -> Option<&ExtractedQuery> {
        match self {
            QueryOutcome::Matched { query, .. } | QueryOutcome::EmptyRange { query, .. } => {
                Some(query)
            }
            _ => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, QueryOutcome::Matched { .. })
    }
}

/// Extract, validate, resolve.
pub struct QueryPipeline {
    extractor: QueryExtractor,
}

impl QueryPipeline {
    pub fn new(extractor: QueryExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &QueryExtractor {
        &self.extractor
    }

    /// Run one query against `dataset`, anchored at the dataset's last key.
    pub async fn run(&self, query: &str, dataset: &IndexedDataset) -> QueryOutcome {
        let extraction = self.extractor.extract(query, &dataset.anchor).await;
        let elapsed = extraction.elapsed;

        let extracted = match extraction.result {
            Ok(q) => q,
            Err(error) if error.is_service_failure() => {
                return QueryOutcome::ServiceUnavailable { error };
            }
            Err(error) => return QueryOutcome::ExtractionFailed { error, elapsed },
        };

        let extracted = validate::normalize(extracted, &dataset.series);
        let records = dataset.series.resolve(&extracted.start, &extracted.end);

        info!(
            ailment = %extracted.ailment,
            start = %extracted.start,
            end = %extracted.end,
            matched = records.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Resolved timeframe"
        );

        if records.is_empty() {
            QueryOutcome::EmptyRange {
                query: extracted,
                elapsed,
            }
        } else {
            QueryOutcome::Matched {
                query: extracted,
                records,
                elapsed,
            }
        }
    }
}
