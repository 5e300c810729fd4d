use std::time::Duration;

use serde::{Deserialize, Serialize};

use vitals_core::{ExtractedQuery, HourBucketKey};
use vitals_series::TimeSeries;

/// One row of a user-supplied prompt table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRow {
    pub prompt: String,
    pub health_ailment: String,
    /// Any timestamp whose first 13 characters form an hour key.
    pub date: String,
}

/// Rows about the same ailment (case-insensitive) dated inside the query's
/// timeframe. Rows whose date cannot be read are skipped.
pub fn matching_prompts<'a>(rows: &'a [PromptRow], query: &ExtractedQuery) -> Vec<&'a PromptRow> {
    let ailment = query.ailment.trim().to_lowercase();
    rows.iter()
        .filter(|row| row.health_ailment.trim().to_lowercase() == ailment)
        .filter(|row| {
            HourBucketKey::truncate(row.date.trim())
                .map(|key| query.covers(&key))
                .unwrap_or(false)
        })
        .collect()
}

/// Everything a caller gets back for a matched query.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalReport {
    pub ailment: String,
    pub start_date: HourBucketKey,
    pub end_date: HourBucketKey,
    pub elapsed_secs: f64,
    pub records: TimeSeries,
    pub matching_prompts: Vec<PromptRow>,
}

impl RetrievalReport {
    pub fn new(
        query: &ExtractedQuery,
        records: TimeSeries,
        elapsed: Duration,
        prompts: &[PromptRow],
    ) -> Self {
        Self {
            ailment: query.ailment.clone(),
            start_date: query.start.clone(),
            end_date: query.end.clone(),
            elapsed_secs: elapsed.as_secs_f64(),
            matching_prompts: matching_prompts(prompts, query).into_iter().cloned().collect(),
            records,
        }
    }
}
