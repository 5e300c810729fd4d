//! Readiness: dataset summary and model reachability.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use vitals_core::HourBucketKey;

use crate::state::AppState;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub dataset: DatasetSummary,
    pub llm_reachable: bool,
}

#[derive(Serialize)]
pub struct DatasetSummary {
    pub path: String,
    pub digest: String,
    /// Hour buckets, not raw readings.
    pub records: usize,
    pub anchor: HourBucketKey,
}

/// Never waits on the session lock, so it answers while a query is running.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = Arc::clone(&*state.dataset.read().await);
    let summary = DatasetSummary {
        path: dataset.path().display().to_string(),
        digest: dataset.key.digest.clone(),
        records: dataset.series.len(),
        anchor: dataset.anchor.clone(),
    };

    let llm_reachable = match tokio::time::timeout(PING_TIMEOUT, state.llm.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!(error = %e, model = state.llm.model(), "LLM ping failed");
            false
        }
        Err(_) => false,
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        dataset: summary,
        llm_reachable,
    })
}
