//! Last matched range: view, export, and dataset reload.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use vitals_core::HourBucketKey;

use crate::state::AppState;

use super::ApiError;

/// The last range as two-space indented JSON.
pub async fn last_range(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let body = state.session.lock().await.last_range_json()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

#[derive(Serialize)]
pub struct ExportResponse {
    pub path: String,
    pub records: usize,
}

pub async fn export_last(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExportResponse>, ApiError> {
    let session = state.session.lock().await;
    session.export_last(&state.export_path)?;
    let records = session.last_range().map(|r| r.records.len()).unwrap_or(0);
    Ok(Json(ExportResponse {
        path: state.export_path.display().to_string(),
        records,
    }))
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub records: usize,
    pub anchor: HourBucketKey,
    pub digest: String,
}

/// Re-read the dataset file. Clears the last range.
pub async fn reload_dataset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let dataset = session.reload_dataset()?;
    // Swap the snapshot before releasing the session so reloads stay ordered.
    *state.dataset.write().await = Arc::clone(&dataset);
    drop(session);
    Ok(Json(ReloadResponse {
        records: dataset.series.len(),
        anchor: dataset.anchor.clone(),
        digest: dataset.key.digest.clone(),
    }))
}
