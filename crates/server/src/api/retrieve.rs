//! Natural-language retrieval endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use vitals_retrieval::{PromptRow, QueryOutcome, RetrievalReport};

use crate::state::AppState;

use super::ApiError;

#[derive(Deserialize)]
pub struct RetrieveRequest {
    pub prompt: String,
    /// Optional prompt table to join against the extracted query.
    #[serde(default)]
    pub prompts: Vec<PromptRow>,
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RetrieveRequest>,
) -> Result<Json<RetrievalReport>, ApiError> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "empty_prompt",
            "prompt must not be empty",
        ));
    }

    let outcome = state.session.lock().await.submit(prompt).await;
    let status = match &outcome {
        QueryOutcome::Matched { .. } => StatusCode::OK,
        QueryOutcome::EmptyRange { .. } => StatusCode::NOT_FOUND,
        QueryOutcome::ExtractionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        QueryOutcome::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    let message = outcome.message();

    match outcome {
        QueryOutcome::Matched {
            query,
            records,
            elapsed,
        } => Ok(Json(RetrievalReport::new(&query, records, elapsed, &req.prompts))),
        other => Err(ApiError::new(status, other.kind(), message)),
    }
}
