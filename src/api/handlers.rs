use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::SearchResponse;
use crate::error::SearchError;
use crate::search::SearchService;

use super::models::{HealthResponse, SearchParams};

pub async fn search_handler(
    State(search_service): State<Arc<SearchService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, SearchError> {
    let start = Instant::now();
    let Query(params) = params.map_err(|e| SearchError::BadRequest(e.body_text()))?;
    let query = params.q.unwrap_or_default();

    let response = search_service.handle(&query).await?;

    tracing::info!(
        query = %response.search_metadata.query,
        results = response.search_metadata.results_returned,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search served"
    );
    Ok(Json(response))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
