use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures that abort a whole search request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    BadRequest(String),

    #[error("CDX query failed")]
    LookupFailed(reqwest::StatusCode),

    #[error("{0}")]
    MalformedRecord(#[from] serde_json::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            SearchError::BadRequest(msg) => tracing::debug!("rejected search: {msg}"),
            SearchError::LookupFailed(upstream) => {
                tracing::error!(%upstream, "CDX lookup returned non-success status")
            }
            other => tracing::error!("search failed: {other:?}"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failure to fetch or use a single capture. Never fatal to the request.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid capture url {0:?}")]
    InvalidUrl(String),
}
