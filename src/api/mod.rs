use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::search::SearchService;

pub mod handlers;
pub mod models;

pub fn create_router(search_service: Arc<SearchService>) -> Router {
    // Any origin may call the API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handlers::search_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(search_service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
