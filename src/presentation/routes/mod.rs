// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::services::search_service::SearchService;
use crate::presentation::handlers::search_handler;

/// Build the application router with its shared state attached.
pub fn routes(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/search", post(search_handler::search))
        .route("/v1/results", get(search_handler::results))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(service))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
