// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::search_request::{SearchRequestDto, SearchResponseDto},
    domain::services::search_service::{SearchService, SearchServiceError},
};

/// Run an aggregation over the requested artists and respond with the
/// combined snapshot.
pub async fn search(
    Extension(service): Extension<Arc<SearchService>>,
    Json(payload): Json<SearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
    }

    match service.run_search(payload.artists, payload.mode).await {
        Ok(run) => (StatusCode::OK, Json(SearchResponseDto::from(run))).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// Return the current persisted snapshot.
pub async fn results(Extension(service): Extension<Arc<SearchService>>) -> impl IntoResponse {
    match service.current_results().await {
        Ok(Some(snapshot)) => (StatusCode::OK, Json(snapshot)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No results have been gathered yet" })),
        )
            .into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

impl From<SearchServiceError> for (StatusCode, String) {
    fn from(err: SearchServiceError) -> Self {
        match err {
            SearchServiceError::EmptyInput => (StatusCode::BAD_REQUEST, err.to_string()),
            SearchServiceError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}
