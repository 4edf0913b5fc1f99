// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

use cratedigger::domain::models::listing::ListingRecord;
use cratedigger::domain::search::source::{MarketplaceSource, SearchOutcome};
use cratedigger::domain::services::search_service::SearchService;
use cratedigger::infrastructure::search::aggregator::ListingAggregator;
use cratedigger::infrastructure::snapshot_store::SnapshotStore;
use cratedigger::presentation::routes;

struct LinkOnlySource;

#[async_trait]
impl MarketplaceSource for LinkOnlySource {
    async fn search(&self, artist: &str) -> SearchOutcome {
        SearchOutcome::Fallback(vec![ListingRecord::search_link(
            artist,
            "stub",
            format!("https://example.com/?q={}", urlencoding::encode(artist)),
        )])
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn test_app(dir: &tempfile::TempDir) -> axum::Router {
    let aggregator = Arc::new(ListingAggregator::new(
        vec![Arc::new(LinkOnlySource)],
        Duration::ZERO,
    ));
    let store = Arc::new(SnapshotStore::new(dir.path().join("results.json")));
    routes::routes(Arc::new(SearchService::new(aggregator, store)))
}

fn post_search(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn results_endpoint_is_not_found_before_the_first_search() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(
            Request::builder()
                .uri("/v1/results")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_then_results_round_trips_through_the_api() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(post_search(r#"{"artists":["Can"],"mode":"replace"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/results")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_artist_list_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let response = test_app(&dir)
        .oneshot(post_search(r#"{"artists":[]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mode_defaults_to_replace_when_omitted() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(post_search(r#"{"artists":["Faust"]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
