// tests/api_http.rs
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    Router,
};
use http::{Request, StatusCode};
use hunt_curator::analyze::{DisabledRequester, DynRequester, MockRequester};
use hunt_curator::analyze::requester::MOCK_NARRATIVE;
use hunt_curator::pools::producthunt::ProductHuntProvider;
use hunt_curator::pools::{PoolProvider, PoolSet};
use hunt_curator::{create_router, AppState, CurateError};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

struct DownProvider;

#[async_trait]
impl PoolProvider for DownProvider {
    async fn fetch_pools(&self) -> Result<PoolSet, CurateError> {
        Err(CurateError::pool_unavailable("upstream timeout"))
    }
    fn name(&self) -> &'static str {
        "down"
    }
}

fn fixture_app(requester: DynRequester) -> Router {
    let body = include_str!("fixtures/producthunt_response.json");
    let pools = Arc::new(ProductHuntProvider::from_fixture_str(body));
    create_router(AppState::new(pools, requester))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_is_ok() {
    let app = fixture_app(Arc::new(DisabledRequester));
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn featured_returns_enriched_list_in_selection_order() {
    let app = fixture_app(Arc::new(MockRequester::new(MOCK_NARRATIVE)));
    let (status, body) = get_json(app, "/featured").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 5);
    let periods: Vec<&str> = items.iter().map(|i| i["period"].as_str().unwrap()).collect();
    assert_eq!(
        periods,
        ["recentDay", "pastWeek", "pastWeek", "pastMonth", "pastMonth"]
    );
    for it in items {
        assert_eq!(it["analysisSource"], "narrative");
        assert_eq!(it["aiTech"]["used"], true);
        assert_eq!(it["aiTech"]["technologies"].as_array().unwrap().len(), 2);
        assert_eq!(it["insights"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn featured_with_disabled_ai_still_lists_every_item() {
    let app = fixture_app(Arc::new(DisabledRequester));
    let (status, body) = get_json(app, "/featured").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|i| i["analysisSource"] == "fallback"));
    assert!(items.iter().all(|i| i["insights"].as_array().unwrap().len() == 3));
}

#[tokio::test]
async fn selection_route_skips_enrichment() {
    let app = fixture_app(Arc::new(DisabledRequester));
    let (status, body) = get_json(app, "/featured/selection").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|i| i.get("insights").is_none()));
    assert_eq!(items[0]["name"], "Lumen Notes");
}

#[tokio::test]
async fn pool_failure_is_503() {
    let app = create_router(AppState::new(
        Arc::new(DownProvider),
        Arc::new(DisabledRequester),
    ));
    let (status, body) = get_json(app, "/featured").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("upstream timeout"));
}
