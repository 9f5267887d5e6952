// src/api.rs
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::analyze::DynRequester;
use crate::enrich::EnrichedItem;
use crate::error::CurateError;
use crate::pools::PoolProvider;
use crate::select::SelectedItem;

#[derive(Clone)]
pub struct AppState {
    pub pools: Arc<dyn PoolProvider>,
    pub requester: DynRequester,
}

impl AppState {
    pub fn new(pools: Arc<dyn PoolProvider>, requester: DynRequester) -> Self {
        Self { pools, requester }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/featured", get(featured))
        .route("/featured/selection", get(selection))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

impl IntoResponse for CurateError {
    fn into_response(self) -> Response {
        let status = match self {
            CurateError::PoolUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

async fn featured(State(state): State<AppState>) -> Result<Json<Vec<EnrichedItem>>, CurateError> {
    let items = crate::curate(state.pools.as_ref(), state.requester.clone()).await?;
    Ok(Json(items))
}

async fn selection(State(state): State<AppState>) -> Result<Json<Vec<SelectedItem>>, CurateError> {
    let items = crate::curate_selection(state.pools.as_ref()).await?;
    Ok(Json(items))
}
