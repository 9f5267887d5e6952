// src/lib.rs
// Public library surface for the service binary, the demo and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod enrich;
pub mod error;
pub mod pools;
pub mod select;
pub mod telemetry;

pub use crate::api::{create_router, AppState};
pub use crate::enrich::{enrich, AnalysisSource, EnrichedItem, ItemOutcome};
pub use crate::error::{CurateError, RequestError};
pub use crate::select::{select, SelectedItem, FEATURED_VOTE_THRESHOLD};

use crate::analyze::DynRequester;
use crate::pools::PoolProvider;
use tracing::info;

/// Fetch the pools and compose the featured selection, without enrichment.
pub async fn curate_selection(pools: &dyn PoolProvider) -> Result<Vec<SelectedItem>, CurateError> {
    telemetry::ensure_metrics_described();
    let set = pools.fetch_pools().await?;
    let selected = select::select_pools(&set);
    info!(
        provider = pools.name(),
        candidates = set.total(),
        selected = selected.len(),
        "featured selection composed"
    );
    Ok(selected)
}

/// Full pipeline: pools -> selection -> per-item narrative enrichment.
///
/// Only a pool failure aborts the run; every selected item is present in the output.
pub async fn curate(
    pools: &dyn PoolProvider,
    requester: DynRequester,
) -> Result<Vec<EnrichedItem>, CurateError> {
    let selected = curate_selection(pools).await?;
    let enriched = enrich(selected, requester).await;
    let fallbacks = enriched
        .iter()
        .filter(|e| e.source == AnalysisSource::Fallback)
        .count();
    info!(items = enriched.len(), fallbacks, "featured list enriched");
    Ok(enriched)
}
