// src/enrich.rs
//! Batch orchestrator: one concurrent narrative request + parse per selected item.
//!
//! Failures stay scoped to their item and become the default analysis. The output is
//! index-aligned with the input regardless of completion order.

use metrics::counter;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::analyze::{parse, Analysis, DynRequester, NarrativeRequester};
use crate::select::SelectedItem;

/// Per-item result wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Analyzed(Analysis),
    Fallback { reason: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Narrative,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: SelectedItem,
    #[serde(flatten)]
    pub analysis: Analysis,
    #[serde(rename = "analysisSource")]
    pub source: AnalysisSource,
}

impl EnrichedItem {
    pub fn from_outcome(item: SelectedItem, outcome: ItemOutcome) -> Self {
        match outcome {
            ItemOutcome::Analyzed(analysis) => Self {
                item,
                analysis,
                source: AnalysisSource::Narrative,
            },
            ItemOutcome::Fallback { .. } => Self {
                item,
                analysis: Analysis::default(),
                source: AnalysisSource::Fallback,
            },
        }
    }
}

/// Request and parse the narrative for a single item.
pub async fn enrich_one(item: &SelectedItem, requester: &dyn NarrativeRequester) -> ItemOutcome {
    match requester.request(item).await {
        Ok(text) => ItemOutcome::Analyzed(parse(&text)),
        Err(e) => ItemOutcome::Fallback {
            reason: e.to_string(),
        },
    }
}

/// Enrich every item concurrently. Tasks live in a `JoinSet`, so dropping the returned
/// future aborts any narrative request still in flight.
pub async fn enrich(items: Vec<SelectedItem>, requester: DynRequester) -> Vec<EnrichedItem> {
    let mut set = JoinSet::new();
    for (idx, item) in items.iter().cloned().enumerate() {
        let requester = requester.clone();
        set.spawn(async move { (idx, enrich_one(&item, requester.as_ref()).await) });
    }

    let mut outcomes: Vec<Option<ItemOutcome>> = vec![None; items.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
            // A panicking provider only takes down its own task; its slot stays empty.
            Err(e) => tracing::warn!(error = %e, "analysis task failed"),
        }
    }

    let mut out = Vec::with_capacity(items.len());
    for (item, outcome) in items.into_iter().zip(outcomes) {
        let outcome = outcome.unwrap_or_else(|| ItemOutcome::Fallback {
            reason: "analysis task failed".to_string(),
        });

        counter!("curator_enrich_total").increment(1);
        if let ItemOutcome::Fallback { reason } = &outcome {
            counter!("curator_enrich_fallback_total").increment(1);
            tracing::warn!(
                item = %item.candidate.name,
                provider = requester.provider_name(),
                %reason,
                "narrative analysis failed; using defaults"
            );
        }
        out.push(EnrichedItem::from_outcome(item, outcome));
    }
    out
}
