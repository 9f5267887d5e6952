use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "curator_candidates_total",
            "Candidates parsed from pool responses."
        );
        describe_counter!(
            "curator_pool_errors_total",
            "Pool fetches that ended in PoolUnavailable."
        );
        describe_counter!(
            "curator_selected_total",
            "Items selected for the featured list, by period."
        );
        describe_counter!("curator_enrich_total", "Items passed through enrichment.");
        describe_counter!(
            "curator_enrich_fallback_total",
            "Items that fell back to the default analysis."
        );
        describe_histogram!("curator_pool_parse_ms", "Pool response parse time in milliseconds.");
        describe_histogram!("curator_parse_ms", "Narrative parse time in milliseconds.");
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Call once per process.
    pub fn init() -> Result<Self, BuildError> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
