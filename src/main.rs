//! Featured-launch curator: service entrypoint.
//! Boots the Axum HTTP server with the Product Hunt pool adapter and the configured
//! narrative requester.

use std::sync::Arc;

use hunt_curator::analyze::build_requester_from_config;
use hunt_curator::config::CuratorConfig;
use hunt_curator::pools::producthunt::ProductHuntProvider;
use hunt_curator::telemetry::Metrics;
use hunt_curator::{create_router, AppState};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - CURATOR_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("CURATOR_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hunt_curator=debug,info"));

    // The runtime may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = CuratorConfig::load_default()?;
    tracing::info!(
        ai_enabled = cfg.ai.enabled,
        ai_provider = %cfg.ai.provider,
        model = %cfg.ai.model,
        "curator config loaded"
    );

    let pools = ProductHuntProvider::from_config(&cfg.producthunt)?;
    let requester = build_requester_from_config(&cfg.ai)?;
    tracing::info!(provider = requester.provider_name(), "narrative requester ready");

    let mut router = create_router(AppState::new(Arc::new(pools), requester));
    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = %e, "prometheus recorder not installed"),
    }

    Ok(router.into())
}
