//! Demo that runs the full pipeline over an embedded Product Hunt response and prints the
//! enriched featured list as JSON. Uses the mock requester unless `--live` is passed, in
//! which case the configured requester is built from `config/curator.toml`.

use std::sync::Arc;

use hunt_curator::analyze::{build_requester_from_config, DynRequester, MockRequester};
use hunt_curator::analyze::requester::MOCK_NARRATIVE;
use hunt_curator::config::CuratorConfig;
use hunt_curator::pools::producthunt::ProductHuntProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let live = std::env::args().any(|a| a == "--live");
    let requester: DynRequester = if live {
        build_requester_from_config(&CuratorConfig::load_default()?.ai)?
    } else {
        Arc::new(MockRequester::new(MOCK_NARRATIVE))
    };

    let pools = ProductHuntProvider::from_fixture_str(include_str!(
        "../../tests/fixtures/producthunt_response.json"
    ));

    let items = hunt_curator::curate(&pools, requester).await?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
