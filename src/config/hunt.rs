// src/config/hunt.rs
use serde::{Deserialize, Serialize};

use crate::pools::producthunt::DEFAULT_ENDPOINT;

const ENV_TOKEN: &str = "PRODUCT_HUNT_TOKEN";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_token() -> String {
    "ENV".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// "ENV" means: read from PRODUCT_HUNT_TOKEN
    #[serde(default = "default_token")]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: default_token(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HuntConfig {
    /// Resolve the "ENV" placeholder. A missing token is not fatal here; the provider
    /// reports the pools as unavailable when it is asked to fetch.
    pub fn resolve(&mut self) {
        if self.token.trim().eq_ignore_ascii_case("env") {
            self.token = std::env::var(ENV_TOKEN).unwrap_or_default();
            if self.token.is_empty() {
                tracing::warn!("{ENV_TOKEN} is not set; Product Hunt pools will be unavailable");
            }
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
    }
}
