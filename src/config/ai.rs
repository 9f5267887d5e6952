// src/config/ai.rs
use serde::{Deserialize, Serialize};
use std::env;

pub const SUPPORTED_PROVIDERS: [&str; 1] = ["openai"];

fn default_provider() -> String {
    "openai".to_string()
}
fn default_model() -> String {
    "gpt-4".to_string()
}
fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub enabled: bool,
    /// "openai" (case-insensitive). Anything else is rejected by `resolve`.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// "ENV" means: read from OPENAI_API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            model: default_model(),
            api_key: default_api_key(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiConfig {
    /// Normalize provider, resolve the "ENV" key placeholder and clamp sampling params.
    pub fn resolve(&mut self) -> anyhow::Result<()> {
        self.provider = self.provider.trim().to_lowercase();

        if !SUPPORTED_PROVIDERS.contains(&self.provider.as_str()) {
            anyhow::bail!("Unsupported provider in config: {}", self.provider);
        }

        // A missing key leaves the placeholder in place; requests then fail per item and
        // fall back to default insights.
        if self.enabled && self.api_key.trim().eq_ignore_ascii_case("env") {
            match env::var("OPENAI_API_KEY") {
                Ok(k) => self.api_key = k,
                Err(_) => tracing::warn!("OPENAI_API_KEY is not set; narratives will fall back"),
            }
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            self.temperature = default_temperature();
        }
        if self.max_tokens == 0 {
            self.max_tokens = default_max_tokens();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        Ok(())
    }

    /// API key with the unresolved placeholder treated as absent.
    pub fn key(&self) -> Option<&str> {
        let k = self.api_key.trim();
        (!k.is_empty() && !k.eq_ignore_ascii_case("env")).then_some(k)
    }
}
