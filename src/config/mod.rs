// src/config/mod.rs
pub mod ai;
pub mod hunt;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use ai::AiConfig;
pub use hunt::HuntConfig;

pub const ENV_CONFIG_PATH: &str = "CURATOR_CONFIG_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuratorConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub producthunt: HuntConfig,
}

impl CuratorConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading curator config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mut cfg = parse_config(&content, ext.as_str())?;
        cfg.resolve()?;
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $CURATOR_CONFIG_PATH
    /// 2) config/curator.toml
    /// 3) config/curator.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        for candidate in ["config/curator.toml", "config/curator.json"] {
            let p = PathBuf::from(candidate);
            if p.exists() {
                return Self::load_from(&p);
            }
        }
        let mut cfg = Self::default();
        cfg.resolve()?;
        Ok(cfg)
    }

    fn resolve(&mut self) -> Result<()> {
        self.ai.resolve()?;
        self.producthunt.resolve();
        Ok(())
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<CuratorConfig> {
    match hint_ext {
        "json" => serde_json::from_str(s).context("parsing curator config as JSON"),
        "toml" => toml::from_str(s).context("parsing curator config as TOML"),
        // No usable extension: sniff.
        _ => {
            if s.trim_start().starts_with('{') {
                serde_json::from_str(s).context("parsing curator config as JSON")
            } else {
                toml::from_str(s).context("parsing curator config as TOML")
            }
        }
    }
}
