// src/error.rs
//! Error taxonomy for the curation pipeline.
//!
//! Only `CurateError` ever reaches the caller. `RequestError` is recovered per item by the
//! batch orchestrator and ends up as a fallback reason string.

use thiserror::Error;

/// Fatal, run-level failures.
#[derive(Debug, Error)]
pub enum CurateError {
    /// The candidate pool adapter could not supply any pool data.
    #[error("candidate pools unavailable: {0}")]
    PoolUnavailable(String),
}

impl CurateError {
    pub fn pool_unavailable(msg: impl Into<String>) -> Self {
        Self::PoolUnavailable(msg.into())
    }
}

/// Per-item narrative request failures.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("narrative requester is disabled")]
    Disabled,
    #[error("missing API key for provider {0}")]
    MissingApiKey(&'static str),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("provider returned an empty narrative")]
    EmptyResponse,
    #[error("could not serialize item descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}
