// src/pools/mod.rs
pub mod producthunt;
pub mod types;

pub use types::{CandidateRecord, Period, PoolProvider, PoolSet, Topic, DEFAULT_CATEGORY};
