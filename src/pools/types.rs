// src/pools/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CurateError;

/// Label used when a candidate carries no topics.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
}

/// One raw launch as supplied by a pool adapter. Read-only once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "upvotes")]
    pub vote_count: u32,
    #[serde(rename = "comments")]
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing)]
    pub topics: Vec<Topic>,
}

impl CandidateRecord {
    /// First topic name, or `"General"`.
    pub fn category(&self) -> &str {
        self.topics
            .first()
            .map(|t| t.name.as_str())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Time window a selected item was drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    RecentDay,
    PastWeek,
    PastMonth,
}

/// Fetch window of a period, in whole days before "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub after_days: i64,
    pub before_days: i64,
    pub limit: usize,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::RecentDay, Period::PastWeek, Period::PastMonth];

    pub fn window(self) -> Window {
        match self {
            Period::RecentDay => Window {
                after_days: 1,
                before_days: 0,
                limit: 1,
            },
            Period::PastWeek => Window {
                after_days: 7,
                before_days: 1,
                limit: 2,
            },
            Period::PastMonth => Window {
                after_days: 30,
                before_days: 7,
                limit: 3,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::RecentDay => "recentDay",
            Period::PastWeek => "pastWeek",
            Period::PastMonth => "pastMonth",
        }
    }
}

/// The three vote-ordered pools (descending vote count, adapter-guaranteed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSet {
    pub recent_day: Vec<CandidateRecord>,
    pub past_week: Vec<CandidateRecord>,
    pub past_month: Vec<CandidateRecord>,
}

impl PoolSet {
    pub fn total(&self) -> usize {
        self.recent_day.len() + self.past_week.len() + self.past_month.len()
    }
}

#[async_trait::async_trait]
pub trait PoolProvider: Send + Sync {
    async fn fetch_pools(&self) -> Result<PoolSet, CurateError>;
    fn name(&self) -> &'static str;
}
