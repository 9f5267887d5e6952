// src/select.rs
//! Selection engine: composes the featured list from the three vote-ordered pools.
//!
//! Output order is fixed: recent-day leader (if it clears the threshold), then the
//! past-week pool, then a slice of the past-month pool whose size depends on whether the
//! leader was included. Pools are trusted to be sorted already and are never re-sorted.

use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::pools::{CandidateRecord, Period, PoolSet};

/// Votes the recent-day leader needs to be featured.
pub const FEATURED_VOTE_THRESHOLD: u32 = 600;

const MONTH_QUOTA_WITH_LEADER: usize = 2;
const MONTH_QUOTA_WITHOUT_LEADER: usize = 3;

/// A candidate tagged with the period it came from and its rank inside that period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedItem {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub period: Period,
    pub rank: u32,
    pub category: String,
}

impl SelectedItem {
    fn new(candidate: &CandidateRecord, period: Period, rank: usize) -> Self {
        Self {
            category: candidate.category().to_string(),
            candidate: candidate.clone(),
            period,
            rank: u32::try_from(rank).unwrap_or(u32::MAX),
        }
    }
}

/// Whether the recent-day leader clears the threshold.
pub fn leader_qualifies(leader: Option<&CandidateRecord>) -> bool {
    leader.is_some_and(|c| c.vote_count >= FEATURED_VOTE_THRESHOLD)
}

/// How many past-month items are taken for a given recent-day leader.
pub fn month_quota(leader: Option<&CandidateRecord>) -> usize {
    if leader_qualifies(leader) {
        MONTH_QUOTA_WITH_LEADER
    } else {
        MONTH_QUOTA_WITHOUT_LEADER
    }
}

pub fn select(
    recent_day: &[CandidateRecord],
    past_week: &[CandidateRecord],
    past_month: &[CandidateRecord],
) -> Vec<SelectedItem> {
    let leader = recent_day.first();
    let quota = month_quota(leader);

    let mut out = Vec::with_capacity(1 + past_week.len() + quota);

    if let Some(l) = leader.filter(|l| leader_qualifies(Some(*l))) {
        out.push(SelectedItem::new(l, Period::RecentDay, 1));
    }

    out.extend(
        past_week
            .iter()
            .enumerate()
            .map(|(i, c)| SelectedItem::new(c, Period::PastWeek, i + 1)),
    );

    out.extend(
        past_month
            .iter()
            .take(quota)
            .enumerate()
            .map(|(i, c)| SelectedItem::new(c, Period::PastMonth, i + 1)),
    );

    for item in &out {
        counter!("curator_selected_total", "period" => item.period.as_str()).increment(1);
    }
    tracing::debug!(
        leader_votes = leader.map(|l| l.vote_count),
        month_quota = quota,
        selected = out.len(),
        "selection composed"
    );

    out
}

pub fn select_pools(pools: &PoolSet) -> Vec<SelectedItem> {
    select(&pools.recent_day, &pools.past_week, &pools.past_month)
}
