// src/pools/producthunt.rs
//! Product Hunt GraphQL v2 pool adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, Utc};
use metrics::{counter, histogram};
use serde::Deserialize;

use crate::config::hunt::HuntConfig;
use crate::error::CurateError;
use crate::pools::types::{CandidateRecord, Period, PoolProvider, PoolSet, Topic};

pub const DEFAULT_ENDPOINT: &str = "https://api.producthunt.com/v2/api/graphql";

// ------------------------------------------------------------
// Wire format
// ------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PostsData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostsData {
    yesterday: Connection<PostNode>,
    last_week: Connection<PostNode>,
    last_month: Connection<PostNode>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostNode {
    id: String,
    name: String,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    description: Option<String>,
    votes_count: u32,
    comments_count: u32,
    created_at: DateTime<Utc>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
    #[serde(default)]
    topics: Option<Connection<Topic>>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl From<PostNode> for CandidateRecord {
    fn from(n: PostNode) -> Self {
        CandidateRecord {
            id: n.id,
            name: n.name,
            tagline: n.tagline.unwrap_or_default(),
            description: n.description.unwrap_or_default(),
            vote_count: n.votes_count,
            comment_count: n.comments_count,
            created_at: n.created_at,
            website: n.website.unwrap_or_default(),
            thumbnail: n.thumbnail.and_then(|t| t.url),
            topics: n
                .topics
                .map(|c| c.edges.into_iter().map(|e| e.node).collect())
                .unwrap_or_default(),
        }
    }
}

fn nodes(conn: Connection<PostNode>) -> Vec<CandidateRecord> {
    conn.edges.into_iter().map(|e| e.node.into()).collect()
}

// ------------------------------------------------------------
// Query
// ------------------------------------------------------------

fn alias(period: Period) -> &'static str {
    match period {
        Period::RecentDay => "yesterday",
        Period::PastWeek => "lastWeek",
        Period::PastMonth => "lastMonth",
    }
}

fn days_before(today: NaiveDate, days: i64) -> String {
    let d = u64::try_from(days)
        .ok()
        .and_then(|n| today.checked_sub_days(Days::new(n)))
        .unwrap_or(today);
    d.format("%Y-%m-%d").to_string()
}

const POST_FIELDS: &str = "edges { node { id name tagline description votesCount commentsCount createdAt website thumbnail { url } topics { edges { node { name } } } } }";

/// Build the three-window posts query relative to `today` (UTC date).
pub fn build_query(today: NaiveDate) -> String {
    let mut q = String::from("query {\n");
    for period in Period::ALL {
        let w = period.window();
        q.push_str(&format!(
            "  {}: posts(first: {}, postedAfter: \"{}\", postedBefore: \"{}\", order: VOTES) {{ {} }}\n",
            alias(period),
            w.limit,
            days_before(today, w.after_days),
            days_before(today, w.before_days),
            POST_FIELDS
        ));
    }
    q.push('}');
    q
}

/// Map a raw GraphQL response body onto the three pools.
pub fn parse_response(body: &str) -> Result<PoolSet, CurateError> {
    let t0 = std::time::Instant::now();
    let resp: GraphQlResponse = serde_json::from_str(body)
        .map_err(|e| CurateError::pool_unavailable(format!("malformed response: {e}")))?;

    // Any `errors` member fails the fetch, even an empty list.
    if let Some(errs) = resp.errors.as_ref() {
        let msg = errs
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("unspecified error");
        return Err(CurateError::pool_unavailable(format!("api error: {msg}")));
    }
    let data = resp
        .data
        .ok_or_else(|| CurateError::pool_unavailable("response has no data"))?;

    let pools = PoolSet {
        recent_day: nodes(data.yesterday),
        past_week: nodes(data.last_week),
        past_month: nodes(data.last_month),
    };

    histogram!("curator_pool_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    counter!("curator_candidates_total").increment(pools.total() as u64);
    Ok(pools)
}

// ------------------------------------------------------------
// Provider
// ------------------------------------------------------------

pub struct ProductHuntProvider {
    mode: Mode,
}

enum Mode {
    // Canned response body, used by tests and the demo binary.
    Fixture(String),
    Http {
        endpoint: String,
        token: Option<String>,
        client: reqwest::Client,
    },
}

impl ProductHuntProvider {
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_config(cfg: &HuntConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("hunt-curator/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        let token = Some(cfg.token.trim().to_string()).filter(|t| !t.is_empty());
        Ok(Self {
            mode: Mode::Http {
                endpoint: cfg.endpoint.clone(),
                token,
                client,
            },
        })
    }

    async fn fetch_http(
        endpoint: &str,
        token: Option<&str>,
        client: &reqwest::Client,
    ) -> Result<PoolSet, CurateError> {
        let Some(token) = token else {
            return Err(CurateError::pool_unavailable(
                "Product Hunt API token is not configured",
            ));
        };

        let today = Utc::now().date_naive();
        let body = serde_json::json!({ "query": build_query(today) });

        let resp = client
            .post(endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| CurateError::pool_unavailable(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CurateError::pool_unavailable(format!(
                "request failed with status {status}"
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| CurateError::pool_unavailable(format!("reading body: {e}")))?;
        parse_response(&text)
    }
}

#[async_trait]
impl PoolProvider for ProductHuntProvider {
    async fn fetch_pools(&self) -> Result<PoolSet, CurateError> {
        let res = match &self.mode {
            Mode::Fixture(s) => parse_response(s),
            Mode::Http {
                endpoint,
                token,
                client,
            } => Self::fetch_http(endpoint, token.as_deref(), client).await,
        };
        if let Err(e) = &res {
            tracing::warn!(error = %e, provider = self.name(), "pool fetch failed");
            counter!("curator_pool_errors_total").increment(1);
        }
        res
    }

    fn name(&self) -> &'static str {
        "producthunt"
    }
}
