// src/analyze/requester.rs
//! Narrative requester: provider abstraction over the text-generation collaborator.
//!
//! One call per item, no retries. Failures are returned to the caller, which decides how
//! to degrade (see `crate::enrich`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ai::AiConfig;
use crate::error::RequestError;
use crate::select::SelectedItem;

#[async_trait]
pub trait NarrativeRequester: Send + Sync {
    /// Return free-form analysis text for one selected item.
    async fn request(&self, item: &SelectedItem) -> Result<String, RequestError>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynRequester = Arc<dyn NarrativeRequester>;

/// Item descriptor handed to the provider: the selected item as pretty JSON.
pub fn describe(item: &SelectedItem) -> Result<String, RequestError> {
    Ok(serde_json::to_string_pretty(item)?)
}

/// Factory: build a requester according to config and environment variables.
///
/// * If `AI_TEST_MODE=mock`, returns a mock requester with a canned narrative.
/// * Else if `config.enabled==false`, returns a disabled requester.
/// * Else builds the configured provider; an unknown provider name is an error.
pub fn build_requester_from_config(config: &AiConfig) -> anyhow::Result<DynRequester> {
    if std::env::var("AI_TEST_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Ok(Arc::new(MockRequester::new(MOCK_NARRATIVE)));
    }

    if !config.enabled {
        return Ok(Arc::new(DisabledRequester));
    }

    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiRequester::new(config)?)),
        other => anyhow::bail!("Unsupported provider in config: {other}"),
    }
}

// ------------------------------------------------------------
// OpenAI
// ------------------------------------------------------------

const SYSTEM_PROMPT_HEAD: &str = "\
당신은 Product Hunt 전문 분석가입니다.

**역할:**
- 스타트업과 제품 런칭에 10년 경험을 가진 전문가
- AI VC 투자자
- AI 기술과 스타트업 생태계에 대한 깊은 이해

**분석 관점:**
1. 제품 성공 요인 (마케팅, 기술, UX, 시장 타이밍)
2. AI 기술 활용도와 구현 방식
3. 스타트업 성장 전략과 시사점
4. 시장 트렌드와 기회 분석

다음 제품 정보를 분석해주세요:
";

const USER_PROMPT: &str = "이 제품에 대한 상세 분석을 제공해주세요.";

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI Chat Completions provider.
pub struct OpenAiRequester {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    url: String,
}

impl OpenAiRequester {
    pub fn new(config: &AiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("hunt-curator/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.key().map(str::to_string),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            url: OPENAI_CHAT_URL.to_string(),
        })
    }

    /// Point the requester at a compatible endpoint (proxies, local gateways).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}
#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}
#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}
#[derive(Deserialize)]
struct ChoiceMsg {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl NarrativeRequester for OpenAiRequester {
    async fn request(&self, item: &SelectedItem) -> Result<String, RequestError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RequestError::MissingApiKey("openai"));
        };

        let system = format!("{SYSTEM_PROMPT_HEAD}{}", describe(item)?);
        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: &system,
                },
                Msg {
                    role: "user",
                    content: USER_PROMPT,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }
        let body: Resp = resp.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or(RequestError::EmptyResponse)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// ------------------------------------------------------------
// Disabled / mock
// ------------------------------------------------------------

/// Always fails; every item falls back to the default analysis.
pub struct DisabledRequester;

#[async_trait]
impl NarrativeRequester for DisabledRequester {
    async fn request(&self, _item: &SelectedItem) -> Result<String, RequestError> {
        Err(RequestError::Disabled)
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

pub const MOCK_NARRATIVE: &str = "\
## 핵심 인사이트
- 런칭 당일 커뮤니티 참여를 극대화한 메이커 코멘트
- 명확한 한 줄 가치 제안

## AI 기술 활용
- GPT 기반 AI 요약 기능
- 사내 머신러닝 추천 모델
- React 기반 웹 앱
";

/// Returns the same narrative for every item.
#[derive(Clone)]
pub struct MockRequester {
    pub fixed: String,
}

impl MockRequester {
    pub fn new(fixed: impl Into<String>) -> Self {
        Self {
            fixed: fixed.into(),
        }
    }
}

#[async_trait]
impl NarrativeRequester for MockRequester {
    async fn request(&self, _item: &SelectedItem) -> Result<String, RequestError> {
        Ok(self.fixed.clone())
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
