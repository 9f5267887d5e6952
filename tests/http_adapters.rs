// tests/http_adapters.rs
//
// Both HTTP adapters against a local wiremock server: request shape, auth, and the
// status/body cases that map onto RequestError / PoolUnavailable.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use hunt_curator::analyze::{NarrativeRequester, OpenAiRequester};
use hunt_curator::config::{AiConfig, HuntConfig};
use hunt_curator::pools::producthunt::ProductHuntProvider;
use hunt_curator::pools::{CandidateRecord, Period, PoolProvider};
use hunt_curator::{AnalysisSource, CurateError, RequestError, SelectedItem};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAT_PATH: &str = "/v1/chat/completions";
const GRAPHQL_PATH: &str = "/v2/api/graphql";

fn sample() -> SelectedItem {
    SelectedItem {
        candidate: CandidateRecord {
            id: "401001".into(),
            name: "Lumen Notes".into(),
            tagline: "AI meeting notes".into(),
            description: String::new(),
            vote_count: 742,
            comment_count: 118,
            created_at: Utc.with_ymd_and_hms(2024, 3, 30, 7, 1, 0).unwrap(),
            website: "https://lumen.test".into(),
            thumbnail: None,
            topics: vec![],
        },
        period: Period::RecentDay,
        rank: 1,
        category: "General".into(),
    }
}

fn openai(server: &MockServer) -> OpenAiRequester {
    let cfg = AiConfig {
        enabled: true,
        api_key: "sk-test".into(),
        ..Default::default()
    };
    OpenAiRequester::new(&cfg)
        .unwrap()
        .with_url(format!("{}{CHAT_PATH}", server.uri()))
}

fn hunt(server: &MockServer) -> ProductHuntProvider {
    let cfg = HuntConfig {
        endpoint: format!("{}{GRAPHQL_PATH}", server.uri()),
        token: "ph-token".into(),
        timeout_secs: 5,
    };
    ProductHuntProvider::from_config(&cfg).unwrap()
}

fn chat_reply(content: Value) -> Value {
    json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
}

// ------------------------------------------------------------
// OpenAI requester
// ------------------------------------------------------------

#[tokio::test]
async fn openai_sends_bearer_and_chat_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4", "max_tokens": 1000 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_reply(json!("성공 요인\n- 빠른 출시"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = openai(&server).request(&sample()).await.unwrap();
    assert_eq!(text, "성공 요인\n- 빠른 출시");

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let temp = body["temperature"].as_f64().unwrap();
    assert!((temp - 0.7).abs() < 1e-6, "temperature={temp}");

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("\"name\": \"Lumen Notes\""));
    assert_eq!(messages[1]["role"], "user");
}

#[tokio::test]
async fn openai_non_2xx_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = openai(&server).request(&sample()).await.unwrap_err();
    assert!(matches!(err, RequestError::Status(429)), "{err:?}");
}

#[tokio::test]
async fn openai_empty_choices_or_blank_content_is_empty_response() {
    for reply in [
        json!({ "choices": [] }),
        chat_reply(json!("   \n ")),
        chat_reply(Value::Null),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply.clone()))
            .mount(&server)
            .await;

        let err = openai(&server).request(&sample()).await.unwrap_err();
        assert!(
            matches!(err, RequestError::EmptyResponse),
            "reply={reply} err={err:?}"
        );
    }
}

#[tokio::test]
async fn openai_non_json_body_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = openai(&server).request(&sample()).await.unwrap_err();
    assert!(matches!(err, RequestError::Http(_)), "{err:?}");
}

// ------------------------------------------------------------
// Product Hunt provider
// ------------------------------------------------------------

#[tokio::test]
async fn producthunt_posts_query_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer ph-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/producthunt_response.json"))
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let pools = hunt(&server).fetch_pools().await.unwrap();
    assert_eq!(pools.recent_day.len(), 1);
    assert_eq!(pools.past_week.len(), 2);
    assert_eq!(pools.past_month.len(), 3);

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let query = body["query"].as_str().unwrap();
    assert!(query.contains("yesterday: posts(first: 1"));
    assert!(query.contains("lastWeek: posts(first: 2"));
    assert!(query.contains("lastMonth: posts(first: 3"));
    assert!(query.contains("order: VOTES"));
}

#[tokio::test]
async fn producthunt_non_2xx_is_pool_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = hunt(&server).fetch_pools().await.unwrap_err();
    assert!(matches!(err, CurateError::PoolUnavailable(_)));
    assert!(err.to_string().contains("401"), "{err}");
}

#[tokio::test]
async fn producthunt_graphql_errors_are_pool_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [ { "message": "complexity limit exceeded" } ]
        })))
        .mount(&server)
        .await;

    let err = hunt(&server).fetch_pools().await.unwrap_err();
    assert!(err.to_string().contains("complexity limit exceeded"), "{err}");
}

// ------------------------------------------------------------
// End to end: real adapters, failing narrative provider
// ------------------------------------------------------------

#[tokio::test]
async fn failing_openai_degrades_every_item_but_keeps_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/producthunt_response.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let out = hunt_curator::curate(&hunt(&server), Arc::new(openai(&server)))
        .await
        .unwrap();
    assert_eq!(out.len(), 5);
    assert!(out
        .iter()
        .all(|e| e.source == AnalysisSource::Fallback && e.analysis.is_default()));
    let ids: Vec<&str> = out.iter().map(|e| e.item.candidate.id.as_str()).collect();
    assert_eq!(ids, ["401001", "400512", "400498", "398870", "398601"]);
}
