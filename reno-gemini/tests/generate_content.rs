use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reno_core::analysis::{self, AnalysisGateway, AnalysisInput, FALLBACK_ANALYSIS, GatewayError};
use reno_core::models::{Estimate, default_categories, default_property};
use reno_gemini::{GeminiConfig, GeminiGateway};

const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn gateway_for(server: &MockServer) -> GeminiGateway {
    let config = GeminiConfig::default()
        .with_api_key("test-key")
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_timeout(Duration::from_secs(5));
    GeminiGateway::new(config).expect("client builds")
}

fn seeded_input() -> AnalysisInput {
    let mut property = default_property();
    property.address = "12 Birch Way".to_string();
    AnalysisInput::new(&property, &Estimate::new(default_categories()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn posts_prompt_with_key_and_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("\"thinkingBudget\":0"))
        .and(body_string_contains("12 Birch Way"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "1. Feasible. " }, { "text": "2. Watch the roof." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = analysis::analyze(&gateway_for(&server), &seeded_input()).await;

    assert_eq!(text, "1. Feasible. 2. Watch the roof.");
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn error_status_is_reported_and_becomes_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server);

    assert_eq!(gateway.generate("prompt").await, Err(GatewayError::Status(503)));
    assert_eq!(
        analysis::analyze(&gateway, &seeded_input()).await,
        FALLBACK_ANALYSIS
    );
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = gateway_for(&server).generate("prompt").await;

    assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_key_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let config = GeminiConfig::default().with_base_url(server.uri());
    let gateway = GeminiGateway::new(config).unwrap();

    let result = gateway.generate("prompt").await;

    assert!(matches!(result, Err(GatewayError::NotConfigured(_))));
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_candidate_list_reads_as_no_analysis() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let text = analysis::analyze(&gateway_for(&server), &seeded_input()).await;

    assert_eq!(text, analysis::EMPTY_ANALYSIS);
}
