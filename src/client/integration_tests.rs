//! HTTP client integration tests against a mock Messages API server

use super::*;
use crate::logging::Logger;
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{body_partial_json, header, header_exists, headers, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Anthropic endpoint for controlled testing scenarios
pub struct MockAnthropicServer {
    server: MockServer,
}

impl MockAnthropicServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> AnthropicClient {
        AnthropicClient::new(&self.url(), "sk-ant-test", "2023-06-01", Arc::new(Logger::disabled())).unwrap()
    }

    pub async fn mock_text_message(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-5-sonnet-20241022",
                "content": [{"type": "text", "text": text}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 12, "output_tokens": 4}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_error(&self, request_method: &str, request_path: &str, status: u16, kind: &str, message: &str) {
        Mock::given(method(request_method))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "type": "error",
                "error": {"type": kind, "message": message}
            })))
            .mount(&self.server)
            .await;
    }
}

#[tokio::test]
async fn test_create_message_sends_auth_headers() {
    let mock = MockAnthropicServer::new().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 50,
            "messages": [{"role": "user", "content": "Say 'API connected'"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "API connected"}]
        })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let request = MessageRequest::new("claude-3-5-sonnet-20241022", 50, "Say 'API connected'");
    let message = mock.client().create_message(&request).await.unwrap();

    assert_eq!(message.first_text(), Some("API connected"));
}

#[tokio::test]
async fn test_stable_message_has_no_beta_header_or_query() {
    let mock = MockAnthropicServer::new().await;
    mock.mock_text_message("ok").await;

    let request = MessageRequest::new("m", 10, "hi");
    mock.client().create_message(&request).await.unwrap();

    let received = mock.server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].url.query().is_none());
    assert!(!received[0].headers.contains_key("anthropic-beta"));
}

#[tokio::test]
async fn test_beta_message_uses_beta_query_and_header() {
    let mock = MockAnthropicServer::new().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(query_param("beta", "true"))
        .and(headers("anthropic-beta", vec!["code-execution-2025-08-25", "skills-2025-10-02"]))
        .and(body_partial_json(json!({"container": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Beta API works"}]
        })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let request = MessageRequest::new("m", 50, "Say 'Beta API works'").with_container(ContainerParams::empty());
    let message = mock
        .client()
        .create_beta_message(&request, &[betas::CODE_EXECUTION, betas::SKILLS])
        .await
        .unwrap();

    assert_eq!(message.first_text(), Some("Beta API works"));
}

#[tokio::test]
async fn test_list_skills() {
    let mock = MockAnthropicServer::new().await;

    Mock::given(method("GET"))
        .and(path("/v1/skills"))
        .and(query_param("source", "anthropic"))
        .and(header("anthropic-beta", "skills-2025-10-02"))
        .and(header_exists("x-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "xlsx", "display_title": "Excel"},
                {"id": "pptx", "display_title": "PowerPoint"}
            ],
            "has_more": false
        })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let skills = mock.client().list_skills("anthropic").await.unwrap();
    assert_eq!(skills.data.len(), 2);
    assert_eq!(skills.data[0].id, "xlsx");
}

#[tokio::test]
async fn test_missing_route_is_classified() {
    let mock = MockAnthropicServer::new().await;
    mock.mock_error("GET", "/v1/skills", 404, "not_found_error", "Not Found").await;

    let error = mock.client().list_skills("anthropic").await.unwrap_err();
    assert!(error.is_missing_endpoint());
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_rejected_parameter_is_classified() {
    let mock = MockAnthropicServer::new().await;
    mock.mock_error("POST", "/v1/messages", 400, "invalid_request_error", "container: Extra inputs are not permitted")
        .await;

    let request = MessageRequest::new("m", 50, "hi").with_container(ContainerParams::empty());
    let error = mock.client().create_beta_message(&request, &[]).await.unwrap_err();

    assert!(error.mentions_parameter("container"));
    assert!(!error.is_missing_endpoint());
}

#[tokio::test]
async fn test_unmatched_route_is_missing_endpoint() {
    // wiremock answers 404 with an empty body when nothing matches
    let mock = MockAnthropicServer::new().await;

    let error = mock.client().list_skills("anthropic").await.unwrap_err();
    assert!(error.is_missing_endpoint());
}

#[tokio::test]
async fn test_non_json_success_body_is_parse_error() {
    let mock = MockAnthropicServer::new().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock.server)
        .await;

    let error = mock.client().create_message(&MessageRequest::new("m", 1, "hi")).await.unwrap_err();
    assert!(matches!(error, AppError::Parse(_)));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock = MockAnthropicServer::new().await;

    Mock::given(method("POST"))
        .and(path("/api/anthropic/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "prefixed"}]
        })))
        .mount(&mock.server)
        .await;

    let base = format!("{}/api/anthropic", mock.url());
    let client = AnthropicClient::new(&base, "k", "2023-06-01", Arc::new(Logger::disabled())).unwrap();
    let message = client.create_message(&MessageRequest::new("m", 1, "hi")).await.unwrap();
    assert_eq!(message.first_text(), Some("prefixed"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop a listener so the port is closed
    let url = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = AnthropicClient::new(&url, "k", "2023-06-01", Arc::new(Logger::disabled())).unwrap();
    let error = client.create_message(&MessageRequest::new("m", 1, "hi")).await.unwrap_err();
    assert!(matches!(error, AppError::Network(_) | AppError::HttpRequest(_)));
}
