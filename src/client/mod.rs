//! Messages API client binding
//!
//! The checker only talks to the remote API through [`MessagesApi`], and
//! obtains a client through [`ClientProvider`], so tests can substitute both.

pub mod types;

#[cfg(test)]
mod integration_tests;

pub use types::{
    betas, ContainerParams, ContentBlock, Message, MessageRequest, SkillList, SkillReference,
    SkillSummary, ToolSpec, Usage,
};

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::Config,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Instant};
use types::ApiErrorEnvelope;

/// Anthropic SDK release whose API surface this binding mirrors.
///
/// 0.71.0 is the first release with the skills endpoints and `container` support.
pub const BINDING_SDK_VERSION: &str = "0.71.0";

/// Longest error body kept verbatim in an error message
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Operations the compatibility probes need from the remote API
#[async_trait]
pub trait MessagesApi: Send + Sync {
    /// `POST /v1/messages` on the stable path
    async fn create_message(&self, request: &MessageRequest) -> Result<Message>;

    /// `POST /v1/messages?beta=true` with the given `anthropic-beta` flags
    async fn create_beta_message(&self, request: &MessageRequest, betas: &[&str]) -> Result<Message>;

    /// `GET /v1/skills?beta=true&source=...`
    async fn list_skills(&self, source: &str) -> Result<SkillList>;
}

/// Supplies the client binding: its version, and clients built from an API key
pub trait ClientProvider: Send + Sync {
    type Client: MessagesApi;

    /// Version of the binding, or `None` when no binding is available
    fn sdk_version(&self) -> Option<String>;

    /// Build a client; this performs no network I/O
    fn connect(&self, api_key: &str) -> Result<Self::Client>;
}

/// reqwest-backed Messages API client
pub struct AnthropicClient {
    http: Client,
    base_url: Url,
    api_key: String,
    anthropic_version: String,
    logger: Arc<Logger>,
}

impl AnthropicClient {
    /// Create a new client for the given endpoint
    pub fn new(base_url: &str, api_key: &str, anthropic_version: &str, logger: Arc<Logger>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
            anthropic_version: anthropic_version.to_string(),
            logger,
        })
    }

    /// Join an API path onto the base URL, keeping any path prefix the base
    /// URL already has (e.g. `https://host/api/anthropic`).
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder, betas: &[&str]) -> RequestBuilder {
        let builder = builder
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.anthropic_version);

        if betas.is_empty() {
            builder
        } else {
            builder.header("anthropic-beta", betas.join(","))
        }
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, url: &Url, builder: RequestBuilder) -> Result<T> {
        let start = Instant::now();
        let result = builder.send().await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.logger.log_http_request(method, url.as_str(), None, elapsed_ms).await;
                return Err(e.into());
            }
        };

        let status = response.status();
        self.logger
            .log_http_request(method, url.as_str(), Some(status.as_u16()), elapsed_ms)
            .await;

        let body = response.text().await?;
        if !status.is_success() {
            return Err(decode_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::parse(format!("Unexpected response body from {}: {}", url.path(), e)))
    }

    async fn post_message(&self, request: &MessageRequest, query: &[(&str, &str)], betas: &[&str]) -> Result<Message> {
        let url = self.endpoint("/v1/messages", query)?;
        let builder = self.authorized(self.http.post(url.clone()), betas).json(request);
        self.send("POST", &url, builder).await
    }
}

#[async_trait]
impl MessagesApi for AnthropicClient {
    async fn create_message(&self, request: &MessageRequest) -> Result<Message> {
        self.post_message(request, &[], &[]).await
    }

    async fn create_beta_message(&self, request: &MessageRequest, betas: &[&str]) -> Result<Message> {
        self.post_message(request, &[("beta", "true")], betas).await
    }

    async fn list_skills(&self, source: &str) -> Result<SkillList> {
        let url = self.endpoint("/v1/skills", &[("beta", "true"), ("source", source)])?;
        let builder = self.authorized(self.http.get(url.clone()), &[betas::SKILLS]);
        self.send("GET", &url, builder).await
    }
}

/// Turn a non-success response into a typed error
fn decode_error(status: u16, body: &str) -> AppError {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        return AppError::api(status, envelope.error.kind, envelope.error.message);
    }

    let trimmed = body.trim();
    let message = if trimmed.is_empty() {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("empty response body")
            .to_string()
    } else if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    };

    AppError::api(status, "http_error", message)
}

/// Provider backed by [`AnthropicClient`]
pub struct HttpClientProvider {
    base_url: String,
    anthropic_version: String,
    logger: Arc<Logger>,
}

impl HttpClientProvider {
    pub fn new(config: &Config, logger: Arc<Logger>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            anthropic_version: config.anthropic_version.clone(),
            logger,
        }
    }
}

impl ClientProvider for HttpClientProvider {
    type Client = AnthropicClient;

    fn sdk_version(&self) -> Option<String> {
        Some(BINDING_SDK_VERSION.to_string())
    }

    fn connect(&self, api_key: &str) -> Result<AnthropicClient> {
        AnthropicClient::new(&self.base_url, api_key, &self.anthropic_version, self.logger.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> AnthropicClient {
        AnthropicClient::new(base_url, "sk-test", "2023-06-01", Arc::new(Logger::disabled())).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("https://open.bigmodel.cn/api/anthropic");
        let url = client.endpoint("/v1/messages", &[("beta", "true")]).unwrap();
        assert_eq!(url.as_str(), "https://open.bigmodel.cn/api/anthropic/v1/messages?beta=true");
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = client("https://api.anthropic.com/");
        let url = client.endpoint("/v1/skills", &[("beta", "true"), ("source", "anthropic")]).unwrap();
        assert_eq!(url.as_str(), "https://api.anthropic.com/v1/skills?beta=true&source=anthropic");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = AnthropicClient::new("not a url", "k", "2023-06-01", Arc::new(Logger::disabled()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_decode_error_envelope() {
        let error = decode_error(
            404,
            r#"{"type":"error","error":{"type":"not_found_error","message":"Not Found"}}"#,
        );
        assert!(error.is_missing_endpoint());
        assert_eq!(error.to_string(), "API error (HTTP 404, not_found_error): Not Found");
    }

    #[test]
    fn test_decode_error_plain_body() {
        let error = decode_error(502, "<html>Bad Gateway</html>");
        assert!(matches!(error, AppError::Api { status: 502, ref kind, .. } if kind == "http_error"));

        let empty = decode_error(404, "");
        assert!(empty.to_string().contains("Not Found"));

        let long = decode_error(500, &"x".repeat(1000));
        assert!(long.to_string().ends_with("..."));
    }

    #[test]
    fn test_provider_reports_binding_version() {
        let provider = HttpClientProvider::new(&Config::default(), Arc::new(Logger::disabled()));
        assert_eq!(provider.sdk_version().as_deref(), Some(BINDING_SDK_VERSION));
        assert!(provider.connect("sk-test").is_ok());
    }
}
