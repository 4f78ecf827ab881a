//! Claude API client for the Anthropic Messages API

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AnalysisError;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Claude Messages API
#[derive(Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Individual content block within a response
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Request body for the Messages API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message>,
}

/// Response from the Messages API
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Error detail from the Messages API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ClaudeClient {
    /// Create a new client with the given API key and default settings
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Build a client from configuration; fails if no API key is set
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let api_key = config
            .anthropic_api_key
            .clone()
            .ok_or(AnalysisError::NotConfigured)?;

        Ok(Self::new(api_key)
            .with_api_url(&config.api_url)
            .with_model(&config.model)
            .with_max_tokens(config.max_tokens))
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single user message with an optional system prompt, return text response
    pub async fn message(
        &self,
        system: Option<&str>,
        user_message: &str,
    ) -> Result<String, AnalysisError> {
        let messages = vec![Message {
            role: "user".to_string(),
            content: user_message.to_string(),
        }];

        let response = self.send(system, messages).await?;

        if response.stop_reason.as_deref() == Some("max_tokens") {
            tracing::warn!(
                response_id = %response.id,
                max_tokens = self.max_tokens,
                "Model response truncated at token limit"
            );
        }

        extract_text(&response)
    }

    async fn send(
        &self,
        system: Option<&str>,
        messages: Vec<Message>,
    ) -> Result<ApiResponse, AnalysisError> {
        let request = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => body,
            };
            return Err(AnalysisError::Api { status, message });
        }

        Ok(response.json::<ApiResponse>().await?)
    }
}

/// Extract the first text block from an API response
pub fn extract_text(response: &ApiResponse) -> Result<String, AnalysisError> {
    response
        .content
        .iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.clone()),
            ContentBlock::Other => None,
        })
        .ok_or(AnalysisError::EmptyResponse)
}
