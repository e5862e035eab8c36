//! OpenAI Gateway for LLM interactions.
//!
//! This module provides a gateway for OpenAI's chat completions API. Only the plain
//! text request/response shape is used: model, temperature, messages and stop sequences
//! go out, assistant text comes back.

use crate::error::{AgentError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for connecting to OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Gateway for OpenAI LLM service.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new OpenAI gateway with configuration read from the environment.
    pub fn new() -> Result<Self> {
        Self::with_config(OpenAIConfig::default())
    }

    /// Create a new OpenAI gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AgentError::ConfigError("OPENAI_API_KEY is not set".to_string()));
        }

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    fn request_body(&self, model: &str, messages: &[LlmMessage], config: &CompletionConfig) -> Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": config.temperature,
        });

        if !config.stop.is_empty() {
            body["stop"] = serde_json::json!(config.stop);
        }

        if let Some(max_tokens) = config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to OpenAI for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = self.request_body(model, messages, config);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::ApiError {
                status: status.as_u16(),
                message: format!("OpenAI API error: {}", error_text),
            });
        }

        let response_body: Value = response.json().await?;

        let choice = response_body["choices"]
            .get(0)
            .ok_or_else(|| AgentError::GatewayError("No choices in response".to_string()))?;

        Ok(LlmGatewayResponse {
            content: choice["message"]["content"].as_str().map(String::from),
            finish_reason: choice["finish_reason"].as_str().map(String::from),
        })
    }
}
