use crate::error::Result;
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use async_trait::async_trait;

/// Stop sequence that keeps the model from inventing its own tool results.
pub const OBSERVATION_STOP: &str = "Observation:";

/// Configuration for LLM completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub temperature: f32,
    pub max_tokens: Option<usize>,
    pub stop: Vec<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: None,
            stop: Vec::new(),
        }
    }
}

impl CompletionConfig {
    /// Config used by the ReAct loop: low temperature, halted at `Observation:`.
    pub fn react(temperature: f32) -> Self {
        Self {
            temperature,
            max_tokens: None,
            stop: vec![OBSERVATION_STOP.to_string()],
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Abstract interface for LLM providers
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete an LLM request with text response
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse>;
}
