use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::LlmMessage;
use crate::llm::retry::{with_retry, RetryPolicy};
use std::sync::Arc;
use tracing::{debug, info};

/// Main interface for LLM interactions
///
/// The broker pairs a model name with an explicitly constructed gateway handle and
/// applies the retry policy to every completion request.
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
    retry: RetryPolicy,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy used for completion calls
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text response from LLM
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        config: Option<CompletionConfig>,
    ) -> Result<String> {
        let config = config.unwrap_or_default();

        debug!(
            model = self.model.as_str(),
            message_count = messages.len(),
            temperature = config.temperature,
            "Requesting completion"
        );

        let response = with_retry(&self.retry, "completion", || {
            self.gateway.complete(&self.model, messages, &config)
        })
        .await?;

        if let Some(reason) = response.finish_reason.as_deref() {
            info!(model = self.model.as_str(), finish_reason = reason, "Completion received");
        }

        Ok(response.content.unwrap_or_default())
    }
}
