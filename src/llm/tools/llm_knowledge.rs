use crate::error::{AgentError, Result};
use crate::llm::gateway::CompletionConfig;
use crate::llm::tools::{ActionInput, InputKind, LlmTool, ToolDescriptor};
use crate::llm::{LlmBroker, LlmMessage};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const SYSTEM_INSTRUCTION: &str = "Answer the question but do not **ever** perform any arithmetic.";
const TEMPERATURE: f32 = 0.5;

/// Tool that answers textual questions with the language model
///
/// The backend is told never to do arithmetic. This is a hint to the model; the returned
/// text is not checked.
pub struct LlmKnowledgeTool {
    broker: Arc<LlmBroker>,
}

impl LlmKnowledgeTool {
    pub fn new(broker: Arc<LlmBroker>) -> Self {
        Self { broker }
    }
}

#[async_trait]
impl LlmTool for LlmKnowledgeTool {
    async fn run(&self, input: &ActionInput) -> Result<String> {
        let prompt = match input {
            ActionInput::Text(prompt) => prompt,
            ActionInput::Operands(..) => {
                return Err(AgentError::ToolError(
                    "llm_knowledge requires a plain text prompt".to_string(),
                ))
            }
        };

        info!(model = self.broker.model(), "Invoking llm_knowledge");

        let messages = vec![LlmMessage::system(SYSTEM_INSTRUCTION), LlmMessage::user(prompt)];
        let config = CompletionConfig::default().with_temperature(TEMPERATURE);

        self.broker.generate(&messages, Some(config)).await
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "llm_knowledge",
            "Use only for generating or retrieving *textual* content (facts, explanations, \
             jokes, etc.). **Do NOT** perform any arithmetic (adding, subtracting, \
             multiplying, dividing).",
        )
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::gateway::LlmGateway;
    use crate::llm::models::{LlmGatewayResponse, MessageRole};
    use std::sync::Mutex;

    struct RecordingGateway {
        seen: Mutex<Vec<(Vec<LlmMessage>, CompletionConfig)>>,
    }

    #[async_trait]
    impl LlmGateway for RecordingGateway {
        async fn complete(
            &self,
            _model: &str,
            messages: &[LlmMessage],
            config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            self.seen.lock().unwrap().push((messages.to_vec(), config.clone()));
            Ok(LlmGatewayResponse {
                content: Some("Why did the robot go on vacation? To recharge.".to_string()),
                finish_reason: Some("stop".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_run_sends_no_arithmetic_instruction() {
        let gateway = Arc::new(RecordingGateway {
            seen: Mutex::new(Vec::new()),
        });
        let broker = Arc::new(LlmBroker::new("gpt-4o", gateway.clone()));
        let tool = LlmKnowledgeTool::new(broker);

        let output = tool.run(&ActionInput::Text("Tell me an AI joke".to_string())).await.unwrap();

        assert!(output.contains("recharge"));
        let seen = gateway.seen.lock().unwrap();
        let (messages, config) = &seen[0];
        assert_eq!(messages[0].role, MessageRole::System);
        assert!(messages[0].content.contains("do not **ever** perform any arithmetic"));
        assert_eq!(messages[1].content, "Tell me an AI joke");
        assert_eq!(config.temperature, 0.5);
        assert!(config.stop.is_empty());
    }

    #[tokio::test]
    async fn test_run_rejects_operands() {
        let gateway = Arc::new(RecordingGateway {
            seen: Mutex::new(Vec::new()),
        });
        let tool = LlmKnowledgeTool::new(Arc::new(LlmBroker::new("gpt-4o", gateway)));

        let input = ActionInput::Operands(
            crate::llm::tools::Number::Int(1),
            crate::llm::tools::Number::Int(2),
        );
        assert!(matches!(tool.run(&input).await, Err(AgentError::ToolError(_))));
    }
}
