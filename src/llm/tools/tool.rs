use crate::error::Result;
use crate::llm::tools::calculator::Number;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Descriptor for a tool: its unique name and the text shown to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// How a tool expects its `Action Input:` to be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A literal pair of numbers, e.g. `(8, 42)`
    Operands,
    /// The raw text, used verbatim as a prompt or query
    Text,
}

/// A decoded `Action Input:` value
#[derive(Debug, Clone, PartialEq)]
pub enum ActionInput {
    Operands(Number, Number),
    Text(String),
}

/// Trait for tools the ReAct loop can dispatch to
///
/// `run` returns the observation text that is fed back to the model. Conditions the
/// model should see and recover from (such as dividing by zero) belong in that text;
/// an `Err` is reserved for failures that should stop the run.
#[async_trait]
pub trait LlmTool: Send + Sync {
    /// Execute the tool with decoded input
    async fn run(&self, input: &ActionInput) -> Result<String>;

    /// Get tool descriptor for the system prompt
    fn descriptor(&self) -> ToolDescriptor;

    /// How this tool's input must be decoded
    fn input_kind(&self) -> InputKind;

    /// Check if this tool matches the given name
    fn matches(&self, name: &str) -> bool {
        self.descriptor().name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl LlmTool for EchoTool {
        async fn run(&self, input: &ActionInput) -> Result<String> {
            Ok(format!("{:?}", input))
        }

        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor::new("echo", "Echo the input back")
        }

        fn input_kind(&self) -> InputKind {
            InputKind::Text
        }
    }

    #[test]
    fn test_tool_descriptor_serialization() {
        let descriptor = ToolDescriptor::new("calculator_add", "Add two numbers");

        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(json, r#"{"name":"calculator_add","description":"Add two numbers"}"#);
    }

    #[test]
    fn test_tool_matches() {
        let tool = EchoTool;
        assert!(tool.matches("echo"));
        assert!(!tool.matches("Echo"));
        assert!(!tool.matches("other_tool"));
    }

    #[tokio::test]
    async fn test_tool_run() {
        let tool = EchoTool;
        let result = tool.run(&ActionInput::Text("hi".to_string())).await.unwrap();
        assert_eq!(result, "Text(\"hi\")");
    }
}
