pub mod config;
pub mod error;
pub mod llm;
pub mod react;

pub use error::{AgentError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::error::{AgentError, Result};
    pub use crate::llm::gateways::OpenAIGateway;
    pub use crate::llm::tools::{LlmTool, TavilyGateway, ToolDescriptor, ToolRegistry};
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
    pub use crate::react::{AgentConfig, ReactAgent, ReactOutcome};
}
