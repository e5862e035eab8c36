pub mod broker;
pub mod gateway;
pub mod gateways;
pub mod models;
pub mod retry;
pub mod tools;

pub use broker::LlmBroker;
pub use gateway::{CompletionConfig, LlmGateway};
pub use models::{LlmGatewayResponse, LlmMessage, MessageRole};
pub use retry::RetryPolicy;
pub use tools::{ActionInput, LlmTool, ToolDescriptor, ToolRegistry};
