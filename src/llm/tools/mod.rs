pub mod calculator;
pub mod internet_search;
pub mod llm_knowledge;
pub mod registry;
pub mod search_formatter;
mod tool;

pub use calculator::{CalculatorTool, Number, Operation};
pub use internet_search::{InternetSearchTool, SearchGateway, TavilyGateway};
pub use llm_knowledge::LlmKnowledgeTool;
pub use registry::ToolRegistry;
pub use tool::{ActionInput, InputKind, LlmTool, ToolDescriptor};
