//! Name-to-handler dispatch table for the ReAct loop.
//!
//! The registry is fixed once built. Its names are the whitelist the loop validates
//! `Action:` lines against and the list quoted back to the model when it strays.

use crate::error::{AgentError, Result};
use crate::llm::tools::calculator::CalculatorTool;
use crate::llm::tools::internet_search::{InternetSearchTool, SearchGateway};
use crate::llm::tools::llm_knowledge::LlmKnowledgeTool;
use crate::llm::tools::{LlmTool, ToolDescriptor};
use crate::llm::LlmBroker;
use std::collections::HashMap;
use std::sync::Arc;

pub struct ToolRegistry {
    order: Vec<String>,
    tools: HashMap<String, Arc<dyn LlmTool>>,
}

impl ToolRegistry {
    /// Build a registry, rejecting empty or duplicate tool names.
    pub fn new(tools: Vec<Arc<dyn LlmTool>>) -> Result<Self> {
        let mut order = Vec::with_capacity(tools.len());
        let mut by_name = HashMap::with_capacity(tools.len());

        for tool in tools {
            let name = tool.descriptor().name;
            if name.trim().is_empty() {
                return Err(AgentError::ConfigError("tool name must not be empty".to_string()));
            }
            if by_name.contains_key(&name) {
                return Err(AgentError::ConfigError(format!("duplicate tool name: {}", name)));
            }
            order.push(name.clone());
            by_name.insert(name, tool);
        }

        Ok(Self {
            order,
            tools: by_name,
        })
    }

    /// The standard six tools: four calculators, `llm_knowledge` and `internet_search`.
    pub fn standard(broker: Arc<LlmBroker>, search: Arc<dyn SearchGateway>) -> Result<Self> {
        let mut tools: Vec<Arc<dyn LlmTool>> = CalculatorTool::all()
            .into_iter()
            .map(|tool| Arc::new(tool) as Arc<dyn LlmTool>)
            .collect();
        tools.push(Arc::new(LlmKnowledgeTool::new(broker)));
        tools.push(Arc::new(InternetSearchTool::new(search)));

        Self::new(tools)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn LlmTool>> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.order.iter().filter_map(|name| self.tools.get(name)).map(|t| t.descriptor()).collect()
    }

    /// The whitelist rendered as a bracketed list, e.g. `['calculator_add', 'llm_knowledge']`.
    pub fn names_list(&self) -> String {
        let quoted: Vec<String> = self.order.iter().map(|n| format!("'{}'", n)).collect();
        format!("[{}]", quoted.join(", "))
    }

    /// One `- name: description` line per tool, for the system prompt.
    pub fn describe(&self) -> String {
        self.descriptors()
            .iter()
            .map(|d| format!("- {}: {}", d.name, d.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::gateway::{CompletionConfig, LlmGateway};
    use crate::llm::models::{LlmGatewayResponse, LlmMessage};
    use crate::llm::tools::calculator::Operation;
    use crate::llm::tools::internet_search::SearchRequest;
    use crate::llm::tools::search_formatter::SearchResult;
    use async_trait::async_trait;

    struct NullGateway;

    #[async_trait]
    impl LlmGateway for NullGateway {
        async fn complete(
            &self,
            _model: &str,
            _messages: &[LlmMessage],
            _config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            Ok(LlmGatewayResponse::default())
        }
    }

    struct NullSearch;

    #[async_trait]
    impl SearchGateway for NullSearch {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<SearchResult>> {
            Ok(vec![])
        }
    }

    fn standard() -> ToolRegistry {
        let broker = Arc::new(LlmBroker::new("gpt-4o", Arc::new(NullGateway)));
        ToolRegistry::standard(broker, Arc::new(NullSearch)).unwrap()
    }

    #[test]
    fn test_standard_registry_names_in_order() {
        let registry = standard();

        assert_eq!(
            registry.names(),
            &[
                "calculator_add",
                "calculator_subtract",
                "calculator_multiply",
                "calculator_divide",
                "llm_knowledge",
                "internet_search"
            ]
        );
        assert_eq!(registry.len(), 6);
        assert!(registry.contains("llm_knowledge"));
        assert!(!registry.contains("calculator_power"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let tools: Vec<Arc<dyn LlmTool>> = vec![
            Arc::new(CalculatorTool::new(Operation::Add)),
            Arc::new(CalculatorTool::new(Operation::Add)),
        ];

        match ToolRegistry::new(tools) {
            Err(AgentError::ConfigError(message)) => assert!(message.contains("calculator_add")),
            other => panic!("Expected ConfigError, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_names_list_and_describe() {
        let registry =
            ToolRegistry::new(vec![Arc::new(CalculatorTool::new(Operation::Add)) as Arc<dyn LlmTool>])
                .unwrap();

        assert_eq!(registry.names_list(), "['calculator_add']");
        assert!(registry.describe().starts_with("- calculator_add: Add two numbers"));
    }

    #[test]
    fn test_get_returns_matching_tool() {
        let registry = standard();
        let tool = registry.get("calculator_divide").unwrap();
        assert!(tool.matches("calculator_divide"));
        assert!(registry.get("unknown").is_none());
    }
}
