use crate::error::{AgentError, Result};
use crate::llm::retry::{with_retry, RetryPolicy};
use crate::llm::tools::search_formatter::{format_results, FormatOptions, SearchResult};
use crate::llm::tools::{ActionInput, InputKind, LlmTool, ToolDescriptor};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const TIMEOUT_SECONDS: u64 = 30;

/// A search request as sent to the search backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub search_depth: String,
    pub include_images: bool,
    pub include_image_descriptions: bool,
    pub include_answer: bool,
    pub include_raw_content: bool,
}

impl SearchRequest {
    /// A basic-depth request for `max_results` hits, with images, raw content and
    /// answer synthesis all disabled.
    pub fn basic(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
            search_depth: "basic".to_string(),
            include_images: false,
            include_image_descriptions: false,
            include_answer: false,
            include_raw_content: false,
        }
    }
}

/// Abstract interface for search providers
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}

/// Configuration for connecting to the Tavily search API.
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TAVILY_API_KEY").unwrap_or_default(),
            base_url: std::env::var("TAVILY_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.tavily.com".to_string()),
            timeout: Duration::from_secs(TIMEOUT_SECONDS),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Gateway for the Tavily search service.
pub struct TavilyGateway {
    client: Client,
    config: TavilyConfig,
}

impl TavilyGateway {
    /// Create a new gateway with configuration read from the environment.
    pub fn new() -> Result<Self> {
        Self::with_config(TavilyConfig::default())
    }

    pub fn with_config(config: TavilyConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AgentError::ConfigError("TAVILY_API_KEY is not set".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SearchGateway for TavilyGateway {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        debug!(query = request.query.as_str(), max_results = request.max_results, "Searching");

        let response = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::ApiError {
                status: status.as_u16(),
                message: format!("Tavily API error: {}", error_text),
            });
        }

        let body: TavilyResponse = response.json().await?;
        Ok(body.results)
    }
}

/// Tool for searching the internet and returning a formatted text block
pub struct InternetSearchTool {
    gateway: Arc<dyn SearchGateway>,
    retry: RetryPolicy,
    options: FormatOptions,
}

impl InternetSearchTool {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self {
            gateway,
            retry: RetryPolicy::default(),
            options: FormatOptions::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_format_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl LlmTool for InternetSearchTool {
    async fn run(&self, input: &ActionInput) -> Result<String> {
        let query = match input {
            ActionInput::Text(query) => query.as_str(),
            ActionInput::Operands(..) => {
                return Err(AgentError::ToolError(
                    "internet_search requires a plain string query".to_string(),
                ))
            }
        };

        info!(query = query, "Invoking internet_search");

        let request = SearchRequest::basic(query, self.options.max_items);
        let results =
            with_retry(&self.retry, "search", || self.gateway.search(&request)).await?;

        Ok(format_results(&results, &self.options))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "internet_search",
            "Search the internet for up-to-date, factual information. \
             Always provide a plain string query as the Action Input (not a tuple). \
             Use this tool whenever the answer requires current events, recent facts, \
             or information beyond the model's built-in knowledge.",
        )
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Text
    }
}
