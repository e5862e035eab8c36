//! Error types and result aliases for the agent loop.
//!
//! This module defines the fatal error type [`AgentError`] and the [`Result`] type alias
//! used throughout the library. Conditions the loop recovers from on its own (malformed
//! directives, unknown actions, undecodable action input) live in
//! [`crate::react::DirectiveError`] and never surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Loop budget exceeded after {iterations} iterations without a final answer")]
    LoopBudgetExceeded { iterations: usize },

    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: usize,
        #[source]
        source: Box<AgentError>,
    },
}

impl AgentError {
    /// Whether a retry of the same request could plausibly succeed.
    ///
    /// Timeouts, connection failures, rate limiting and server-side errors are transient.
    /// Everything else (bad credentials, malformed payloads, loop-level conditions) is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::HttpError(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.as_u16() == 429 || s.is_server_error())
            }
            AgentError::ApiError { status, .. } => *status == 429 || *status >= 500,
            AgentError::TimeoutError(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
