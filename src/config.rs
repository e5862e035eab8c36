//! Environment-driven settings for running the agent.
//!
//! Backend credentials are read by each gateway's own config (`OpenAIConfig`,
//! `TavilyConfig`). This module covers the loop itself.

use crate::error::{AgentError, Result};
use crate::react::AgentConfig;
use std::env;
use tracing::debug;

pub const MODEL_VAR: &str = "REACT_MODEL";
pub const TEMPERATURE_VAR: &str = "REACT_TEMPERATURE";
pub const MAX_ITERATIONS_VAR: &str = "REACT_MAX_ITERATIONS";

pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: String,
    pub agent: AgentConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            agent: AgentConfig::default(),
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup; unset values use the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(model) = lookup(MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            settings.model = model.trim().to_string();
        }

        if let Some(raw) = lookup(TEMPERATURE_VAR) {
            let temperature: f32 = raw.trim().parse().map_err(|_| {
                AgentError::ConfigError(format!("{} must be a number, got {:?}", TEMPERATURE_VAR, raw))
            })?;
            if !(0.0..=2.0).contains(&temperature) {
                return Err(AgentError::ConfigError(format!(
                    "{} must be between 0 and 2, got {}",
                    TEMPERATURE_VAR, temperature
                )));
            }
            settings.agent.temperature = temperature;
        }

        if let Some(raw) = lookup(MAX_ITERATIONS_VAR) {
            let max_iterations: usize = raw.trim().parse().map_err(|_| {
                AgentError::ConfigError(format!(
                    "{} must be a positive integer, got {:?}",
                    MAX_ITERATIONS_VAR, raw
                ))
            })?;
            if max_iterations == 0 {
                return Err(AgentError::ConfigError(format!("{} must be at least 1", MAX_ITERATIONS_VAR)));
            }
            settings.agent.max_iterations = max_iterations;
        }

        debug!(
            model = settings.model.as_str(),
            temperature = settings.agent.temperature,
            max_iterations = settings.agent.max_iterations,
            "Loaded settings"
        );

        Ok(settings)
    }
}
