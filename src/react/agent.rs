//! The ReAct control loop.
//!
//! Each iteration asks the model for a completion over the whole transcript, stopping at
//! `Observation:`. The reply is then handled in one of three ways:
//!
//! - a valid `Action:` / `Action Input:` pair is dispatched to its tool and the result is
//!   fed back as an observation,
//! - otherwise a reply containing `Final Answer:` ends the run,
//! - anything else gets a corrective turn and the model tries again.
//!
//! The run fails only when a backend call fails for good or the iteration budget runs out.

use crate::error::{AgentError, Result};
use crate::llm::gateway::CompletionConfig;
use crate::llm::tools::{ActionInput, LlmTool, ToolRegistry};
use crate::llm::LlmBroker;
use crate::react::action_input::decode_action_input;
use crate::react::directive::{final_answer_text, has_final_answer, parse_directive, ParsedDirective};
use crate::react::prompt::{corrective_message, question_turn, system_prompt};
use crate::react::transcript::Transcript;
use crate::react::DirectiveError;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Tunables for a [`ReactAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Sampling temperature for the loop's completions
    pub temperature: f32,
    /// Iterations allowed before the run is abandoned
    pub max_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_iterations: 20,
        }
    }
}

/// What a single iteration did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A tool ran and its result was appended as an observation.
    Observed { action: String, observation: String },
    /// The reply carried a final answer; the transcript is complete.
    Finished(String),
    /// The reply could not be acted on and a corrective turn was appended.
    Reprompted(DirectiveError),
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct ReactOutcome {
    /// The model's last reply, the one carrying `Final Answer:`
    pub reply: String,
    pub transcript: Transcript,
    pub iterations: usize,
}

impl ReactOutcome {
    /// The text after the `Final Answer:` marker.
    pub fn final_answer(&self) -> Option<&str> {
        final_answer_text(&self.reply)
    }
}

/// An agent that answers a question by alternating model completions and tool calls.
///
/// # Examples
///
/// ```ignore
/// use reactloop::llm::gateways::OpenAIGateway;
/// use reactloop::llm::tools::{ToolRegistry, TavilyGateway};
/// use reactloop::llm::LlmBroker;
/// use reactloop::react::ReactAgent;
/// use std::sync::Arc;
///
/// let broker = Arc::new(LlmBroker::new("gpt-4o", Arc::new(OpenAIGateway::new()?)));
/// let registry = ToolRegistry::standard(broker.clone(), Arc::new(TavilyGateway::new()?))?;
///
/// let agent = ReactAgent::builder(broker, registry).max_iterations(10).build();
/// let outcome = agent.run("What is 5 + 5?").await?;
/// println!("{}", outcome.final_answer().unwrap_or_default());
/// ```
pub struct ReactAgent {
    broker: Arc<LlmBroker>,
    registry: ToolRegistry,
    config: AgentConfig,
    system_prompt: String,
}

impl ReactAgent {
    /// Create an agent with the default configuration.
    pub fn new(broker: Arc<LlmBroker>, registry: ToolRegistry) -> Self {
        Self::builder(broker, registry).build()
    }

    pub fn builder(broker: Arc<LlmBroker>, registry: ToolRegistry) -> ReactAgentBuilder {
        ReactAgentBuilder::new(broker, registry)
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// A fresh transcript holding the system prompt and `question`.
    pub fn start(&self, question: &str) -> Transcript {
        Transcript::new(self.system_prompt.clone(), question_turn(question))
    }

    /// Run the loop on `question` until the model gives a final answer.
    ///
    /// # Errors
    ///
    /// - [`AgentError::LoopBudgetExceeded`] when `max_iterations` pass without a final answer
    /// - [`AgentError::RetriesExhausted`] or the backend's own error when a completion or
    ///   tool call fails for good
    pub async fn run(&self, question: &str) -> Result<ReactOutcome> {
        let run_id = Uuid::new_v4();
        let span = info_span!("react_run", %run_id, model = self.broker.model());

        async {
            info!(max_iterations = self.config.max_iterations, "Starting ReAct loop");

            let mut transcript = self.start(question);
            let mut iterations = 0;

            loop {
                if iterations >= self.config.max_iterations {
                    warn!(iterations, "Iteration budget exhausted without a final answer");
                    return Err(AgentError::LoopBudgetExceeded { iterations });
                }

                let outcome = self.step(&mut transcript).await?;
                iterations += 1;

                match outcome {
                    StepOutcome::Observed {
                        action,
                        observation,
                    } => {
                        info!(
                            iteration = iterations,
                            action = action.as_str(),
                            observation = observation.as_str(),
                            "Observation recorded"
                        );
                    }
                    StepOutcome::Reprompted(reason) => {
                        warn!(iteration = iterations, %reason, "No usable action, re-prompting");
                    }
                    StepOutcome::Finished(reply) => {
                        info!(iteration = iterations, "Final answer detected");
                        return Ok(ReactOutcome {
                            reply,
                            transcript,
                            iterations,
                        });
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run one iteration against `transcript`, appending whatever it produced.
    pub async fn step(&self, transcript: &mut Transcript) -> Result<StepOutcome> {
        let config = CompletionConfig::react(self.config.temperature);
        let reply = self.broker.generate(transcript.messages(), Some(config)).await?;
        debug!(reply = reply.as_str(), "Model reply");

        match self.resolve(&parse_directive(&reply)) {
            Ok((tool, input)) => {
                let action = tool.descriptor().name;
                info!(action = action.as_str(), "Taking action");

                let observation = tool.run(&input).await?;
                transcript.push_assistant(reply);
                transcript.push_observation(&observation);

                Ok(StepOutcome::Observed {
                    action,
                    observation,
                })
            }
            Err(_) if has_final_answer(&reply) => {
                transcript.push_assistant(reply.clone());
                Ok(StepOutcome::Finished(reply))
            }
            Err(reason) => {
                let detail = match &reason {
                    DirectiveError::MalformedDirective => None,
                    other => Some(other),
                };
                transcript.push_assistant(reply);
                transcript.push_user(corrective_message(&self.registry, detail));
                Ok(StepOutcome::Reprompted(reason))
            }
        }
    }

    /// Look up the named tool and decode its input.
    fn resolve(
        &self,
        parsed: &ParsedDirective,
    ) -> std::result::Result<(&Arc<dyn LlmTool>, ActionInput), DirectiveError> {
        let (action, raw_input) = parsed.pair().ok_or(DirectiveError::MalformedDirective)?;
        let tool = self.registry.get(action).ok_or_else(|| DirectiveError::UnknownAction {
            name: action.to_string(),
        })?;
        let input = decode_action_input(raw_input, tool.input_kind())?;
        Ok((tool, input))
    }
}

/// Builder for constructing a [`ReactAgent`] with custom configuration.
pub struct ReactAgentBuilder {
    broker: Arc<LlmBroker>,
    registry: ToolRegistry,
    config: AgentConfig,
    system_prompt: Option<String>,
}

impl ReactAgentBuilder {
    fn new(broker: Arc<LlmBroker>, registry: ToolRegistry) -> Self {
        Self {
            broker,
            registry,
            config: AgentConfig::default(),
            system_prompt: None,
        }
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the sampling temperature (default: 0.2)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the maximum number of iterations (default: 20)
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Replace the generated system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn build(self) -> ReactAgent {
        let system_prompt = self.system_prompt.unwrap_or_else(|| system_prompt(&self.registry));

        ReactAgent {
            broker: self.broker,
            registry: self.registry,
            config: self.config,
            system_prompt,
        }
    }
}
