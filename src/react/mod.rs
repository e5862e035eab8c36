//! The ReAct loop: directive parsing, input decoding, prompts and the control loop.

pub mod action_input;
pub mod agent;
pub mod directive;
pub mod prompt;
pub mod transcript;

use thiserror::Error;

pub use action_input::{clean_parentheses, decode_action_input};
pub use agent::{AgentConfig, ReactAgent, ReactAgentBuilder, ReactOutcome, StepOutcome};
pub use directive::{parse_directive, ParsedDirective, FINAL_ANSWER_MARKER};
pub use transcript::Transcript;

/// A reply the loop could not act on.
///
/// These are recovered from inside the loop by re-prompting the model; they never
/// surface from [`ReactAgent::run`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("the reply did not contain both an Action and an Action Input line")]
    MalformedDirective,

    #[error("the Action Input {raw:?} is not a valid pair of numbers")]
    MalformedActionInput { raw: String },

    #[error("{name:?} is not an available action")]
    UnknownAction { name: String },
}
