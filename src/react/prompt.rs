//! Prompt text for the ReAct loop.
//!
//! The system prompt lists the registered tools and teaches the directive format. The
//! corrective message is sent whenever a reply cannot be acted on.

use crate::llm::tools::ToolRegistry;
use crate::react::DirectiveError;

/// Build the system instructions for a run over `registry`.
pub fn system_prompt(registry: &ToolRegistry) -> String {
    let names = registry.names_list();

    format!(
        "You have access to the following tools:\n\
         {tools}\n\
         \n\
         You must use the following format:\n\
         Question: The input question you must answer.\n\
         Thought: You should always think about what to do.\n\
         Action: The action to take, should only be one of {names}.\n\
         Action Input: The input to the action.\n\
         Observation: The result of the action.\n\
         ... (The Thought/Action/Observation can repeat any number of times)\n\
         Thought: I now know the final answer!\n\
         Final Answer: The answer to the original input question.\n\
         \n\
         ** Example **\n\
         Question: What is 5 + 5?\n\
         Thought: I need to add the two numbers 5 and 5 together.\n\
         Action: calculator_add\n\
         Action Input: (5, 5)\n\
         Observation: 10\n\
         Thought: I now know the final answer!\n\
         Final Answer: 10\n\
         \n\
         ** Important Details **\n\
         1. **All** arithmetic (adding, subtracting, multiplying, dividing) must be done with calculator tools.\n\
         \x20  - When you use one of these calculator tools, you **must** supply a tuple of exactly two numbers, e.g.:\n\
         \x20      Action Input: (8, 42)\n\
         \x20  - Never output a single number as the Action Input for a calculator tool.\n\
         2. The tool 'llm_knowledge' is only for generating or retrieving textual content, **never** use it for any arithmetic.\n\
         3. You must always provide both:\n\
         \x20  - Action: one of {names}\n\
         \x20  - Action Input: formatted correctly.\n\
         \x20  Do not invent your own action phrases (e.g. 'I will convert...'). That is not valid.\n",
        tools = registry.describe(),
        names = names,
    )
}

/// The user turn that opens a run.
pub fn question_turn(question: &str) -> String {
    format!("Question: {}", question.trim())
}

/// The user turn sent after a reply the loop could not act on.
pub fn corrective_message(registry: &ToolRegistry, reason: Option<&DirectiveError>) -> String {
    let mut message = format!(
        "You did not follow the required format. \
         You must provide a valid Action and Action Input. \
         The action must be one of {}. \
         Try again and follow the format carefully.",
        registry.names_list()
    );

    match reason {
        Some(DirectiveError::UnknownAction { name }) => {
            message.push_str(&format!("\n'{}' is not one of the available actions.", name));
        }
        Some(DirectiveError::MalformedActionInput { raw }) => {
            message.push_str(&format!(
                "\nThe Action Input '{}' could not be read. Calculator tools need a tuple of \
                 exactly two numbers, e.g. (8, 42).",
                raw
            ));
        }
        Some(DirectiveError::MalformedDirective) | None => {}
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::tools::{CalculatorTool, LlmTool, Operation};
    use std::sync::Arc;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(vec![
            Arc::new(CalculatorTool::new(Operation::Add)) as Arc<dyn LlmTool>,
            Arc::new(CalculatorTool::new(Operation::Divide)),
        ])
        .unwrap()
    }

    #[test]
    fn test_system_prompt_lists_tools_and_format() {
        let prompt = system_prompt(&registry());

        assert!(prompt.starts_with("You have access to the following tools:\n- calculator_add:"));
        assert!(prompt.contains("- calculator_divide:"));
        assert!(prompt.contains(
            "Action: The action to take, should only be one of ['calculator_add', 'calculator_divide']."
        ));
        assert!(prompt.contains("Action Input: (8, 42)"));
        assert!(prompt.contains("Final Answer: The answer to the original input question."));
    }

    #[test]
    fn test_question_turn() {
        assert_eq!(question_turn("  What is 5 + 5?\n"), "Question: What is 5 + 5?");
    }

    #[test]
    fn test_corrective_message_names_every_tool() {
        let message = corrective_message(&registry(), None);

        assert!(message.starts_with("You did not follow the required format."));
        assert!(message.contains("calculator_add"));
        assert!(message.contains("calculator_divide"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn test_corrective_message_reason_lines() {
        let unknown = corrective_message(
            &registry(),
            Some(&DirectiveError::UnknownAction {
                name: "calculator_power".to_string(),
            }),
        );
        assert!(unknown.ends_with("'calculator_power' is not one of the available actions."));

        let malformed = corrective_message(
            &registry(),
            Some(&DirectiveError::MalformedActionInput {
                raw: "(1, 2, 3)".to_string(),
            }),
        );
        assert!(malformed.contains("The Action Input '(1, 2, 3)' could not be read."));
    }
}
