//! Extraction of `Action:` / `Action Input:` directives from a model reply.
//!
//! Matching is line oriented and case sensitive on the prefixes. Indentation before a
//! prefix is allowed. When a reply repeats a directive, the first occurrence wins.

use regex::Regex;
use std::sync::LazyLock;

/// Marker that ends a run when no action is proposed.
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// The directives found in one reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDirective {
    pub action: Option<String>,
    pub raw_input: Option<String>,
}

impl ParsedDirective {
    /// Both directives, or `None` when either is missing.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (&self.action, &self.raw_input) {
            (Some(action), Some(input)) => Some((action.as_str(), input.as_str())),
            _ => None,
        }
    }
}

static ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Action:[ \t]*(.*)$").expect("valid regex"));

static ACTION_INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Action Input:[ \t]*(.*)$").expect("valid regex"));

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|value| !value.is_empty())
}

/// Scan `text` for an `Action:` line and an `Action Input:` line.
///
/// Returns absent/absent unless both are present with non-empty values.
pub fn parse_directive(text: &str) -> ParsedDirective {
    let action = first_capture(&ACTION_RE, text);
    let raw_input = first_capture(&ACTION_INPUT_RE, text);

    match (action, raw_input) {
        (Some(action), Some(raw_input)) => ParsedDirective {
            action: Some(action),
            raw_input: Some(raw_input),
        },
        _ => ParsedDirective::default(),
    }
}

/// Whether the reply carries the final-answer marker.
pub fn has_final_answer(text: &str) -> bool {
    text.contains(FINAL_ANSWER_MARKER)
}

/// The text following the final-answer marker, trimmed.
pub fn final_answer_text(text: &str) -> Option<&str> {
    text.find(FINAL_ANSWER_MARKER)
        .map(|idx| text[idx + FINAL_ANSWER_MARKER.len()..].trim())
}
