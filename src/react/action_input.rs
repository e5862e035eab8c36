//! Decoding of the raw `Action Input:` text into a typed value.
//!
//! Text tools get the trimmed string. Operand tools get a pair of numbers parsed with a
//! deliberately small grammar: numbers, `( ... )` tuples, `[ ... ]` lists and commas.
//! Anything else is rejected, so model output is never evaluated as code.

use crate::llm::tools::{ActionInput, InputKind, Number};
use crate::react::DirectiveError;

/// Strip trailing `)` characters that have no matching `(`.
///
/// Only characters at the very end are removed, and only while closers outnumber openers.
pub fn clean_parentheses(raw: &str) -> &str {
    let opens = raw.matches('(').count();
    let mut closes = raw.matches(')').count();
    let mut cleaned = raw;

    while closes > opens {
        match cleaned.strip_suffix(')') {
            Some(rest) => {
                cleaned = rest;
                closes -= 1;
            }
            None => break,
        }
    }

    cleaned
}

/// Decode `raw` for a tool whose input is of the given kind.
pub fn decode_action_input(raw: &str, kind: InputKind) -> Result<ActionInput, DirectiveError> {
    match kind {
        InputKind::Text => Ok(ActionInput::Text(raw.trim().to_string())),
        InputKind::Operands => {
            let malformed = || DirectiveError::MalformedActionInput {
                raw: raw.to_string(),
            };
            let literal = parse_literal(clean_parentheses(raw.trim())).ok_or_else(malformed)?;
            match literal {
                Literal::Sequence(items) => match items.as_slice() {
                    [Literal::Number(a), Literal::Number(b)] => Ok(ActionInput::Operands(*a, *b)),
                    _ => Err(malformed()),
                },
                Literal::Number(_) => Err(malformed()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Number(Number),
    Sequence(Vec<Literal>),
}

fn parse_literal(text: &str) -> Option<Literal> {
    let mut parser = LiteralParser {
        chars: text.chars().collect(),
        pos: 0,
    };
    let first = parser.value()?;

    // A bare `a, b` (optionally `a, b,`) is an unparenthesized tuple
    let mut items = vec![first];
    let mut bare_tuple = false;
    while parser.eat(',') {
        bare_tuple = true;
        parser.skip_whitespace();
        if parser.at_end() {
            break;
        }
        items.push(parser.value()?);
    }

    parser.skip_whitespace();
    if !parser.at_end() {
        return None;
    }
    if bare_tuple {
        Some(Literal::Sequence(items))
    } else {
        items.pop()
    }
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos == self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Option<Literal> {
        self.skip_whitespace();
        match self.peek()? {
            '(' => {
                self.pos += 1;
                let (items, trailing_comma) = self.items(')')?;
                // `(x)` is grouping, `(x,)` is a one-element tuple
                if items.len() == 1 && !trailing_comma {
                    items.into_iter().next()
                } else {
                    Some(Literal::Sequence(items))
                }
            }
            '[' => {
                self.pos += 1;
                let (items, _) = self.items(']')?;
                Some(Literal::Sequence(items))
            }
            _ => self.number().map(Literal::Number),
        }
    }

    /// Comma-separated values up to `close`; reports whether a trailing comma was seen.
    fn items(&mut self, close: char) -> Option<(Vec<Literal>, bool)> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Some((items, false));
        }

        loop {
            items.push(self.value()?);
            if self.eat(close) {
                return Some((items, false));
            }
            if !self.eat(',') {
                return None;
            }
            if self.eat(close) {
                return Some((items, true));
            }
        }
    }

    fn number(&mut self) -> Option<Number> {
        self.skip_whitespace();
        let mut negative = false;
        if let Some(sign @ ('+' | '-')) = self.peek() {
            negative = sign == '-';
            self.pos += 1;
            self.skip_whitespace();
        }

        let start = self.pos;
        while let Some(c) = self.peek() {
            let continues_exponent = matches!(c, '+' | '-')
                && self.pos > start
                && matches!(self.chars[self.pos - 1], 'e' | 'E');
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || continues_exponent {
                self.pos += 1;
            } else {
                break;
            }
        }

        let raw = &self.chars[start..self.pos];
        // `_` separates digits; it may not lead, trail or repeat
        let misplaced_underscore = raw.iter().enumerate().any(|(i, c)| {
            *c == '_'
                && !(i > 0
                    && raw[i - 1].is_ascii_digit()
                    && raw.get(i + 1).is_some_and(|next| next.is_ascii_digit()))
        });
        if misplaced_underscore {
            return None;
        }

        let token: String = raw.iter().filter(|c| **c != '_').collect();
        if !token.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return None;
        }

        match Number::parse_literal(&token)? {
            Number::Int(v) if negative => {
                Some(v.checked_neg().map_or(Number::Float(-(v as f64)), Number::Int))
            }
            Number::Float(v) if negative => Some(Number::Float(-v)),
            number => Some(number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Number::{Float, Int};

    fn operands(raw: &str) -> Result<ActionInput, DirectiveError> {
        decode_action_input(raw, InputKind::Operands)
    }

    #[test]
    fn test_clean_parentheses_strips_excess_trailing_closers() {
        assert_eq!(clean_parentheses("(5, 5))"), "(5, 5)");
        assert_eq!(clean_parentheses("(5, 5)))"), "(5, 5)");
        assert_eq!(clean_parentheses("5, 5)"), "5, 5");
    }

    #[test]
    fn test_clean_parentheses_leaves_balanced_input() {
        assert_eq!(clean_parentheses("(5, 5)"), "(5, 5)");
        assert_eq!(clean_parentheses("((1, 2))"), "((1, 2))");
        assert_eq!(clean_parentheses("((1, 2)"), "((1, 2)");
    }

    #[test]
    fn test_clean_parentheses_never_strips_non_trailing() {
        assert_eq!(clean_parentheses("(1, 2)) "), "(1, 2)) ");
        assert_eq!(clean_parentheses("a)b)"), "a)b");
    }

    #[test]
    fn test_clean_parentheses_is_idempotent() {
        for raw in ["(5, 5))", "(1, 2)))", "(3, 4)", "7, 8))"] {
            let once = clean_parentheses(raw);
            assert_eq!(clean_parentheses(once), once);
            assert_eq!(once.matches('(').count(), once.matches(')').count());
        }
    }

    #[test]
    fn test_decode_tuple_with_extra_closer() {
        assert_eq!(operands("(5, 5))"), Ok(ActionInput::Operands(Int(5), Int(5))));
    }

    #[test]
    fn test_decode_numeric_forms() {
        assert_eq!(operands("(8, 42)"), Ok(ActionInput::Operands(Int(8), Int(42))));
        assert_eq!(operands("[2.5, -3]"), Ok(ActionInput::Operands(Float(2.5), Int(-3))));
        assert_eq!(operands("(1e3, .5,)"), Ok(ActionInput::Operands(Float(1000.0), Float(0.5))));
        assert_eq!(operands("((10, 0))"), Ok(ActionInput::Operands(Int(10), Int(0))));
        assert_eq!(operands("(1_000, +2)"), Ok(ActionInput::Operands(Int(1000), Int(2))));
        assert_eq!(operands("(2.5e-1, 4)"), Ok(ActionInput::Operands(Float(0.25), Int(4))));
    }

    #[test]
    fn test_decode_bare_pair() {
        assert_eq!(operands("5, 5"), Ok(ActionInput::Operands(Int(5), Int(5))));
        assert_eq!(operands("5, 5)"), Ok(ActionInput::Operands(Int(5), Int(5))));
        assert_eq!(operands("8, 42,"), Ok(ActionInput::Operands(Int(8), Int(42))));
        assert!(operands("-1.5, [2]").is_err());
        assert_eq!(
            operands("1, 2, 3"),
            Err(DirectiveError::MalformedActionInput {
                raw: "1, 2, 3".to_string()
            })
        );
        assert!(operands("5,").is_err());
        assert!(operands("5, , 5").is_err());
    }

    #[test]
    fn test_decode_rejects_stray_underscores_and_stacked_signs() {
        for raw in [
            "(1_, 2)",
            "(1__0, 2)",
            "(_1, 2)",
            "(1, 2_.5)",
            "(+-5, 2)",
            "(--5, 2)",
            "(- -5, 2)",
        ] {
            assert!(operands(raw).is_err(), "{raw}");
        }
        assert_eq!(operands("(- 5, 1_0)"), Ok(ActionInput::Operands(Int(-5), Int(10))));
    }

    #[test]
    fn test_decode_rejects_wrong_arity() {
        for raw in ["5", "(5)", "(5,)", "(1, 2, 3)", "[]", "[[1, 2]]", "((1, 2), 3)"] {
            assert_eq!(
                operands(raw),
                Err(DirectiveError::MalformedActionInput {
                    raw: raw.to_string()
                }),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_non_literals() {
        for raw in [
            "(a, b)",
            "('5', '5')",
            "(5 + 5, 1)",
            "__import__('os')",
            "(True, 1)",
            "(1, 2",
            "(inf, 1)",
            "5 5",
        ] {
            assert!(operands(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_malformed_error_keeps_raw_input() {
        let err = operands("(5, five))").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::MalformedActionInput {
                raw: "(5, five))".to_string()
            }
        );
    }

    #[test]
    fn test_text_tools_get_trimmed_string() {
        assert_eq!(
            decode_action_input("  latest Rust release  ", InputKind::Text),
            Ok(ActionInput::Text("latest Rust release".to_string()))
        );
        assert_eq!(
            decode_action_input("(5, 5)", InputKind::Text),
            Ok(ActionInput::Text("(5, 5)".to_string()))
        );
    }
}
