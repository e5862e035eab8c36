//! Two-operand calculator tools.
//!
//! Each arithmetic operation is exposed as its own tool (`calculator_add`,
//! `calculator_subtract`, `calculator_multiply`, `calculator_divide`) so the model
//! names the operation in the `Action:` line and supplies exactly two operands.

use crate::error::{AgentError, Result};
use crate::llm::tools::{ActionInput, InputKind, LlmTool, ToolDescriptor};
use async_trait::async_trait;
use std::fmt;
use tracing::info;

/// Observation returned instead of an error when the divisor is zero.
pub const DIVIDE_BY_ZERO: &str = "Can't divide by Zero";

/// A numeric operand or result.
///
/// Integer arithmetic stays integral and falls back to floating point on overflow.
/// Division always produces a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parse a numeric literal such as `42`, `-3`, `2.5`, `.5` or `1e3`.
    pub fn parse_literal(text: &str) -> Option<Number> {
        let is_float = text.contains(['.', 'e', 'E']);
        if !is_float {
            if let Ok(value) = text.parse::<i64>() {
                return Some(Number::Int(value));
            }
        }
        // Reject things f64::from_str accepts but a numeric literal is not
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        text.parse::<f64>().ok().map(Number::Float)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(v) => v == 0,
            Number::Float(v) => v == 0.0,
        }
    }

    fn combine(
        self,
        other: Number,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Number {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match int_op(a, b) {
                Some(v) => Number::Int(v),
                None => Number::Float(float_op(a as f64, b as f64)),
            },
            (a, b) => Number::Float(float_op(a.as_f64(), b.as_f64())),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => f.write_str(&format_float(v)),
        }
    }
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // 1.5e-5 -> 1.5e-05, 1e16 -> 1e+16
        let formatted = format!("{:e}", v);
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return formatted;
    }

    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// The four arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            Operation::Add => "calculator_add",
            Operation::Subtract => "calculator_subtract",
            Operation::Multiply => "calculator_multiply",
            Operation::Divide => "calculator_divide",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Operation::Add => {
                "Add two numbers a and b. Both should be int or float. \
                 This tool cannot accept more than 2 numbers at a time."
            }
            Operation::Subtract => {
                "Subtract b from a. Both should be int or float. \
                 This tool cannot accept more than 2 numbers at a time."
            }
            Operation::Multiply => {
                "Multiply two numbers a and b. Both should be int or float. \
                 This tool cannot accept more than 2 numbers at a time."
            }
            Operation::Divide => {
                "Divide a by b. Both should be int or float; b must not be zero. \
                 This tool cannot accept more than 2 numbers at a time."
            }
        }
    }
}

/// Result of applying an [`Operation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calculation {
    Value(Number),
    DivideByZero,
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calculation::Value(n) => write!(f, "{}", n),
            Calculation::DivideByZero => f.write_str(DIVIDE_BY_ZERO),
        }
    }
}

/// Apply `op` to `a` and `b`. Total for every input; a zero divisor yields
/// [`Calculation::DivideByZero`].
pub fn calculate(op: Operation, a: Number, b: Number) -> Calculation {
    let value = match op {
        Operation::Add => a.combine(b, i64::checked_add, |x, y| x + y),
        Operation::Subtract => a.combine(b, i64::checked_sub, |x, y| x - y),
        Operation::Multiply => a.combine(b, i64::checked_mul, |x, y| x * y),
        Operation::Divide => {
            if b.is_zero() {
                return Calculation::DivideByZero;
            }
            Number::Float(a.as_f64() / b.as_f64())
        }
    };
    Calculation::Value(value)
}

/// Tool wrapping one arithmetic [`Operation`]
#[derive(Debug, Clone, Copy)]
pub struct CalculatorTool {
    op: Operation,
}

impl CalculatorTool {
    pub fn new(op: Operation) -> Self {
        Self { op }
    }

    /// One tool per operation, in the order they are presented to the model.
    pub fn all() -> Vec<CalculatorTool> {
        Operation::ALL.iter().map(|op| CalculatorTool::new(*op)).collect()
    }
}

#[async_trait]
impl LlmTool for CalculatorTool {
    async fn run(&self, input: &ActionInput) -> Result<String> {
        let (a, b) = match input {
            ActionInput::Operands(a, b) => (*a, *b),
            ActionInput::Text(_) => {
                return Err(AgentError::ToolError(format!(
                    "{} requires two numeric operands",
                    self.op.tool_name()
                )))
            }
        };

        info!(tool = self.op.tool_name(), a = %a, b = %b, "Invoking calculator");
        Ok(calculate(self.op, a, b).to_string())
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.op.tool_name(), self.op.description())
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Operands
    }
}
