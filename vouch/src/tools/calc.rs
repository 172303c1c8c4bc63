//! Arithmetic expression evaluation.
//!
//! A small recursive-descent evaluator over `+ - * /`, parentheses, and
//! unary minus. Nothing is ever `eval`ed; malformed input is an error the
//! loop reports back to the model.

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{FieldType, InputSchema};
use crate::tool::{Tool, ToolError};

/// Tool that evaluates a mathematical expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorTool;

impl CalculatorTool {
    /// Create the calculator tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculate_math"
    }

    fn description(&self) -> &str {
        "Evaluate a mathematical expression using +, -, *, / and parentheses."
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new().required(
            "expression",
            FieldType::String,
            "Expression to evaluate, e.g. '25 * 2'",
        )
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let expression = args["expression"]
            .as_str()
            .ok_or_else(|| ToolError::execution("expression must be a string"))?;
        let value = evaluate(expression).map_err(ToolError::execution)?;
        // Render integers without a trailing ".0".
        if value.fract() == 0.0 && value.abs() < 1e15 {
            Ok(format!("{}", value as i64))
        } else {
            Ok(format!("{value}"))
        }
    }
}

/// Evaluate an arithmetic expression.
///
/// # Errors
///
/// Returns a description of the first syntax error, or "division by zero".
pub fn evaluate(input: &str) -> Result<f64, String> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    let value = parser.expression()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(format!(
            "unexpected character '{}' at position {}",
            parser.chars[parser.pos], parser.pos
        ));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn skip_whitespace(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_owned());
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() == Some(')') {
                    self.pos += 1;
                    Ok(value)
                } else {
                    Err("missing closing parenthesis".to_owned())
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("unexpected character '{c}' at position {}", self.pos)),
            None => Err("unexpected end of expression".to_owned()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.chars.len()
            && (self.chars[self.pos].is_ascii_digit() || self.chars[self.pos] == '.')
        {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{literal}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_precedence_and_parens() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("25 * 2").unwrap(), 50.0);
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("2 * -3").unwrap(), -6.0);
        assert_eq!(evaluate("-(2 + 3)").unwrap(), -5.0);
    }

    #[test]
    fn test_errors() {
        assert!(evaluate("1 / 0").unwrap_err().contains("division by zero"));
        assert!(evaluate("(1 + 2").unwrap_err().contains("parenthesis"));
        assert!(evaluate("2 + foo").is_err());
        assert!(evaluate("").is_err());
        assert!(evaluate("1 2").is_err());
    }

    #[tokio::test]
    async fn test_tool_renders_integers_cleanly() {
        let tool = CalculatorTool::new();
        let result = tool.call(json!({"expression": "25 * 2"})).await.unwrap();
        assert_eq!(result, "50");

        let result = tool.call(json!({"expression": "10 / 4"})).await.unwrap();
        assert_eq!(result, "2.5");
    }

    #[tokio::test]
    async fn test_tool_surfaces_syntax_error() {
        let tool = CalculatorTool::new();
        let err = tool.call(json!({"expression": "2 +"})).await.unwrap_err();
        assert!(err.to_string().contains("unexpected end"));
    }
}
