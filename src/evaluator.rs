use crate::ast::{BinaryOp, Expr, Program, UnaryOp};
use crate::error::{ExprError, Span};
use tracing::debug;

/// Tree-walking evaluator. Holds no state between expressions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the first root of `program`.
    pub fn evaluate_program(&self, program: &Program) -> Result<f64, ExprError> {
        let root = program.expressions.first().ok_or_else(|| {
            ExprError::runtime_error(Span::new(0, 0), "No expression to evaluate".to_string())
        })?;

        let value = self.evaluate_expression(root)?;
        debug!(value, "evaluated program");
        Ok(value)
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<f64, ExprError> {
        match expr {
            Expr::Number { literal, span } => parse_literal(literal, span),
            Expr::Unary { operator, operand, .. } => {
                let operand_val = self.evaluate_expression(operand)?;
                Ok(evaluate_unary_op(*operator, operand_val))
            }
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                Ok(evaluate_binary_op(*operator, left_val, right_val))
            }
        }
    }
}

/// Parse lexer-validated literal text. Digit separators are dropped first.
fn parse_literal(literal: &str, span: &Span) -> Result<f64, ExprError> {
    let digits: String = literal.chars().filter(|&c| c != '_').collect();
    digits.parse::<f64>().map_err(|error| {
        ExprError::runtime_error(
            *span,
            format!("Invalid number literal '{}': {}", literal, error),
        )
    })
}

fn evaluate_unary_op(operator: UnaryOp, operand: f64) -> f64 {
    match operator {
        UnaryOp::Negate => -operand,
    }
}

// Division by zero and friends follow IEEE-754: inf or NaN, never an error.
fn evaluate_binary_op(operator: BinaryOp, left: f64, right: f64) -> f64 {
    match operator {
        BinaryOp::Add => left + right,
        BinaryOp::Subtract => left - right,
        BinaryOp::Multiply => left * right,
        BinaryOp::Divide => left / right,
        BinaryOp::Modulo => left % right,
        BinaryOp::Power => left.powf(right),
    }
}
