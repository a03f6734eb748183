use crate::error::{ExprError, Span};
use crate::lexer::{Token, TokenType};
use std::fmt;

/// Every root produced by one parse, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub expressions: Vec<Expr>,
}

/// Expression tree. Parents own their children outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal text as lexed, separators included.
    Number {
        literal: String,
        span: Span,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Number { span, .. } => span,
            Expr::Unary { span, .. } => span,
            Expr::Binary { span, .. } => span,
        }
    }

    pub fn number(literal: impl Into<String>) -> Self {
        Expr::Number {
            literal: literal.into(),
            span: Span::new(0, 0),
        }
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Unary {
            operator: UnaryOp::Negate,
            operand: Box::new(operand),
            span: Span::new(0, 0),
        }
    }

    pub fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span: Span::new(0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "^",
        }
    }
}

impl TryFrom<&Token> for BinaryOp {
    type Error = ExprError;

    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        match token.token_type {
            TokenType::Plus => Ok(BinaryOp::Add),
            TokenType::Minus => Ok(BinaryOp::Subtract),
            TokenType::Star => Ok(BinaryOp::Multiply),
            TokenType::Slash => Ok(BinaryOp::Divide),
            TokenType::Percent => Ok(BinaryOp::Modulo),
            TokenType::Caret => Ok(BinaryOp::Power),
            _ => Err(ExprError::parse_error(
                token.span,
                format!("'{}' is not a binary operator", token.lexeme),
            )),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
        }
    }
}

impl TryFrom<&Token> for UnaryOp {
    type Error = ExprError;

    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        match token.token_type {
            TokenType::Minus => Ok(UnaryOp::Negate),
            _ => Err(ExprError::parse_error(
                token.span,
                format!("'{}' is not a unary operator", token.lexeme),
            )),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
