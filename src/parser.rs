use crate::ast::{BinaryOp, Expr, Program, UnaryOp};
use crate::error::{ExprError, Span};
use crate::lexer::{Token, TokenType};
use tracing::debug;

// Grammar, loosest to tightest:
//
//   program        := expression* EOF
//   expression     := additive
//   additive       := multiplicative (("+" | "-") multiplicative)*
//   multiplicative := exponential (("*" | "/" | "%") exponential)*
//   exponential    := unary ("^" exponential)?
//   unary          := "-" unary | primary
//   primary        := NUMBER | "(" expression ")"

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// `tokens` must end with an `Eof` token, as produced by the lexer.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.token_type) != Some(TokenType::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenType::Eof, String::new(), Span::new(end, end)));
        }
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, ExprError> {
        let mut expressions = Vec::new();

        while !self.is_at_end() {
            expressions.push(self.expression()?);
        }

        debug!(roots = expressions.len(), "parsed program");
        Ok(Program { expressions })
    }

    fn expression(&mut self) -> Result<Expr, ExprError> {
        self.additive()
    }

    fn additive(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.multiplicative()?;

        while self.match_types(&[TokenType::Plus, TokenType::Minus]) {
            let operator = BinaryOp::try_from(self.previous())?;
            let right = self.multiplicative()?;
            expr = Self::fold(expr, operator, right);
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.exponential()?;

        while self.match_types(&[TokenType::Star, TokenType::Slash, TokenType::Percent]) {
            let operator = BinaryOp::try_from(self.previous())?;
            let right = self.exponential()?;
            expr = Self::fold(expr, operator, right);
        }

        Ok(expr)
    }

    fn exponential(&mut self) -> Result<Expr, ExprError> {
        let base = self.unary()?;

        if self.match_types(&[TokenType::Caret]) {
            let operator = BinaryOp::try_from(self.previous())?;
            // Recursing on the right makes `^` right-associative.
            let exponent = self.exponential()?;
            return Ok(Self::fold(base, operator, exponent));
        }

        Ok(base)
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.match_types(&[TokenType::Minus]) {
            let start = self.previous().span;
            let operator = UnaryOp::try_from(self.previous())?;
            let operand = self.unary()?;
            let span = start.to(*operand.span());
            return Ok(Expr::Unary {
                operator,
                operand: Box::new(operand),
                span,
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        if self.match_types(&[TokenType::Number]) {
            let token = self.previous();
            return Ok(Expr::Number {
                literal: token.lexeme.clone(),
                span: token.span,
            });
        }

        if self.match_types(&[TokenType::LeftParen]) {
            let open = self.previous().span;

            if self.check(&TokenType::RightParen) {
                return Err(ExprError::parse_error_with_help(
                    open.to(self.peek().span),
                    "Empty parentheses are not allowed".to_string(),
                    "Parentheses must contain an expression, e.g. '(1 + 2)'.".to_string(),
                ));
            }

            let expr = self.expression()?;
            self.consume_with_help(
                TokenType::RightParen,
                "Expected ')' after expression",
                format!("The '(' opened at offset {} is never closed.", open.start),
            )?;
            return Ok(expr);
        }

        let token = self.peek();
        let found = match token.token_type {
            TokenType::Eof => "end of input".to_string(),
            _ => format!("'{}'", token.lexeme),
        };
        let help = match token.token_type {
            TokenType::Plus => "Unary '+' is not supported; write the number on its own.".to_string(),
            TokenType::RightParen => "This ')' has no matching '('.".to_string(),
            TokenType::Eof => "The expression ends where an operand is still expected.".to_string(),
            _ => "An operand is a number, a parenthesized expression or a negation '-x'.".to_string(),
        };

        Err(ExprError::parse_error_with_help(
            self.error_span(),
            format!("Expected number or expression, found {}", found),
            help,
        ))
    }

    fn fold(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
        let span = left.span().to(*right.span());
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            false
        } else {
            &self.peek().token_type == token_type
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Span to blame for an unexpected token. At end of input this points
    /// just past the last real token.
    fn error_span(&self) -> Span {
        if self.is_at_end() && self.current > 0 {
            Span::single(self.tokens[self.current - 1].span.end)
        } else {
            self.peek().span
        }
    }

    fn consume_with_help(&mut self, token_type: TokenType, message: &str, help: String) -> Result<&Token, ExprError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(ExprError::parse_error_with_help(
                self.error_span(),
                message.to_string(),
                help,
            ))
        }
    }
}

/// Parse a token stream in one call.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ExprError> {
    Parser::new(tokens).parse()
}
