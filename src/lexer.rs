use crate::error::{ExprError, Span};
use std::io::{self, Read};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    Plus,
    Minus,
    Slash,
    Star,
    Percent,
    Caret,
    LeftParen,
    RightParen,

    // Literals
    Number,

    // Special
    Eof,
}

impl TokenType {
    /// Name used in token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Plus => "TOKEN_PLUS",
            TokenType::Minus => "TOKEN_MINUS",
            TokenType::Slash => "TOKEN_SLASH",
            TokenType::Star => "TOKEN_ASTERISK",
            TokenType::Percent => "TOKEN_PERCENT",
            TokenType::Caret => "TOKEN_CARET",
            TokenType::LeftParen => "TOKEN_PAREN_LEFT",
            TokenType::RightParen => "TOKEN_PAREN_RIGHT",
            TokenType::Number => "TOKEN_NUMBER",
            TokenType::Eof => "TOKEN_EOF",
        }
    }
}

/// A classified lexeme. For numbers `lexeme` is the exact source text,
/// separators included; it is only turned into a float by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

/// Characters that can continue a numeric literal once it has started.
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '_' | 'e' | '+' | '-')
}

/// Incremental validator for a single numeric literal.
///
/// Fed one character at a time; every rule is checked as the character is
/// accepted, and `finish` applies the rules that need the whole literal.
#[derive(Debug, Default)]
struct NumberScanner {
    previous: Option<char>,
    dot_count: usize,
    in_exponent: bool,
    mantissa_digits: usize,
}

impl NumberScanner {
    fn accept(&mut self, c: char) -> Result<(), String> {
        if self.previous == Some(c) && matches!(c, 'e' | '_' | '.') {
            return Err(format!("Adjacent '{}' in number literal", c));
        }

        let after_e = self.previous == Some('e');
        match c {
            'e' if self.in_exponent => {
                return Err("Number literal has more than one exponent marker 'e'".to_string());
            }
            'e' if self.mantissa_digits == 0 => {
                return Err("Exponent marker 'e' must follow at least one digit".to_string());
            }
            '.' | '_' if after_e => {
                return Err(format!("Exponent notation has wrong format: '{}' after 'e'", c));
            }
            '.' if self.in_exponent => {
                return Err("Exponent notation has wrong format: '.' in power".to_string());
            }
            '.' if self.dot_count > 0 => {
                return Err("'.' appears in number literal more than once".to_string());
            }
            '+' | '-' if !self.in_exponent => {
                return Err(format!("'{}' outside of exponent notation", c));
            }
            '+' | '-' if !after_e => {
                return Err(format!("Exponent notation has wrong format: '{}' in power", c));
            }
            _ => {}
        }

        match c {
            'e' => self.in_exponent = true,
            '.' => self.dot_count += 1,
            d if d.is_ascii_digit() && !self.in_exponent => self.mantissa_digits += 1,
            _ => {}
        }
        self.previous = Some(c);
        Ok(())
    }

    fn finish(&self) -> Result<(), String> {
        match self.previous {
            Some(c @ ('_' | 'e')) => Err(format!("'{}' must separate successive digits", c)),
            Some(c @ ('+' | '-')) => Err(format!("Exponent sign '{}' must be followed by a digit", c)),
            _ if self.mantissa_digits == 0 => Err("Number literal has no digits".to_string()),
            _ => Ok(()),
        }
    }
}

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Read the whole stream as UTF-8 and prepare to scan it.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::new(&source))
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ExprError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            Span::new(self.current, self.current),
        ));

        debug!(count = self.tokens.len(), "lexed input");
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), ExprError> {
        let c = self.advance();

        match c {
            '+' => self.add_token(TokenType::Plus),
            '-' => self.add_token(TokenType::Minus),
            '/' => self.add_token(TokenType::Slash),
            '*' => self.add_token(TokenType::Star),
            '%' => self.add_token(TokenType::Percent),
            '^' => self.add_token(TokenType::Caret),
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '#' => {
                // Comment goes until end of line
                while !self.is_at_end() && self.peek() != '\n' {
                    self.advance();
                }
            }
            ' ' | '\r' | '\t' | '\n' => {}
            c if c.is_ascii_digit() || c == '.' => self.number()?,
            _ => {
                return Err(ExprError::lex_error_with_help(
                    Span::single(self.start),
                    format!("Unknown token: '{}'", c),
                    "Expressions may contain numbers, '+ - * / % ^', parentheses and '#' comments.".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn number(&mut self) -> Result<(), ExprError> {
        let mut scanner = NumberScanner::default();
        self.current = self.start;

        while !self.is_at_end() && is_number_char(self.peek()) {
            let c = self.advance();
            scanner.accept(c).map_err(|message| {
                let span = Span::new(self.start, self.current);
                if matches!(c, '+' | '-') {
                    ExprError::lex_error_with_help(
                        span,
                        message,
                        format!("Separate the operator from the number with a space: '{} {}'", self.current_text().trim_end_matches(c), c),
                    )
                } else {
                    ExprError::lex_error(span, message)
                }
            })?;
        }

        scanner.finish().map_err(|message| {
            ExprError::lex_error_with_help(
                Span::new(self.start, self.current),
                message,
                "Number literals look like 12, 1_000, .5, 5., 1.5e-3 or 2e1_0.".to_string(),
            )
        })?;

        trace!(literal = %self.current_text(), "number literal");
        self.add_token(TokenType::Number);
        Ok(())
    }

    fn current_text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, token_type: TokenType) {
        let lexeme = self.current_text();
        self.tokens.push(Token::new(
            token_type,
            lexeme,
            Span::new(self.start, self.current),
        ));
    }
}

/// Lex `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    Lexer::new(source).scan_tokens()
}
