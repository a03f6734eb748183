use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

/// Half-open range of character offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    RuntimeError,
}

impl ErrorKind {
    fn color(self) -> Color {
        match self {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::RuntimeError => "Runtime Error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ExprError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl ExprError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexError, span, message)
    }

    pub fn lex_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::LexError, span, message, help)
    }

    pub fn parse_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::ParseError, span, message)
    }

    pub fn parse_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::ParseError, span, message, help)
    }

    pub fn runtime_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::RuntimeError, span, message)
    }

    fn build_report<'a>(&self, filename: &'a str, colored: bool) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
        let color = self.kind.color();
        let title = if colored {
            format!("{}: {}", self.kind.fg(color), self.message)
        } else {
            format!("{}: {}", self.kind, self.message)
        };

        let mut label = Label::new((filename, self.span.start..self.span.end)).with_message(&self.message);
        if colored {
            label = label.with_color(color);
        }

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_config(Config::default().with_color(colored))
            .with_message(title)
            .with_label(label);

        if let Some(ref help_text) = self.help {
            let note = if colored {
                format!("{}: {}", "help".fg(Color::Cyan), help_text)
            } else {
                format!("help: {}", help_text)
            };
            report_builder = report_builder.with_note(note);
        }

        report_builder.finish()
    }

    /// Print a coloured diagnostic for this error to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<input>");
        if let Err(io_error) = self
            .build_report(filename, true)
            .eprint((filename, Source::from(source)))
        {
            // Fall back to the plain message if the terminal is gone.
            eprintln!("{} ({})", self, io_error);
        }
    }

    /// Render the diagnostic without colours, e.g. for logs and tests.
    pub fn render(&self, source: &str, filename: Option<&str>) -> String {
        let filename = filename.unwrap_or("<input>");
        let mut buffer = Vec::new();
        match self
            .build_report(filename, false)
            .write((filename, Source::from(source)), &mut buffer)
        {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
