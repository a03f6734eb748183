use crate::error::ExprError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::printer;
use crate::value::Value;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Settings shared by single-expression, batch and REPL runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub show_tokens: bool,
    pub show_tree: bool,
    /// Decimal places per result in batch output.
    pub precision: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            show_tokens: false,
            show_tree: false,
            precision: 6,
        }
    }
}

/// Lex, parse and evaluate a single expression.
pub fn evaluate(source: &str) -> Result<f64, ExprError> {
    let tokens = Lexer::new(source).scan_tokens()?;
    let program = Parser::new(tokens).parse()?;
    Evaluator::new().evaluate_program(&program)
}

/// Like [`evaluate`], but also prints the diagnostic dumps `opts` asks for.
pub fn evaluate_verbose(source: &str, opts: &RunOptions) -> Result<f64, ExprError> {
    let tokens = Lexer::new(source).scan_tokens()?;
    if opts.show_tokens {
        print!("{}", printer::format_tokens(&tokens));
    }

    let program = Parser::new(tokens).parse()?;
    if opts.show_tree {
        print!("{}", printer::format_program(&program));
    }

    Evaluator::new().evaluate_program(&program)
}

/// Evaluate `source` and print the result, or report the error.
/// Returns whether evaluation succeeded.
pub fn run(source: &str, filename: Option<&str>, opts: &RunOptions) -> bool {
    match evaluate_verbose(source, opts) {
        Ok(value) => {
            println!("{}", Value(value));
            true
        }
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

/// Output of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub output: String,
    pub failures: usize,
}

enum LineOutcome {
    Copied(String),
    Evaluated(f64),
    Failed(ExprError),
}

/// Evaluate each line of `input` independently.
///
/// Blank and `#` lines are copied through trimmed; a failing line becomes
/// `error: <message>` and the rest of the batch still runs.
pub fn process_batch(input: &str, opts: &RunOptions) -> BatchReport {
    let lines: Vec<&str> = input.lines().map(str::trim).collect();

    let outcomes: Vec<LineOutcome> = lines
        .par_iter()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                LineOutcome::Copied(line.to_string())
            } else {
                match evaluate(line) {
                    Ok(value) => LineOutcome::Evaluated(value),
                    Err(error) => LineOutcome::Failed(error),
                }
            }
        })
        .collect();

    let mut output = String::new();
    let mut failures = 0;
    for (number, (line, outcome)) in lines.iter().zip(outcomes).enumerate() {
        match outcome {
            LineOutcome::Copied(text) => output.push_str(&text),
            LineOutcome::Evaluated(value) => {
                debug!(line = number + 1, value, "evaluated line");
                output.push_str(&Value(value).fixed(opts.precision));
            }
            LineOutcome::Failed(error) => {
                failures += 1;
                warn!(line = number + 1, %error, "line failed");
                let label = format!("line {}", number + 1);
                error.report(line, Some(label.as_str()));
                output.push_str(&format!("error: {}", error.message));
            }
        }
        output.push('\n');
    }

    BatchReport { output, failures }
}

/// Run a batch over the file at `input` and write the results to `output`.
pub fn process_file(input: &Path, output: &Path, opts: &RunOptions) -> io::Result<BatchReport> {
    let source = fs::read_to_string(input)?;
    let report = process_batch(&source, opts);
    fs::write(output, &report.output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        failures = report.failures,
        "batch complete"
    );
    Ok(report)
}
