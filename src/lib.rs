// Expressive: arithmetic expression evaluator library
//
// Text is lexed into tokens, parsed into an expression tree and walked to
// produce a single f64. Each stage reports failures as an `ExprError`.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, Program, UnaryOp};
pub use error::{ErrorKind, ExprError, Span};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use runner::RunOptions;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{evaluate, process_batch, process_file, run};
