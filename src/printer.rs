//! Read-only dumps of tokens and trees for debugging.

use crate::ast::{Expr, Program};
use crate::lexer::Token;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Tabular dump: index, kind name and literal text, one token per row.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5} | {:>20} | {:>20}", "index", "type", "raw");
    for (i, token) in tokens.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>5} | {:>20} | {:>20}",
            i,
            token.token_type.name(),
            token.lexeme
        );
    }
    out
}

/// One node per line; children sit one indentation level below their parent.
pub fn format_tree(expr: &Expr) -> String {
    let mut out = String::new();
    write_node(&mut out, expr, 0);
    out
}

pub fn format_program(program: &Program) -> String {
    program.expressions.iter().map(format_tree).collect()
}

fn write_node(out: &mut String, expr: &Expr, depth: usize) {
    let _ = write!(out, "{}", INDENT.repeat(depth));
    match expr {
        Expr::Number { literal, .. } => {
            let _ = writeln!(out, "{}", literal);
        }
        Expr::Unary { operator, operand, .. } => {
            let _ = writeln!(out, "{}", operator);
            write_node(out, operand, depth + 1);
        }
        Expr::Binary {
            left,
            operator,
            right,
            ..
        } => {
            let _ = writeln!(out, "{}", operator);
            write_node(out, left, depth + 1);
            write_node(out, right, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::lexer::tokenize;

    #[test]
    fn tree_children_are_indented_one_level() {
        let tree = Expr::binary(
            Expr::number("1"),
            BinaryOp::Add,
            Expr::negate(Expr::number("2")),
        );
        assert_eq!(format_tree(&tree), "+\n  1\n  -\n    2\n");
    }

    #[test]
    fn token_table_has_header_and_rows() {
        let tokens = tokenize("1 + 2").unwrap();
        let table = format_tokens(&tokens);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], format!("{:>5} | {:>20} | {:>20}", "index", "type", "raw"));
        assert_eq!(lines[2], format!("{:>5} | {:>20} | {:>20}", 1, "TOKEN_PLUS", "+"));
        assert!(lines[4].contains("TOKEN_EOF"));
    }
}
