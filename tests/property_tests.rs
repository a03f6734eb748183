//! Property-based tests for the numeric-literal scanner and evaluation.
//!
//! Literals are generated from the accepted shapes (digit groups, optional
//! fraction, optional signed exponent) and then corrupted to produce shapes
//! the scanner must reject.

use expressive::error::ErrorKind;
use expressive::lexer::{tokenize, TokenType};
use expressive::{evaluate, Evaluator, Lexer, Parser};
use proptest::prelude::*;

/// Literals the scanner accepts.
fn valid_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex(
            r"[0-9]{1,3}(_[0-9]{1,3}){0,2}(\.([0-9]{1,3}(_[0-9]{1,3})?)?)?(e[+-]?[0-9]{1,2}(_[0-9])?)?"
        )
        .expect("valid regex"),
        prop::string::string_regex(r"\.[0-9]{1,3}(e[+-]?[0-9]{1,2})?").expect("valid regex"),
    ]
}

/// Suffixes that make any accepted literal invalid.
fn corrupting_suffix_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["__", "..", "ee", "_", "e", "+1", "-1"])
}

proptest! {
    #[test]
    fn valid_literals_lex_to_one_number_token(literal in valid_literal_strategy()) {
        let tokens = tokenize(&literal).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].token_type, TokenType::Number);
        prop_assert_eq!(&tokens[0].lexeme, &literal);
    }

    #[test]
    fn valid_literals_evaluate(literal in valid_literal_strategy()) {
        prop_assert!(evaluate(&literal).is_ok(), "{} failed to evaluate", literal);
    }

    #[test]
    fn corrupted_literals_fail_to_lex(
        literal in valid_literal_strategy(),
        suffix in corrupting_suffix_strategy(),
    ) {
        let source = format!("{}{}", literal, suffix);
        let error = tokenize(&source).unwrap_err();
        prop_assert_eq!(error.kind, ErrorKind::LexError);
    }

    #[test]
    fn number_lexemes_rescan_to_themselves(literal in valid_literal_strategy()) {
        let source = format!("-({} ^ 2) * {}", literal, literal);
        let tokens = tokenize(&source).unwrap();
        for token in tokens.iter().filter(|t| t.token_type == TokenType::Number) {
            let rescanned = tokenize(&token.lexeme).unwrap();
            prop_assert_eq!(&rescanned[0].lexeme, &token.lexeme);
        }
    }

    #[test]
    fn integer_arithmetic_matches_f64(a in 0u32..1_000_000, b in 0u32..1_000_000) {
        let expected = f64::from(a) - f64::from(b) * 2.0;
        prop_assert_eq!(evaluate(&format!("{} - {} * 2", a, b)).unwrap(), expected);
    }

    #[test]
    fn remainder_sign_follows_dividend(a in 1u32..10_000, b in 1u32..100) {
        let value = evaluate(&format!("-{} % {}", a, b)).unwrap();
        prop_assert_eq!(value, -(f64::from(a) % f64::from(b)));
        prop_assert!(value <= 0.0);
    }

    #[test]
    fn stages_agree_with_one_shot_evaluate(a in 1u32..1000, b in 1u32..1000) {
        let source = format!("({} + {}) / {} ^ 2", a, b, b);
        let tokens = Lexer::new(&source).scan_tokens().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let staged = Evaluator::new().evaluate_program(&program).unwrap();
        prop_assert_eq!(staged, evaluate(&source).unwrap());
    }
}
