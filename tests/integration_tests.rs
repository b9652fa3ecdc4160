//! Integration tests for end-to-end parsing.
//!
//! These tests drive the public API from source text through the lexer and
//! parser, and check the rendered program and the collected diagnostics.

use monkeylang::{
    ast::ast::{Expression, Node, Statement},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    render_error,
};

#[test]
fn test_parse_mixed_program() {
    let source = "
        let five = 5;
        let ten = 10;
        return five;
        five + ten * 2;
        !(five < ten) == false
    ";
    let (program, errors) = parse(source.to_string(), Some("mixed.monkey".to_string()));

    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(program.len(), 5);
    assert_eq!(program.token_literal(), "let");
    assert_eq!(
        program.to_string(),
        "let five = ;let ten = ;return ;(five + (ten * 2))((!(five < ten)) == false)"
    );
}

#[test]
fn test_parse_program_with_errors() {
    let source = "let x 5;\nlet = 1;\n3 > 5 == false;";
    let (program, errors) = parse(source.to_string(), Some("errors.monkey".to_string()));

    // Parsing keeps going past every bad statement.
    assert!(errors.len() >= 2);
    let last = program.statements.last().unwrap();
    assert_eq!(last.to_string(), "((3 > 5) == false)");
}

#[test]
fn test_render_parse_error() {
    let source = "let a = 1;\nlet b 2;";
    let (_, errors) = parse(source.to_string(), Some("render.monkey".to_string()));

    assert_eq!(errors.len(), 1);

    let rendered = render_error(&errors[0], source);
    let lines = rendered.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], "Error: UnexpectedToken (expected `Assignment`, found `Int`)");
    assert_eq!(lines[1], "-> render.monkey");
    assert_eq!(lines[3], "2 | let b 2;");
    assert_eq!(lines[4], "  | ------^");
}

#[test]
fn test_program_token_literals_round_trip() {
    let (program, errors) = parse("5;".to_string(), None);

    assert!(errors.is_empty());
    let Statement::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(stmt.token_literal(), "5");
    assert!(matches!(&stmt.expression, Expression::Integer(int) if int.value == 5));
}

#[test]
fn test_tokens_reproduce_punctuation() {
    let source = "=+-!*/<>,;(){}";
    let tokens = tokenize(source.to_string(), None);

    let rebuilt = tokens.iter().map(|t| t.value.as_str()).collect::<String>();
    assert_eq!(rebuilt, source);
    assert_eq!(tokens.len(), source.len() + 1);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
}
