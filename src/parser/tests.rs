//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Let and return statements
//! - Expression statements and literals
//! - Prefix and binary operators with precedence
//! - Diagnostics and statement-level recovery

use crate::{
    ast::ast::{Expression, Node, Program, Statement},
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::{
    expr::parse_binary_expr,
    lookups::BindingPower,
    parser::{parse, Parser, MAX_NESTING_DEPTH},
};

fn parse_source(source: &str) -> (Program, Vec<Error>) {
    parse(source.to_string(), Some("test.monkey".to_string()))
}

fn parse_clean(source: &str) -> Program {
    let (program, errors) = parse_source(source);
    assert!(errors.is_empty(), "unexpected parser errors: {:?}", errors);
    program
}

fn single_expression(source: &str) -> Expression {
    let program = parse_clean(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Statement::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_clean("let x = 5;let y= 10;let foobar = 123;");

    assert_eq!(program.len(), 3);
    for (stmt, expected) in program.iter().zip(["x", "y", "foobar"]) {
        match stmt {
            Statement::Let(let_stmt) => {
                assert_eq!(let_stmt.token_literal(), "let");
                assert_eq!(let_stmt.name.value, expected);
                assert_eq!(let_stmt.name.token_literal(), expected);
                assert!(let_stmt.value.is_none());
            }
            other => panic!("expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_return_statement() {
    let program = parse_clean("return 12 + 5;");

    assert_eq!(program.len(), 1);
    match &program.statements[0] {
        Statement::Return(stmt) => {
            assert_eq!(stmt.token_literal(), "return");
            assert!(stmt.value.is_none());
        }
        other => panic!("expected return statement, got {:?}", other),
    }
}

#[test]
fn test_unterminated_let_stops_at_eof() {
    let program = parse_clean("let x = 5");

    assert_eq!(program.len(), 1);
    assert!(matches!(program.statements[0], Statement::Let(_)));

    let program = parse_clean("return");
    assert_eq!(program.len(), 1);
}

#[test_log::test]
fn test_parse_let_missing_assignment() {
    let (program, errors) = parse_source("let x 5;");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            found: TokenKind::Int,
        }
    );
    assert_eq!(errors[0].get_position().0, 6);
    assert!(program.iter().all(|stmt| !matches!(stmt, Statement::Let(_))));
}

#[test]
fn test_parse_let_missing_identifier() {
    let (_, errors) = parse_source("let = 10;");

    assert_eq!(
        errors[0].to_string(),
        "expected next token to be Identifier, got Assignment instead"
    );
}

#[test]
fn test_parse_identifier_expression() {
    let expr = single_expression("foobar;");

    match expr {
        Expression::Identifier(ident) => {
            assert_eq!(ident.value, "foobar");
            assert_eq!(ident.token_literal(), "foobar");
        }
        other => panic!("expected identifier, got {:?}", other),
    }
}

#[test]
fn test_parse_integer_literal() {
    let program = parse_clean("5;");

    assert_eq!(program.len(), 1);
    let Statement::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    match &stmt.expression {
        Expression::Integer(int) => {
            assert_eq!(int.value, 5);
            assert_eq!(int.token_literal(), "5");
        }
        other => panic!("expected integer literal, got {:?}", other),
    }
}

#[test]
fn test_parse_boolean_literals() {
    for (source, expected) in [("true;", true), ("false", false)] {
        match single_expression(source) {
            Expression::Boolean(boolean) => assert_eq!(boolean.value, expected),
            other => panic!("expected boolean literal, got {:?}", other),
        }
    }
}

#[test]
fn test_semicolon_is_optional() {
    let program = parse_clean("a b; c");

    assert_eq!(program.to_string(), "abc");
    assert_eq!(program.len(), 3);
}

#[test]
fn test_parse_prefix_expressions() {
    let cases = [
        ("!5;", "!", "5"),
        ("-15;", "-", "15"),
        ("!foobar;", "!", "foobar"),
        ("-foobar;", "-", "foobar"),
        ("!true;", "!", "true"),
        ("!false;", "!", "false"),
    ];

    for (source, operator, operand) in cases {
        match single_expression(source) {
            Expression::Prefix(prefix) => {
                assert_eq!(prefix.operator, operator);
                assert_eq!(prefix.right.to_string(), operand);
            }
            other => panic!("expected prefix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5;", "5", "+", "5"),
        ("5 - 5;", "5", "-", "5"),
        ("5 * 5;", "5", "*", "5"),
        ("5 / 5;", "5", "/", "5"),
        ("5 > 5;", "5", ">", "5"),
        ("5 < 5;", "5", "<", "5"),
        ("5 == 5;", "5", "==", "5"),
        ("5 != 5;", "5", "!=", "5"),
        ("alice * bob;", "alice", "*", "bob"),
        ("true == true", "true", "==", "true"),
        ("true != false", "true", "!=", "false"),
    ];

    for (source, left, operator, right) in cases {
        match single_expression(source) {
            Expression::Infix(infix) => {
                assert_eq!(infix.left.to_string(), left);
                assert_eq!(infix.operator, operator);
                assert_eq!(infix.token_literal(), operator);
                assert_eq!(infix.right.to_string(), right);
            }
            other => panic!("expected infix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("a + b * c", "(a + (b * c))"),
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("true", "true"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a - b - c - d", "(((a - b) - c) - d)"),
    ];

    for (source, expected) in cases {
        let program = parse_clean(source);
        assert_eq!(program.to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_rendering_is_a_fixed_point() {
    let sources = [
        "a + b * c + d / e - f",
        "!(a == b) != -c",
        "((1)) + (2 * (3 - x)) / y",
        "-(-(-5)) < 4 == !false",
        "a * (b + c) * d",
    ];

    for source in sources {
        let once = parse_clean(source).to_string();
        let twice = parse_clean(&once).to_string();
        assert_eq!(once, twice, "source: {}", source);
    }
}

#[test_log::test]
fn test_bare_operator_has_no_prefix_handler() {
    let (program, errors) = parse_source("*");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::NoPrefixHandler {
            kind: TokenKind::Star
        }
    );

    let (program, errors) = parse_source("*;");
    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_illegal_token_has_no_prefix_handler() {
    let (program, errors) = parse_source("@");

    assert!(program.is_empty());
    assert_eq!(
        errors[0].to_string(),
        "no prefix parse function for Illegal found"
    );
}

#[test]
fn test_integer_overflow() {
    let (program, errors) = parse_source("99999999999999999999;");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NumberParseError");

    assert_eq!(
        single_expression("9223372036854775807").to_string(),
        "9223372036854775807"
    );
}

#[test]
fn test_leading_zero_is_octal() {
    let cases = [("010", 8), ("0", 0), ("00", 0), ("0777", 511), ("10", 10)];

    for (source, expected) in cases {
        match single_expression(source) {
            Expression::Integer(int) => {
                assert_eq!(int.value, expected, "value of {}", source);
                assert_eq!(int.token_literal(), source);
            }
            other => panic!("expected integer literal, got {:?}", other),
        }
    }
}

#[test]
fn test_invalid_octal_digit() {
    let (program, errors) = parse_source("09;");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::NumberParseError {
            token: "09".to_string()
        }
    );
}

#[test]
fn test_deep_grouping_is_reported() {
    let depth = 10_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let (_, errors) = parse_source(&source);

    assert!(errors.iter().any(|e| e.get_kind()
        == &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }));
    // Raised at the first paren past the limit.
    assert_eq!(errors[0].get_error_name(), "NestingTooDeep");
    assert_eq!(errors[0].get_position().0 as usize, MAX_NESTING_DEPTH);
}

#[test]
fn test_deep_prefix_chain_is_reported() {
    let source = format!("{}1", "-".repeat(10_000));
    let (_, errors) = parse_source(&source);

    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.get_error_name() == "NestingTooDeep"));
}

#[test]
fn test_nesting_below_limit_parses() {
    let depth = 200;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_clean(&source).to_string(), "1");

    let source = format!("{}x", "!".repeat(depth));
    let expected = format!("{}x{}", "(!".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_clean(&source).to_string(), expected);
}

#[test]
fn test_nesting_depth_resets_between_statements() {
    let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let source = format!("{0};{0};{0}", deep);

    assert_eq!(parse_clean(&source).len(), 3);
}

#[test]
fn test_missing_right_operand() {
    let (program, errors) = parse_source("1 + ;");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::NoPrefixHandler {
            kind: TokenKind::Semicolon
        }
    );
}

#[test]
fn test_unclosed_group() {
    let (program, errors) = parse_source("(1 + 2");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            found: TokenKind::EOF,
        }
    );
}

#[test]
fn test_recovery_continues_after_bad_statements() {
    let (program, errors) = parse_source("let x 5; let y = 10; *; foo;");

    assert_eq!(errors.len(), 2);
    assert_eq!(program.len(), 3);
    assert!(matches!(program.statements[0], Statement::Expression(_)));
    assert!(matches!(program.statements[1], Statement::Let(_)));
    assert_eq!(program.statements[2].to_string(), "foo");
}

#[test]
fn test_error_messages() {
    let mut parser = Parser::new(Lexer::new("let 5; -;".to_string(), None));
    parser.parse_program();

    let messages = parser.error_messages();
    assert_eq!(
        messages[0],
        "expected next token to be Identifier, got Int instead"
    );
    assert_eq!(messages.last().unwrap(), "no prefix parse function for Semicolon found");
    assert_eq!(parser.errors()[0].get_position().1.as_str(), "shell");
}

#[test]
fn test_expect_peek_does_not_advance_on_mismatch() {
    let mut parser = Parser::new(Lexer::new("let x".to_string(), None));

    assert!(parser.expect_peek(TokenKind::Assignment).is_none());
    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Identifier);

    let token = parser.expect_peek(TokenKind::Identifier).unwrap();
    assert_eq!(token.value, "x");
    assert_eq!(parser.current_token_kind(), TokenKind::Identifier);
    assert_eq!(parser.peek_token_kind(), TokenKind::EOF);
    assert_eq!(parser.errors().len(), 1);
}

#[test]
fn test_unlisted_kinds_bind_at_default() {
    let parser = Parser::new(Lexer::new(String::new(), None));

    assert_eq!(parser.get_bp_lookup().get(&TokenKind::Star), Some(&BindingPower::Multiplicative));
    assert_eq!(parser.get_bp_lookup().get(&TokenKind::Semicolon), None);
    assert_eq!(parser.peek_precedence(), BindingPower::Default);
    assert!(parser.get_nud_lookup().contains_key(&TokenKind::Dash));
    assert!(parser.get_led_lookup().contains_key(&TokenKind::Dash));
}

#[test]
fn test_registering_infix_operator() {
    let mut parser = Parser::new(Lexer::new("a = b + c".to_string(), None));
    parser.led(TokenKind::Assignment, BindingPower::Equality, parse_binary_expr);

    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "(a = (b + c))");
}
