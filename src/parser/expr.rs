use crate::{
    ast::{
        ast::Expression,
        expressions::{BooleanLiteral, Identifier, InfixExpression, IntegerLiteral, PrefixExpression},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression starting at the current token.
///
/// On return the current token is the last token of the expression.
/// Nesting beyond [`super::parser::MAX_NESTING_DEPTH`] is reported instead of recursed into.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expression> {
    if !parser.enter_nesting() {
        return None;
    }

    let expr = parse_nested_expr(parser, bp);
    parser.leave_nesting();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expression> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let position = parser.get_position();
        parser.push_error(ErrorImpl::NoPrefixHandler { kind: token_kind }, position);
        return None;
    };

    let mut left = nud(parser)?;

    // While the lookahead binds tighter than bp, fold it into lhs
    while parser.peek_precedence() > bp {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Some(left);
        };

        parser.advance();
        let operator_bp = parser.current_precedence();
        left = led(parser, left, operator_bp)?;
    }

    Some(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Option<Expression> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Int => match parse_integer(&token.value) {
            Ok(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
            Err(_) => {
                let position = parser.get_position();
                parser.push_error(ErrorImpl::NumberParseError { token: token.value }, position);
                None
            }
        },
        TokenKind::Identifier => Some(Expression::Identifier(Identifier {
            value: token.value.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Some(Expression::Boolean(BooleanLiteral {
            value: token.kind == TokenKind::True,
            token,
        })),
        kind => {
            let position = parser.get_position();
            parser.push_error(ErrorImpl::NoPrefixHandler { kind }, position);
            None
        }
    }
}

/// A leading `0` on a multi-digit literal selects base 8, so `010` is 8
/// and `09` does not convert.
fn parse_integer(literal: &str) -> Result<i64, std::num::ParseIntError> {
    match literal.strip_prefix('0') {
        Some(digits) if !digits.is_empty() => i64::from_str_radix(digits, 8),
        _ => literal.parse::<i64>(),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expression> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Some(Expression::Prefix(PrefixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(rhs),
    }))
}

/// Right operand binds at the operator's own power, so equal-power
/// chains associate to the left.
pub fn parse_binary_expr(parser: &mut Parser, left: Expression, bp: BindingPower) -> Option<Expression> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Some(Expression::Infix(InfixExpression {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expression> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Some(expr)
}
