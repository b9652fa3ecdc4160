use crate::{
    ast::{
        ast::Statement,
        expressions::Identifier,
        statements::{ExpressionStatement, LetStatement, ReturnStatement},
    },
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Option<Statement> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Statement> {
    let start_token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = Identifier {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;

    // The value is not parsed yet, only skipped.
    skip_to_semicolon(parser);

    Some(Statement::Let(LetStatement {
        token: start_token,
        name,
        value: None,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Statement> {
    let start_token = parser.current_token().clone();

    skip_to_semicolon(parser);

    Some(Statement::Return(ReturnStatement {
        token: start_token,
        value: None,
    }))
}

/// The trailing `;` is optional and consumed even when the expression
/// failed, so a bad expression costs one diagnostic, not two.
pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Statement> {
    let start_token = parser.current_token().clone();

    let expression = parse_expr(parser, BindingPower::Default);

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Some(Statement::Expression(ExpressionStatement {
        token: start_token,
        expression: expression?,
    }))
}

/// Moves the cursor onto the next `;`, stopping early at EOF.
fn skip_to_semicolon(parser: &mut Parser) {
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Semicolon | TokenKind::EOF
    ) {
        parser.advance();
    }
}
