//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser pulls tokens from its lexer one at a time, keeping the
//! current token and one token of lookahead, and uses a Pratt parser with
//! NUD/LED handlers for expressions.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Malformed input never aborts a pass. Handlers record a diagnostic and
//! return `None`; the program loop drops that statement and carries on.

use std::{collections::HashMap, mem};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest chain of nested expressions a single statement may contain.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token source, owned exclusively by this parser
    lexer: Lexer,
    /// Token under examination
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Diagnostics collected so far, in source order
    errors: Vec<Error>,
    /// Expressions currently being parsed, innermost included
    depth: usize,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// Pulls the first two tokens and registers every handler, so the
    /// parser is ready to call [`Parser::parse_program`].
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            errors: vec![],
            depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts the lookahead into the current slot, pulls a fresh lookahead
    /// and returns the token that was current.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        mem::replace(&mut self.current, mem::replace(&mut self.peek, next))
    }

    /// Advances onto the lookahead if it is of kind `expected_kind`.
    ///
    /// # Returns
    ///
    /// The new current token, or `None` after recording an
    /// `UnexpectedToken` diagnostic. The cursor does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Option<Token> {
        if self.peek.kind != expected_kind {
            let position = self.peek.span.start.clone();
            self.push_error(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek.kind,
                },
                position,
            );
            return None;
        }

        self.advance();
        Some(self.current.clone())
    }

    /// Binding power of the lookahead token.
    pub fn peek_precedence(&self) -> BindingPower {
        self.binding_power_of(self.peek.kind)
    }

    /// Binding power of the current token.
    pub fn current_precedence(&self) -> BindingPower {
        self.binding_power_of(self.current.kind)
    }

    fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Records a diagnostic at `position`.
    pub fn push_error(&mut self, error_impl: ErrorImpl, position: Position) {
        let error = Error::new(error_impl, position);
        tracing::debug!(offset = error.get_position().0, "{}", error);
        self.errors.push(error);
    }

    /// Steps one level into a nested expression.
    ///
    /// Returns `false` after recording a `NestingTooDeep` diagnostic at the
    /// current token when [`MAX_NESTING_DEPTH`] levels are already open.
    /// Every `true` must be paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            let position = self.get_position();
            self.push_error(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                position,
            );
            return false;
        }

        self.depth += 1;
        true
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Diagnostics recorded so far.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Diagnostics recorded so far, as human-readable messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Leaves the binding power table alone: a kind such as `-` can lead
    /// an expression and still act as an infix operator.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Parses statements until the current token is EOF.
    ///
    /// Statements that fail to build are dropped; parsing resumes from
    /// wherever the failed attempt left the cursor.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while self.current_token_kind() != TokenKind::EOF {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            self.advance();
        }

        tracing::debug!(
            file = %self.lexer.file(),
            statements = program.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        program
    }
}

/// Parses a complete source into a program.
///
/// This is the main entry point for parsing. It creates a lexer and a
/// parser, parses all statements until EOF and hands back whatever was
/// built together with every diagnostic. The caller decides whether any
/// diagnostic is fatal.
///
/// # Arguments
///
/// * `source` - The source text
/// * `file` - Optional source name carried into diagnostic positions
pub fn parse(source: String, file: Option<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (program, parser.into_errors())
}
