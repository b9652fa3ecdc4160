use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("fn", TokenKind::Fn);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };

    /// Characters that always form a token on their own.
    ///
    /// `=` and `!` are absent: they need one byte of lookahead.
    pub static ref PUNCTUATION_LOOKUP: HashMap<u8, TokenKind> = {
        let mut map = HashMap::new();
        map.insert(b'+', TokenKind::Plus);
        map.insert(b'-', TokenKind::Dash);
        map.insert(b'*', TokenKind::Star);
        map.insert(b'/', TokenKind::Slash);
        map.insert(b'<', TokenKind::Less);
        map.insert(b'>', TokenKind::Greater);
        map.insert(b',', TokenKind::Comma);
        map.insert(b';', TokenKind::Semicolon);
        map.insert(b'(', TokenKind::OpenParen);
        map.insert(b')', TokenKind::CloseParen);
        map.insert(b'{', TokenKind::OpenCurly);
        map.insert(b'}', TokenKind::CloseCurly);
        map
    };
}

/// Classifies a maximal identifier run, falling back to `Identifier`.
pub fn lookup_identifier(literal: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(literal)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Illegal,
    Identifier,
    Int,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    Greater,

    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    Fn,
    True,
    False,
    If,
    Else,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.value)
    }
}
