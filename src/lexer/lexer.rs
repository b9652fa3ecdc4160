use std::rc::Rc;

use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::{MK_SPAN, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind, PUNCTUATION_LOOKUP};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_]+").unwrap();
    static ref INTEGER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// Pull-based scanner over an ASCII byte sequence.
///
/// `ch` is the byte under examination and `None` once the input is
/// exhausted. `read_pos` always sits one byte past `pos`, which is the
/// only lookahead the scanner ever takes.
pub struct Lexer {
    source: String,
    pos: usize,
    read_pos: usize,
    ch: Option<u8>,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source,
            pos: 0,
            read_pos: 0,
            ch: None,
            file: file_name,
        };
        lexer.read_char();
        lexer
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Scans and returns the next token. Returns EOF forever once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;

        let token = match self.ch {
            None => {
                return self.emit(MK_TOKEN!(TokenKind::EOF, String::new(), MK_SPAN!(start, start, self.file)));
            }
            Some(b'=') => self.one_or_two(TokenKind::Assignment, TokenKind::Equals),
            Some(b'!') => self.one_or_two(TokenKind::Not, TokenKind::NotEquals),
            Some(c) if PUNCTUATION_LOOKUP.contains_key(&c) => {
                let kind = PUNCTUATION_LOOKUP[&c];
                self.single(kind)
            }
            Some(c) if is_letter(c) => {
                let literal = self.read_run(&IDENTIFIER_PATTERN);
                let kind = lookup_identifier(&literal);
                return self.emit(MK_TOKEN!(kind, literal, MK_SPAN!(start, self.pos, self.file)));
            }
            Some(c) if c.is_ascii_digit() => {
                let literal = self.read_run(&INTEGER_PATTERN);
                return self.emit(MK_TOKEN!(TokenKind::Int, literal, MK_SPAN!(start, self.pos, self.file)));
            }
            Some(_) => self.single(TokenKind::Illegal),
        };

        self.emit(token)
    }

    fn emit(&self, token: Token) -> Token {
        tracing::trace!(kind = %token.kind, literal = %token.value, offset = token.span.start.0, "scanned token");
        token
    }

    /// Builds a token from the current byte and steps past it.
    ///
    /// A byte that is not valid UTF-8 on its own (part of a multi-byte
    /// character) becomes U+FFFD.
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        let literal = self.current_literal();
        self.read_char();

        MK_TOKEN!(kind, literal, MK_SPAN!(start, self.pos, self.file))
    }

    /// `=`/`!` become `==`/`!=` when the lookahead byte is `=`.
    fn one_or_two(&mut self, one: TokenKind, two: TokenKind) -> Token {
        if self.peek_char() != Some(b'=') {
            return self.single(one);
        }

        let start = self.pos;
        let mut literal = self.current_literal();
        self.read_char();
        literal.push('=');
        self.read_char();

        MK_TOKEN!(two, literal, MK_SPAN!(start, self.pos, self.file))
    }

    fn current_literal(&self) -> String {
        match self.ch {
            Some(c) => String::from_utf8_lossy(&[c]).into_owned(),
            None => String::new(),
        }
    }

    /// Consumes the maximal run matched by `pattern` at the cursor.
    fn read_run(&mut self, pattern: &Regex) -> String {
        let remainder = &self.source.as_bytes()[self.pos..];
        let len = pattern.find(remainder).map(|m| m.end()).unwrap_or(0);
        let literal = String::from_utf8_lossy(&remainder[..len]).into_owned();

        self.advance_n(len);
        literal
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.read_char();
        }
    }

    fn read_char(&mut self) {
        self.ch = self.source.as_bytes().get(self.read_pos).copied();
        self.pos = self.read_pos.min(self.source.len());
        self.read_pos = self.pos + 1;
    }

    fn peek_char(&self) -> Option<u8> {
        self.source.as_bytes().get(self.read_pos).copied()
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.read_char();
        }
    }
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Drains a fresh lexer over `source`, EOF token included.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    tokens
}
