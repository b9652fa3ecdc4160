//! Lexical analysis module.
//!
//! This module contains the scanner that turns source text into tokens
//! one at a time for the parser. It handles:
//!
//! - Recognition of keywords, identifiers, integers and operators
//! - One byte of lookahead for `==` and `!=`
//! - Token position tracking for error reporting
//! - Illegal input surfaced as a token kind, never as an error

pub mod lexer;
pub mod tokens;
