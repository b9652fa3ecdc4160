//! Parser module for building the syntax tree.
//!
//! This module contains the parser that turns the lexer's tokens into a
//! [`Program`](crate::ast::ast::Program). It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Statement parsing (`let`, `return`, expression statements)
//! - Expression parsing (prefix and binary operators, literals, grouping)
//! - Diagnostic accumulation with statement-level recovery
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
