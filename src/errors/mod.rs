//! Diagnostics produced while parsing.
//!
//! This module defines the error types the parser accumulates. It includes:
//!
//! - Error structures with source position information
//! - One variant per kind of malformed input the parser recognises
//! - Error names and suggestions for rendering

pub mod errors;
