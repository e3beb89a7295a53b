//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into the token sequence the parser consumes. It handles:
//!
//! - Tokenization of source text using anchored regex patterns
//! - Identifiers (reserved words included), numbers, characters and strings
//! - Signed numeric literals versus the subtraction operator
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
