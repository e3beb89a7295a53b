//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive descent parser that transforms a
//! stream of tokens into a [`crate::ast::ast::Source`]. It handles:
//!
//! - Top level `val`/`var` globals followed by `fun` definitions
//! - Statement parsing (declarations, assignments, control flow, returns)
//! - Expression parsing with one left-associative loop per precedence level
//! - Decoding literal text into exact values
//!
//! Operator precedence comes from a lookup table in [`lookups`]. The parser
//! never backtracks and stops at the first error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
