//! Error types and error handling for the toolchain.
//!
//! This module defines the error types raised by each phase:
//!
//! - `ParseError` - malformed source or token sequence, with a source position
//! - `SemanticError` - static rule violations found by the analyzer
//! - `RuntimeError` - dynamic rule violations raised while evaluating
//! - `Error` - the union of the three, with a name and a tip for display

pub mod errors;

#[cfg(test)]
mod tests;
