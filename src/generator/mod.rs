//! Java source generation.
//!
//! The generator prints an analyzed [`crate::ast::ast::Source`] as a single
//! `Main` class. It reads the bindings and types the analyzer wrote into the
//! tree and makes no semantic decisions of its own:
//!
//! - globals become fields, list globals become array fields
//! - functions become instance methods, `main` is wrapped by a static entry
//! - built-ins are called through their runtime names

pub mod expr;
pub mod generator;
pub mod stmt;

#[cfg(test)]
mod tests;
