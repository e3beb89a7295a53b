//! Tree-walking evaluation.
//!
//! The interpreter runs an analyzed [`crate::ast::ast::Source`]: globals are
//! evaluated into the root scope, functions are bound without running their
//! bodies, and then `main` is called. Values are [`values::RuntimeValue`]s
//! held in shared cells so closures observe later assignments.

pub mod interpreter;
pub mod operators;
pub mod values;
