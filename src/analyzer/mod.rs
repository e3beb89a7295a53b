//! Static analysis.
//!
//! The analyzer walks a parsed [`crate::ast::ast::Source`] once, resolving
//! every name against a chain of scopes and writing the inferred type into
//! every expression. It stops at the first [`SemanticError`].
//!
//! [`SemanticError`]: crate::errors::errors::SemanticError

pub mod analyzer;
pub mod expr;
pub mod stmt;

#[cfg(test)]
mod tests;
