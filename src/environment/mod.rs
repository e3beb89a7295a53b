//! Lexically scoped symbol tables.
//!
//! Both the analyzer and the interpreter resolve names through the same
//! parent-linked [`scope::Scope`]. The analyzer stores compile-time
//! [`symbols::Variable`] and [`symbols::Function`] bindings in it; the
//! interpreter stores live value cells and callables.

pub mod scope;
pub mod symbols;
