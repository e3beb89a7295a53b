//! Type system definitions for the AST.
//!
//! The language has a fixed set of primitive types plus two wildcards,
//! `Any` and `Comparable`, which only ever appear as declared or parameter
//! types. An expression's inferred type is always one of the primitives.

use std::fmt::Display;

use crate::errors::errors::SemanticError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Nil,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
    Any,
    Comparable,
}

impl Type {
    pub const ALL: [Type; 8] = [
        Type::Nil,
        Type::Boolean,
        Type::Integer,
        Type::Decimal,
        Type::Character,
        Type::String,
        Type::Any,
        Type::Comparable,
    ];

    /// Resolves a type name as written in source.
    pub fn from_name(name: &str) -> Option<Type> {
        Type::ALL.into_iter().find(|ty| ty.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Nil => "Nil",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
            Type::Any => "Any",
            Type::Comparable => "Comparable",
        }
    }

    /// The name of the matching type in generated Java source.
    pub fn jvm_name(&self) -> &'static str {
        match self {
            Type::Nil => "Void",
            Type::Boolean => "boolean",
            Type::Integer => "int",
            Type::Decimal => "double",
            Type::Character => "char",
            Type::String => "String",
            Type::Any => "Object",
            Type::Comparable => "Comparable",
        }
    }

    /// Whether values of this type have a natural ordering.
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::Decimal | Type::Character | Type::String
        )
    }

    /// Whether a value of type `actual` may be stored where `self` is expected.
    pub fn accepts(&self, actual: Type) -> bool {
        match self {
            Type::Any => true,
            target if *target == actual => true,
            Type::Comparable => actual.is_comparable(),
            _ => false,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The single assignability rule used for initializers, assignments, call
/// arguments, list elements and return values.
pub fn require_assignable(target: Type, actual: Type) -> Result<(), SemanticError> {
    if target.accepts(actual) {
        Ok(())
    } else {
        Err(SemanticError::TypeMatchError {
            expected: target,
            received: actual,
        })
    }
}
