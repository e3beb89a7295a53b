use std::{cmp::Ordering, fmt::Display};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::ast::expressions::Literal;

/// A live value.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    Sequence(Vec<RuntimeValue>),
}

impl RuntimeValue {
    /// The name of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeValue::Nil => "Nil",
            RuntimeValue::Boolean(_) => "Boolean",
            RuntimeValue::Integer(_) => "Integer",
            RuntimeValue::Decimal(_) => "Decimal",
            RuntimeValue::Character(_) => "Character",
            RuntimeValue::String(_) => "String",
            RuntimeValue::Sequence(_) => "Sequence",
        }
    }

    /// Natural ordering between two values of the same comparable kind.
    pub fn compare(&self, other: &RuntimeValue) -> Option<Ordering> {
        match (self, other) {
            (RuntimeValue::Integer(a), RuntimeValue::Integer(b)) => Some(a.cmp(b)),
            (RuntimeValue::Decimal(a), RuntimeValue::Decimal(b)) => Some(a.cmp(b)),
            (RuntimeValue::Character(a), RuntimeValue::Character(b)) => Some(a.cmp(b)),
            (RuntimeValue::String(a), RuntimeValue::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&Literal> for RuntimeValue {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => RuntimeValue::Nil,
            Literal::Boolean(value) => RuntimeValue::Boolean(*value),
            Literal::Character(value) => RuntimeValue::Character(*value),
            Literal::String(value) => RuntimeValue::String(value.clone()),
            Literal::Integer(value) => RuntimeValue::Integer(value.clone()),
            Literal::Decimal(value) => RuntimeValue::Decimal(value.clone()),
        }
    }
}

impl Display for RuntimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeValue::Nil => write!(f, "nil"),
            RuntimeValue::Boolean(value) => write!(f, "{}", value),
            RuntimeValue::Integer(value) => write!(f, "{}", value),
            RuntimeValue::Decimal(value) => write!(f, "{}", value),
            RuntimeValue::Character(value) => write!(f, "{}", value),
            RuntimeValue::String(value) => write!(f, "{}", value),
            RuntimeValue::Sequence(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}
