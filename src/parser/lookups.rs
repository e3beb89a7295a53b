use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::expressions::BinaryOperator,
    lexer::tokens::{Token, TokenKind},
};

/// Precedence levels, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Logical,
    Comparison,
    Additive,
    Multiplicative,
    Primary,
}

impl BindingPower {
    /// The level operands of this level are parsed at.
    pub fn next(self) -> BindingPower {
        match self {
            BindingPower::Logical => BindingPower::Comparison,
            BindingPower::Comparison => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative | BindingPower::Primary => BindingPower::Primary,
        }
    }
}

lazy_static! {
    static ref OPERATOR_LOOKUP: HashMap<&'static str, (BinaryOperator, BindingPower)> =
        HashMap::from([
            ("&&", (BinaryOperator::And, BindingPower::Logical)),
            ("||", (BinaryOperator::Or, BindingPower::Logical)),
            ("<", (BinaryOperator::Less, BindingPower::Comparison)),
            (">", (BinaryOperator::Greater, BindingPower::Comparison)),
            ("==", (BinaryOperator::Equal, BindingPower::Comparison)),
            ("!=", (BinaryOperator::NotEqual, BindingPower::Comparison)),
            ("+", (BinaryOperator::Add, BindingPower::Additive)),
            ("-", (BinaryOperator::Subtract, BindingPower::Additive)),
            ("*", (BinaryOperator::Multiply, BindingPower::Multiplicative)),
            ("/", (BinaryOperator::Divide, BindingPower::Multiplicative)),
            ("^", (BinaryOperator::Power, BindingPower::Multiplicative)),
        ]);
}

/// The binary operator a token spells, with its precedence level.
pub fn lookup_operator(token: &Token) -> Option<(BinaryOperator, BindingPower)> {
    if token.kind != TokenKind::Operator {
        return None;
    }
    OPERATOR_LOOKUP.get(token.value.as_str()).copied()
}
