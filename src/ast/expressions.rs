use std::rc::Rc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::environment::symbols::{Function, Variable};

use super::types::Type;

/// A decoded literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Character(char),
    String(String),
    Integer(BigInt),
    Decimal(BigDecimal),
}

impl Literal {
    pub fn get_type(&self) -> Type {
        match self {
            Literal::Nil => Type::Nil,
            Literal::Boolean(_) => Type::Boolean,
            Literal::Character(_) => Type::Character,
            Literal::String(_) => Type::String,
            Literal::Integer(_) => Type::Integer,
            Literal::Decimal(_) => Type::Decimal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Less,
    Greater,
    Equal,
    NotEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
        }
    }
}

/// An expression together with the type the analyzer inferred for it.
///
/// `ty` is `None` straight out of the parser and is written exactly once
/// during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Group(Box<Expr>),
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A variable read, optionally indexed: `name` or `name[offset]`.
    Access {
        offset: Option<Box<Expr>>,
        name: String,
        variable: Option<Rc<Variable>>,
    },
    Call {
        name: String,
        arguments: Vec<Expr>,
        function: Option<Rc<Function>>,
    },
    List {
        elements: Vec<Expr>,
        element_type: Option<Type>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, ty: None }
    }

    pub fn literal(literal: Literal) -> Self {
        Expr::new(ExprKind::Literal(literal))
    }

    pub fn access(name: String, offset: Option<Expr>) -> Self {
        Expr::new(ExprKind::Access {
            offset: offset.map(Box::new),
            name,
            variable: None,
        })
    }

    pub fn call(name: String, arguments: Vec<Expr>) -> Self {
        Expr::new(ExprKind::Call {
            name,
            arguments,
            function: None,
        })
    }

    pub fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn set_type(&mut self, ty: Type) {
        debug_assert!(self.ty.is_none(), "expression type written twice");
        self.ty = Some(ty);
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, ExprKind::List { .. })
    }
}
