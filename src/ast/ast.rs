use std::rc::Rc;

use crate::environment::symbols::{Function, Variable};

use super::{expressions::Expr, statements::Stmt};

/// The root of a parsed program: every global, then every function.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<FunctionDecl>,
}

/// A top level `val`/`var` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub name: String,
    pub type_name: Option<String>,
    pub mutable: bool,
    pub value: Option<Expr>,
    pub variable: Option<Rc<Variable>>,
}

/// A top level `fun` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub parameters: Vec<String>,
    pub parameter_types: Vec<String>,
    pub return_type_name: Option<String>,
    pub body: Vec<Stmt>,
    pub function: Option<Rc<Function>>,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}
