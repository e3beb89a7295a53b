use std::rc::Rc;

use crate::environment::symbols::Variable;

use super::expressions::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    /// `let name (: Type)? (= value)? ;`
    Declaration {
        name: String,
        type_name: Option<String>,
        value: Option<Expr>,
        variable: Option<Rc<Variable>>,
    },
    Assignment {
        receiver: Expr,
        value: Expr,
    },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    Switch {
        condition: Expr,
        cases: Vec<Case>,
    },
    Return {
        value: Expr,
    },
}

/// One arm of a switch. A case without a value is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: Option<Expr>,
    pub body: Vec<Stmt>,
}

impl Case {
    pub fn is_default(&self) -> bool {
        self.value.is_none()
    }
}
