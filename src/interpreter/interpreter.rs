use std::{
    cell::RefCell,
    fmt::Debug,
    io::Write,
    rc::{Rc, Weak},
};

use num_traits::ToPrimitive;

use crate::{
    ast::{
        ast::{FunctionDecl, Source},
        expressions::{Expr, ExprKind},
        statements::Stmt,
    },
    environment::scope::{Environment, Scope, ScopeRef},
    errors::errors::{Error, RuntimeError},
};

use super::{operators::apply_binary, values::RuntimeValue};

/// A mutable slot holding a variable's current value.
pub type Cell = Rc<RefCell<RuntimeValue>>;

pub type RuntimeScope<'a> = ScopeRef<Cell, RuntimeFunction<'a>>;

pub type NativeFunction = fn(&mut dyn Write, &[RuntimeValue]) -> Result<RuntimeValue, RuntimeError>;

#[derive(Clone)]
pub enum RuntimeFunction<'a> {
    /// A function from the program. Its body runs in a child of `scope`,
    /// the scope it was defined in.
    User {
        decl: &'a FunctionDecl,
        scope: Weak<RefCell<Scope<Cell, RuntimeFunction<'a>>>>,
    },
    Native {
        name: &'static str,
        call: NativeFunction,
    },
}

impl Debug for RuntimeFunction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeFunction::User { decl, .. } => write!(f, "<fun {}/{}>", decl.name, decl.arity()),
            RuntimeFunction::Native { name, .. } => write!(f, "<native {}>", name),
        }
    }
}

/// The outcome of executing a statement.
#[derive(Debug, PartialEq)]
pub enum Control {
    Continue,
    Returning(RuntimeValue),
}

fn print(output: &mut dyn Write, arguments: &[RuntimeValue]) -> Result<RuntimeValue, RuntimeError> {
    let value = arguments.first().unwrap_or(&RuntimeValue::Nil);
    writeln!(output, "{}", value).map_err(|error| RuntimeError::Output {
        message: error.to_string(),
    })?;
    Ok(RuntimeValue::Nil)
}

pub struct Interpreter<'a> {
    pub env: Environment<Cell, RuntimeFunction<'a>>,
    output: Box<dyn Write + 'a>,
}

impl<'a> Interpreter<'a> {
    /// An interpreter that prints to standard output.
    pub fn new() -> Self {
        Interpreter::with_output(Box::new(std::io::stdout()))
    }

    pub fn with_output(output: Box<dyn Write + 'a>) -> Self {
        let scope = Scope::root();
        scope.borrow_mut().define_function(
            "print",
            1,
            RuntimeFunction::Native {
                name: "print",
                call: print,
            },
        );

        Interpreter {
            env: Environment::new(scope),
            output,
        }
    }

    pub fn scope(&self) -> RuntimeScope<'a> {
        self.env.global()
    }

    /// Runs an analyzed program and returns `main`'s value as an exit status.
    pub fn run(&mut self, source: &'a Source) -> Result<i32, Error> {
        self.load(source)?;
        let value = self.call("main", vec![])?;
        self.output.flush().map_err(|error| RuntimeError::Output {
            message: error.to_string(),
        })?;
        Ok(exit_code(value)?)
    }

    /// Evaluates every global in order and binds every function.
    pub fn load(&mut self, source: &'a Source) -> Result<(), RuntimeError> {
        for global in &source.globals {
            let value = match &global.value {
                Some(value) => evaluate_expr(self, value)?,
                None => RuntimeValue::Nil,
            };
            tracing::debug!(name = %global.name, %value, "defined global");
            self.env
                .define_variable(&global.name, Rc::new(RefCell::new(value)));
        }

        for function in &source.functions {
            let runtime = RuntimeFunction::User {
                decl: function,
                scope: Rc::downgrade(&self.env.current()),
            };
            self.env
                .define_function(&function.name, function.arity(), runtime);
        }

        Ok(())
    }

    /// Calls the function bound to `(name, arguments.len())`.
    pub fn call(
        &mut self,
        name: &str,
        arguments: Vec<RuntimeValue>,
    ) -> Result<RuntimeValue, RuntimeError> {
        let function = self
            .env
            .lookup_function(name, arguments.len())
            .ok_or_else(|| RuntimeError::FunctionNotDeclared {
                function: name.to_string(),
                arity: arguments.len(),
            })?;

        self.invoke(function, arguments)
    }

    pub fn invoke(
        &mut self,
        function: RuntimeFunction<'a>,
        arguments: Vec<RuntimeValue>,
    ) -> Result<RuntimeValue, RuntimeError> {
        let (decl, scope) = match function {
            RuntimeFunction::Native { call, .. } => return call(&mut *self.output, &arguments),
            RuntimeFunction::User { decl, scope } => (decl, scope),
        };

        if decl.arity() != arguments.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: decl.name.clone(),
                expected: decl.arity(),
                received: arguments.len(),
            });
        }

        let definition = scope
            .upgrade()
            .ok_or_else(|| RuntimeError::FunctionNotDeclared {
                function: decl.name.clone(),
                arity: decl.arity(),
            })?;

        tracing::debug!(name = %decl.name, arity = decl.arity(), "calling function");

        let callee = Scope::child(&definition);
        for (parameter, argument) in decl.parameters.iter().zip(arguments) {
            callee
                .borrow_mut()
                .define_variable(parameter, Rc::new(RefCell::new(argument)));
        }

        let caller = self.env.enter(callee);
        let result = execute_stmts(self, &decl.body);
        self.env.restore(caller);

        match result? {
            Control::Returning(value) => Ok(value),
            Control::Continue => Ok(RuntimeValue::Nil),
        }
    }
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn exit_code(value: RuntimeValue) -> Result<i32, RuntimeError> {
    match value {
        RuntimeValue::Integer(value) => value
            .to_i32()
            .ok_or_else(|| RuntimeError::ExitCodeOutOfRange {
                value: value.to_string(),
            }),
        other => Err(RuntimeError::UnexpectedValue {
            expected: String::from("Integer"),
            received: other.kind_name().to_string(),
        }),
    }
}

pub fn execute_stmt(interpreter: &mut Interpreter, stmt: &Stmt) -> Result<Control, RuntimeError> {
    match stmt {
        Stmt::Expression(expr) => {
            evaluate_expr(interpreter, expr)?;
        }
        Stmt::Declaration { name, value, .. } => {
            let value = match value {
                Some(value) => evaluate_expr(interpreter, value)?,
                None => RuntimeValue::Nil,
            };
            interpreter
                .env
                .define_variable(name, Rc::new(RefCell::new(value)));
        }
        Stmt::Assignment { receiver, value } => execute_assignment(interpreter, receiver, value)?,
        Stmt::If {
            condition,
            then_body,
            else_body,
        } => {
            let body = if evaluate_condition(interpreter, condition)? {
                then_body
            } else {
                else_body
            };
            return execute_block(interpreter, body);
        }
        Stmt::While { condition, body } => {
            while evaluate_condition(interpreter, condition)? {
                if let Control::Returning(value) = execute_block(interpreter, body)? {
                    return Ok(Control::Returning(value));
                }
            }
        }
        Stmt::Switch { condition, cases } => {
            let value = evaluate_expr(interpreter, condition)?;
            for case in cases {
                let selected = match &case.value {
                    Some(candidate) => evaluate_expr(interpreter, candidate)? == value,
                    None => true,
                };
                if selected {
                    return execute_block(interpreter, &case.body);
                }
            }
        }
        Stmt::Return { value } => {
            return Ok(Control::Returning(evaluate_expr(interpreter, value)?));
        }
    }

    Ok(Control::Continue)
}

/// Runs `body` in a fresh child scope.
pub fn execute_block(interpreter: &mut Interpreter, body: &[Stmt]) -> Result<Control, RuntimeError> {
    interpreter.env.push_scope();
    let result = execute_stmts(interpreter, body);
    interpreter.env.pop_scope();
    result
}

fn execute_stmts(interpreter: &mut Interpreter, body: &[Stmt]) -> Result<Control, RuntimeError> {
    for stmt in body {
        if let Control::Returning(value) = execute_stmt(interpreter, stmt)? {
            return Ok(Control::Returning(value));
        }
    }
    Ok(Control::Continue)
}

fn evaluate_condition(interpreter: &mut Interpreter, condition: &Expr) -> Result<bool, RuntimeError> {
    match evaluate_expr(interpreter, condition)? {
        RuntimeValue::Boolean(value) => Ok(value),
        other => Err(RuntimeError::UnexpectedValue {
            expected: String::from("Boolean"),
            received: other.kind_name().to_string(),
        }),
    }
}

fn execute_assignment(
    interpreter: &mut Interpreter,
    receiver: &Expr,
    value: &Expr,
) -> Result<(), RuntimeError> {
    let ExprKind::Access { offset, name, .. } = &receiver.kind else {
        return Err(RuntimeError::InvalidAssignmentTarget);
    };

    let value = evaluate_expr(interpreter, value)?;
    let cell = lookup_cell(interpreter, name)?;

    match offset {
        None => {
            *cell.borrow_mut() = value;
        }
        Some(offset) => {
            let index = evaluate_expr(interpreter, offset)?;
            let mut target = cell.borrow_mut();
            let RuntimeValue::Sequence(items) = &mut *target else {
                return Err(RuntimeError::NotASequence {
                    variable: name.clone(),
                });
            };
            let slot = index_slot(&index, items.len())?;
            items[slot] = value;
        }
    }

    Ok(())
}

fn lookup_cell(interpreter: &Interpreter, name: &str) -> Result<Cell, RuntimeError> {
    interpreter
        .env
        .lookup_variable(name)
        .ok_or_else(|| RuntimeError::VariableNotDeclared {
            variable: name.to_string(),
        })
}

/// Checks `index` against a sequence of `length` items.
fn index_slot(index: &RuntimeValue, length: usize) -> Result<usize, RuntimeError> {
    let RuntimeValue::Integer(index) = index else {
        return Err(RuntimeError::UnexpectedValue {
            expected: String::from("Integer"),
            received: index.kind_name().to_string(),
        });
    };

    match index.to_usize() {
        Some(slot) if slot < length => Ok(slot),
        _ => Err(RuntimeError::IndexOutOfRange {
            index: index.to_string(),
            length,
        }),
    }
}

pub fn evaluate_expr(interpreter: &mut Interpreter, expr: &Expr) -> Result<RuntimeValue, RuntimeError> {
    match &expr.kind {
        ExprKind::Literal(literal) => Ok(RuntimeValue::from(literal)),
        ExprKind::Group(inner) => evaluate_expr(interpreter, inner),
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left = evaluate_expr(interpreter, left)?;
            let right = evaluate_expr(interpreter, right)?;
            apply_binary(*operator, left, right)
        }
        ExprKind::Access { offset, name, .. } => {
            let cell = lookup_cell(interpreter, name)?;
            match offset {
                None => {
                    let value = cell.borrow().clone();
                    Ok(value)
                }
                Some(offset) => {
                    let index = evaluate_expr(interpreter, offset)?;
                    let value = cell.borrow();
                    let RuntimeValue::Sequence(items) = &*value else {
                        return Err(RuntimeError::NotASequence {
                            variable: name.clone(),
                        });
                    };
                    let slot = index_slot(&index, items.len())?;
                    Ok(items[slot].clone())
                }
            }
        }
        ExprKind::Call {
            name, arguments, ..
        } => {
            let arguments = arguments
                .iter()
                .map(|argument| evaluate_expr(interpreter, argument))
                .collect::<Result<Vec<RuntimeValue>, RuntimeError>>()?;
            interpreter.call(name, arguments)
        }
        ExprKind::List { elements, .. } => {
            let items = elements
                .iter()
                .map(|element| evaluate_expr(interpreter, element))
                .collect::<Result<Vec<RuntimeValue>, RuntimeError>>()?;
            Ok(RuntimeValue::Sequence(items))
        }
    }
}
