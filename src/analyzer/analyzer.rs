use std::rc::Rc;

use crate::{
    ast::{
        ast::{FunctionDecl, Global, Source},
        expressions::Expr,
        types::{require_assignable, Type},
    },
    environment::{
        scope::{Environment, Scope, ScopeRef},
        symbols::{Function, Variable},
    },
    errors::errors::{Error, SemanticError},
};

use super::{
    expr::{analyze_expr, analyze_list_literal},
    stmt::analyze_stmt,
};

pub type AnalyzerScope = ScopeRef<Rc<Variable>, Rc<Function>>;

/// The function whose body is being analyzed.
pub struct FunctionContext {
    pub function: Rc<Function>,
    pub returns: usize,
}

pub struct Analyzer {
    pub env: Environment<Rc<Variable>, Rc<Function>>,
    pub function: Option<FunctionContext>,
}

/// A root scope holding the built-in `print(Any): Nil`.
pub fn builtin_scope() -> AnalyzerScope {
    let scope = Scope::root();
    let mut print = Function::new("print", vec![Type::Any], Type::Nil);
    print.runtime_name = String::from("System.out.println");
    scope
        .borrow_mut()
        .define_function("print", 1, Rc::new(print));
    scope
}

impl Analyzer {
    /// An analyzer that defines globals and functions directly in `scope`.
    pub fn new(scope: AnalyzerScope) -> Self {
        Analyzer {
            env: Environment::new(scope),
            function: None,
        }
    }

    pub fn scope(&self) -> AnalyzerScope {
        self.env.global()
    }

    pub fn analyze(&mut self, source: &mut Source) -> Result<(), Error> {
        analyze_source(self, source).map_err(Error::from)
    }
}

/// Analyzes `source` against the built-in scope.
pub fn analyze(source: &mut Source) -> Result<(), Error> {
    Analyzer::new(builtin_scope()).analyze(source)
}

pub fn analyze_source(analyzer: &mut Analyzer, source: &mut Source) -> Result<(), SemanticError> {
    for global in source.globals.iter_mut() {
        analyze_global(analyzer, global)?;
    }

    for function in source.functions.iter_mut() {
        analyze_function(analyzer, function)?;
    }

    if !analyzer.scope().borrow().has_local_function("main", 0) {
        return Err(SemanticError::MissingMain);
    }

    Ok(())
}

pub fn resolve_type(name: &str) -> Result<Type, SemanticError> {
    Type::from_name(name).ok_or_else(|| SemanticError::UnknownType {
        type_: name.to_string(),
    })
}

fn analyze_global(analyzer: &mut Analyzer, global: &mut Global) -> Result<(), SemanticError> {
    let variable = declare_variable(
        analyzer,
        &global.name,
        global.type_name.as_deref(),
        global.value.as_mut(),
        global.mutable,
    )?;
    global.variable = Some(variable);
    Ok(())
}

/// Shared by globals and `let` declarations: resolves the declared type,
/// checks or infers it from the initializer and defines the variable in the
/// current scope.
pub fn declare_variable(
    analyzer: &mut Analyzer,
    name: &str,
    type_name: Option<&str>,
    value: Option<&mut Expr>,
    mutable: bool,
) -> Result<Rc<Variable>, SemanticError> {
    let declared = type_name.map(resolve_type).transpose()?;

    let variable = match value {
        Some(value) if value.is_list() => {
            let element_type = analyze_list_literal(analyzer, name, declared, value)?;
            Variable::list(name, element_type, mutable)
        }
        Some(value) => {
            let actual = analyze_expr(analyzer, value)?;
            let ty = match declared {
                Some(declared) => {
                    require_assignable(declared, actual)?;
                    declared
                }
                None => actual,
            };
            Variable::new(name, ty, mutable)
        }
        None => match declared {
            Some(declared) => Variable::new(name, declared, mutable),
            None => {
                return Err(SemanticError::ExpectedExplicitValue {
                    variable: name.to_string(),
                })
            }
        },
    };

    tracing::debug!(
        name,
        ty = %variable.ty,
        mutable,
        list = variable.is_list,
        "defined variable"
    );

    let variable = Rc::new(variable);
    analyzer.env.define_variable(name, Rc::clone(&variable));
    Ok(variable)
}

/// The return type a function is checked against. `main` returns `Integer`
/// whether or not it says so; any other function without an annotation
/// returns `Any`.
fn return_type(function: &FunctionDecl) -> Result<Type, SemanticError> {
    let is_main = function.name == "main" && function.arity() == 0;
    let declared = function
        .return_type_name
        .as_deref()
        .map(resolve_type)
        .transpose()?;

    match (is_main, declared) {
        (true, Some(Type::Integer)) | (true, None) => Ok(Type::Integer),
        (true, Some(received)) => Err(SemanticError::MainReturnType { received }),
        (false, Some(declared)) => Ok(declared),
        (false, None) => Ok(Type::Any),
    }
}

fn analyze_function(
    analyzer: &mut Analyzer,
    function: &mut FunctionDecl,
) -> Result<(), SemanticError> {
    let param_types = function
        .parameter_types
        .iter()
        .map(|name| resolve_type(name))
        .collect::<Result<Vec<Type>, SemanticError>>()?;
    let return_type = return_type(function)?;
    let arity = function.arity();

    if analyzer
        .env
        .current()
        .borrow()
        .has_local_function(&function.name, arity)
    {
        return Err(SemanticError::FunctionAlreadyDeclared {
            function: function.name.clone(),
            arity,
        });
    }

    // Defined before the body is visited so the body can call itself.
    let symbol = Rc::new(Function::new(&function.name, param_types, return_type));
    analyzer
        .env
        .define_function(&function.name, arity, Rc::clone(&symbol));
    function.function = Some(Rc::clone(&symbol));

    tracing::debug!(name = %function.name, arity, returns = %return_type, "defined function");

    analyzer.env.push_scope();
    for (name, ty) in function.parameters.iter().zip(symbol.param_types.iter()) {
        analyzer
            .env
            .define_variable(name, Rc::new(Variable::new(name, *ty, true)));
    }

    let previous = analyzer.function.replace(FunctionContext {
        function: Rc::clone(&symbol),
        returns: 0,
    });
    let result = function
        .body
        .iter_mut()
        .try_for_each(|stmt| analyze_stmt(analyzer, stmt));
    let context = std::mem::replace(&mut analyzer.function, previous);
    analyzer.env.pop_scope();
    result?;

    let returns = context.map_or(0, |context| context.returns);
    if returns == 0 && !matches!(return_type, Type::Nil | Type::Any) {
        return Err(SemanticError::MissingReturn {
            function: function.name.clone(),
            expected: return_type,
        });
    }

    Ok(())
}
