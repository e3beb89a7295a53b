//! Unit tests for the analyzer.
//!
//! These cover name resolution, the typing of every expression kind, the
//! statement rules and the whole-program rules for `main`.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::analyzer::{analyze, builtin_scope, Analyzer};
use crate::{
    ast::{
        ast::{FunctionDecl, Source},
        expressions::{Expr, ExprKind, Literal},
        statements::{Case, Stmt},
        types::Type,
    },
    errors::errors::{Error, SemanticError},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn analyzed(source: &str) -> Result<Source, Error> {
    let tokens = tokenize(source, Some("test.plc".to_string()))?;
    let mut source = parse(tokens, Rc::new("test.plc".to_string()))?;
    analyze(&mut source)?;
    Ok(source)
}

fn semantic_error(source: &str) -> SemanticError {
    match analyzed(source) {
        Err(Error::Semantic(error)) => error,
        other => panic!("expected semantic error, found {:?}", other),
    }
}

/// Wraps `body` in a `main` that returns 0.
fn in_main(body: &str) -> String {
    format!("fun main() do {} return 0; end", body)
}

fn return_value(source: &Source, function: usize, statement: usize) -> &Expr {
    match &source.functions[function].body[statement] {
        Stmt::Return { value } => value,
        other => panic!("expected return, found {:?}", other),
    }
}

#[test]
fn test_global_and_return_are_typed() {
    let source = analyzed("val x = 5; fun main() do return x + 2; end").unwrap();

    let variable = source.globals[0].variable.as_ref().unwrap();
    assert_eq!(variable.ty, Type::Integer);
    assert!(!variable.mutable);

    let value = return_value(&source, 0, 0);
    assert_eq!(value.ty, Some(Type::Integer));
    match &value.kind {
        ExprKind::Binary { left, .. } => match &left.kind {
            ExprKind::Access { variable, .. } => {
                assert_eq!(variable.as_ref().map(|v| v.name.as_str()), Some("x"))
            }
            other => panic!("expected access, found {:?}", other),
        },
        other => panic!("expected binary, found {:?}", other),
    }

    let main = source.functions[0].function.as_ref().unwrap();
    assert_eq!(main.return_type, Type::Integer);
}

#[test]
fn test_declared_type_must_accept_value() {
    assert_eq!(
        semantic_error("val s: Integer = \"x\"; fun main() do return 0; end"),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::String
        }
    );
}

#[test]
fn test_wildcard_declarations() {
    assert!(analyzed(&in_main("let a: Any = 1; let c: Comparable = 'c';")).is_ok());
    assert_eq!(
        semantic_error(&in_main("let c: Comparable = true;")),
        SemanticError::TypeMatchError {
            expected: Type::Comparable,
            received: Type::Boolean
        }
    );
}

#[test]
fn test_declaration_needs_type_or_value() {
    assert_eq!(
        semantic_error(&in_main("let x;")),
        SemanticError::ExpectedExplicitValue {
            variable: "x".to_string()
        }
    );
    assert!(analyzed(&in_main("let x: Integer;")).is_ok());
}

#[test]
fn test_unknown_type() {
    assert_eq!(
        semantic_error("var x: Float; fun main() do return 0; end"),
        SemanticError::UnknownType {
            type_: "Float".to_string()
        }
    );
}

#[test]
fn test_undeclared_names() {
    assert_eq!(
        semantic_error("fun main() do return y; end"),
        SemanticError::VariableNotDeclared {
            variable: "y".to_string()
        }
    );
    assert_eq!(
        semantic_error(&in_main("f(1);")),
        SemanticError::FunctionNotDeclared {
            function: "f".to_string(),
            arity: 1
        }
    );
}

#[test]
fn test_call_arity_mismatch_is_unresolved() {
    assert_eq!(
        semantic_error(&in_main("print(1, 2);")),
        SemanticError::FunctionNotDeclared {
            function: "print".to_string(),
            arity: 2
        }
    );
}

#[test]
fn test_call_arguments_must_match_parameters() {
    let source = "fun f(a: Integer): Integer do return a; end fun main() do return f(1.5); end";
    assert_eq!(
        semantic_error(source),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::Decimal
        }
    );
}

#[test]
fn test_print_resolves_to_builtin() {
    let source = analyzed(&in_main("print(\"hi\");")).unwrap();
    match &source.functions[0].body[0] {
        Stmt::Expression(Expr {
            kind: ExprKind::Call { function, .. },
            ty,
        }) => {
            let function = function.as_ref().unwrap();
            assert_eq!(function.runtime_name, "System.out.println");
            assert_eq!(*ty, Some(Type::Nil));
        }
        other => panic!("expected call statement, found {:?}", other),
    }
}

#[test]
fn test_binary_operand_rules() {
    assert!(analyzed(&in_main("let a = 1 + 2 * 3 - 4 / 2 ^ 2;")).is_ok());
    assert!(analyzed(&in_main("let a = 1.5 * 2.0;")).is_ok());
    assert!(analyzed(&in_main("let s: String = \"n\" + 1;")).is_ok());
    assert!(analyzed(&in_main("let b: Boolean = 1 < 2 && 'a' == 'b' || \"x\" != \"y\";")).is_ok());

    assert_eq!(
        semantic_error(&in_main("let a = 1 + 1.5;")),
        SemanticError::InvalidOperands {
            operator: "+".to_string(),
            left: Type::Integer,
            right: Type::Decimal
        }
    );
    assert_eq!(
        semantic_error(&in_main("let a = 1.5 ^ 2.0;")),
        SemanticError::InvalidOperands {
            operator: "^".to_string(),
            left: Type::Decimal,
            right: Type::Decimal
        }
    );
    assert_eq!(
        semantic_error(&in_main("let a = 1 && true;")),
        SemanticError::InvalidOperands {
            operator: "&&".to_string(),
            left: Type::Integer,
            right: Type::Boolean
        }
    );
    assert_eq!(
        semantic_error(&in_main("let a = true < false;")),
        SemanticError::InvalidOperands {
            operator: "<".to_string(),
            left: Type::Boolean,
            right: Type::Boolean
        }
    );
    assert_eq!(
        semantic_error(&in_main("let a = 1 == 'c';")),
        SemanticError::InvalidOperands {
            operator: "==".to_string(),
            left: Type::Integer,
            right: Type::Character
        }
    );
}

#[test]
fn test_variables_are_typed_by_operands_not_literals() {
    assert!(analyzed(&in_main("let x = 1; let y: Integer = x + 1;")).is_ok());
}

#[test]
fn test_integer_literal_range() {
    assert!(analyzed(&in_main("let a = 2147483647; let b = -2147483648;")).is_ok());
    assert_eq!(
        semantic_error(&in_main("let a = 2147483648;")),
        SemanticError::LiteralOutOfRange {
            literal: "2147483648".to_string()
        }
    );
}

#[test]
fn test_decimal_literal_range() {
    assert!(analyzed(&in_main("let a = 3.14159;")).is_ok());
    assert!(matches!(
        semantic_error(&in_main("let a = 1.00000000000000000000001;")),
        SemanticError::LiteralOutOfRange { .. }
    ));
}

#[test]
fn test_conditions_must_be_boolean() {
    assert_eq!(
        semantic_error(&in_main("if 1 do print(1); end")),
        SemanticError::TypeMatchError {
            expected: Type::Boolean,
            received: Type::Integer
        }
    );
    assert_eq!(
        semantic_error(&in_main("while \"x\" do print(1); end")),
        SemanticError::TypeMatchError {
            expected: Type::Boolean,
            received: Type::String
        }
    );
}

#[test]
fn test_then_branch_must_not_be_empty() {
    assert_eq!(
        semantic_error(&in_main("if true do else print(1); end")),
        SemanticError::EmptyThenBranch
    );
}

#[test]
fn test_branch_scopes_are_discarded() {
    assert_eq!(
        semantic_error("fun main() do if true do let y = 1; end return y; end"),
        SemanticError::VariableNotDeclared {
            variable: "y".to_string()
        }
    );
}

#[test]
fn test_switch_case_types_must_match() {
    assert!(analyzed(
        "fun main() do switch 2 case 1: return 10; case 2: return 20; default: return 0; end end"
    )
    .is_ok());
    assert_eq!(
        semantic_error("fun main() do switch 2 case 'a': print(1); default: print(2); end return 0; end"),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::Character
        }
    );
}

#[test]
fn test_default_case_must_be_last() {
    let mut source = Source {
        globals: vec![],
        functions: vec![FunctionDecl {
            name: "main".to_string(),
            parameters: vec![],
            parameter_types: vec![],
            return_type_name: None,
            body: vec![
                Stmt::Switch {
                    condition: Expr::literal(Literal::Boolean(true)),
                    cases: vec![
                        Case {
                            value: None,
                            body: vec![],
                        },
                        Case {
                            value: Some(Expr::literal(Literal::Boolean(false))),
                            body: vec![],
                        },
                    ],
                },
                Stmt::Return {
                    value: Expr::literal(Literal::Integer(0.into())),
                },
            ],
            function: None,
        }],
    };

    let error = Analyzer::new(builtin_scope()).analyze(&mut source).unwrap_err();
    assert_eq!(error, Error::from(SemanticError::MisplacedDefaultCase));
}

#[test]
fn test_assignment_rules() {
    assert!(analyzed(&in_main("let x = 1; x = 2;")).is_ok());
    assert_eq!(
        semantic_error(&in_main("let x = 1; x = \"a\";")),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::String
        }
    );
    assert_eq!(
        semantic_error("val x = 1; fun main() do x = 2; return x; end"),
        SemanticError::ImmutableAssignment {
            variable: "x".to_string()
        }
    );
    assert_eq!(
        semantic_error(&in_main("f() = 2;")),
        SemanticError::InvalidAssignmentTarget
    );
}

#[test]
fn test_expression_statement_must_be_call() {
    assert_eq!(
        semantic_error(&in_main("let x = 1; x + 1;")),
        SemanticError::InvalidExpressionStatement
    );
}

#[test]
fn test_list_variables() {
    let source = analyzed("val l = [1, 2, 3]; fun main() do l[1] = 9; return l[1]; end").unwrap();
    let variable = source.globals[0].variable.as_ref().unwrap();
    assert!(variable.is_list);
    assert_eq!(variable.ty, Type::Integer);

    assert!(analyzed("var l: Decimal = [1.0, 2.5]; fun main() do return 0; end").is_ok());
}

#[test]
fn test_list_rules() {
    assert_eq!(
        semantic_error("val l = [1, 'a']; fun main() do return 0; end"),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::Character
        }
    );
    assert_eq!(
        semantic_error("val l = []; fun main() do return 0; end"),
        SemanticError::EmptyListLiteral {
            variable: "l".to_string()
        }
    );
    assert!(analyzed("val l: String = []; fun main() do return 0; end").is_ok());
    assert_eq!(
        semantic_error("val l = [1]; fun main() do return l; end"),
        SemanticError::ListRequiresIndex {
            variable: "l".to_string()
        }
    );
    assert_eq!(
        semantic_error("val x = 1; fun main() do return x[0]; end"),
        SemanticError::NotAList {
            variable: "x".to_string()
        }
    );
    assert_eq!(
        semantic_error("val l = [1]; fun main() do return l['a']; end"),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::Character
        }
    );
    assert_eq!(
        semantic_error(&in_main("print([1]);")),
        SemanticError::MisplacedListLiteral
    );
}

#[test]
fn test_recursive_function_resolves_itself() {
    let source = "fun fact(n: Integer): Integer do if n < 1 do return 1; end return n * fact(n - 1); end
                  fun main() do return fact(5); end";
    assert!(analyzed(source).is_ok());
}

#[test]
fn test_duplicate_function() {
    let source = "fun f() do print(1); end fun f() do print(2); end fun main() do return 0; end";
    assert_eq!(
        semantic_error(source),
        SemanticError::FunctionAlreadyDeclared {
            function: "f".to_string(),
            arity: 0
        }
    );

    let overloaded = "fun f() do print(1); end fun f(a: Any) do print(a); end fun main() do f(); f(1); return 0; end";
    assert!(analyzed(overloaded).is_ok());
}

#[test]
fn test_return_rules() {
    assert_eq!(
        semantic_error("fun f(): Integer do print(1); end fun main() do return 0; end"),
        SemanticError::MissingReturn {
            function: "f".to_string(),
            expected: Type::Integer
        }
    );
    assert!(analyzed("fun f(): Nil do print(1); end fun main() do f(); return 0; end").is_ok());
    assert!(analyzed("fun f() do print(1); end fun main() do f(); return 0; end").is_ok());
    assert_eq!(
        semantic_error("fun f(): String do return 1; end fun main() do return 0; end"),
        SemanticError::TypeMatchError {
            expected: Type::String,
            received: Type::Integer
        }
    );
}

#[test]
fn test_return_outside_function() {
    let mut analyzer = Analyzer::new(builtin_scope());
    let mut stmt = Stmt::Return {
        value: Expr::literal(Literal::Nil),
    };
    assert_eq!(
        super::stmt::analyze_stmt(&mut analyzer, &mut stmt),
        Err(SemanticError::ReturnOutsideFunction)
    );
}

#[test]
fn test_main_is_required() {
    assert_eq!(
        semantic_error("fun helper() do print(1); end"),
        SemanticError::MissingMain
    );
    assert_eq!(
        semantic_error("fun main(a: Integer): Integer do return a; end"),
        SemanticError::MissingMain
    );
}

#[test]
fn test_main_must_return_integer() {
    assert_eq!(
        semantic_error("fun main() do return \"x\"; end"),
        SemanticError::TypeMatchError {
            expected: Type::Integer,
            received: Type::String
        }
    );
    assert_eq!(
        semantic_error("fun main(): String do return \"x\"; end"),
        SemanticError::MainReturnType {
            received: Type::String
        }
    );
    assert_eq!(
        semantic_error("fun main() do print(1); end"),
        SemanticError::MissingReturn {
            function: "main".to_string(),
            expected: Type::Integer
        }
    );
}

#[test]
fn test_globals_land_in_given_scope() {
    let tokens = tokenize("var counter = 0; fun main() do return counter; end", None).unwrap();
    let mut source = parse(tokens, Rc::new("shell".to_string())).unwrap();

    let mut analyzer = Analyzer::new(builtin_scope());
    analyzer.analyze(&mut source).unwrap();

    let scope = analyzer.scope();
    assert_eq!(
        scope.borrow().lookup_variable("counter").map(|v| v.ty),
        Some(Type::Integer)
    );
    assert!(scope.borrow().lookup_function("main", 0).is_some());
    assert!(scope.borrow().lookup_function("print", 1).is_some());
}

#[test]
fn test_comparable_parameters_can_be_compared() {
    let source = analyzed(
        "fun less(a: Comparable, b: Comparable): Boolean do return a < b; end
         fun main() do return 0; end",
    )
    .unwrap();
    assert_eq!(return_value(&source, 0, 0).ty, Some(Type::Boolean));

    assert_eq!(
        semantic_error(
            "fun same(a: Comparable): Boolean do return a == 1; end fun main() do return 0; end"
        ),
        SemanticError::InvalidOperands {
            operator: "==".to_string(),
            left: Type::Comparable,
            right: Type::Integer
        }
    );
}
