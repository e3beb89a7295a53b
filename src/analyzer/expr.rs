use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;

use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, ExprKind, Literal},
        types::{require_assignable, Type},
    },
    errors::errors::SemanticError,
};

use super::analyzer::Analyzer;

/// Resolves and types `expr` and everything below it, returning the type
/// written into it.
pub fn analyze_expr(analyzer: &mut Analyzer, expr: &mut Expr) -> Result<Type, SemanticError> {
    let ty = match &mut expr.kind {
        ExprKind::Literal(literal) => analyze_literal(literal)?,
        ExprKind::Group(inner) => analyze_expr(analyzer, inner)?,
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left = analyze_expr(analyzer, left)?;
            let right = analyze_expr(analyzer, right)?;
            binary_type(*operator, left, right)?
        }
        ExprKind::Access {
            offset,
            name,
            variable,
        } => {
            let found = analyzer.env.lookup_variable(name).ok_or_else(|| {
                SemanticError::VariableNotDeclared {
                    variable: name.clone(),
                }
            })?;

            match offset {
                Some(offset) => {
                    if !found.is_list {
                        return Err(SemanticError::NotAList {
                            variable: name.clone(),
                        });
                    }
                    let index = analyze_expr(analyzer, offset)?;
                    require_assignable(Type::Integer, index)?;
                }
                None if found.is_list => {
                    return Err(SemanticError::ListRequiresIndex {
                        variable: name.clone(),
                    })
                }
                None => {}
            }

            let ty = found.ty;
            *variable = Some(found);
            ty
        }
        ExprKind::Call {
            name,
            arguments,
            function,
        } => {
            let found = analyzer
                .env
                .lookup_function(name, arguments.len())
                .ok_or_else(|| SemanticError::FunctionNotDeclared {
                    function: name.clone(),
                    arity: arguments.len(),
                })?;

            for (argument, parameter) in arguments.iter_mut().zip(found.param_types.iter()) {
                let actual = analyze_expr(analyzer, argument)?;
                require_assignable(*parameter, actual)?;
            }

            let ty = found.return_type;
            *function = Some(found);
            ty
        }
        ExprKind::List { .. } => return Err(SemanticError::MisplacedListLiteral),
    };

    tracing::trace!(%ty, "typed expression");
    expr.set_type(ty);
    Ok(ty)
}

/// Types a list literal used as the initializer of `name`. The element
/// type is `declared` when given, else the type of the first element.
pub fn analyze_list_literal(
    analyzer: &mut Analyzer,
    name: &str,
    declared: Option<Type>,
    expr: &mut Expr,
) -> Result<Type, SemanticError> {
    let ExprKind::List {
        elements,
        element_type,
    } = &mut expr.kind
    else {
        return Err(SemanticError::MisplacedListLiteral);
    };

    let mut target = declared;
    for element in elements.iter_mut() {
        let actual = analyze_expr(analyzer, element)?;
        match target {
            Some(target) => require_assignable(target, actual)?,
            None => target = Some(actual),
        }
    }

    let ty = target.ok_or_else(|| SemanticError::EmptyListLiteral {
        variable: name.to_string(),
    })?;

    *element_type = Some(ty);
    expr.set_type(ty);
    Ok(ty)
}

fn analyze_literal(literal: &Literal) -> Result<Type, SemanticError> {
    let out_of_range = || SemanticError::LiteralOutOfRange {
        literal: literal_text(literal),
    };

    match literal {
        Literal::Integer(value) if value.to_i32().is_none() => Err(out_of_range()),
        Literal::Decimal(value) if !fits_double(value) => Err(out_of_range()),
        literal => Ok(literal.get_type()),
    }
}

/// Whether `value` survives a round trip through an `f64` unchanged.
fn fits_double(value: &BigDecimal) -> bool {
    let Ok(double) = value.to_string().parse::<f64>() else {
        return false;
    };
    if !double.is_finite() {
        return false;
    }
    BigDecimal::from_str(&double.to_string()).is_ok_and(|back| &back == value)
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Integer(value) => value.to_string(),
        Literal::Decimal(value) => value.to_string(),
        other => format!("{:?}", other),
    }
}

/// The result type of `left operator right`.
pub fn binary_type(
    operator: BinaryOperator,
    left: Type,
    right: Type,
) -> Result<Type, SemanticError> {
    let invalid = || SemanticError::InvalidOperands {
        operator: operator.symbol().to_string(),
        left,
        right,
    };

    match operator {
        BinaryOperator::And | BinaryOperator::Or => match (left, right) {
            (Type::Boolean, Type::Boolean) => Ok(Type::Boolean),
            _ => Err(invalid()),
        },
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::Equal
        | BinaryOperator::NotEqual => {
            if Type::Comparable.accepts(left) && left == right {
                Ok(Type::Boolean)
            } else {
                Err(invalid())
            }
        }
        BinaryOperator::Add if left == Type::String || right == Type::String => Ok(Type::String),
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide => match (left, right) {
            (Type::Integer, Type::Integer) => Ok(Type::Integer),
            (Type::Decimal, Type::Decimal) => Ok(Type::Decimal),
            _ => Err(invalid()),
        },
        BinaryOperator::Power => match (left, right) {
            (Type::Integer, Type::Integer) => Ok(Type::Integer),
            _ => Err(invalid()),
        },
    }
}
