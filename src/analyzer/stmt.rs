use crate::{
    ast::{
        expressions::{Expr, ExprKind},
        statements::{Case, Stmt},
        types::{require_assignable, Type},
    },
    errors::errors::SemanticError,
};

use super::{
    analyzer::{declare_variable, Analyzer},
    expr::analyze_expr,
};

pub fn analyze_stmt(analyzer: &mut Analyzer, stmt: &mut Stmt) -> Result<(), SemanticError> {
    match stmt {
        Stmt::Expression(expr) => {
            if !matches!(expr.kind, ExprKind::Call { .. }) {
                return Err(SemanticError::InvalidExpressionStatement);
            }
            analyze_expr(analyzer, expr)?;
        }
        Stmt::Declaration {
            name,
            type_name,
            value,
            variable,
        } => {
            let declared =
                declare_variable(analyzer, name, type_name.as_deref(), value.as_mut(), true)?;
            *variable = Some(declared);
        }
        Stmt::Assignment { receiver, value } => analyze_assignment(analyzer, receiver, value)?,
        Stmt::If {
            condition,
            then_body,
            else_body,
        } => {
            analyze_condition(analyzer, condition)?;
            if then_body.is_empty() {
                return Err(SemanticError::EmptyThenBranch);
            }
            analyze_block(analyzer, then_body)?;
            analyze_block(analyzer, else_body)?;
        }
        Stmt::While { condition, body } => {
            analyze_condition(analyzer, condition)?;
            analyze_block(analyzer, body)?;
        }
        Stmt::Switch { condition, cases } => analyze_switch(analyzer, condition, cases)?,
        Stmt::Return { value } => {
            let Some(expected) = analyzer
                .function
                .as_ref()
                .map(|context| context.function.return_type)
            else {
                return Err(SemanticError::ReturnOutsideFunction);
            };

            let actual = analyze_expr(analyzer, value)?;
            require_assignable(expected, actual)?;

            if let Some(context) = analyzer.function.as_mut() {
                context.returns += 1;
            }
        }
    }

    Ok(())
}

/// Visits `body` in a fresh child scope.
pub fn analyze_block(analyzer: &mut Analyzer, body: &mut [Stmt]) -> Result<(), SemanticError> {
    analyzer.env.push_scope();
    let result = body
        .iter_mut()
        .try_for_each(|stmt| analyze_stmt(analyzer, stmt));
    analyzer.env.pop_scope();
    result
}

fn analyze_condition(analyzer: &mut Analyzer, condition: &mut Expr) -> Result<(), SemanticError> {
    let ty = analyze_expr(analyzer, condition)?;
    require_assignable(Type::Boolean, ty)
}

fn analyze_assignment(
    analyzer: &mut Analyzer,
    receiver: &mut Expr,
    value: &mut Expr,
) -> Result<(), SemanticError> {
    if !matches!(receiver.kind, ExprKind::Access { .. }) {
        return Err(SemanticError::InvalidAssignmentTarget);
    }

    let target = analyze_expr(analyzer, receiver)?;

    // Indexed assignment mutates the list in place, so it is allowed even
    // when the variable itself is immutable.
    if let ExprKind::Access {
        offset: None,
        variable: Some(variable),
        ..
    } = &receiver.kind
    {
        if !variable.mutable {
            return Err(SemanticError::ImmutableAssignment {
                variable: variable.name.clone(),
            });
        }
    }

    let actual = analyze_expr(analyzer, value)?;
    require_assignable(target, actual)
}

fn analyze_switch(
    analyzer: &mut Analyzer,
    condition: &mut Expr,
    cases: &mut [Case],
) -> Result<(), SemanticError> {
    let condition_type = analyze_expr(analyzer, condition)?;
    let last = cases.len().saturating_sub(1);

    for (index, case) in cases.iter_mut().enumerate() {
        match case.value.as_mut() {
            Some(value) => {
                let ty = analyze_expr(analyzer, value)?;
                if ty != condition_type {
                    return Err(SemanticError::TypeMatchError {
                        expected: condition_type,
                        received: ty,
                    });
                }
            }
            None if index != last => return Err(SemanticError::MisplacedDefaultCase),
            None => {}
        }

        analyze_block(analyzer, &mut case.body)?;
    }

    Ok(())
}
