use crate::ast::expressions::{BinaryOperator, Expr, ExprKind, Literal};

/// Prints `expr` as a Java expression.
pub fn gen_expression(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(literal) => gen_literal(literal),
        ExprKind::Group(inner) => format!("({})", gen_expression(inner)),
        ExprKind::Binary {
            operator: BinaryOperator::Power,
            left,
            right,
        } => format!(
            "(int) Math.pow({}, {})",
            gen_expression(left),
            gen_expression(right)
        ),
        ExprKind::Binary {
            operator,
            left,
            right,
        } => format!(
            "{} {} {}",
            gen_expression(left),
            operator.symbol(),
            gen_expression(right)
        ),
        ExprKind::Access {
            offset,
            name,
            variable,
        } => {
            let name = variable
                .as_ref()
                .map_or(name.as_str(), |variable| variable.runtime_name.as_str());
            match offset {
                Some(offset) => format!("{}[{}]", name, gen_expression(offset)),
                None => name.to_string(),
            }
        }
        ExprKind::Call {
            name,
            arguments,
            function,
        } => {
            let name = function
                .as_ref()
                .map_or(name.as_str(), |function| function.runtime_name.as_str());
            format!("{}({})", name, gen_list(arguments))
        }
        ExprKind::List { elements, .. } => format!("{{{}}}", gen_list(elements)),
    }
}

fn gen_list(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(gen_expression)
        .collect::<Vec<String>>()
        .join(", ")
}

fn gen_literal(literal: &Literal) -> String {
    match literal {
        Literal::Nil => String::from("null"),
        Literal::Boolean(value) => value.to_string(),
        Literal::Character(value) => format!("'{}'", escape(&value.to_string())),
        Literal::String(value) => format!("\"{}\"", escape(value)),
        Literal::Integer(value) => value.to_string(),
        Literal::Decimal(value) => value.to_string(),
    }
}

/// Re-escapes the characters the lexer accepts as escape sequences.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{8}' => escaped.push_str("\\b"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}
