use crate::ast::{
    statements::{Case, Stmt},
    types::Type,
};

use super::{
    expr::gen_expression,
    generator::{jvm_type, Generator},
};

pub fn gen_statement(generator: &mut Generator, stmt: &Stmt) {
    match stmt {
        Stmt::Expression(expr) => generator.line(&format!("{};", gen_expression(expr))),
        Stmt::Declaration {
            name,
            type_name,
            value,
            variable,
        } => {
            let (name, ty) = match variable {
                Some(variable) => (
                    variable.runtime_name.as_str(),
                    jvm_type(variable.ty, variable.is_list),
                ),
                None => (
                    name.as_str(),
                    type_name
                        .as_deref()
                        .and_then(Type::from_name)
                        .unwrap_or(Type::Any)
                        .jvm_name()
                        .to_string(),
                ),
            };
            match value {
                Some(value) => {
                    generator.line(&format!("{} {} = {};", ty, name, gen_expression(value)))
                }
                None => generator.line(&format!("{} {};", ty, name)),
            }
        }
        Stmt::Assignment { receiver, value } => generator.line(&format!(
            "{} = {};",
            gen_expression(receiver),
            gen_expression(value)
        )),
        Stmt::If {
            condition,
            then_body,
            else_body,
        } => {
            generator.line(&format!("if ({}) {{", gen_expression(condition)));
            generator.block(then_body);
            if else_body.is_empty() {
                generator.line("}");
            } else {
                generator.line("} else {");
                generator.block(else_body);
                generator.line("}");
            }
        }
        Stmt::While { condition, body } => {
            let header = format!("while ({}) {{", gen_expression(condition));
            if body.is_empty() {
                generator.line(&format!("{}}}", header));
            } else {
                generator.line(&header);
                generator.block(body);
                generator.line("}");
            }
        }
        Stmt::Switch { condition, cases } => {
            generator.line(&format!("switch ({}) {{", gen_expression(condition)));
            generator.indented(|generator| {
                for case in cases {
                    gen_case(generator, case);
                }
            });
            generator.line("}");
        }
        Stmt::Return { value } => generator.line(&format!("return {};", gen_expression(value))),
    }
}

fn gen_case(generator: &mut Generator, case: &Case) {
    match &case.value {
        Some(value) => {
            generator.line(&format!("case {}:", gen_expression(value)));
            generator.indented(|generator| {
                for stmt in &case.body {
                    gen_statement(generator, stmt);
                }
                generator.line("break;");
            });
        }
        None => {
            generator.line("default:");
            generator.block(&case.body);
        }
    }
}
