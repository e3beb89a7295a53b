use crate::ast::{
    ast::{FunctionDecl, Global, Source},
    statements::Stmt,
    types::Type,
};

use super::{expr::gen_expression, stmt::gen_statement};

const INDENT: &str = "    ";

/// Accumulates generated source line by line.
pub struct Generator {
    output: String,
    indent: usize,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            output: String::new(),
            indent: 0,
        }
    }

    /// Writes `text` on its own line at the current indentation.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    /// Runs `body` one level deeper.
    pub fn indented(&mut self, body: impl FnOnce(&mut Generator)) {
        self.indent += 1;
        body(self);
        self.indent -= 1;
    }

    /// Writes each statement of `body` one level deeper.
    pub fn block(&mut self, body: &[Stmt]) {
        self.indented(|generator| {
            for stmt in body {
                gen_statement(generator, stmt);
            }
        });
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints `source` as a Java `Main` class.
pub fn generate(source: &Source) -> String {
    let mut generator = Generator::new();

    generator.line("public class Main {");
    generator.blank();

    generator.indented(|generator| {
        for global in &source.globals {
            gen_global(generator, global);
        }
        if !source.globals.is_empty() {
            generator.blank();
        }

        generator.line("public static void main(String[] args) {");
        generator.indented(|generator| generator.line("System.exit(new Main().main());"));
        generator.line("}");
        generator.blank();

        for function in &source.functions {
            gen_function(generator, function);
            generator.blank();
        }
    });

    generator.line("}");

    tracing::debug!(
        globals = source.globals.len(),
        functions = source.functions.len(),
        "generated java source"
    );
    generator.finish()
}

fn gen_global(generator: &mut Generator, global: &Global) {
    let (name, ty, is_list) = match &global.variable {
        Some(variable) => (variable.runtime_name.as_str(), variable.ty, variable.is_list),
        None => (global.name.as_str(), declared_type(&global.type_name), false),
    };

    let mut text = String::new();
    if !global.mutable {
        text.push_str("final ");
    }
    text.push_str(&jvm_type(ty, is_list));
    text.push(' ');
    text.push_str(name);
    if let Some(value) = &global.value {
        text.push_str(" = ");
        text.push_str(&gen_expression(value));
    }
    text.push(';');

    generator.line(&text);
}

fn gen_function(generator: &mut Generator, function: &FunctionDecl) {
    let (name, return_type, parameter_types) = match &function.function {
        Some(resolved) => (
            resolved.runtime_name.as_str(),
            method_return_type(function, resolved.return_type),
            resolved.param_types.clone(),
        ),
        None => (
            function.name.as_str(),
            method_return_type(function, declared_type(&function.return_type_name)),
            function
                .parameter_types
                .iter()
                .map(|name| Type::from_name(name).unwrap_or(Type::Any))
                .collect(),
        ),
    };

    let parameters = function
        .parameters
        .iter()
        .zip(parameter_types)
        .map(|(parameter, ty)| format!("{} {}", ty.jvm_name(), parameter))
        .collect::<Vec<String>>()
        .join(", ");

    let signature = format!("{} {}({})", return_type, name, parameters);
    if function.body.is_empty() {
        generator.line(&format!("{} {{}}", signature));
        return;
    }

    generator.line(&format!("{} {{", signature));
    generator.block(&function.body);
    generator.line("}");
}

/// Functions without a return annotation other than `main` become `void`,
/// or `Object` when their body returns a value.
fn method_return_type(function: &FunctionDecl, resolved: Type) -> &'static str {
    match (&function.return_type_name, function.name.as_str()) {
        (Some(_), _) => resolved.jvm_name(),
        (None, "main") => Type::Integer.jvm_name(),
        (None, _) if returns_value(&function.body) => Type::Any.jvm_name(),
        (None, _) => "void",
    }
}

fn returns_value(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| match stmt {
        Stmt::Return { .. } => true,
        Stmt::If {
            then_body,
            else_body,
            ..
        } => returns_value(then_body) || returns_value(else_body),
        Stmt::While { body, .. } => returns_value(body),
        Stmt::Switch { cases, .. } => cases.iter().any(|case| returns_value(&case.body)),
        Stmt::Expression(_) | Stmt::Declaration { .. } | Stmt::Assignment { .. } => false,
    })
}

fn declared_type(type_name: &Option<String>) -> Type {
    type_name
        .as_deref()
        .and_then(Type::from_name)
        .unwrap_or(Type::Any)
}

/// The Java type of a variable of `ty`, as an array for lists.
pub fn jvm_type(ty: Type, is_list: bool) -> String {
    if is_list {
        format!("{}[]", ty.jvm_name())
    } else {
        ty.jvm_name().to_string()
    }
}
