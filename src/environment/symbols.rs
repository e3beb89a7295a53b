use crate::ast::types::Type;

/// A compile-time variable binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// The name used in generated code.
    pub runtime_name: String,
    pub ty: Type,
    pub mutable: bool,
    /// Set for variables initialised with a list literal. `ty` is then the
    /// element type.
    pub is_list: bool,
}

impl Variable {
    pub fn new(name: &str, ty: Type, mutable: bool) -> Self {
        Variable {
            name: name.to_string(),
            runtime_name: name.to_string(),
            ty,
            mutable,
            is_list: false,
        }
    }

    pub fn list(name: &str, element_type: Type, mutable: bool) -> Self {
        Variable {
            is_list: true,
            ..Variable::new(name, element_type, mutable)
        }
    }
}

/// A compile-time function binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    /// The name used in generated code.
    pub runtime_name: String,
    pub param_types: Vec<Type>,
    pub return_type: Type,
}

impl Function {
    pub fn new(name: &str, param_types: Vec<Type>, return_type: Type) -> Self {
        Function {
            name: name.to_string(),
            runtime_name: name.to_string(),
            param_types,
            return_type,
        }
    }

    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}
