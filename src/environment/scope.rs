use std::{cell::RefCell, collections::HashMap, rc::Rc};

pub type ScopeRef<V, F> = Rc<RefCell<Scope<V, F>>>;

/// A single lexical block's bindings.
///
/// Variables are keyed by name and functions by `(name, arity)`. Lookups
/// walk from this scope towards the root and return the nearest binding;
/// defining a name again in the same scope replaces it.
#[derive(Debug)]
pub struct Scope<V, F> {
    variables: HashMap<String, V>,
    functions: HashMap<(String, usize), F>,
    parent: Option<ScopeRef<V, F>>,
}

impl<V: Clone, F: Clone> Scope<V, F> {
    pub fn new() -> Self {
        Scope {
            variables: HashMap::new(),
            functions: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: ScopeRef<V, F>) -> Self {
        Scope {
            variables: HashMap::new(),
            functions: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn root() -> ScopeRef<V, F> {
        Rc::new(RefCell::new(Scope::new()))
    }

    /// A fresh empty scope whose parent is `parent`.
    pub fn child(parent: &ScopeRef<V, F>) -> ScopeRef<V, F> {
        Rc::new(RefCell::new(Scope::with_parent(Rc::clone(parent))))
    }

    pub fn parent(&self) -> Option<ScopeRef<V, F>> {
        self.parent.clone()
    }

    pub fn define_variable(&mut self, name: &str, value: V) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn lookup_variable(&self, name: &str) -> Option<V> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup_variable(name),
            None => None,
        }
    }

    pub fn define_function(&mut self, name: &str, arity: usize, function: F) {
        self.functions.insert((name.to_string(), arity), function);
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<F> {
        if let Some(function) = self.functions.get(&(name.to_string(), arity)) {
            return Some(function.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup_function(name, arity),
            None => None,
        }
    }

    /// Whether `(name, arity)` is bound in this scope itself, ignoring parents.
    pub fn has_local_function(&self, name: &str, arity: usize) -> bool {
        self.functions.contains_key(&(name.to_string(), arity))
    }
}

impl<V: Clone, F: Clone> Default for Scope<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the innermost scope while walking a tree.
///
/// Blocks push a child scope on entry and pop it on exit. Function calls
/// swap in an unrelated scope with [`Environment::enter`] and put the
/// caller's back with [`Environment::restore`].
pub struct Environment<V, F> {
    global: ScopeRef<V, F>,
    current: ScopeRef<V, F>,
}

impl<V: Clone, F: Clone> Environment<V, F> {
    pub fn new(global: ScopeRef<V, F>) -> Self {
        Environment {
            current: Rc::clone(&global),
            global,
        }
    }

    pub fn global(&self) -> ScopeRef<V, F> {
        Rc::clone(&self.global)
    }

    pub fn current(&self) -> ScopeRef<V, F> {
        Rc::clone(&self.current)
    }

    pub fn push_scope(&mut self) {
        self.current = Scope::child(&self.current);
    }

    pub fn pop_scope(&mut self) {
        let parent = self.current.borrow().parent();
        if let Some(parent) = parent {
            self.current = parent;
        }
    }

    /// Makes `scope` current and returns the scope it replaced.
    pub fn enter(&mut self, scope: ScopeRef<V, F>) -> ScopeRef<V, F> {
        std::mem::replace(&mut self.current, scope)
    }

    pub fn restore(&mut self, previous: ScopeRef<V, F>) {
        self.current = previous;
    }

    pub fn define_variable(&mut self, name: &str, value: V) {
        self.current.borrow_mut().define_variable(name, value);
    }

    pub fn lookup_variable(&self, name: &str) -> Option<V> {
        self.current.borrow().lookup_variable(name)
    }

    pub fn define_function(&mut self, name: &str, arity: usize, function: F) {
        self.current.borrow_mut().define_function(name, arity, function);
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<F> {
        self.current.borrow().lookup_function(name, arity)
    }

    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self.current.borrow().parent();
        while let Some(parent) = scope {
            depth += 1;
            scope = parent.borrow().parent();
        }
        depth
    }
}
