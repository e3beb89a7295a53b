/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The source root, globals and function definitions
/// - expressions: Expression nodes and literal values
/// - statements: Statement nodes
/// - types: The closed set of types and the assignability rule
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
