use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, Position};

/// Any failure produced by the toolchain.
///
/// The three phases fail independently and none of them is recoverable from
/// within the language: the first error aborts the phase that raised it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Source position of the error. Only parse errors carry one.
    pub fn get_position(&self) -> Option<&Position> {
        match self {
            Error::Parse(error) => Some(error.get_position()),
            Error::Semantic(_) | Error::Runtime(_) => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self {
            Error::Parse(error) => error.get_error_name(),
            Error::Semantic(error) => error.get_error_name(),
            Error::Runtime(error) => error.get_error_name(),
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            Error::Parse(error) => error.get_tip(),
            Error::Semantic(error) => ErrorTip::Suggestion(capitalise(&error.to_string())),
            Error::Runtime(error) => ErrorTip::Suggestion(capitalise(&error.to_string())),
        }
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// A malformed token sequence, positioned just past the last consumed token.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} (at offset {})", .position.0)]
pub struct ParseError {
    internal_error: ParseErrorImpl,
    position: Position,
}

impl ParseError {
    pub fn new(error_impl: ParseErrorImpl, position: Position) -> Self {
        ParseError {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ParseErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ParseErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ParseErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ParseErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ParseErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ParseErrorImpl::NumberParseError { .. } => "NumberParseError",
            ParseErrorImpl::InvalidLiteral { .. } => "InvalidLiteral",
            ParseErrorImpl::TrailingComma => "TrailingComma",
            ParseErrorImpl::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ParseErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ParseErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, only `val`, `var` and `fun` may start a top level item",
                token
            )),
            ParseErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found {}", expected, found))
            }
            ParseErrorImpl::ExpectedExpression { found } => {
                ErrorTip::Suggestion(format!("Expected an expression, found {}", found))
            }
            ParseErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ParseErrorImpl::InvalidLiteral { token } => ErrorTip::Suggestion(format!(
                "Invalid literal: `{}`, check its escape sequences",
                token
            )),
            ParseErrorImpl::TrailingComma => {
                ErrorTip::Suggestion(String::from("Remove the trailing `,`"))
            }
            ParseErrorImpl::ExpectedExplicitValue { variable } => ErrorTip::Suggestion(format!(
                "Immutable global `{}` needs an initial value",
                variable
            )),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected:?}, found {found}")]
    ExpectedToken { expected: String, found: String },
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid literal: {token:?}")]
    InvalidLiteral { token: String },
    #[error("trailing comma")]
    TrailingComma,
    #[error("expected a value for immutable global {variable:?}")]
    ExpectedExplicitValue { variable: String },
}

/// A static rule violation found by the analyzer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} with {arity} argument(s) not declared")]
    FunctionNotDeclared { function: String, arity: usize },
    #[error("function {function:?} with {arity} argument(s) already declared")]
    FunctionAlreadyDeclared { function: String, arity: usize },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: Type, received: Type },
    #[error("operator {operator:?} cannot be applied to {left} and {right}")]
    InvalidOperands { operator: String, left: Type, right: Type },
    #[error("expected explicit value when no type is given for {variable:?}")]
    ExpectedExplicitValue { variable: String },
    #[error("literal {literal} is out of range")]
    LiteralOutOfRange { literal: String },
    #[error("no `main` function with zero parameters found")]
    MissingMain,
    #[error("`main` must return Integer, received {received}")]
    MainReturnType { received: Type },
    #[error("function {function:?} must return a value of type {expected}")]
    MissingReturn { function: String, expected: Type },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("the then branch of an if statement must not be empty")]
    EmptyThenBranch,
    #[error("the default case must be the last case of a switch and appear once")]
    MisplacedDefaultCase,
    #[error("assignment receiver must be a variable access")]
    InvalidAssignmentTarget,
    #[error("expression statements must be function calls")]
    InvalidExpressionStatement,
    #[error("variable {variable:?} is immutable")]
    ImmutableAssignment { variable: String },
    #[error("variable {variable:?} is not a list and cannot be indexed")]
    NotAList { variable: String },
    #[error("list {variable:?} must be indexed")]
    ListRequiresIndex { variable: String },
    #[error("list literals may only initialise a declaration")]
    MisplacedListLiteral,
    #[error("cannot infer the element type of empty list {variable:?}")]
    EmptyListLiteral { variable: String },
}

impl SemanticError {
    pub fn get_error_name(&self) -> &str {
        match self {
            SemanticError::VariableNotDeclared { .. } => "VariableNotDeclared",
            SemanticError::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            SemanticError::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            SemanticError::UnknownType { .. } => "UnknownType",
            SemanticError::TypeMatchError { .. } => "TypeMatchError",
            SemanticError::InvalidOperands { .. } => "InvalidOperands",
            SemanticError::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
            SemanticError::LiteralOutOfRange { .. } => "LiteralOutOfRange",
            SemanticError::MissingMain => "MissingMain",
            SemanticError::MainReturnType { .. } => "MainReturnType",
            SemanticError::MissingReturn { .. } => "MissingReturn",
            SemanticError::ReturnOutsideFunction => "ReturnOutsideFunction",
            SemanticError::EmptyThenBranch => "EmptyThenBranch",
            SemanticError::MisplacedDefaultCase => "MisplacedDefaultCase",
            SemanticError::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            SemanticError::InvalidExpressionStatement => "InvalidExpressionStatement",
            SemanticError::ImmutableAssignment { .. } => "ImmutableAssignment",
            SemanticError::NotAList { .. } => "NotAList",
            SemanticError::ListRequiresIndex { .. } => "ListRequiresIndex",
            SemanticError::MisplacedListLiteral => "MisplacedListLiteral",
            SemanticError::EmptyListLiteral { .. } => "EmptyListLiteral",
        }
    }
}

/// A dynamic rule violation raised while evaluating a program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} with {arity} argument(s) not declared")]
    FunctionNotDeclared { function: String, arity: usize },
    #[error("operator {operator:?} cannot be applied to {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("expected {expected}, received {received}")]
    UnexpectedValue { expected: String, received: String },
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: String, length: usize },
    #[error("variable {variable:?} does not hold a list")]
    NotASequence { variable: String },
    #[error("negative exponent {exponent}")]
    NegativeExponent { exponent: String },
    #[error("exponent {exponent} is too large")]
    ExponentTooLarge { exponent: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("assignment receiver must be a variable access")]
    InvalidAssignmentTarget,
    #[error("function {function:?} expected {expected} argument(s), received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("exit value {value} does not fit a 32-bit status")]
    ExitCodeOutOfRange { value: String },
    #[error("failed to write output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub fn get_error_name(&self) -> &str {
        match self {
            RuntimeError::VariableNotDeclared { .. } => "VariableNotDeclared",
            RuntimeError::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            RuntimeError::InvalidOperands { .. } => "InvalidOperands",
            RuntimeError::UnexpectedValue { .. } => "UnexpectedValue",
            RuntimeError::IndexOutOfRange { .. } => "IndexOutOfRange",
            RuntimeError::NotASequence { .. } => "NotASequence",
            RuntimeError::NegativeExponent { .. } => "NegativeExponent",
            RuntimeError::ExponentTooLarge { .. } => "ExponentTooLarge",
            RuntimeError::DivisionByZero => "DivisionByZero",
            RuntimeError::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            RuntimeError::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            RuntimeError::ExitCodeOutOfRange { .. } => "ExitCodeOutOfRange",
            RuntimeError::Output { .. } => "Output",
        }
    }
}
