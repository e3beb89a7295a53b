//! Unit tests for the error types: names, messages and tips.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::ast::types::Type;
use crate::errors::errors::{Error, ErrorTip, ParseError, ParseErrorImpl, RuntimeError, SemanticError};
use crate::Position;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.plc".to_string()))
}

#[test]
fn test_parse_error_message_includes_offset() {
    let error = ParseError::new(
        ParseErrorImpl::ExpectedToken {
            expected: ";".to_string(),
            found: "end of input".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert_eq!(
        error.to_string(),
        "expected \";\", found end of input (at offset 42)"
    );
}

#[test]
fn test_only_parse_errors_are_positioned() {
    let parse = Error::from(ParseError::new(ParseErrorImpl::TrailingComma, at(3)));
    assert_eq!(parse.get_position().map(|position| position.0), Some(3));

    assert!(Error::from(SemanticError::MissingMain).get_position().is_none());
    assert!(Error::from(RuntimeError::DivisionByZero).get_position().is_none());
}

#[test]
fn test_names_follow_variants() {
    let errors = [
        (
            Error::from(ParseError::new(
                ParseErrorImpl::UnrecognisedToken {
                    token: "@".to_string(),
                },
                at(0),
            )),
            "UnrecognisedToken",
        ),
        (
            Error::from(SemanticError::FunctionAlreadyDeclared {
                function: "main".to_string(),
                arity: 0,
            }),
            "FunctionAlreadyDeclared",
        ),
        (
            Error::from(SemanticError::UnknownType {
                type_: "Float".to_string(),
            }),
            "UnknownType",
        ),
        (
            Error::from(RuntimeError::NegativeExponent {
                exponent: "-1".to_string(),
            }),
            "NegativeExponent",
        ),
        (Error::from(RuntimeError::DivisionByZero), "DivisionByZero"),
    ];

    for (error, name) in errors {
        assert_eq!(error.get_error_name(), name);
    }
}

#[test]
fn test_type_mismatch_message() {
    let error = Error::from(SemanticError::TypeMatchError {
        expected: Type::Integer,
        received: Type::String,
    });

    assert_eq!(
        error.to_string(),
        "types do not match: expected Integer, received String"
    );
}

#[test]
fn test_unrecognised_token_has_no_tip() {
    let error = Error::from(ParseError::new(
        ParseErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    ));

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_semantic_and_runtime_tips_are_capitalised_messages() {
    let runtime = Error::from(RuntimeError::IndexOutOfRange {
        index: "5".to_string(),
        length: 3,
    });
    assert_eq!(
        runtime.get_tip().to_string(),
        "Index 5 out of range for length 3"
    );

    let semantic = Error::from(SemanticError::ImmutableAssignment {
        variable: "x".to_string(),
    });
    assert_eq!(semantic.get_tip().to_string(), "Variable \"x\" is immutable");
}

#[test]
fn test_parse_tips_name_the_token() {
    let error = ParseError::new(
        ParseErrorImpl::ExpectedExplicitValue {
            variable: "limit".to_string(),
        },
        at(4),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert_eq!(tip, "Immutable global `limit` needs an initial value")
        }
        ErrorTip::None => panic!("expected a suggestion"),
    }
}
