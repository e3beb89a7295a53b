//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, which owns the token
//! stream and offers the small set of token-consuming helpers the grammar
//! rules in [`super::expr`] and [`super::stmt`] are written with.

use std::rc::Rc;

use crate::{
    ast::ast::Source,
    errors::errors::{Error, ParseError, ParseErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::stmt::{parse_function, parse_global};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
        }
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Whether the current token's text is `text`.
    pub fn peek(&self, text: &str) -> bool {
        self.current_token().is_some_and(|token| token.is(text))
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            None => Err(self.error(ParseErrorImpl::ExpectedExpression {
                found: self.describe_current(),
            })),
        }
    }

    /// Consumes the current token if its text is `text`.
    pub fn matches(&mut self, text: &str) -> bool {
        if self.peek(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a token with text `text`, or fails naming it.
    pub fn expect(&mut self, text: &str) -> Result<Token, Error> {
        if self.peek(text) {
            self.advance()
        } else {
            Err(self.expected(text))
        }
    }

    /// Consumes a non-reserved identifier and returns its name.
    pub fn expect_identifier(&mut self) -> Result<String, Error> {
        let is_name = self
            .current_token()
            .is_some_and(|token| token.kind == TokenKind::Identifier && !token.is_reserved());

        if is_name {
            Ok(self.advance()?.value)
        } else {
            Err(self.expected("identifier"))
        }
    }

    pub fn expected(&self, expected: &str) -> Error {
        self.error(ParseErrorImpl::ExpectedToken {
            expected: expected.to_string(),
            found: self.describe_current(),
        })
    }

    /// A parse error positioned just past the last consumed token.
    pub fn error(&self, error: ParseErrorImpl) -> Error {
        Error::from(ParseError::new(error, self.get_position()))
    }

    pub fn describe_current(&self) -> String {
        match self.current_token() {
            Some(token) => format!("`{}`", token.value),
            None => String::from("end of input"),
        }
    }

    /// The offset just past the last consumed token.
    pub fn get_position(&self) -> Position {
        let offset = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end.0,
            None => 0,
        };
        Position(offset, Rc::clone(&self.file))
    }
}

/// Parses a stream of tokens into a [`Source`].
///
/// A program is a run of `val`/`var` globals followed by `fun` functions;
/// any other leading token is an error. Parsing stops at the first error
/// and no partial tree is returned.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Source, Error> {
    let mut parser = Parser::new(tokens, file);

    let mut globals = vec![];
    let mut functions = vec![];

    while let Some(token) = parser.current_token() {
        if (token.is("val") || token.is("var")) && functions.is_empty() {
            globals.push(parse_global(&mut parser)?);
        } else if token.is("fun") {
            functions.push(parse_function(&mut parser)?);
        } else {
            let error = ParseErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            };
            return Err(Error::from(ParseError::new(error, token.span.start.clone())));
        }
    }

    tracing::trace!(
        globals = globals.len(),
        functions = functions.len(),
        "parsed source"
    );

    Ok(Source { globals, functions })
}
