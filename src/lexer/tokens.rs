use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::Span;

/// The six kinds of token the parser understands.
///
/// Reserved words are not a separate kind: they arrive as `Identifier`
/// tokens and are recognised by their text.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

/// A single token. `value` is the literal source text, so character and
/// string tokens still carry their quotes and escape sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// Whether this token's literal text is exactly `text`.
    pub fn is(&self, text: &str) -> bool {
        self.value == text
    }

    pub fn is_reserved(&self) -> bool {
        self.kind == TokenKind::Identifier && RESERVED.contains(self.value.as_str())
    }

    /// Whether an operand can end with this token. A `-` directly after
    /// such a token is subtraction rather than the sign of a number.
    pub fn ends_operand(&self) -> bool {
        match self.kind {
            TokenKind::Identifier => {
                !self.is_reserved() || matches!(self.value.as_str(), "nil" | "true" | "false")
            }
            TokenKind::Integer | TokenKind::Decimal | TokenKind::Character | TokenKind::String => true,
            TokenKind::Operator => self.is(")") || self.is("]"),
        }
    }
}

lazy_static! {
    pub static ref RESERVED: HashSet<&'static str> = HashSet::from([
        "val", "var", "fun", "let", "if", "do", "else", "end", "while", "return", "switch",
        "case", "default", "nil", "true", "false",
    ]);
}
