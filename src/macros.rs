//! Token construction shorthands used by the lexer.

/// Builds a [`crate::lexer::tokens::Token`] from its kind, text and span.
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// A pattern handler that emits `$value` as a token of `$kind`, regardless
/// of what the pattern matched.
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer,
         _regex: &::regex::Regex|
         -> Result<(), $crate::errors::errors::Error> { lexer.push_fixed($kind, $value) }
    };
}
