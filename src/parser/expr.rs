use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::expressions::{Expr, ExprKind, Literal},
    errors::errors::{Error, ParseErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{lookup_operator, BindingPower},
    parser::Parser,
};

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Logical)
}

/// Parses one precedence level: operands at the next tighter level, joined
/// left to right by this level's operators.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    if bp == BindingPower::Primary {
        return parse_primary_expr(parser);
    }

    let mut left = parse_binary_expr(parser, bp.next())?;

    while let Some((operator, level)) = parser.current_token().and_then(lookup_operator) {
        if level != bp {
            break;
        }
        parser.advance()?;
        let right = parse_binary_expr(parser, bp.next())?;
        left = Expr::binary(operator, left, right);
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let Some(kind) = parser.current_token().map(|token| token.kind) else {
        return Err(parser.error(ParseErrorImpl::ExpectedExpression {
            found: parser.describe_current(),
        }));
    };

    match kind {
        TokenKind::Identifier => parse_symbol_expr(parser),
        TokenKind::Integer => {
            let token = parser.advance()?;
            let value = BigInt::from_str(&token.value).map_err(|_| number_error(parser, &token))?;
            Ok(Expr::literal(Literal::Integer(value)))
        }
        TokenKind::Decimal => {
            let token = parser.advance()?;
            let value =
                BigDecimal::from_str(&token.value).map_err(|_| number_error(parser, &token))?;
            Ok(Expr::literal(Literal::Decimal(value)))
        }
        TokenKind::Character => {
            let token = parser.advance()?;
            let text = unescape(parser, &token)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Expr::literal(Literal::Character(c))),
                _ => Err(invalid_literal(parser, &token)),
            }
        }
        TokenKind::String => {
            let token = parser.advance()?;
            Ok(Expr::literal(Literal::String(unescape(parser, &token)?)))
        }
        TokenKind::Operator if parser.peek("(") => parse_grouping_expr(parser),
        TokenKind::Operator if parser.peek("[") => parse_list_expr(parser),
        TokenKind::Operator => Err(parser.error(ParseErrorImpl::ExpectedExpression {
            found: parser.describe_current(),
        })),
    }
}

/// `nil`, `true`, `false`, a call `name(args)`, an indexed access
/// `name[offset]` or a plain variable access.
fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.matches("nil") {
        return Ok(Expr::literal(Literal::Nil));
    }
    if parser.matches("true") {
        return Ok(Expr::literal(Literal::Boolean(true)));
    }
    if parser.matches("false") {
        return Ok(Expr::literal(Literal::Boolean(false)));
    }

    if parser.current_token().is_some_and(Token::is_reserved) {
        return Err(parser.error(ParseErrorImpl::ExpectedExpression {
            found: parser.describe_current(),
        }));
    }

    let name = parser.expect_identifier()?;

    if parser.matches("(") {
        let arguments = parse_expr_list(parser, ")")?;
        return Ok(Expr::call(name, arguments));
    }

    if parser.matches("[") {
        let offset = parse_expr(parser)?;
        parser.expect("]")?;
        return Ok(Expr::access(name, Some(offset)));
    }

    Ok(Expr::access(name, None))
}

fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect("(")?;
    let inner = parse_expr(parser)?;
    parser.expect(")")?;

    Ok(Expr::new(ExprKind::Group(Box::new(inner))))
}

fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect("[")?;
    let elements = parse_expr_list(parser, "]")?;

    Ok(Expr::new(ExprKind::List {
        elements,
        element_type: None,
    }))
}

/// Comma separated expressions up to and including `close`. The opening
/// delimiter has already been consumed.
pub fn parse_expr_list(parser: &mut Parser, close: &str) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    if parser.matches(close) {
        return Ok(items);
    }

    loop {
        items.push(parse_expr(parser)?);

        if parser.matches(",") {
            if parser.peek(close) {
                return Err(parser.error(ParseErrorImpl::TrailingComma));
            }
            continue;
        }

        parser.expect(close)?;
        return Ok(items);
    }
}

fn number_error(parser: &Parser, token: &Token) -> Error {
    parser.error(ParseErrorImpl::NumberParseError {
        token: token.value.clone(),
    })
}

fn invalid_literal(parser: &Parser, token: &Token) -> Error {
    parser.error(ParseErrorImpl::InvalidLiteral {
        token: token.value.clone(),
    })
}

/// Strips the quotes from a character or string token and resolves its
/// escape sequences.
fn unescape(parser: &Parser, token: &Token) -> Result<String, Error> {
    let quote = if token.kind == TokenKind::Character { '\'' } else { '"' };
    let inner = token
        .value
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| invalid_literal(parser, token))?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }

        let escaped = match chars.next() {
            Some('b') => '\u{8}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('\\') => '\\',
            _ => return Err(invalid_literal(parser, token)),
        };
        value.push(escaped);
    }

    Ok(value)
}
