use crate::{
    ast::{
        ast::{FunctionDecl, Global},
        statements::{Case, Stmt},
    },
    errors::errors::{Error, ParseErrorImpl},
};

use super::{expr::parse_expr, parser::Parser};

/// `val name (: Type)? = value ;` or `var name (: Type)? (= value)? ;`
pub fn parse_global(parser: &mut Parser) -> Result<Global, Error> {
    let mutable = parser.matches("var");
    if !mutable {
        parser.expect("val")?;
    }

    let name = parser.expect_identifier()?;
    let type_name = parse_type_annotation(parser)?;

    let value = if parser.matches("=") {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    if !mutable && value.is_none() {
        return Err(parser.error(ParseErrorImpl::ExpectedExplicitValue { variable: name }));
    }

    parser.expect(";")?;

    Ok(Global {
        name,
        type_name,
        mutable,
        value,
        variable: None,
    })
}

/// `fun name(param: Type, ...) (: Type)? do block end`
pub fn parse_function(parser: &mut Parser) -> Result<FunctionDecl, Error> {
    parser.expect("fun")?;
    let name = parser.expect_identifier()?;
    parser.expect("(")?;

    let mut parameters = vec![];
    let mut parameter_types = vec![];

    if !parser.matches(")") {
        loop {
            parameters.push(parser.expect_identifier()?);
            parser.expect(":")?;
            parameter_types.push(parser.expect_identifier()?);

            if parser.matches(",") {
                if parser.peek(")") {
                    return Err(parser.error(ParseErrorImpl::TrailingComma));
                }
                continue;
            }

            parser.expect(")")?;
            break;
        }
    }

    let return_type_name = parse_type_annotation(parser)?;

    parser.expect("do")?;
    let body = parse_block(parser, &["end"])?;
    parser.expect("end")?;

    Ok(FunctionDecl {
        name,
        parameters,
        parameter_types,
        return_type_name,
        body,
        function: None,
    })
}

fn parse_type_annotation(parser: &mut Parser) -> Result<Option<String>, Error> {
    if parser.matches(":") {
        Ok(Some(parser.expect_identifier()?))
    } else {
        Ok(None)
    }
}

/// Statements up to, but not including, the first token in `terminators`.
pub fn parse_block(parser: &mut Parser, terminators: &[&str]) -> Result<Vec<Stmt>, Error> {
    let mut statements = vec![];

    while !terminators.iter().any(|terminator| parser.peek(terminator)) {
        if !parser.has_tokens() {
            let expected = terminators.last().copied().unwrap_or("end");
            return Err(parser.expected(expected));
        }
        statements.push(parse_stmt(parser)?);
    }

    Ok(statements)
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.peek("let") {
        return parse_declaration_stmt(parser);
    }
    if parser.peek("if") {
        return parse_if_stmt(parser);
    }
    if parser.peek("while") {
        return parse_while_stmt(parser);
    }
    if parser.peek("switch") {
        return parse_switch_stmt(parser);
    }
    if parser.peek("return") {
        return parse_return_stmt(parser);
    }

    let expression = parse_expr(parser)?;

    if parser.matches("=") {
        let value = parse_expr(parser)?;
        parser.expect(";")?;
        return Ok(Stmt::Assignment {
            receiver: expression,
            value,
        });
    }

    parser.expect(";")?;
    Ok(Stmt::Expression(expression))
}

fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect("let")?;
    let name = parser.expect_identifier()?;
    let type_name = parse_type_annotation(parser)?;

    let value = if parser.matches("=") {
        Some(parse_expr(parser)?)
    } else {
        None
    };

    parser.expect(";")?;

    Ok(Stmt::Declaration {
        name,
        type_name,
        value,
        variable: None,
    })
}

fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect("if")?;
    let condition = parse_expr(parser)?;
    parser.expect("do")?;

    let then_body = parse_block(parser, &["else", "end"])?;
    let else_body = if parser.matches("else") {
        parse_block(parser, &["end"])?
    } else {
        vec![]
    };

    parser.expect("end")?;

    Ok(Stmt::If {
        condition,
        then_body,
        else_body,
    })
}

fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect("while")?;
    let condition = parse_expr(parser)?;
    parser.expect("do")?;
    let body = parse_block(parser, &["end"])?;
    parser.expect("end")?;

    Ok(Stmt::While { condition, body })
}

/// `switch expr (case expr : block)* default : block end`
fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect("switch")?;
    let condition = parse_expr(parser)?;

    let mut cases = vec![];

    while parser.matches("case") {
        let value = parse_expr(parser)?;
        parser.expect(":")?;
        let body = parse_block(parser, &["case", "default", "end"])?;
        cases.push(Case {
            value: Some(value),
            body,
        });
    }

    parser.expect("default")?;
    parser.expect(":")?;
    let body = parse_block(parser, &["end"])?;
    cases.push(Case { value: None, body });

    parser.expect("end")?;

    Ok(Stmt::Switch { condition, cases })
}

fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect("return")?;
    let value = parse_expr(parser)?;
    parser.expect(";")?;

    Ok(Stmt::Return { value })
}
