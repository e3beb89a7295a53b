use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ParseError, ParseErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("token patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    /// Tried in order at the current offset; the first match wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^//[^\n]*", skip_handler),
        pattern(r"^[A-Za-z_][A-Za-z0-9_]*", symbol_handler),
        pattern(r"^-[0-9]+(\.[0-9]+)?", signed_number_handler),
        pattern(r"^[0-9]+(\.[0-9]+)?", number_handler),
        pattern(r"^'([^'\\\n]|\\.)'", character_handler),
        pattern(r#"^"([^"\\\n]|\\.)*""#, string_handler),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Operator, "==")),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::Operator, "!=")),
        pattern(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::Operator, "&&")),
        pattern(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Operator, "||")),
        pattern(r#"^[^\s'"]"#, operator_handler),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Span covering the next `len` bytes of the source.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    /// Emits `text` as the next token and moves past it.
    pub fn push_fixed(&mut self, kind: TokenKind, text: &str) -> Result<(), Error> {
        let span = self.span_of(text.len());
        self.push(MK_TOKEN!(kind, String::from(text), span));
        self.advance_n(text.len());
        Ok(())
    }

    fn push_matched(&mut self, kind: TokenKind, regex: &Regex) -> Result<(), Error> {
        let matched = self.matched(regex)?;
        let span = self.span_of(matched.len());
        let len = matched.len();
        self.push(MK_TOKEN!(kind, matched, span));
        self.advance_n(len);
        Ok(())
    }

    fn matched(&self, regex: &Regex) -> Result<String, Error> {
        match regex.find(self.remainder()) {
            Some(found) => Ok(String::from(found.as_str())),
            None => Err(self.unrecognised()),
        }
    }

    fn unrecognised(&self) -> Error {
        let token = self
            .remainder()
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default();
        Error::from(ParseError::new(
            ParseErrorImpl::UnrecognisedToken { token },
            Position(self.pos as u32, Rc::clone(&self.file)),
        ))
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex)?;
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(TokenKind::Identifier, regex)
}

fn number_kind(text: &str) -> TokenKind {
    if text.contains('.') {
        TokenKind::Decimal
    } else {
        TokenKind::Integer
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex)?;
    lexer.push_matched(number_kind(&matched), regex)
}

fn signed_number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    if lexer.last_token().is_some_and(Token::ends_operand) {
        // `x-1` is a subtraction, not `x` followed by `-1`.
        return lexer.push_fixed(TokenKind::Operator, "-");
    }

    let matched = lexer.matched(regex)?;
    lexer.push_matched(number_kind(&matched), regex)
}

fn character_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(TokenKind::Character, regex)
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(TokenKind::String, regex)
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    lexer.push_matched(TokenKind::Operator, regex)
}

pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(String::from(source), file);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(remainder));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => return Err(lex.unrecognised()),
        }
    }

    tracing::trace!(count = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
