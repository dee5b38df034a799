//! Property value parser
//!
//! Reads the text of a single property value (one comma-separated item of a property rule)
//! into an [Expression]:
//!
//! - `#rrggbb` becomes `['hex', '#rrggbb']`
//! - numbers become number literals, quoted text becomes string literals
//! - `true` / `false` become `['bool', ..]`
//! - `[attr]` becomes `['brace', ['get', 'attr']]`
//! - `name(a, b)` becomes `['name', a, b]`
//! - several whitespace-separated atoms become `['array', ...]`, or `['text', ...]` for labels
//!
//! Anything else that looks like a word is a string literal.

use super::{Expression, Operator};
use crate::geocss::error::GeoCssError;
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

static BARE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-.]*$").expect("valid bare word regex"));

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
enum ValueToken {
    #[regex(r"#[0-9a-fA-F]+", |lex| lex.slice().to_string())]
    Hex(String),

    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r#"'[^']*'|"[^"]*""#, |lex| unquote(lex.slice()))]
    Quoted(String),

    #[regex(r"\[[^\]]*\]", |lex| unquote(lex.slice()).trim().to_string())]
    Brace(String),

    #[regex(r"[A-Za-z_@][A-Za-z0-9_\-.:/]*", |lex| lex.slice().to_string())]
    Word(String),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,
}

fn unquote(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

/// Whether a string can be written without quotes and read back as the same string.
pub fn is_bare_word(value: &str) -> bool {
    BARE_WORD.is_match(value) && !matches!(value, "true" | "false" | "none" | "null")
}

/// Parse one property value.
pub fn parse_value(key: &str, text: &str) -> Result<Expression, GeoCssError> {
    let mut tokens = Vec::new();
    for token in ValueToken::lexer(text) {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(GeoCssError::invalid_value(
                    key,
                    text,
                    "unrecognized value syntax",
                ))
            }
        }
    }

    let mut parser = ValueParser {
        tokens,
        pos: 0,
        key,
        text,
    };
    let atoms = parser.sequence()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }

    match atoms.len() {
        0 => Err(parser.error("empty value")),
        1 => Ok(atoms.into_iter().next().unwrap_or_else(Expression::null)),
        _ if key == "label" => Ok(Expression::tagged(Operator::Text, atoms)),
        _ => Ok(Expression::array(atoms)),
    }
}

struct ValueParser<'a> {
    tokens: Vec<ValueToken>,
    pos: usize,
    key: &'a str,
    text: &'a str,
}

impl<'a> ValueParser<'a> {
    fn error(&self, message: &str) -> GeoCssError {
        GeoCssError::invalid_value(self.key, self.text, message)
    }

    fn peek(&self) -> Option<&ValueToken> {
        self.tokens.get(self.pos)
    }

    /// Atoms up to the end of input, a comma or a closing parenthesis
    fn sequence(&mut self) -> Result<Vec<Expression>, GeoCssError> {
        let mut atoms = Vec::new();
        while let Some(token) = self.peek() {
            if matches!(token, ValueToken::Comma | ValueToken::RParen) {
                break;
            }
            atoms.push(self.atom()?);
        }
        Ok(atoms)
    }

    fn atom(&mut self) -> Result<Expression, GeoCssError> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.error("unexpected end of value"));
        };
        self.pos += 1;

        match token {
            ValueToken::Hex(hex) => Ok(Expression::hex(hex)),
            ValueToken::Number(n) => Ok(Expression::number(n)),
            ValueToken::Quoted(s) => Ok(Expression::string(s)),
            ValueToken::Brace(attribute) => Ok(Expression::tagged(
                Operator::Brace,
                vec![Expression::get(attribute)],
            )),
            ValueToken::Word(word) if self.peek() == Some(&ValueToken::LParen) => {
                self.pos += 1;
                let args = self.arguments()?;
                Ok(Expression::tagged(
                    Operator::from_name(&word.to_ascii_lowercase()),
                    args,
                ))
            }
            ValueToken::Word(word) => match word.as_str() {
                "true" => Ok(Expression::boolean(true)),
                "false" => Ok(Expression::boolean(false)),
                _ => Ok(Expression::string(word)),
            },
            ValueToken::LParen | ValueToken::RParen | ValueToken::Comma => {
                Err(self.error("unexpected punctuation"))
            }
        }
    }

    /// Function arguments; the opening parenthesis is already consumed.
    fn arguments(&mut self) -> Result<Vec<Expression>, GeoCssError> {
        let mut args = Vec::new();
        if self.peek() == Some(&ValueToken::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            let mut atoms = self.sequence()?;
            let arg = match atoms.len() {
                0 => return Err(self.error("empty function argument")),
                1 => atoms.remove(0),
                _ => Expression::array(atoms),
            };
            args.push(arg);

            match self.peek() {
                Some(ValueToken::Comma) => self.pos += 1,
                Some(ValueToken::RParen) => {
                    self.pos += 1;
                    return Ok(args);
                }
                _ => return Err(self.error("unclosed function call")),
            }
        }
    }
}
