//! Token definitions for GeoCSS
//!
//! This module defines all the tokens that can be produced by the GeoCSS lexer.
//! The tokens are defined using the logos derive macro. Tokens that carry a payload
//! (directives, selectors, property rules, titles) decode it in their logos callback, so
//! consumers never look at the raw slice again.
//!
//! Whitespace, newlines and plain comments are real tokens here. They are dropped by
//! [lex](crate::geocss::lexing::lex) but kept by [tokenize](crate::geocss::lexing::tokenize),
//! which is what debugging output wants to see.
use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

/// A property rule, `stroke-width: 1, 2;` decoded as its key and its raw comma-separated values.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Property {
    pub key: String,
    pub values: Vec<String>,
}

/// All possible tokens in GeoCSS
#[derive(Logos, Debug, PartialEq, Clone, Serialize)]
pub enum Token {
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[token("{")]
    Open,

    // Stray semicolons after a closing brace belong to the brace
    #[regex(r"\}[;]*")]
    Close,

    #[token(",")]
    Comma,

    #[regex(r"@mode[^;]*;", |lex| directive_value(lex.slice(), "@mode"))]
    Mode(String),

    #[regex(r"@styleTitle[^;]*;", |lex| directive_value(lex.slice(), "@styleTitle"))]
    StyleTitle(String),

    #[regex(r"@styleAbstract[^;]*;", |lex| directive_value(lex.slice(), "@styleAbstract"))]
    StyleAbstract(String),

    #[regex(
        r"\*:[a-zA-Z0-9\-()]+|\[[^\]]*\]:[a-zA-Z0-9\-()]+|:[a-zA-Z0-9\-()]+",
        |lex| lex.slice().to_string()
    )]
    PseudoSelector(String),

    #[regex(r"\*|\[[^\]]*\]", |lex| lex.slice().to_string())]
    Selector(String),

    #[regex(
        r#"(fill|stroke|mark|label|raster|font|halo|size|rotation|opacity)[a-zA-Z0-9_\-]*[ \t]*:([^{};'"]|'[^']*'|"[^"]*")*;"#,
        property
    )]
    Property(Property),

    #[regex(r"/\*[ \t\r\n]*@title[^*]*\*+([^/*][^*]*\*+)*/", title, priority = 10)]
    Title(String),

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    Comment,
}

impl Token {
    /// Tokens with no structural meaning, dropped before parsing
    pub fn is_discardable(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Newline | Token::Comment)
    }

    /// Check if this token can be part of a block header
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            Token::Selector(_) | Token::PseudoSelector(_) | Token::Title(_) | Token::Comma
        )
    }

    /// Check if this token is a directive (`@mode`, `@styleTitle`, `@styleAbstract`)
    pub fn is_directive(&self) -> bool {
        matches!(
            self,
            Token::Mode(_) | Token::StyleTitle(_) | Token::StyleAbstract(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace => write!(f, "<whitespace>"),
            Token::Newline => write!(f, "<newline>"),
            Token::Open => write!(f, "<open>"),
            Token::Close => write!(f, "<close>"),
            Token::Comma => write!(f, "<comma>"),
            Token::Mode(s) => write!(f, "<mode:{}>", s),
            Token::StyleTitle(s) => write!(f, "<style-title:{}>", s),
            Token::StyleAbstract(s) => write!(f, "<style-abstract:{}>", s),
            Token::PseudoSelector(s) => write!(f, "<pseudo-selector:{}>", s),
            Token::Selector(s) => write!(f, "<selector:{}>", s),
            Token::Property(p) => write!(f, "<property:{}={}>", p.key, p.values.join("|")),
            Token::Title(s) => write!(f, "<title:{}>", s),
            Token::Comment => write!(f, "<comment>"),
        }
    }
}

/// Strip the directive keyword, the terminating `;`, whitespace and quotes.
fn directive_value(slice: &str, keyword: &str) -> String {
    let payload = slice
        .strip_prefix(keyword)
        .unwrap_or(slice)
        .trim_end_matches(';')
        .trim();
    strip_quotes(payload).to_string()
}

fn title(lex: &mut Lexer<Token>) -> String {
    let inner = lex
        .slice()
        .trim_start_matches("/*")
        .trim_end_matches("*/")
        .trim()
        .trim_start_matches("@title")
        .trim();
    strip_quotes(inner).trim().to_string()
}

fn property(lex: &mut Lexer<Token>) -> Property {
    let slice = lex.slice();
    let (key, rest) = slice.split_once(':').unwrap_or((slice, ""));
    let values = split_top_level(rest.trim().trim_end_matches(';'), ',')
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();
    Property {
        key: key.trim().to_string(),
        values,
    }
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '\'' || c == '"')
}

/// Split on `separator` where it is not nested inside parentheses, brackets or quotes.
pub fn split_top_level(source: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, c) if c == separator && depth == 0 => {
                parts.push(&source[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}
