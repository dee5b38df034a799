//! Lexer
//!
//!     This module turns GeoCSS source into a flat, ordered stream of classified tokens.
//!     The tokenization is done through the logos lexer library, see [tokens](tokens) for
//!     the token set. Nothing here knows about nesting: braces are plain Open / Close
//!     tokens and the structure is rebuilt by [parsing](crate::geocss::parsing).
//!
//! Source Locations
//!
//!     Logos tokens carry the byte range of their source text. We keep that range next to
//!     every token, `(Token, Range<usize>)`, and only convert it to a line / column pair when
//!     an error has to be reported.
//!
//! Two Entry Points
//!
//!     - [tokenize] returns every token, including whitespace, newlines and comments.
//!     - [lex] returns only the tokens the parser cares about.
//!
//!     Input that matches no token pattern is a hard error in both.

pub mod tokens;

pub use tokens::{Property, Token};

use crate::geocss::error::GeoCssError;
use logos::Logos;
use std::ops::Range;

/// A token together with the byte range it was read from
pub type TokenSpan = (Token, Range<usize>);

/// A 1-based line / column position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Convert a byte offset into a line / column location.
pub fn location(source: &str, offset: usize) -> Location {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(idx) => before[idx + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    Location { line, column }
}

/// Tokenize source text with location information, keeping every token.
pub fn tokenize(source: &str) -> Result<Vec<TokenSpan>, GeoCssError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let Location { line, column } = location(source, span.start);
                return Err(GeoCssError::Lex {
                    line,
                    column,
                    fragment: fragment_at(source, span.start),
                });
            }
        }
    }

    Ok(tokens)
}

/// Main lexer function: tokenize and drop whitespace, newlines and plain comments.
pub fn lex(source: &str) -> Result<Vec<TokenSpan>, GeoCssError> {
    let mut tokens = tokenize(source)?;
    tokens.retain(|(token, _)| !token.is_discardable());
    tracing::debug!(count = tokens.len(), "lexed GeoCSS tokens");
    Ok(tokens)
}

/// The rest of the offending line, capped so error messages stay readable.
fn fragment_at(source: &str, start: usize) -> String {
    source[start..]
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(32)
        .collect()
}
