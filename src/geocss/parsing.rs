//! Structural reconstruction
//!
//!     The lexer hands us a flat stream. This module rebuilds the nesting implied by the
//!     braces with a single recursive-descent pass over that stream, keeping an explicit
//!     owner relationship: every [Block] owns its nested blocks.
//!
//! Block Headers
//!
//!     Everything between the end of the previous statement and an Open token is a block
//!     header: selectors, pseudo-selectors, commas and an optional title comment.
//!     Adjacent selector tokens concatenate (`[a=1][b=2]` is one compound selector), a comma
//!     starts a new alternative (`[a=1],[a=2]` is two alternatives, possibly spread over
//!     several lines).
//!
//! Numbering
//!
//!     Each block records its nesting `level` (1 for top level blocks), its `group` (the
//!     index of the top level block it belongs to) and its `id` (the order in which blocks
//!     of the same group were opened, starting at 1). Walking the tree depth first visits
//!     blocks in ascending `(group, id)` order, which is declaration order.

use crate::geocss::error::GeoCssError;
use crate::geocss::lexing::{lex, location, Token, TokenSpan};
use std::collections::BTreeMap;

/// Property key to its raw, comma-separated values
pub type PropertyMap = BTreeMap<String, Vec<String>>;

/// Style level directives (`@mode`, `@styleTitle`, `@styleAbstract`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    pub mode: Option<String>,
    pub style_title: Option<String>,
    pub style_abstract: Option<String>,
}

/// A `selectors { ... }` block and everything nested in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Selector alternatives of this block alone, without its ancestors
    pub selectors: Vec<String>,
    pub title: Option<String>,
    pub properties: PropertyMap,
    pub children: Vec<Block>,
    pub level: usize,
    pub group: usize,
    pub id: usize,
}

/// A parsed GeoCSS source: directives plus the top level blocks in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub directives: Directives,
    pub blocks: Vec<Block>,
}

impl Stylesheet {
    /// Depth first iteration over every block, in declaration order
    pub fn walk(&self) -> Vec<&Block> {
        fn visit<'a>(block: &'a Block, out: &mut Vec<&'a Block>) {
            out.push(block);
            for child in &block.children {
                visit(child, out);
            }
        }
        let mut out = Vec::new();
        for block in &self.blocks {
            visit(block, &mut out);
        }
        out
    }
}

/// Lex and parse GeoCSS source text.
pub fn parse(source: &str) -> Result<Stylesheet, GeoCssError> {
    let tokens = lex(source)?;
    parse_tokens(&tokens, source)
}

/// Parse an already lexed token stream. Whitespace, newline and comment tokens are skipped.
pub fn parse_tokens(tokens: &[TokenSpan], source: &str) -> Result<Stylesheet, GeoCssError> {
    let mut parser = BlockParser {
        tokens,
        source,
        pos: 0,
        group: 0,
        next_id: 0,
    };
    let stylesheet = parser.stylesheet()?;
    tracing::debug!(blocks = stylesheet.blocks.len(), "parsed GeoCSS blocks");
    Ok(stylesheet)
}

struct Header {
    selectors: Vec<String>,
    title: Option<String>,
}

struct BlockParser<'a> {
    tokens: &'a [TokenSpan],
    source: &'a str,
    pos: usize,
    group: usize,
    next_id: usize,
}

impl<'a> BlockParser<'a> {
    fn peek(&self) -> Option<&'a TokenSpan> {
        self.tokens.get(self.pos)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> GeoCssError {
        let loc = location(self.source, offset);
        GeoCssError::Structural {
            line: loc.line,
            column: loc.column,
            message: message.into(),
        }
    }

    fn stylesheet(&mut self) -> Result<Stylesheet, GeoCssError> {
        let mut stylesheet = Stylesheet::default();

        while let Some((token, span)) = self.peek() {
            match token {
                Token::Mode(value) => {
                    stylesheet.directives.mode = Some(value.clone());
                    self.pos += 1;
                }
                Token::StyleTitle(value) => {
                    stylesheet.directives.style_title = Some(value.clone());
                    self.pos += 1;
                }
                Token::StyleAbstract(value) => {
                    stylesheet.directives.style_abstract = Some(value.clone());
                    self.pos += 1;
                }
                Token::Close => {
                    return Err(self.error_at(span.start, "closing brace without matching '{'"))
                }
                Token::Open => return Err(self.error_at(span.start, "block without selector")),
                Token::Property(p) => {
                    return Err(self.error_at(
                        span.start,
                        format!("property '{}' outside of any block", p.key),
                    ))
                }
                _ => {
                    let Some(header) = self.header()? else {
                        continue;
                    };
                    self.next_id = 0;
                    let block = self.block(header, 1)?;
                    stylesheet.blocks.push(block);
                    self.group += 1;
                }
            }
        }

        Ok(stylesheet)
    }

    /// Collect header tokens up to (not including) the Open token.
    /// Returns None for a dangling title comment that introduces no block.
    fn header(&mut self) -> Result<Option<Header>, GeoCssError> {
        let start = self.peek().map(|(_, span)| span.start).unwrap_or(0);
        let mut selectors = Vec::new();
        let mut current = String::new();
        let mut title = None;
        let mut saw_selector = false;

        loop {
            match self.peek() {
                Some((Token::Selector(s), _)) | Some((Token::PseudoSelector(s), _)) => {
                    current.push_str(s);
                    saw_selector = true;
                    self.pos += 1;
                }
                Some((Token::Comma, _)) => {
                    if !current.is_empty() {
                        selectors.push(std::mem::take(&mut current));
                    }
                    saw_selector = true;
                    self.pos += 1;
                }
                Some((Token::Title(t), _)) => {
                    title = Some(t.clone());
                    self.pos += 1;
                }
                Some((Token::Open, _)) => break,
                Some((token, _)) if token.is_discardable() => self.pos += 1,
                Some((_, _)) | None if !saw_selector => return Ok(None),
                Some((_, span)) => {
                    return Err(self.error_at(span.start, "expected '{' after selector"))
                }
                None => {
                    return Err(self.error_at(start, "selector without block"));
                }
            }
        }

        if !current.is_empty() {
            selectors.push(current);
        }
        if selectors.is_empty() {
            return Err(self.error_at(start, "block without selector"));
        }
        Ok(Some(Header { selectors, title }))
    }

    /// Parse a block body; the current token is the Open token that starts it.
    fn block(&mut self, header: Header, level: usize) -> Result<Block, GeoCssError> {
        let open_offset = self.peek().map(|(_, span)| span.start).unwrap_or(0);
        self.pos += 1;
        self.next_id += 1;

        let mut block = Block {
            selectors: header.selectors,
            title: header.title,
            properties: PropertyMap::new(),
            children: Vec::new(),
            level,
            group: self.group,
            id: self.next_id,
        };

        loop {
            let Some((token, span)) = self.peek() else {
                return Err(self.error_at(open_offset, "unclosed block, missing '}'"));
            };
            match token {
                Token::Close => {
                    self.pos += 1;
                    return Ok(block);
                }
                Token::Property(p) => {
                    block.properties.insert(p.key.clone(), p.values.clone());
                    self.pos += 1;
                }
                Token::Open => return Err(self.error_at(span.start, "block without selector")),
                token if token.is_directive() => {
                    return Err(self.error_at(span.start, "directive inside a block"))
                }
                _ => {
                    let Some(header) = self.header()? else {
                        continue;
                    };
                    let child = self.block(header, level + 1)?;
                    block.children.push(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_and_single_block() {
        let sheet = parse("@mode 'Flat';\n@styleTitle 'Roads';\n* { stroke: #000000; }").unwrap();
        assert_eq!(sheet.directives.mode.as_deref(), Some("Flat"));
        assert_eq!(sheet.directives.style_title.as_deref(), Some("Roads"));
        assert_eq!(sheet.blocks.len(), 1);

        let block = &sheet.blocks[0];
        assert_eq!(block.selectors, vec!["*"]);
        assert_eq!(block.properties["stroke"], vec!["#000000"]);
        assert_eq!((block.level, block.group, block.id), (1, 0, 1));
    }

    #[test]
    fn test_nested_blocks_numbering() {
        let source = "[a=1] { [b=2] { stroke: red; } [b=3] { stroke: blue; } }\n[c=1] { fill: red; }";
        let sheet = parse(source).unwrap();
        assert_eq!(sheet.blocks.len(), 2);

        let first = &sheet.blocks[0];
        assert_eq!(first.children.len(), 2);
        assert_eq!(
            (first.children[0].level, first.children[0].group, first.children[0].id),
            (2, 0, 2)
        );
        assert_eq!(
            (first.children[1].level, first.children[1].group, first.children[1].id),
            (2, 0, 3)
        );

        let second = &sheet.blocks[1];
        assert_eq!((second.level, second.group, second.id), (1, 1, 1));

        let order: Vec<(usize, usize)> = sheet.walk().iter().map(|b| (b.group, b.id)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 1)]);
    }

    #[test]
    fn test_comma_continued_selectors() {
        let sheet = parse("[a=1],\n[a=2][b=2] { fill: red; }").unwrap();
        assert_eq!(sheet.blocks[0].selectors, vec!["[a=1]", "[a=2][b=2]"]);
    }

    #[test]
    fn test_title_belongs_to_following_block() {
        let sheet = parse("/* @title Highways */\n[type='highway'] { stroke: red; }").unwrap();
        assert_eq!(sheet.blocks[0].title.as_deref(), Some("Highways"));
    }

    #[test]
    fn test_pseudo_selector_child() {
        let sheet = parse("* { mark: symbol(circle); :mark { fill: red; } }").unwrap();
        let child = &sheet.blocks[0].children[0];
        assert_eq!(child.selectors, vec![":mark"]);
        assert_eq!(child.properties["fill"], vec!["red"]);
    }

    #[test]
    fn test_later_property_overrides_earlier() {
        let sheet = parse("* { stroke: red; stroke: blue; }").unwrap();
        assert_eq!(sheet.blocks[0].properties["stroke"], vec!["blue"]);
    }

    #[test]
    fn test_unmatched_close_is_structural_error() {
        let err = parse("* { stroke: red; } }").unwrap_err();
        assert!(matches!(err, GeoCssError::Structural { .. }));
    }

    #[test]
    fn test_unclosed_block_is_structural_error() {
        let err = parse("* { stroke: red;").unwrap_err();
        match err {
            GeoCssError::Structural { line, column, .. } => assert_eq!((line, column), (1, 3)),
            other => panic!("expected structural error, got {:?}", other),
        }
    }

    #[test]
    fn test_property_outside_block_is_structural_error() {
        let err = parse("stroke: red;").unwrap_err();
        assert!(matches!(err, GeoCssError::Structural { .. }));
    }

    #[test]
    fn test_selector_without_block_is_structural_error() {
        let err = parse("[a=1]").unwrap_err();
        assert!(matches!(err, GeoCssError::Structural { .. }));
    }

    #[test]
    fn test_raw_token_stream_with_trivia() {
        let source = " * {\n  stroke: #000000; /* note */\n}\n";
        let tokens = crate::geocss::lexing::tokenize(source).unwrap();
        let sheet = parse_tokens(&tokens, source).unwrap();
        assert_eq!(sheet, parse(source).unwrap());
        assert_eq!(sheet.blocks.len(), 1);
    }

    #[test]
    fn test_dangling_title_is_ignored() {
        let sheet = parse("* { stroke: red; /* @title nothing */ }").unwrap();
        assert_eq!(sheet.blocks.len(), 1);
        assert!(sheet.blocks[0].children.is_empty());
    }
}
