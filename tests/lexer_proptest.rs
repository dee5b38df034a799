//! Property-based tests for the GeoCSS lexer and reader
//!
//! Arbitrary input must never make the lexer or the reader panic, and generated
//! well-formed rules must always read.

use geocss::geocss::lexing::{lex, tokenize, Token};
use geocss::{GeoCssStyleParser, StyleParser};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = String> {
    "#[0-9A-F]{6}"
}

fn attribute() -> impl Strategy<Value = String> {
    "f_[a-z]{1,8}"
}

proptest! {
    #[test]
    fn lexer_never_panics(source in "\\PC{0,200}") {
        let _ = tokenize(&source);
    }

    #[test]
    fn reader_never_panics(source in "[*{}\\[\\]=;:,' a-z0-9#@/()]{0,120}") {
        let _ = GeoCssStyleParser::new().read_style(&source);
    }

    #[test]
    fn token_spans_cover_the_source(source in "[*{} \n\\[\\]a-z=0-9']{0,80}") {
        if let Ok(tokens) = tokenize(&source) {
            let mut end = 0;
            for (_, span) in &tokens {
                prop_assert_eq!(span.start, end);
                end = span.end;
            }
            prop_assert_eq!(end, source.len());
        }
    }

    #[test]
    fn generated_rules_read(
        attr in attribute(),
        value in 0u32..1000,
        stroke in color(),
        width in 1u32..20,
    ) {
        let source = format!(
            "[{} = {}] {{ stroke: {}; stroke-width: {}; }}",
            attr, value, stroke, width
        );
        let tokens = lex(&source).unwrap();
        prop_assert!(matches!(tokens[0].0, Token::Selector(_)));

        let style = GeoCssStyleParser::new().read_style(&source).unwrap().output;
        prop_assert_eq!(style.rules.len(), 1);
        prop_assert_eq!(style.rules[0].symbolizers.len(), 1);
    }
}
