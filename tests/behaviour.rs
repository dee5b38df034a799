//! Reader behaviour on hand-written GeoCSS

use geocss::geocss::style::{
    ComparisonOperator, Filter, FilterValue, LineSymbolizer, Symbolizer, TextSymbolizer,
};
use geocss::{GeoCssError, GeoCssStyleParser, Style, StyleParser, Warning};

fn read(source: &str) -> Result<Style, GeoCssError> {
    GeoCssStyleParser::new()
        .read_style(source)
        .map(|result| result.output)
}

fn equal(property: &str, value: f64) -> Filter {
    Filter::Comparison {
        operator: ComparisonOperator::Equal,
        property: property.to_string(),
        value: FilterValue::Number(value),
    }
}

#[test]
fn test_nested_alternatives_combine_into_or_of_ands() {
    let style = read("[a = 1], [a = 2] { [b = 2] { stroke: #000000; } }").unwrap();
    assert_eq!(style.rules.len(), 1);
    assert_eq!(
        style.rules[0].filter,
        Some(Filter::Or {
            filters: vec![
                Filter::And {
                    filters: vec![equal("a", 1.0), equal("b", 2.0)],
                },
                Filter::And {
                    filters: vec![equal("a", 2.0), equal("b", 2.0)],
                },
            ],
        })
    );
}

#[test]
fn test_blocks_become_separate_rules() {
    let style =
        read("[a = 1] { stroke: #000000; [b = 2] { stroke: #FF0000; } } [c = 3] { fill: #00FF00; }")
            .unwrap();
    let filters: Vec<Option<Filter>> = style.rules.iter().map(|r| r.filter.clone()).collect();
    assert_eq!(
        filters,
        vec![
            Some(equal("a", 1.0)),
            Some(Filter::And {
                filters: vec![equal("a", 1.0), equal("b", 2.0)],
            }),
            Some(equal("c", 3.0)),
        ]
    );
}

#[test]
fn test_multi_values_split_into_symbolizers() {
    // The label is shared, so the second row's text symbolizer is a duplicate
    let style = read("* { stroke: #000000, #FF0000; stroke-width: 1, 3; label: [name]; }").unwrap();
    assert_eq!(
        style.rules[0].symbolizers,
        vec![
            Symbolizer::Line(LineSymbolizer {
                color: Some("#000000".to_string()),
                width: Some(1.0),
                ..Default::default()
            }),
            Symbolizer::Text(TextSymbolizer {
                label: Some("{{name}}".to_string()),
                ..Default::default()
            }),
            Symbolizer::Line(LineSymbolizer {
                color: Some("#FF0000".to_string()),
                width: Some(3.0),
                ..Default::default()
            }),
        ]
    );
}

#[test]
fn test_none_removes_a_key_from_one_row() {
    let style = read("* { stroke: #000000, #FF0000; stroke-width: none, 3; }").unwrap();
    match &style.rules[0].symbolizers[..] {
        [Symbolizer::Line(first), Symbolizer::Line(second)] => {
            assert_eq!(first.width, None);
            assert_eq!(second.width, Some(3.0));
        }
        other => panic!("expected two lines, got {:?}", other),
    }
}

#[test]
fn test_label_offset_arity() {
    let err = read("* { label: [name]; label-offset: 1 2 3; }").unwrap_err();
    assert_eq!(
        err,
        GeoCssError::Arity {
            property: "label-offset".to_string(),
            expected: "2".to_string(),
            found: 3,
        }
    );
}

#[test]
fn test_raster_channel_arity() {
    let err = read("* { raster-channels: 1 2; }").unwrap_err();
    assert!(matches!(err, GeoCssError::Arity { found: 2, .. }));
}

#[test]
fn test_unsupported_mode_is_a_warning() {
    let result = GeoCssStyleParser::new()
        .read_style("@mode 'Auto';\n* { stroke: #000000; }")
        .unwrap();
    assert_eq!(
        result.warnings,
        vec![Warning::UnsupportedMode("Auto".to_string())]
    );
    assert_eq!(result.output.rules.len(), 1);
}

#[test]
fn test_unknown_property_is_a_lex_error() {
    let err = read("* {\n  z-index: 3;\n}").unwrap_err();
    assert!(matches!(err, GeoCssError::Lex { line: 2, .. }), "{:?}", err);
}

#[test]
fn test_unbalanced_braces_are_structural_errors() {
    assert!(matches!(
        read("* { stroke: #000000; } }"),
        Err(GeoCssError::Structural { .. })
    ));
    assert!(matches!(
        read("* { stroke: #000000;"),
        Err(GeoCssError::Structural { .. })
    ));
}

#[test]
fn test_unsupported_symbol() {
    assert_eq!(
        read("* { mark: symbol('hexagon'); }").unwrap_err(),
        GeoCssError::UnsupportedSymbol {
            name: "hexagon".to_string()
        }
    );
}

#[test]
fn test_empty_input_is_an_empty_style() {
    let style = read("").unwrap();
    assert_eq!(style, Style::default());
}
