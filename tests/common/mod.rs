//! Style documents expected for the GeoCSS files under `tests/fixtures`.

#![allow(dead_code)]

use geocss::geocss::style::{
    Channel, ChannelSelection, ColorMap, ColorMapEntry, ColorMapType, ComparisonOperator,
    ContrastEnhancement, EnhancementType, FillSymbolizer, Filter, FilterValue, IconSymbolizer,
    LineSymbolizer, MarkSymbolizer, PointSymbolizer, RasterSymbolizer, Rule, ScaleDenominator,
    Style, Symbolizer, TextSymbolizer, WellKnownName,
};
use std::fs;

pub const FIXTURES: &[&str] = &[
    "simple_line",
    "line_graphic_stroke",
    "line_external_graphic",
    "line_perpendicular_offset",
    "line_with_label",
    "point_external_graphic",
    "point_marks",
    "polygon_graphic_fill",
    "polygon_transparent",
    "polygon_scale",
    "raster_gray",
    "raster_rgb",
];

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}.css", name)).expect("Failed to read fixture")
}

/// Collapse runs of whitespace so layout differences do not matter
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn expected(name: &str) -> Style {
    match name {
        "simple_line" => simple_line(),
        "line_graphic_stroke" => line_graphic_stroke(),
        "line_external_graphic" => line_external_graphic(),
        "line_perpendicular_offset" => line_perpendicular_offset(),
        "line_with_label" => line_with_label(),
        "point_external_graphic" => point_external_graphic(),
        "point_marks" => point_marks(),
        "polygon_graphic_fill" => polygon_graphic_fill(),
        "polygon_transparent" => polygon_transparent(),
        "polygon_scale" => polygon_scale(),
        "raster_gray" => raster_gray(),
        "raster_rgb" => raster_rgb(),
        other => panic!("no expected document for fixture {}", other),
    }
}

fn single_rule(name: &str, symbolizers: Vec<Symbolizer>) -> Style {
    Style {
        name: name.to_string(),
        style_abstract: None,
        rules: vec![Rule {
            name: String::new(),
            filter: None,
            scale_denominator: None,
            symbolizers,
        }],
    }
}

fn comparison(operator: ComparisonOperator, property: &str, value: FilterValue) -> Filter {
    Filter::Comparison {
        operator,
        property: property.to_string(),
        value,
    }
}

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub fn simple_line() -> Style {
    single_rule(
        "Simple Line",
        vec![Symbolizer::Line(LineSymbolizer {
            color: s("#000000"),
            width: Some(3.0),
            ..Default::default()
        })],
    )
}

pub fn line_graphic_stroke() -> Style {
    let mut mark = MarkSymbolizer::new(WellKnownName::Circle);
    mark.color = s("#FF0000");
    mark.radius = Some(3.5);
    single_rule(
        "Line with symbol",
        vec![Symbolizer::Line(LineSymbolizer {
            width: Some(3.0),
            join: s("miter"),
            cap: s("round"),
            dasharray: Some(vec![13.0, 37.0]),
            graphic_stroke: Some(Box::new(PointSymbolizer::Mark(mark))),
            ..Default::default()
        })],
    )
}

pub fn line_external_graphic() -> Style {
    single_rule(
        "Line with external graphic",
        vec![Symbolizer::Line(LineSymbolizer {
            width: Some(3.0),
            join: s("miter"),
            cap: s("round"),
            dasharray: Some(vec![13.0, 37.0]),
            graphic_stroke: Some(Box::new(PointSymbolizer::Icon(IconSymbolizer {
                image: s("http://geoserver.org/img/geoserver-logo.png"),
                size: Some(10.0),
                rotate: Some(90.0),
                opacity: None,
            }))),
            ..Default::default()
        })],
    )
}

pub fn line_perpendicular_offset() -> Style {
    single_rule(
        "Line with offset",
        vec![Symbolizer::Line(LineSymbolizer {
            color: s("#000000"),
            width: Some(3.0),
            join: s("miter"),
            cap: s("round"),
            dasharray: Some(vec![13.0, 37.0]),
            perpendicular_offset: Some(3.0),
            ..Default::default()
        })],
    )
}

pub fn line_with_label() -> Style {
    Style {
        name: "Roads".to_string(),
        style_abstract: None,
        rules: vec![Rule {
            name: "Main roads".to_string(),
            filter: Some(Filter::Or {
                filters: vec![
                    Filter::And {
                        filters: vec![
                            comparison(
                                ComparisonOperator::Equal,
                                "type",
                                FilterValue::String("road".to_string()),
                            ),
                            comparison(
                                ComparisonOperator::Greater,
                                "lanes",
                                FilterValue::Number(2.0),
                            ),
                        ],
                    },
                    comparison(
                        ComparisonOperator::Equal,
                        "type",
                        FilterValue::String("highway".to_string()),
                    ),
                ],
            }),
            scale_denominator: None,
            symbolizers: vec![
                Symbolizer::Line(LineSymbolizer {
                    color: s("#333333"),
                    width: Some(4.0),
                    ..Default::default()
                }),
                Symbolizer::Text(TextSymbolizer {
                    label: s("{{name}}"),
                    font: Some(vec!["Arial".to_string(), "DejaVu Sans".to_string()]),
                    size: Some(12.0),
                    color: s("#000000"),
                    halo_width: Some(1.0),
                    halo_color: s("#FFFFFF"),
                    offset: Some([0.0, 5.0]),
                    ..Default::default()
                }),
            ],
        }],
    }
}

pub fn point_external_graphic() -> Style {
    single_rule(
        "External graphic",
        vec![Symbolizer::Icon(IconSymbolizer {
            image: s("http://geoserver.org/img/geoserver-logo.png"),
            size: Some(10.0),
            rotate: Some(90.0),
            opacity: None,
        })],
    )
}

pub fn point_marks() -> Style {
    let mark = |name: WellKnownName, radius: f64| {
        let mut mark = MarkSymbolizer::new(name);
        mark.color = s("#FF0000");
        mark.stroke_color = s("#000000");
        mark.stroke_width = Some(1.0);
        mark.radius = Some(radius);
        Symbolizer::Mark(mark)
    };
    single_rule(
        "",
        vec![
            mark(WellKnownName::Circle, 4.0),
            mark(WellKnownName::Square, 6.0),
        ],
    )
}

pub fn polygon_graphic_fill() -> Style {
    let mut mark = MarkSymbolizer::new(WellKnownName::ShapeSlash);
    mark.stroke_color = s("#FF0000");
    mark.stroke_width = Some(2.0);
    mark.radius = Some(4.0);
    single_rule(
        "",
        vec![Symbolizer::Fill(FillSymbolizer {
            outline_color: s("#000000"),
            outline_width: Some(1.0),
            graphic_fill: Some(Box::new(PointSymbolizer::Mark(mark))),
            ..Default::default()
        })],
    )
}

pub fn polygon_transparent() -> Style {
    single_rule(
        "",
        vec![Symbolizer::Fill(FillSymbolizer {
            opacity: Some(0.0),
            outline_color: s("#000000"),
            outline_width: Some(2.0),
            ..Default::default()
        })],
    )
}

pub fn polygon_scale() -> Style {
    let mut style = single_rule(
        "",
        vec![Symbolizer::Fill(FillSymbolizer {
            color: s("#FF0000"),
            fill_opacity: Some(0.5),
            ..Default::default()
        })],
    );
    style.rules[0].scale_denominator = Some(ScaleDenominator {
        min: Some(1000.0),
        max: Some(50000.0),
    });
    style
}

fn labelled_entries() -> Vec<ColorMapEntry> {
    vec![
        ColorMapEntry {
            color: "#00ffff".to_string(),
            quantity: Some(64.0),
            label: s("label1"),
            opacity: Some(0.4),
        },
        ColorMapEntry {
            color: "#ff00ff".to_string(),
            quantity: Some(256.0),
            label: s("label2"),
            opacity: Some(0.8),
        },
    ]
}

pub fn raster_gray() -> Style {
    let mut style = single_rule(
        "Raster gray channel",
        vec![Symbolizer::Raster(RasterSymbolizer {
            opacity: Some(0.5),
            color_map: Some(ColorMap {
                map_type: Some(ColorMapType::Intervals),
                color_map_entries: Some(labelled_entries()),
            }),
            channel_selection: Some(ChannelSelection::Gray {
                gray_channel: Channel {
                    source_channel_name: s("0"),
                    contrast_enhancement: Some(ContrastEnhancement {
                        enhancement_type: Some(EnhancementType::Normalize),
                        gamma_value: Some(0.5),
                    }),
                },
            }),
            ..Default::default()
        })],
    );
    style.rules[0].name = "Raster style".to_string();
    style
}

pub fn raster_rgb() -> Style {
    let channel = |name: &str| Channel {
        source_channel_name: s(name),
        contrast_enhancement: Some(ContrastEnhancement {
            enhancement_type: Some(EnhancementType::Histogram),
            gamma_value: Some(0.5),
        }),
    };
    let mut style = single_rule(
        "Raster rgb channels",
        vec![Symbolizer::Raster(RasterSymbolizer {
            opacity: Some(0.5),
            color_map: Some(ColorMap {
                map_type: Some(ColorMapType::Ramp),
                color_map_entries: Some(labelled_entries()),
            }),
            channel_selection: Some(ChannelSelection::Rgb {
                red_channel: channel("0"),
                green_channel: channel("1"),
                blue_channel: channel("2"),
            }),
            ..Default::default()
        })],
    );
    style.rules[0].name = "Raster style".to_string();
    style
}
