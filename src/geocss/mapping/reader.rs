//! GeoCSS rule records to style document.

use crate::geocss::assembling::{
    assemble, classify, PropertyRow, PseudoSelector, RuleRecord, SymbolizerKind,
};
use crate::geocss::config::ReaderConfig;
use crate::geocss::error::GeoCssError;
use crate::geocss::expression::filter::{read_selectors, SelectorFilter};
use crate::geocss::expression::value_parser::parse_value;
use crate::geocss::expression::{read, Expression, Literal, Operator, Value};
use crate::geocss::lexing::tokens::split_top_level;
use crate::geocss::parsing::Stylesheet;
use crate::geocss::style::{
    Channel, ChannelSelection, ColorMap, ColorMapEntry, ColorMapType, ContrastEnhancement,
    EnhancementType, FillSymbolizer, IconSymbolizer, LineSymbolizer, MarkSymbolizer,
    PointSymbolizer, RasterSymbolizer, Rule, Style, Symbolizer, TextSymbolizer, WellKnownName,
};

/// Build the style document for a parsed stylesheet.
pub fn read_stylesheet(stylesheet: &Stylesheet, config: &ReaderConfig) -> Result<Style, GeoCssError> {
    let assembly = assemble(stylesheet);

    let rules = assembly
        .rules
        .iter()
        .map(|record| read_rule(record, &assembly.pseudo, config))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rules = rules.len(), "read GeoCSS style");
    Ok(Style {
        name: stylesheet.directives.style_title.clone().unwrap_or_default(),
        style_abstract: stylesheet.directives.style_abstract.clone(),
        rules,
    })
}

fn read_rule(
    record: &RuleRecord,
    pseudo_records: &[RuleRecord],
    config: &ReaderConfig,
) -> Result<Rule, GeoCssError> {
    let SelectorFilter {
        filter,
        scale_denominator,
    } = read_selectors(&record.selectors, &config.scale_attributes)?;
    let pseudo = PseudoBags::for_record(record, pseudo_records);

    let mut symbolizers = Vec::new();
    for (index, row) in record.rows.iter().enumerate() {
        let bag = RowContext {
            row,
            pseudo: &pseudo,
            index,
        };
        for kind in classify(row) {
            let symbolizer = match kind {
                SymbolizerKind::Point => Symbolizer::from(point_symbolizer(&bag, "mark")?),
                SymbolizerKind::Line => Symbolizer::Line(line_symbolizer(&bag)?),
                SymbolizerKind::Polygon => Symbolizer::Fill(fill_symbolizer(&bag)?),
                SymbolizerKind::Text => Symbolizer::Text(text_symbolizer(&bag)?),
                SymbolizerKind::Raster => Symbolizer::Raster(raster_symbolizer(&bag)?),
            };
            symbolizers.push(symbolizer);
        }
    }

    // Split rows sharing every value produce identical symbolizers
    let mut unique: Vec<Symbolizer> = Vec::with_capacity(symbolizers.len());
    for symbolizer in symbolizers {
        if !unique.contains(&symbolizer) {
            unique.push(symbolizer);
        }
    }

    Ok(Rule {
        name: record.title.clone().unwrap_or_default(),
        filter,
        scale_denominator,
        symbolizers: unique,
    })
}

/// Pseudo-selector records that apply to one rule record
struct PseudoBags<'a> {
    records: Vec<(PseudoSelector, &'a RuleRecord)>,
}

impl<'a> PseudoBags<'a> {
    fn for_record(record: &RuleRecord, pseudo_records: &'a [RuleRecord]) -> Self {
        let mut records = Vec::new();
        for pseudo in pseudo_records {
            for selector in pseudo.selectors.iter().filter_map(|s| PseudoSelector::parse(s)) {
                // Nested pseudo blocks stay within their own top-level block
                let in_scope = pseudo.group == record.group || pseudo.level == 1;
                let generic = selector.base.is_empty() || selector.base == "*";
                let applies = in_scope && (generic || record.selectors.contains(&selector.base));
                if applies {
                    records.push((selector, pseudo));
                }
            }
        }
        PseudoBags { records }
    }

    /// Value of `key` for row `index` of the `part` sub-symbolizer.
    /// Lookup order: `nth-<part>(i)`, `<part>`, `nth-symbol(i)`, `symbol`.
    fn value(&self, part: &str, index: usize, key: &str) -> Option<&'a str> {
        let nth = format!("nth-{}", part);
        let candidates = [
            (nth.as_str(), Some(index + 1)),
            (part, None),
            ("nth-symbol", Some(index + 1)),
            ("symbol", None),
        ];
        candidates.iter().find_map(|(name, position)| {
            self.records.iter().find_map(|&(ref selector, record)| {
                if selector.part != *name || selector.index != *position {
                    return None;
                }
                let row = if record.rows.len() == 1 {
                    record.rows.first()
                } else {
                    record.rows.get(index)
                }?;
                row.get(key).map(String::as_str)
            })
        })
    }
}

struct RowContext<'r, 'a> {
    row: &'r PropertyRow,
    pseudo: &'r PseudoBags<'a>,
    index: usize,
}

impl<'r, 'a> RowContext<'r, 'a> {
    fn raw(&self, key: &str) -> Option<&'r str> {
        self.row.get(key).map(String::as_str)
    }

    fn pseudo(&self, part: &str, key: &str) -> Option<&'a str> {
        self.pseudo.value(part, self.index, key)
    }

    fn expression(&self, key: &str) -> Result<Option<Expression>, GeoCssError> {
        expression_of(key, self.raw(key))
    }

    fn number(&self, key: &str) -> Result<Option<f64>, GeoCssError> {
        number_of(key, self.raw(key))
    }

    fn numbers(&self, key: &str) -> Result<Option<Vec<f64>>, GeoCssError> {
        numbers_of(key, self.raw(key))
    }

    fn text(&self, key: &str) -> Result<Option<String>, GeoCssError> {
        text_of(key, self.raw(key))
    }
}

fn expression_of(key: &str, raw: Option<&str>) -> Result<Option<Expression>, GeoCssError> {
    raw.map(|text| parse_value(key, text)).transpose()
}

fn number_of(key: &str, raw: Option<&str>) -> Result<Option<f64>, GeoCssError> {
    let Some(text) = raw else {
        return Ok(None);
    };
    read(&parse_value(key, text)?)
        .as_f64()
        .map(Some)
        .ok_or_else(|| GeoCssError::invalid_value(key, text, "expected a number"))
}

fn numbers_of(key: &str, raw: Option<&str>) -> Result<Option<Vec<f64>>, GeoCssError> {
    let Some(text) = raw else {
        return Ok(None);
    };
    read(&parse_value(key, text)?)
        .into_list()
        .iter()
        .map(|value| {
            value
                .as_f64()
                .ok_or_else(|| GeoCssError::invalid_value(key, text, "expected numbers"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn text_of(key: &str, raw: Option<&str>) -> Result<Option<String>, GeoCssError> {
    let Some(text) = raw else {
        return Ok(None);
    };
    read(&parse_value(key, text)?)
        .to_text()
        .map(Some)
        .ok_or_else(|| GeoCssError::invalid_value(key, text, "expected a single value"))
}

fn is_graphic(expr: &Expression) -> bool {
    expr.is_tagged(&Operator::Symbol) || expr.is_tagged(&Operator::Url)
}

/// A colour: `#rrggbb` or a named colour
fn color_of(expr: &Expression) -> Option<String> {
    match expr {
        Expression::Tagged {
            op: Operator::Hex, ..
        }
        | Expression::Literal(Literal::String(_)) => read(expr).to_text(),
        _ => None,
    }
}

/// Mark or icon described by `<prefix>`, `<prefix>-size`, `<prefix>-rotation` and the
/// `<prefix>` pseudo-selector bag.
fn point_symbolizer(ctx: &RowContext, prefix: &str) -> Result<PointSymbolizer, GeoCssError> {
    let graphic = ctx
        .expression(prefix)?
        .ok_or_else(|| GeoCssError::invalid_value(prefix, "", "missing graphic"))?;

    let size = match number_of("size", ctx.pseudo(prefix, "size"))? {
        Some(size) => Some(size),
        None => ctx.number(&format!("{}-size", prefix))?,
    };
    let rotate = match number_of("rotation", ctx.pseudo(prefix, "rotation"))? {
        Some(rotation) => Some(rotation),
        None => ctx.number(&format!("{}-rotation", prefix))?,
    };
    let opacity = match number_of("opacity", ctx.pseudo(prefix, "opacity"))? {
        Some(opacity) => Some(opacity),
        None if prefix == "mark" => ctx.number("mark-opacity")?,
        None => None,
    };

    if graphic.is_tagged(&Operator::Url) {
        return Ok(PointSymbolizer::Icon(IconSymbolizer {
            image: read(&graphic).to_text(),
            size,
            rotate,
            opacity,
        }));
    }

    let name = match read(&graphic) {
        Value::String(name) => name,
        _ => {
            return Err(GeoCssError::invalid_value(
                prefix,
                graphic.to_string(),
                "expected symbol(...) or url(...)",
            ))
        }
    };
    let well_known_name = WellKnownName::from_css_name(&name)
        .ok_or_else(|| GeoCssError::UnsupportedSymbol { name: name.clone() })?;

    let mut mark = MarkSymbolizer::new(well_known_name);
    mark.color = expression_of("fill", ctx.pseudo(prefix, "fill"))?
        .as_ref()
        .and_then(color_of);
    mark.fill_opacity = number_of("fill-opacity", ctx.pseudo(prefix, "fill-opacity"))?;
    mark.stroke_color = expression_of("stroke", ctx.pseudo(prefix, "stroke"))?
        .as_ref()
        .and_then(color_of);
    mark.stroke_width = number_of("stroke-width", ctx.pseudo(prefix, "stroke-width"))?;
    mark.stroke_opacity = number_of("stroke-opacity", ctx.pseudo(prefix, "stroke-opacity"))?;
    mark.radius = size.map(|size| size / 2.0);
    mark.rotate = rotate;
    mark.opacity = opacity;
    Ok(PointSymbolizer::Mark(mark))
}

fn line_symbolizer(ctx: &RowContext) -> Result<LineSymbolizer, GeoCssError> {
    let stroke = ctx.expression("stroke")?;
    let mut line = LineSymbolizer::default();

    match &stroke {
        Some(expr) if is_graphic(expr) => {
            line.graphic_stroke = Some(Box::new(point_symbolizer(ctx, "stroke")?));
        }
        Some(expr) => line.color = color_of(expr),
        None => {}
    }
    line.width = ctx.number("stroke-width")?;
    line.opacity = ctx.number("stroke-opacity")?;
    line.join = ctx.text("stroke-linejoin")?;
    line.cap = ctx.text("stroke-linecap")?;
    line.dasharray = ctx.numbers("stroke-dasharray")?;
    line.dash_offset = ctx.number("stroke-dashoffset")?;
    line.perpendicular_offset = ctx.number("stroke-offset")?;
    Ok(line)
}

fn fill_symbolizer(ctx: &RowContext) -> Result<FillSymbolizer, GeoCssError> {
    let fill = ctx.expression("fill")?;
    let mut polygon = FillSymbolizer::default();

    match &fill {
        Some(expr) if is_graphic(expr) => {
            polygon.graphic_fill = Some(Box::new(point_symbolizer(ctx, "fill")?));
        }
        Some(expr) => polygon.color = color_of(expr).filter(|color| color != "transparent"),
        None => {}
    }
    polygon.fill_opacity = ctx.number("fill-opacity")?;
    polygon.outline_color = ctx.expression("stroke")?.as_ref().and_then(color_of);
    polygon.outline_width = ctx.number("stroke-width")?;
    polygon.outline_opacity = ctx.number("stroke-opacity")?;
    polygon.outline_dasharray = ctx.numbers("stroke-dasharray")?;

    if polygon.color.is_none() && polygon.graphic_fill.is_none() {
        polygon.opacity = Some(0.0);
    }
    Ok(polygon)
}

fn text_symbolizer(ctx: &RowContext) -> Result<TextSymbolizer, GeoCssError> {
    let mut text = TextSymbolizer {
        label: ctx.expression("label")?.as_ref().map(label_template),
        ..Default::default()
    };

    if let Some(families) = ctx.raw("font-family") {
        let mut font = Vec::new();
        for family in split_top_level(families, ',') {
            if let Some(name) = text_of("font-family", Some(family.trim()))? {
                font.push(name);
            }
        }
        text.font = Some(font);
    }
    text.size = ctx.number("font-size")?;
    text.font_style = ctx.text("font-style")?;
    text.font_weight = ctx.text("font-weight")?;
    text.color = ctx.expression("font-fill")?.as_ref().and_then(color_of);
    text.halo_width = ctx.number("halo-radius")?;
    text.halo_color = ctx.expression("halo-color")?.as_ref().and_then(color_of);
    text.halo_opacity = ctx.number("halo-opacity")?;
    text.rotate = ctx.number("label-rotation")?;

    if let Some(offset) = ctx.numbers("label-offset")? {
        match offset.as_slice() {
            [x, y] => text.offset = Some([*x, *y]),
            other => {
                return Err(GeoCssError::Arity {
                    property: "label-offset".to_string(),
                    expected: "2".to_string(),
                    found: other.len(),
                })
            }
        }
    }
    Ok(text)
}

/// Label expression to a `{{attribute}}` template
fn label_template(expr: &Expression) -> String {
    match expr {
        Expression::Tagged {
            op: Operator::Get,
            args,
        } => format!(
            "{{{{{}}}}}",
            args.first()
                .and_then(|arg| read(arg).to_text())
                .unwrap_or_default()
        ),
        Expression::Tagged {
            op: Operator::Text | Operator::Brace,
            args,
        } => args.iter().map(label_template).collect(),
        Expression::Tagged {
            op: Operator::Array,
            args,
        } => args
            .iter()
            .map(label_template)
            .collect::<Vec<_>>()
            .join(" "),
        other => read(other).to_text().unwrap_or_else(|| other.to_string()),
    }
}

fn raster_symbolizer(ctx: &RowContext) -> Result<RasterSymbolizer, GeoCssError> {
    let mut raster = RasterSymbolizer {
        opacity: ctx.number("raster-opacity")?,
        color_map: color_map(ctx)?,
        ..Default::default()
    };

    let channels = match ctx.expression("raster-channels")? {
        Some(expr) => read(&expr).into_list(),
        None => Vec::new(),
    };
    let names = match channels.as_slice() {
        [Value::String(auto)] if auto.eq_ignore_ascii_case("auto") => Vec::new(),
        values => values
            .iter()
            .map(|value| value.to_text().unwrap_or_default())
            .collect(),
    };
    if names.len() == 2 || names.len() > 3 {
        return Err(GeoCssError::Arity {
            property: "raster-channels".to_string(),
            expected: "1 or 3".to_string(),
            found: names.len(),
        });
    }

    let enhancements = match ctx.expression("raster-contrast-enhancement")? {
        Some(expr) => read(&expr)
            .into_list()
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .and_then(EnhancementType::parse)
                    .ok_or_else(|| {
                        GeoCssError::invalid_value(
                            "raster-contrast-enhancement",
                            expr.to_string(),
                            "expected normalize or histogram",
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    let gammas = ctx.numbers("raster-gamma")?.unwrap_or_default();

    let allowed: &[usize] = if names.len() == 3 { &[0, 1, 3] } else { &[0, 1] };
    let expected = if names.len() == 3 { "1 or 3" } else { "1" };
    for (property, found) in [
        ("raster-contrast-enhancement", enhancements.len()),
        ("raster-gamma", gammas.len()),
    ] {
        if !allowed.contains(&found) {
            return Err(GeoCssError::Arity {
                property: property.to_string(),
                expected: expected.to_string(),
                found,
            });
        }
    }

    let contrast_at = |position: usize| {
        let pick = |len: usize| if len == 1 { 0 } else { position };
        let contrast = ContrastEnhancement {
            enhancement_type: enhancements.get(pick(enhancements.len())).copied(),
            gamma_value: gammas.get(pick(gammas.len())).copied(),
        };
        (!contrast.is_empty()).then_some(contrast)
    };
    let channel = |position: usize| Channel {
        source_channel_name: names.get(position).cloned(),
        contrast_enhancement: contrast_at(position),
    };

    match names.len() {
        3 => {
            raster.channel_selection = Some(ChannelSelection::Rgb {
                red_channel: channel(0),
                green_channel: channel(1),
                blue_channel: channel(2),
            })
        }
        1 => {
            raster.channel_selection = Some(ChannelSelection::Gray {
                gray_channel: channel(0),
            })
        }
        _ => raster.contrast_enhancement = contrast_at(0),
    }
    Ok(raster)
}

fn color_map(ctx: &RowContext) -> Result<Option<ColorMap>, GeoCssError> {
    let map_type = match ctx.text("raster-color-map-type")? {
        Some(name) => Some(ColorMapType::parse(&name).ok_or_else(|| {
            GeoCssError::invalid_value(
                "raster-color-map-type",
                name.clone(),
                "expected ramp, intervals or values",
            )
        })?),
        None => None,
    };

    let entries = match ctx.raw("raster-color-map") {
        Some(raw) => {
            let mut entries = Vec::new();
            for item in split_top_level(raw, ',') {
                entries.push(color_map_entry(item.trim())?);
            }
            Some(entries)
        }
        None => None,
    };

    if map_type.is_none() && entries.is_none() {
        return Ok(None);
    }
    Ok(Some(ColorMap {
        map_type,
        color_map_entries: entries,
    }))
}

/// `color-map-entry(color, quantity[, label[, opacity]])`
fn color_map_entry(text: &str) -> Result<ColorMapEntry, GeoCssError> {
    let key = "raster-color-map";
    let invalid = |message: &str| GeoCssError::invalid_value(key, text, message);

    let expr = parse_value(key, text)?;
    let Expression::Tagged {
        op: Operator::Other(name),
        args,
    } = &expr
    else {
        return Err(invalid("expected color-map-entry(...)"));
    };
    if name != "color-map-entry" {
        return Err(invalid("expected color-map-entry(...)"));
    }
    if args.len() < 2 || args.len() > 4 {
        return Err(GeoCssError::Arity {
            property: key.to_string(),
            expected: "2 to 4".to_string(),
            found: args.len(),
        });
    }

    let color = color_of(&args[0]).ok_or_else(|| invalid("expected a colour"))?;
    let quantity = read(&args[1])
        .as_f64()
        .ok_or_else(|| invalid("expected a numeric quantity"))?;
    let label = args.get(2).and_then(|arg| read(arg).to_text());
    let opacity = match args.get(3) {
        Some(arg) => Some(
            read(arg)
                .as_f64()
                .ok_or_else(|| invalid("expected a numeric opacity"))?,
        ),
        None => None,
    };

    Ok(ColorMapEntry {
        color,
        quantity: Some(quantity),
        label,
        opacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocss::parsing::parse;
    use crate::geocss::style::{ComparisonOperator, Filter, FilterValue, ScaleDenominator};

    fn read_source(source: &str) -> Result<Style, GeoCssError> {
        read_stylesheet(&parse(source)?, &ReaderConfig::default())
    }

    #[test]
    fn test_simple_line() {
        let style = read_source("* { stroke: #000000; stroke-width: 3; }").unwrap();
        assert_eq!(
            style.rules[0].symbolizers,
            vec![Symbolizer::Line(LineSymbolizer {
                color: Some("#000000".to_string()),
                width: Some(3.0),
                ..Default::default()
            })]
        );
        assert_eq!(style.rules[0].filter, None);
    }

    #[test]
    fn test_mark_with_pseudo_bag() {
        let style = read_source(
            "* { mark: symbol(Circle); mark-size: 8; :mark { fill: #ff0000; stroke: #000000; stroke-width: 1; } }",
        )
        .unwrap();
        let mut expected = MarkSymbolizer::new(WellKnownName::Circle);
        expected.color = Some("#ff0000".to_string());
        expected.stroke_color = Some("#000000".to_string());
        expected.stroke_width = Some(1.0);
        expected.radius = Some(4.0);
        assert_eq!(style.rules[0].symbolizers, vec![Symbolizer::Mark(expected)]);
    }

    #[test]
    fn test_nth_pseudo_selector_targets_one_row() {
        let style = read_source(
            "* { mark: symbol(circle), symbol(square); :nth-mark(2) { fill: #00ff00; } }",
        )
        .unwrap();
        match &style.rules[0].symbolizers[..] {
            [Symbolizer::Mark(first), Symbolizer::Mark(second)] => {
                assert_eq!(first.color, None);
                assert_eq!(second.color.as_deref(), Some("#00ff00"));
            }
            other => panic!("expected two marks, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_pseudo_block_stays_in_its_rule() {
        let style = read_source(
            "* { mark: symbol(circle); :mark { fill: #FF0000; } }\n* { mark: symbol(square); }",
        )
        .unwrap();
        let colors: Vec<Option<String>> = style
            .rules
            .iter()
            .map(|rule| match &rule.symbolizers[..] {
                [Symbolizer::Mark(mark)] => mark.color.clone(),
                other => panic!("expected one mark, got {:?}", other),
            })
            .collect();
        assert_eq!(colors, vec![Some("#FF0000".to_string()), None]);
    }

    #[test]
    fn test_top_level_pseudo_block_applies_everywhere() {
        let style = read_source(
            "[a = 1] { mark: symbol(circle); }\n[a = 2] { mark: symbol(square); }\n:mark { fill: #00FF00; }",
        )
        .unwrap();
        for rule in &style.rules {
            match &rule.symbolizers[..] {
                [Symbolizer::Mark(mark)] => assert_eq!(mark.color.as_deref(), Some("#00FF00")),
                other => panic!("expected one mark, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unsupported_symbol() {
        let err = read_source("* { mark: symbol(hexagon); }").unwrap_err();
        assert_eq!(
            err,
            GeoCssError::UnsupportedSymbol {
                name: "hexagon".to_string()
            }
        );
    }

    #[test]
    fn test_filter_and_scale() {
        let style = read_source("[type = 'road'][@sd < 5000] { stroke: #000000; }").unwrap();
        let rule = &style.rules[0];
        assert_eq!(
            rule.filter,
            Some(Filter::Comparison {
                operator: ComparisonOperator::Equal,
                property: "type".to_string(),
                value: FilterValue::String("road".to_string()),
            })
        );
        assert_eq!(
            rule.scale_denominator,
            Some(ScaleDenominator {
                min: None,
                max: Some(5000.0)
            })
        );
    }

    #[test]
    fn test_multi_value_fill_split() {
        let style = read_source("* { fill: #ff0000, #0000ff; stroke-width: 1; }").unwrap();
        let widths: Vec<(Option<String>, Option<f64>)> = style.rules[0]
            .symbolizers
            .iter()
            .map(|s| match s {
                Symbolizer::Fill(fill) => (fill.color.clone(), fill.outline_width),
                other => panic!("expected fill, got {:?}", other),
            })
            .collect();
        assert_eq!(
            widths,
            vec![
                (Some("#ff0000".to_string()), Some(1.0)),
                (Some("#0000ff".to_string()), Some(1.0)),
            ]
        );
    }

    #[test]
    fn test_duplicate_symbolizers_are_dropped() {
        let style = read_source("* { stroke: #000000, #000000; stroke-width: 2; }").unwrap();
        assert_eq!(style.rules[0].symbolizers.len(), 1);
    }

    #[test]
    fn test_label_template() {
        let style = read_source("* { label: 'Road ' [name]; font-family: Arial, 'DejaVu Sans'; font-size: 12; }").unwrap();
        assert_eq!(
            style.rules[0].symbolizers,
            vec![Symbolizer::Text(TextSymbolizer {
                label: Some("Road {{name}}".to_string()),
                font: Some(vec!["Arial".to_string(), "DejaVu Sans".to_string()]),
                size: Some(12.0),
                ..Default::default()
            })]
        );
    }

    #[test]
    fn test_raster_contrast_arity() {
        let err = read_source(
            "* { raster-channels: 1 2 3; raster-contrast-enhancement: normalize normalize; }",
        )
        .unwrap_err();
        assert!(matches!(err, GeoCssError::Arity { found: 2, .. }));

        let err = read_source("* { raster-channels: 1 2; }").unwrap_err();
        assert!(matches!(err, GeoCssError::Arity { found: 2, .. }));
    }

    #[test]
    fn test_raster_auto_channels_use_global_contrast() {
        let style = read_source(
            "* { raster-channels: auto; raster-contrast-enhancement: histogram; raster-gamma: 0.8; }",
        )
        .unwrap();
        assert_eq!(
            style.rules[0].symbolizers,
            vec![Symbolizer::Raster(RasterSymbolizer {
                contrast_enhancement: Some(ContrastEnhancement {
                    enhancement_type: Some(EnhancementType::Histogram),
                    gamma_value: Some(0.8),
                }),
                ..Default::default()
            })]
        );
    }
}
