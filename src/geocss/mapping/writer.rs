//! Style document to GeoCSS rule objects.
//!
//! Every geometry symbolizer of a rule becomes one row; a text symbolizer shares the row of
//! the geometry symbolizer before it. Rows are merged back into comma-separated property
//! values: a value shared by all rows is written once, otherwise every row gets its own
//! value and absent ones are written as `none`. Mark sub-properties go to nested
//! pseudo-selector blocks (`:mark`, `:stroke`, `:fill`), where values missing on a row are
//! taken from the first row that has them.

use crate::geocss::config::{GeoCssConfig, WriterConfig};
use crate::geocss::error::GeoCssError;
use crate::geocss::expression::filter::write_selectors;
use crate::geocss::expression::{Expression, Operator};
use crate::geocss::style::{
    ChannelSelection, ColorMap, ContrastEnhancement, FillSymbolizer, IconSymbolizer,
    LineSymbolizer, MarkSymbolizer, PointSymbolizer, RasterSymbolizer, Rule, Style, Symbolizer,
    TextSymbolizer,
};
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]*)\}\}").expect("valid placeholder regex"));

/// Keys whose value is one comma-separated list shared by all rows
const LIST_KEYS: &[&str] = &["raster-color-map", "font-family"];

/// An ordered property list, each key with its per-row (or single) values
pub type PropertyList = Vec<(String, Vec<String>)>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoCssDocument {
    pub mode: Option<String>,
    pub title: Option<String>,
    pub style_abstract: Option<String>,
    pub rules: Vec<GeoCssRule>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoCssRule {
    pub selectors: Vec<String>,
    pub title: Option<String>,
    pub properties: PropertyList,
    pub pseudo_blocks: Vec<PseudoBlock>,
    pub group: usize,
}

/// A nested `:part { ... }` block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PseudoBlock {
    pub part: String,
    pub properties: PropertyList,
}

/// Translate a style document into GeoCSS rule objects.
pub fn write_document(style: &Style, config: &GeoCssConfig) -> Result<GeoCssDocument, GeoCssError> {
    let scale_attribute = WriterConfig::scale_attribute(&config.reader);
    let rules = style
        .rules
        .iter()
        .enumerate()
        .map(|(group, rule)| write_rule(rule, group, scale_attribute))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rules = rules.len(), "wrote GeoCSS rules");
    Ok(GeoCssDocument {
        mode: config.writer.emit_mode.then(|| "Flat".to_string()),
        title: (!style.name.is_empty()).then(|| style.name.clone()),
        style_abstract: style.style_abstract.clone(),
        rules,
    })
}

fn write_rule(rule: &Rule, group: usize, scale_attribute: &str) -> Result<GeoCssRule, GeoCssError> {
    let selectors = write_selectors(
        rule.filter.as_ref(),
        rule.scale_denominator.as_ref(),
        scale_attribute,
    )?;

    let mut rows: Vec<Row> = Vec::new();
    for symbolizer in &rule.symbolizers {
        let is_text = matches!(symbolizer, Symbolizer::Text(_));
        let joins_current = rows.last().is_some_and(|row| {
            if is_text {
                !row.has_text
            } else {
                !row.has_text && !row.has_geometry
            }
        });
        if !joins_current {
            rows.push(Row::default());
        }
        let Some(row) = rows.last_mut() else {
            continue;
        };

        match symbolizer {
            Symbolizer::Mark(mark) => write_mark(row, mark, "mark"),
            Symbolizer::Icon(icon) => write_icon(row, icon, "mark"),
            Symbolizer::Line(line) => write_line(row, line),
            Symbolizer::Fill(fill) => write_fill(row, fill),
            Symbolizer::Text(text) => write_text(row, text),
            Symbolizer::Raster(raster) => write_raster(row, raster)?,
        }
        if is_text {
            row.has_text = true;
        } else {
            row.has_geometry = true;
        }
    }

    let (properties, pseudo_blocks) = merge_rows(&rows);
    Ok(GeoCssRule {
        selectors,
        title: (!rule.name.is_empty()).then(|| rule.name.clone()),
        properties,
        pseudo_blocks,
        group,
    })
}

#[derive(Debug, Default)]
struct Row {
    has_geometry: bool,
    has_text: bool,
    properties: Vec<(String, String)>,
    /// (part, key, value)
    pseudo: Vec<(String, String, String)>,
}

impl Row {
    fn set(&mut self, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.properties.push((key.to_string(), value));
        }
    }

    fn set_pseudo(&mut self, part: &str, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.pseudo.push((part.to_string(), key.to_string(), value));
        }
    }
}

fn number(value: Option<f64>) -> Option<String> {
    value.map(|n| Expression::number(n).to_string())
}

fn numbers(values: Option<&Vec<f64>>) -> Option<String> {
    values.map(|values| {
        Expression::array(values.iter().map(|n| Expression::number(*n)).collect()).to_string()
    })
}

/// Colours keep their `#` form, named colours are written as words
fn color(value: Option<&String>) -> Option<String> {
    value.map(|color| {
        if color.starts_with('#') {
            Expression::hex(color.clone()).to_string()
        } else {
            Expression::string(color.clone()).to_string()
        }
    })
}

fn text(value: Option<&String>) -> Option<String> {
    value.map(|text| Expression::string(text.clone()).to_string())
}

/// Channel names and other identifiers that may be numeric
fn name_or_number(name: &str) -> Expression {
    match name.parse::<f64>() {
        Ok(n) if n.to_string() == name => Expression::number(n),
        _ => Expression::string(name),
    }
}

fn write_point(row: &mut Row, point: &PointSymbolizer, prefix: &str) {
    match point {
        PointSymbolizer::Mark(mark) => write_mark(row, mark, prefix),
        PointSymbolizer::Icon(icon) => write_icon(row, icon, prefix),
    }
}

fn write_mark(row: &mut Row, mark: &MarkSymbolizer, prefix: &str) {
    row.set(
        prefix,
        Some(Expression::symbol(mark.well_known_name.css_name()).to_string()),
    );
    row.set(&format!("{}-size", prefix), number(mark.radius.map(|r| r * 2.0)));
    row.set(&format!("{}-rotation", prefix), number(mark.rotate));
    if prefix == "mark" {
        row.set("mark-opacity", number(mark.opacity));
    }

    row.set_pseudo(prefix, "fill", color(mark.color.as_ref()));
    row.set_pseudo(prefix, "fill-opacity", number(mark.fill_opacity));
    row.set_pseudo(prefix, "stroke", color(mark.stroke_color.as_ref()));
    row.set_pseudo(prefix, "stroke-width", number(mark.stroke_width));
    row.set_pseudo(prefix, "stroke-opacity", number(mark.stroke_opacity));
    if prefix != "mark" {
        row.set_pseudo(prefix, "opacity", number(mark.opacity));
    }
}

fn write_icon(row: &mut Row, icon: &IconSymbolizer, prefix: &str) {
    row.set(
        prefix,
        Some(Expression::url(icon.image.clone().unwrap_or_default()).to_string()),
    );
    row.set(&format!("{}-size", prefix), number(icon.size));
    row.set(&format!("{}-rotation", prefix), number(icon.rotate));
    if prefix == "mark" {
        row.set("mark-opacity", number(icon.opacity));
    } else {
        row.set_pseudo(prefix, "opacity", number(icon.opacity));
    }
}

fn write_line(row: &mut Row, line: &LineSymbolizer) {
    match &line.graphic_stroke {
        Some(graphic) => write_point(row, graphic, "stroke"),
        None => row.set("stroke", color(line.color.as_ref())),
    }
    row.set("stroke-width", number(line.width));
    row.set("stroke-opacity", number(line.opacity));
    row.set("stroke-linejoin", text(line.join.as_ref()));
    row.set("stroke-linecap", text(line.cap.as_ref()));
    row.set("stroke-dasharray", numbers(line.dasharray.as_ref()));
    row.set("stroke-dashoffset", number(line.dash_offset));
    row.set("stroke-offset", number(line.perpendicular_offset));
}

fn write_fill(row: &mut Row, fill: &FillSymbolizer) {
    match (&fill.graphic_fill, &fill.color) {
        (Some(graphic), _) => write_point(row, graphic, "fill"),
        (None, Some(fill_color)) => row.set("fill", color(Some(fill_color))),
        (None, None) => row.set("fill", Some("transparent".to_string())),
    }
    row.set("fill-opacity", number(fill.fill_opacity));
    row.set("stroke", color(fill.outline_color.as_ref()));
    row.set("stroke-width", number(fill.outline_width));
    row.set("stroke-opacity", number(fill.outline_opacity));
    row.set("stroke-dasharray", numbers(fill.outline_dasharray.as_ref()));
}

fn write_text(row: &mut Row, text_symbolizer: &TextSymbolizer) {
    row.set("label", text_symbolizer.label.as_deref().map(label_expression));
    row.set(
        "font-family",
        text_symbolizer.font.as_ref().map(|fonts| {
            fonts
                .iter()
                .map(|font| Expression::string(font.clone()).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }),
    );
    row.set("font-size", number(text_symbolizer.size));
    row.set("font-style", text(text_symbolizer.font_style.as_ref()));
    row.set("font-weight", text(text_symbolizer.font_weight.as_ref()));
    row.set("font-fill", color(text_symbolizer.color.as_ref()));
    row.set("halo-radius", number(text_symbolizer.halo_width));
    row.set("halo-color", color(text_symbolizer.halo_color.as_ref()));
    row.set("halo-opacity", number(text_symbolizer.halo_opacity));
    row.set(
        "label-offset",
        text_symbolizer
            .offset
            .map(|[x, y]| format!("{} {}", x, y)),
    );
    row.set("label-rotation", number(text_symbolizer.rotate));
}

/// `Road {{name}}` -> `'Road ' [name]`
fn label_expression(template: &str) -> String {
    let mut parts = Vec::new();
    let mut last = 0;
    for capture in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = capture.get(0) else {
            continue;
        };
        if whole.start() > last {
            parts.push(Expression::string(&template[last..whole.start()]));
        }
        parts.push(Expression::tagged(
            Operator::Brace,
            vec![Expression::get(capture[1].trim())],
        ));
        last = whole.end();
    }
    if last < template.len() || parts.is_empty() {
        parts.push(Expression::string(&template[last..]));
    }
    Expression::tagged(Operator::Text, parts).to_string()
}

fn write_raster(row: &mut Row, raster: &RasterSymbolizer) -> Result<(), GeoCssError> {
    row.set("raster-opacity", number(raster.opacity));

    let (channels, contrasts): (Expression, Vec<Option<&ContrastEnhancement>>) =
        match &raster.channel_selection {
            Some(ChannelSelection::Rgb {
                red_channel,
                green_channel,
                blue_channel,
            }) => {
                let channels = [red_channel, green_channel, blue_channel];
                (
                    Expression::array(
                        channels
                            .iter()
                            .map(|c| name_or_number(c.source_channel_name.as_deref().unwrap_or("")))
                            .collect(),
                    ),
                    channels
                        .iter()
                        .map(|c| c.contrast_enhancement.as_ref())
                        .collect(),
                )
            }
            Some(ChannelSelection::Gray { gray_channel }) => (
                name_or_number(gray_channel.source_channel_name.as_deref().unwrap_or("")),
                vec![gray_channel.contrast_enhancement.as_ref()],
            ),
            None => (
                Expression::string("auto"),
                vec![raster.contrast_enhancement.as_ref()],
            ),
        };
    row.set("raster-channels", Some(channels.to_string()));

    if let Some(color_map) = &raster.color_map {
        write_color_map(row, color_map);
    }

    let types: Vec<Option<Expression>> = contrasts
        .iter()
        .map(|c| {
            c.and_then(|c| c.enhancement_type)
                .map(|t| Expression::string(t.as_str()))
        })
        .collect();
    let gammas: Vec<Option<Expression>> = contrasts
        .iter()
        .map(|c| c.and_then(|c| c.gamma_value).map(Expression::number))
        .collect();
    row.set(
        "raster-contrast-enhancement",
        per_channel("raster-contrast-enhancement", types)?,
    );
    row.set("raster-gamma", per_channel("raster-gamma", gammas)?);
    Ok(())
}

/// One value when every channel agrees, one per channel otherwise. A value set on some
/// channels only cannot be expressed.
fn per_channel(property: &str, values: Vec<Option<Expression>>) -> Result<Option<String>, GeoCssError> {
    let present = values.iter().filter(|v| v.is_some()).count();
    if present == 0 {
        return Ok(None);
    }
    if present != values.len() {
        return Err(GeoCssError::Arity {
            property: property.to_string(),
            expected: values.len().to_string(),
            found: present,
        });
    }
    let values: Vec<Expression> = values.into_iter().flatten().collect();
    if values.iter().all(|v| *v == values[0]) {
        return Ok(Some(values[0].to_string()));
    }
    Ok(Some(Expression::array(values).to_string()))
}

fn write_color_map(row: &mut Row, color_map: &ColorMap) {
    if let Some(entries) = &color_map.color_map_entries {
        let written: Vec<String> = entries
            .iter()
            .map(|entry| {
                let mut args = vec![
                    if entry.color.starts_with('#') {
                        Expression::hex(entry.color.clone())
                    } else {
                        Expression::string(entry.color.clone())
                    },
                    Expression::number(entry.quantity.unwrap_or_default()),
                ];
                if entry.label.is_some() || entry.opacity.is_some() {
                    args.push(Expression::string(entry.label.clone().unwrap_or_default()));
                }
                if let Some(opacity) = entry.opacity {
                    args.push(Expression::number(opacity));
                }
                Expression::tagged(Operator::Other("color-map-entry".to_string()), args)
                    .to_string()
            })
            .collect();
        row.set("raster-color-map", Some(written.join(", ")));
    }
    row.set(
        "raster-color-map-type",
        color_map.map_type.map(|t| t.as_str().to_string()),
    );
}

fn merge_rows(rows: &[Row]) -> (PropertyList, Vec<PseudoBlock>) {
    let mut keys: Vec<&str> = Vec::new();
    for (key, _) in rows.iter().flat_map(|row| row.properties.iter()) {
        if !keys.contains(&key.as_str()) {
            keys.push(key);
        }
    }

    let properties = keys
        .into_iter()
        .map(|key| {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| {
                    row.properties
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v.clone())
                })
                .collect();
            let merged = if LIST_KEYS.contains(&key) {
                values.into_iter().flatten().take(1).collect()
            } else {
                collapse(values)
            };
            (key.to_string(), merged)
        })
        .collect();

    let mut parts: Vec<&str> = Vec::new();
    for (part, _, _) in rows.iter().flat_map(|row| row.pseudo.iter()) {
        if !parts.contains(&part.as_str()) {
            parts.push(part);
        }
    }

    let pseudo_blocks = parts
        .into_iter()
        .map(|part| {
            let mut keys: Vec<&str> = Vec::new();
            for (p, key, _) in rows.iter().flat_map(|row| row.pseudo.iter()) {
                if p == part && !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
            let properties = keys
                .into_iter()
                .map(|key| {
                    let values: Vec<Option<String>> = rows
                        .iter()
                        .map(|row| {
                            row.pseudo
                                .iter()
                                .find(|(p, k, _)| p == part && k == key)
                                .map(|(_, _, v)| v.clone())
                        })
                        .collect();
                    (key.to_string(), collapse(backfill(values)))
                })
                .collect();
            PseudoBlock {
                part: part.to_string(),
                properties,
            }
        })
        .collect();

    (properties, pseudo_blocks)
}

/// Absent values take the value of the first row that has one.
fn backfill(values: Vec<Option<String>>) -> Vec<Option<String>> {
    let first = values.iter().flatten().next().cloned();
    values
        .into_iter()
        .map(|value| value.or_else(|| first.clone()))
        .collect()
}

fn collapse(values: Vec<Option<String>>) -> Vec<String> {
    let first = values.first().cloned().flatten();
    if first.is_some() && values.iter().all(|value| *value == first) {
        return first.into_iter().collect();
    }
    values
        .into_iter()
        .map(|value| value.unwrap_or_else(|| "none".to_string()))
        .collect()
}
