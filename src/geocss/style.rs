//! Style document model
//!
//!     The format-neutral side of the translation: a [Style] is a list of [Rule]s, each with
//!     an optional [Filter], an optional [ScaleDenominator] and an ordered list of
//!     [Symbolizer]s. These types are plain data. They serialize to camelCase JSON/YAML with
//!     absent optional fields skipped, so documents written by hand and documents produced
//!     by the reader compare the same way.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub name: String,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub style_abstract: Option<String>,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_denominator: Option<ScaleDenominator>,
    pub symbolizers: Vec<Symbolizer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleDenominator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ScaleDenominator {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Feature filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    And { filters: Vec<Filter> },
    Or { filters: Vec<Filter> },
    Not { filter: Box<Filter> },
    Comparison {
        operator: ComparisonOperator,
        property: String,
        value: FilterValue,
    },
    IsNull { property: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    /// Pattern match. Case (in)sensitivity is not represented.
    #[serde(rename = "*=")]
    Like,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Symbolizer {
    Mark(MarkSymbolizer),
    Icon(IconSymbolizer),
    Line(LineSymbolizer),
    Fill(FillSymbolizer),
    Text(TextSymbolizer),
    Raster(RasterSymbolizer),
}

/// The subset of symbolizers usable as a graphic fill or graphic stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PointSymbolizer {
    Mark(MarkSymbolizer),
    Icon(IconSymbolizer),
}

impl From<PointSymbolizer> for Symbolizer {
    fn from(point: PointSymbolizer) -> Self {
        match point {
            PointSymbolizer::Mark(mark) => Symbolizer::Mark(mark),
            PointSymbolizer::Icon(icon) => Symbolizer::Icon(icon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellKnownName {
    Circle,
    Square,
    Triangle,
    Star,
    Cross,
    X,
    #[serde(rename = "shape://vertline")]
    ShapeVertline,
    #[serde(rename = "shape://horline")]
    ShapeHorline,
    #[serde(rename = "shape://slash")]
    ShapeSlash,
    #[serde(rename = "shape://backslash")]
    ShapeBackslash,
    #[serde(rename = "shape://dot")]
    ShapeDot,
    #[serde(rename = "shape://plus")]
    ShapePlus,
    #[serde(rename = "shape://times")]
    ShapeTimes,
    #[serde(rename = "shape://oarrow")]
    ShapeOarrow,
    #[serde(rename = "shape://carrow")]
    ShapeCarrow,
}

impl WellKnownName {
    const ALL: [WellKnownName; 15] = [
        WellKnownName::Circle,
        WellKnownName::Square,
        WellKnownName::Triangle,
        WellKnownName::Star,
        WellKnownName::Cross,
        WellKnownName::X,
        WellKnownName::ShapeVertline,
        WellKnownName::ShapeHorline,
        WellKnownName::ShapeSlash,
        WellKnownName::ShapeBackslash,
        WellKnownName::ShapeDot,
        WellKnownName::ShapePlus,
        WellKnownName::ShapeTimes,
        WellKnownName::ShapeOarrow,
        WellKnownName::ShapeCarrow,
    ];

    /// The name as written inside `symbol(...)`
    pub fn css_name(&self) -> &'static str {
        match self {
            WellKnownName::Circle => "circle",
            WellKnownName::Square => "square",
            WellKnownName::Triangle => "triangle",
            WellKnownName::Star => "star",
            WellKnownName::Cross => "cross",
            WellKnownName::X => "x",
            WellKnownName::ShapeVertline => "shape://vertline",
            WellKnownName::ShapeHorline => "shape://horline",
            WellKnownName::ShapeSlash => "shape://slash",
            WellKnownName::ShapeBackslash => "shape://backslash",
            WellKnownName::ShapeDot => "shape://dot",
            WellKnownName::ShapePlus => "shape://plus",
            WellKnownName::ShapeTimes => "shape://times",
            WellKnownName::ShapeOarrow => "shape://oarrow",
            WellKnownName::ShapeCarrow => "shape://carrow",
        }
    }

    /// Case-insensitive lookup of a `symbol(...)` name.
    pub fn from_css_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|wkn| wkn.css_name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSymbolizer {
    pub well_known_name: WellKnownName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
}

impl MarkSymbolizer {
    pub fn new(well_known_name: WellKnownName) -> Self {
        MarkSymbolizer {
            well_known_name,
            color: None,
            fill_opacity: None,
            opacity: None,
            radius: None,
            rotate: None,
            stroke_color: None,
            stroke_width: None,
            stroke_opacity: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dasharray: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perpendicular_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_stroke: Option<Box<PointSymbolizer>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_dasharray: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_fill: Option<Box<PointSymbolizer>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSymbolizer {
    /// Label template, attribute references written as `{{name}}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halo_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halo_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halo_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_map: Option<ColorMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_selection: Option<ChannelSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_enhancement: Option<ContrastEnhancement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMap {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub map_type: Option<ColorMapType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_map_entries: Option<Vec<ColorMapEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMapType {
    Ramp,
    Intervals,
    Values,
}

impl ColorMapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMapType::Ramp => "ramp",
            ColorMapType::Intervals => "intervals",
            ColorMapType::Values => "values",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ramp" => Some(ColorMapType::Ramp),
            "intervals" => Some(ColorMapType::Intervals),
            "values" => Some(ColorMapType::Values),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorMapEntry {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Raster band assignment: three colour bands or a single gray band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelSelection {
    #[serde(rename_all = "camelCase")]
    Rgb {
        red_channel: Channel,
        green_channel: Channel,
        blue_channel: Channel,
    },
    #[serde(rename_all = "camelCase")]
    Gray { gray_channel: Channel },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_enhancement: Option<ContrastEnhancement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastEnhancement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement_type: Option<EnhancementType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_value: Option<f64>,
}

impl ContrastEnhancement {
    pub fn is_empty(&self) -> bool {
        self.enhancement_type.is_none() && self.gamma_value.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementType {
    Normalize,
    Histogram,
}

impl EnhancementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnhancementType::Normalize => "normalize",
            EnhancementType::Histogram => "histogram",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "normalize" => Some(EnhancementType::Normalize),
            "histogram" => Some(EnhancementType::Histogram),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_name_lookup() {
        assert_eq!(
            WellKnownName::from_css_name("Circle"),
            Some(WellKnownName::Circle)
        );
        assert_eq!(
            WellKnownName::from_css_name("shape://vertline"),
            Some(WellKnownName::ShapeVertline)
        );
        assert_eq!(WellKnownName::from_css_name("hexagon"), None);
    }

    #[test]
    fn test_symbolizer_serializes_with_kind_tag() {
        let symbolizer = Symbolizer::Line(LineSymbolizer {
            color: Some("#000000".to_string()),
            width: Some(3.0),
            ..Default::default()
        });
        let json = serde_json::to_value(&symbolizer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "Line", "color": "#000000", "width": 3.0})
        );
    }

    #[test]
    fn test_channel_selection_round_trips_through_json() {
        let selection = ChannelSelection::Gray {
            gray_channel: Channel {
                source_channel_name: Some("0".to_string()),
                contrast_enhancement: None,
            },
        };
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"grayChannel":{"sourceChannelName":"0"}}"#);
        let back: ChannelSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn test_filter_serialization() {
        let filter = Filter::Comparison {
            operator: ComparisonOperator::Equal,
            property: "type".to_string(),
            value: FilterValue::String("road".to_string()),
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "comparison", "operator": "==", "property": "type", "value": "road"})
        );
    }
}
