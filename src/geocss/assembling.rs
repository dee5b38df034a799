//! Rule assembly
//!
//!     Turns the block tree into flat rule records. A nested block combines with every
//!     selector alternative of its ancestors (cartesian product, by string concatenation),
//!     so `[a=1],[a=2] { [b=2] { ... } }` yields the two selectors `[a=1][b=2]` and
//!     `[a=2][b=2]`. Titles of the enclosing blocks are comma-joined in front of the
//!     block's own title.
//!
//!     Records whose selectors all end in a pseudo-selector (`:mark`, `[a=1]:nth-stroke(2)`)
//!     configure a sub-part of a symbolizer instead of matching features and are returned
//!     separately.
//!
//! Rows
//!
//!     A property may carry several comma-separated values, one per symbolizer instance.
//!     [split_rows] explodes a property map into one row per instance and [classify] decides
//!     which symbolizer kinds a row describes.

use crate::geocss::parsing::{Block, PropertyMap, Stylesheet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// One value per key, as seen by a single symbolizer instance
pub type PropertyRow = BTreeMap<String, String>;

/// Keys whose comma-separated values form one list rather than one value per row
const LIST_KEYS: &[&str] = &["raster-color-map", "font-family"];

static PSEUDO_SELECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<base>.*?):(?P<part>[a-zA-Z][a-zA-Z\-]*)(?:\((?P<index>[0-9]+)\))?$")
        .expect("valid pseudo-selector regex")
});

#[derive(Debug, Clone, PartialEq)]
pub struct RuleRecord {
    pub selectors: Vec<String>,
    pub properties: PropertyMap,
    pub rows: Vec<PropertyRow>,
    pub title: Option<String>,
    pub level: usize,
    pub group: usize,
    pub id: usize,
}

/// Plain rule records and pseudo-selector records, each in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub rules: Vec<RuleRecord>,
    pub pseudo: Vec<RuleRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoSelector {
    /// The selector the pseudo-selector is attached to, `*`, `[a=1]` or empty
    pub base: String,
    /// `mark`, `stroke`, `fill`, `symbol`, `nth-mark`, ...
    pub part: String,
    /// 1-based index of `nth-*` parts
    pub index: Option<usize>,
}

impl PseudoSelector {
    pub fn parse(selector: &str) -> Option<Self> {
        let captures = PSEUDO_SELECTOR.captures(selector)?;
        Some(PseudoSelector {
            base: captures["base"].to_string(),
            part: captures["part"].to_ascii_lowercase(),
            index: captures
                .name("index")
                .and_then(|index| index.as_str().parse().ok()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolizerKind {
    Point,
    Line,
    Polygon,
    Raster,
    Text,
}

/// Flatten a stylesheet into rule records.
pub fn assemble(stylesheet: &Stylesheet) -> Assembly {
    let mut records = Vec::new();
    let mut ancestors = Vec::new();
    for block in &stylesheet.blocks {
        collect(block, &mut ancestors, &mut records);
    }

    let (pseudo, rules): (Vec<_>, Vec<_>) = records.into_iter().partition(|record| {
        record
            .selectors
            .iter()
            .all(|selector| PseudoSelector::parse(selector).is_some())
    });

    tracing::debug!(
        rules = rules.len(),
        pseudo = pseudo.len(),
        "assembled GeoCSS rule records"
    );
    Assembly { rules, pseudo }
}

struct Ancestor<'a> {
    selectors: &'a [String],
    title: Option<&'a str>,
}

fn collect<'a>(block: &'a Block, ancestors: &mut Vec<Ancestor<'a>>, out: &mut Vec<RuleRecord>) {
    ancestors.push(Ancestor {
        selectors: &block.selectors,
        title: block.title.as_deref(),
    });

    // Containers only carry selectors for their children; empty leaves are rules
    if !block.properties.is_empty() || block.children.is_empty() {
        let selectors = ancestors
            .iter()
            .fold(vec![String::new()], |combined, ancestor| {
                combine_selectors(&combined, ancestor.selectors)
            });
        let titles: Vec<&str> = ancestors
            .iter()
            .filter_map(|ancestor| ancestor.title)
            .filter(|title| !title.is_empty())
            .collect();

        out.push(RuleRecord {
            selectors,
            rows: split_rows(&block.properties),
            properties: block.properties.clone(),
            title: (!titles.is_empty()).then(|| titles.join(", ")),
            level: block.level,
            group: block.group,
            id: block.id,
        });
    }

    for child in &block.children {
        collect(child, ancestors, out);
    }
    ancestors.pop();
}

/// Every existing combination concatenated with every alternative
pub fn combine_selectors(combined: &[String], alternatives: &[String]) -> Vec<String> {
    combined
        .iter()
        .flat_map(|prefix| {
            alternatives
                .iter()
                .map(move |alternative| format!("{}{}", prefix, alternative))
        })
        .collect()
}

/// Explode multi-valued properties into one row per symbolizer instance.
///
/// Single-valued keys apply to every row, multi-valued keys contribute their i-th value to
/// row i only, and `none` leaves the key out of that row.
pub fn split_rows(properties: &PropertyMap) -> Vec<PropertyRow> {
    let count = properties
        .iter()
        .filter(|(key, _)| !LIST_KEYS.contains(&key.as_str()))
        .map(|(_, values)| values.len())
        .max()
        .unwrap_or(0)
        .max(usize::from(!properties.is_empty()));

    (0..count)
        .map(|row| {
            properties
                .iter()
                .filter_map(|(key, values)| {
                    let value = if LIST_KEYS.contains(&key.as_str()) {
                        values.join(", ")
                    } else if values.len() == 1 {
                        values[0].clone()
                    } else {
                        values.get(row)?.clone()
                    };
                    (value != "none").then(|| (key.clone(), value))
                })
                .collect()
        })
        .collect()
}

/// Symbolizer kinds described by one row.
pub fn classify(row: &PropertyRow) -> Vec<SymbolizerKind> {
    let mut kinds = Vec::new();
    if row.contains_key("mark") {
        kinds.push(SymbolizerKind::Point);
    } else if row.contains_key("stroke") && !row.contains_key("fill") {
        kinds.push(SymbolizerKind::Line);
    } else if row.contains_key("fill") {
        kinds.push(SymbolizerKind::Polygon);
    } else if row.keys().any(|key| key.starts_with("raster-")) {
        kinds.push(SymbolizerKind::Raster);
    }
    if row.contains_key("label") {
        kinds.push(SymbolizerKind::Text);
    }
    kinds
}
