//! GeoCSS text output
//!
//! Prints the rule objects produced by the writer. Every rule is a top-level block with its
//! pseudo-selector blocks nested inside:
//!
//! ```text
//! @mode 'Flat';
//! @styleTitle 'Roads';
//!
//! /* @title Major */
//! [type = 'road'] {
//!   stroke: symbol('circle');
//!   stroke-size: 8;
//!   :stroke {
//!     fill: #FF0000;
//!   }
//! }
//! ```

use crate::geocss::expression::quote;
use crate::geocss::mapping::writer::{GeoCssDocument, GeoCssRule, PropertyList};

pub fn serialize(document: &GeoCssDocument, indent: &str) -> String {
    let mut out = String::new();

    let directives = [
        ("@mode", &document.mode),
        ("@styleTitle", &document.title),
        ("@styleAbstract", &document.style_abstract),
    ];
    let mut has_directives = false;
    for (keyword, value) in directives {
        if let Some(value) = value {
            out.push_str(&format!("{} {};\n", keyword, quote(value)));
            has_directives = true;
        }
    }

    for (idx, rule) in document.rules.iter().enumerate() {
        if idx > 0 || has_directives {
            out.push('\n');
        }
        serialize_rule(&mut out, rule, indent);
    }
    out
}

fn serialize_rule(out: &mut String, rule: &GeoCssRule, indent: &str) {
    if let Some(title) = &rule.title {
        out.push_str(&format!("/* @title {} */\n", title));
    }
    out.push_str(&rule.selectors.join(", "));
    out.push_str(" {\n");
    serialize_properties(out, &rule.properties, indent);
    for block in &rule.pseudo_blocks {
        out.push_str(&format!("{}:{} {{\n", indent, block.part));
        serialize_properties(out, &block.properties, &indent.repeat(2));
        out.push_str(&format!("{}}}\n", indent));
    }
    out.push_str("}\n");
}

fn serialize_properties(out: &mut String, properties: &PropertyList, indent: &str) {
    for (key, values) in properties {
        out.push_str(&format!("{}{}: {};\n", indent, key, values.join(", ")));
    }
}
