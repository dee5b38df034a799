//! # geocss
//!
//! A reader and writer for GeoCSS, the CSS-like cartographic styling language, translating
//! between GeoCSS text and a format-neutral style document.
//!
//! ```ignore
//! use geocss::{GeoCssStyleParser, StyleParser};
//!
//! let parser = GeoCssStyleParser::new();
//! let style = parser.read_style("[type = 'road'] { stroke: #000000; }")?.output;
//! let text = parser.write_style(&style)?.output;
//! ```
//!
//! Only the flat mode of GeoCSS is supported: rules are independent and are not cascaded
//! into each other.

pub mod geocss;

pub use geocss::config::GeoCssConfig;
pub use geocss::error::{GeoCssError, Warning};
pub use geocss::parser::{GeoCssStyleParser, ReadOutput, StyleParser, WriteOutput};
pub use geocss::style::Style;
