//! Style parser entry points
//!
//! [GeoCssStyleParser] is the public face of the crate: it reads GeoCSS text into a style
//! document and writes a style document back as GeoCSS text. Both directions are pure and
//! report non-fatal conditions as warnings next to the output.

use crate::geocss::config::GeoCssConfig;
use crate::geocss::error::{GeoCssError, Warning};
use crate::geocss::mapping::reader::read_stylesheet;
use crate::geocss::mapping::writer::write_document;
use crate::geocss::parsing::parse;
use crate::geocss::serializer::serialize;
use crate::geocss::style::Style;

/// Result of a successful read
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutput<T> {
    pub output: T,
    pub warnings: Vec<Warning>,
}

/// Result of a successful write
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutput<T> {
    pub output: T,
    pub warnings: Vec<Warning>,
}

/// Bidirectional conversion between a style language and the style document.
///
/// # Examples
///
/// ```ignore
/// let parser = GeoCssStyleParser::new();
/// let style = parser.read_style("* { stroke: #000000; }")?.output;
/// let text = parser.write_style(&style)?.output;
/// ```
pub trait StyleParser {
    /// The name of the style language (e.g. "geocss")
    fn title(&self) -> &str;

    fn read_style(&self, source: &str) -> Result<ReadOutput<Style>, GeoCssError>;

    fn write_style(&self, style: &Style) -> Result<WriteOutput<String>, GeoCssError>;
}

#[derive(Debug, Clone, Default)]
pub struct GeoCssStyleParser {
    config: GeoCssConfig,
}

impl GeoCssStyleParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeoCssConfig) -> Self {
        GeoCssStyleParser { config }
    }

    pub fn config(&self) -> &GeoCssConfig {
        &self.config
    }
}

impl StyleParser for GeoCssStyleParser {
    fn title(&self) -> &str {
        "geocss"
    }

    fn read_style(&self, source: &str) -> Result<ReadOutput<Style>, GeoCssError> {
        let stylesheet = parse(source)?;

        let mut warnings = Vec::new();
        if let Some(mode) = &stylesheet.directives.mode {
            if mode != "Flat" {
                tracing::warn!(mode = %mode, "unsupported GeoCSS mode, reading as flat");
                warnings.push(Warning::UnsupportedMode(mode.clone()));
            }
        }

        let style = read_stylesheet(&stylesheet, &self.config.reader)?;
        Ok(ReadOutput {
            output: style,
            warnings,
        })
    }

    fn write_style(&self, style: &Style) -> Result<WriteOutput<String>, GeoCssError> {
        let document = write_document(style, &self.config)?;
        Ok(WriteOutput {
            output: serialize(&document, &self.config.writer.indent),
            warnings: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocss::config::{ReaderConfig, WriterConfig};
    use crate::geocss::style::{LineSymbolizer, Rule, Symbolizer};

    #[test]
    fn test_read_reports_unsupported_mode() {
        let parser = GeoCssStyleParser::new();
        let result = parser
            .read_style("@mode 'Auto';\n* { stroke: #000000; }")
            .unwrap();
        assert_eq!(
            result.warnings,
            vec![Warning::UnsupportedMode("Auto".to_string())]
        );
        assert_eq!(result.output.rules.len(), 1);
    }

    #[test]
    fn test_flat_mode_has_no_warning() {
        let parser = GeoCssStyleParser::new();
        let result = parser
            .read_style("@mode 'Flat';\n* { stroke: #000000; }")
            .unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_write_respects_config() {
        let parser = GeoCssStyleParser::with_config(GeoCssConfig {
            reader: ReaderConfig::default(),
            writer: WriterConfig {
                indent: "\t".to_string(),
                emit_mode: false,
            },
        });
        let style = Style {
            name: String::new(),
            style_abstract: None,
            rules: vec![Rule {
                name: String::new(),
                filter: None,
                scale_denominator: None,
                symbolizers: vec![Symbolizer::Line(LineSymbolizer {
                    color: Some("#000000".to_string()),
                    ..Default::default()
                })],
            }],
        };
        let written = parser.write_style(&style).unwrap();
        assert_eq!(written.output, "* {\n\tstroke: #000000;\n}\n");
        assert!(written.warnings.is_empty());
    }

    #[test]
    fn test_errors_abort_the_read() {
        let parser = GeoCssStyleParser::new();
        assert!(matches!(
            parser.read_style("* { stroke: #000000;"),
            Err(GeoCssError::Structural { .. })
        ));
    }
}
