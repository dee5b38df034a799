//! Error and warning types for GeoCSS reading and writing
//!
//! Every fatal condition aborts the whole read or write call; nothing partial is returned.
//! Non-fatal conditions are collected as [`Warning`]s and handed back next to the output.

use std::fmt;
use thiserror::Error;

/// Fatal errors raised while reading or writing GeoCSS.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoCssError {
    /// The input does not match any token pattern.
    #[error("unrecognized input at line {line}, column {column}: {fragment:?}")]
    Lex {
        line: usize,
        column: usize,
        fragment: String,
    },

    /// Braces do not balance, or a token appears where no block can hold it.
    #[error("structural error at line {line}, column {column}: {message}")]
    Structural {
        line: usize,
        column: usize,
        message: String,
    },

    /// A mark references a well-known name outside the supported set.
    #[error("unsupported mark symbol: {name:?}")]
    UnsupportedSymbol { name: String },

    /// A multi-valued property carries a number of values the target cannot take.
    #[error("property '{property}' expects {expected} value(s), found {found}")]
    Arity {
        property: String,
        expected: String,
        found: usize,
    },

    /// A selector condition could not be turned into a filter.
    #[error("invalid filter in selector {selector:?}: {message}")]
    InvalidFilter { selector: String, message: String },

    /// A property value could not be turned into an expression or the expected type.
    #[error("invalid value {value:?} for property '{property}': {message}")]
    InvalidValue {
        property: String,
        value: String,
        message: String,
    },
}

impl GeoCssError {
    pub(crate) fn invalid_value(
        property: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        GeoCssError::InvalidValue {
            property: property.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_filter(selector: impl Into<String>, message: impl Into<String>) -> Self {
        GeoCssError::InvalidFilter {
            selector: selector.into(),
            message: message.into(),
        }
    }
}

/// Non-fatal conditions recorded during a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `@mode` named something other than `Flat`; the input is processed as flat anyway.
    UnsupportedMode(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedMode(mode) => write!(
                f,
                "only 'Flat' mode is supported, '{}' will be translated as flat GeoCSS",
                mode
            ),
        }
    }
}
