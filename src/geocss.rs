//! Main module for GeoCSS library functionality
//!
//! Reading runs lexing -> parsing -> assembling -> mapping::reader; writing runs
//! mapping::writer -> serializer.

pub mod assembling;
pub mod config;
pub mod error;
pub mod expression;
pub mod lexing;
pub mod mapping;
pub mod parser;
pub mod parsing;
pub mod serializer;
pub mod style;
