//! Mapping between GeoCSS rules and the style document
//!
//!     [reader] turns parsed stylesheets into a [Style](crate::geocss::style::Style):
//!     selectors become filters and scale bounds, property rows become symbolizers and
//!     pseudo-selector blocks fill in the marks used by points, graphic strokes and
//!     graphic fills.
//!
//!     [writer] goes the other way and produces flat rule objects, one per style rule,
//!     which the [serializer](crate::geocss::serializer) prints as GeoCSS text.

pub mod reader;
pub mod writer;
