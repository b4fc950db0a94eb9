//! Numeric path: literal splitting, padding detection and shape parsing.

pub mod parse;
pub mod split;

pub use parse::{NumericContext, count_decimals, parse_numeric, strip_grouping};
pub use split::{NumberParts, Padding, detect_padding, split_numeric_literal};
