//! Datetime path: format detection, embedded-span splitting and
//! strptime-compatible parsing.

pub mod detect;
pub mod guess;
pub mod parse;

pub use detect::{
    DatetimeDetector, DatetimeSplit, ISO_FRACTION_PATTERN, has_datetime_structure,
    is_single_numeric,
};
pub use guess::{FormatDetector, FormatGuesser};
pub use parse::{materialize, matches_pattern};
