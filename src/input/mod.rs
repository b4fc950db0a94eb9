//! Sample files for batch analysis.

pub mod parse;

pub use parse::{Sample, parse_sample_file, parse_samples};
