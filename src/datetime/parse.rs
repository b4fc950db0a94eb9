//! strptime-style patterns on top of chrono's parser.
//!
//! Patterns handed around the crate follow strptime conventions, where
//! `.%f` is a fractional-seconds field. chrono spells that `%.f`.

use chrono::NaiveDateTime;
use chrono::format::{Parsed, StrftimeItems, parse};

pub fn chrono_pattern(pattern: &str) -> String {
    pattern.replace(".%f", "%.f")
}

/// True when the whole of `text` is consumed by `pattern`.
///
/// Only field ranges are checked; the fields need not form a full date.
pub fn matches_pattern(text: &str, pattern: &str) -> bool {
    let pattern = chrono_pattern(pattern);
    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(&pattern)).is_ok()
}

/// Parse `text` into a datetime, filling fields the pattern does not carry
/// the way strptime does: 1900-01-01 00:00, with `%I` read as AM when no
/// `%p` is present.
pub fn materialize(text: &str, pattern: &str) -> Option<NaiveDateTime> {
    let has = |directives: &[&str]| directives.iter().any(|d| pattern.contains(d));

    let mut text = text.to_string();
    let mut format = chrono_pattern(pattern);
    let mut fill = |value: &str, directive: &str| {
        text.push(' ');
        text.push_str(value);
        format.push(' ');
        format.push_str(directive);
    };

    if !has(&["%Y", "%y"]) {
        fill("1900", "%Y");
    }
    if !has(&["%j"]) {
        if !has(&["%m", "%b", "%B"]) {
            fill("1", "%m");
        }
        if !has(&["%d"]) {
            fill("1", "%d");
        }
    }
    if !has(&["%H", "%I"]) {
        fill("0", "%H");
    } else if has(&["%I"]) && !has(&["%p"]) {
        fill("AM", "%p");
    }
    if !has(&["%M"]) {
        fill("0", "%M");
    }

    NaiveDateTime::parse_from_str(&text, &format).ok()
}
