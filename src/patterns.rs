//! Regex shapes shared by the numeric and datetime paths.
//!
//! Bare shapes (`HEX`, `PERCENT`, ...) are anchored on both ends so `is_match`
//! behaves as a full match. The `FULL_*` variants capture
//! `(prefix)(shape)(suffix)` with a lazy prefix, so the leftmost occurrence of
//! the shape is the one that gets split out.

use once_cell::sync::Lazy;
use regex::Regex;

const HEX_SHAPE: &str = r"0[xX][0-9a-fA-F]+";
const UNPREFIXED_HEX_SHAPE: &str = r"[0-9]*[a-fA-F]+[0-9]*";
const PERCENT_SHAPE: &str = r"[+-]?[0-9]+\.?[0-9]*%";
const ZERO_PADDED_SHAPE: &str = r"0+[0-9]+\.?[0-9]*";
const THOUSANDS_SHAPE: &str = r"[+-]?[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?";
const UNDERSCORE_SHAPE: &str = r"[+-]?[0-9]{1,3}(?:_[0-9]{3})+(?:\.[0-9]+)?";
const NUMBER_SHAPE: &str = r"[+-]?[0-9]+\.?[0-9]*";

/// Characters accepted as padding, in priority order.
pub const PAD_CHARS: [char; 3] = [' ', '_', '*'];

fn whole(shape: &str) -> Regex {
    Regex::new(&format!("^(?:{shape})$")).expect("numeric shape regex is invalid")
}

fn anywhere(shape: &str) -> Regex {
    Regex::new(&format!("^(.*?)({shape})(.*)$")).expect("anchored shape regex is invalid")
}

pub static HEX: Lazy<Regex> = Lazy::new(|| whole(HEX_SHAPE));
pub static UNPREFIXED_HEX: Lazy<Regex> = Lazy::new(|| whole(UNPREFIXED_HEX_SHAPE));
pub static PERCENT: Lazy<Regex> = Lazy::new(|| whole(PERCENT_SHAPE));
pub static ZERO_PADDED: Lazy<Regex> = Lazy::new(|| whole(ZERO_PADDED_SHAPE));
pub static THOUSANDS: Lazy<Regex> = Lazy::new(|| whole(THOUSANDS_SHAPE));
pub static UNDERSCORE: Lazy<Regex> = Lazy::new(|| whole(UNDERSCORE_SHAPE));
pub static NUMBER: Lazy<Regex> = Lazy::new(|| whole(NUMBER_SHAPE));

pub static FULL_HEX: Lazy<Regex> = Lazy::new(|| anywhere(HEX_SHAPE));
// Unprefixed hex only ever matches the whole sample; otherwise any word with
// an a-f letter in it would be split around that letter.
pub static FULL_UNPREFIXED_HEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^()({UNPREFIXED_HEX_SHAPE})()$"))
        .expect("unprefixed hex regex is invalid")
});
pub static FULL_PERCENT: Lazy<Regex> = Lazy::new(|| anywhere(PERCENT_SHAPE));
pub static FULL_THOUSANDS: Lazy<Regex> = Lazy::new(|| anywhere(THOUSANDS_SHAPE));
pub static FULL_UNDERSCORE: Lazy<Regex> = Lazy::new(|| anywhere(UNDERSCORE_SHAPE));
pub static FULL_NUMBER: Lazy<Regex> = Lazy::new(|| anywhere(NUMBER_SHAPE));

/// `YYYY-MM-DDThh:mm:ss.f+`
pub static ISO_DATETIME_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+$")
        .expect("ISO fractional datetime regex is invalid")
});
