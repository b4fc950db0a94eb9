//! Test-value synthesizer: a representative value of a given kind for a sample.
//!
//! Runs the splitting and detection steps again on its own rather than reusing
//! state from an analysis.

use crate::analysis::Engine;
use crate::datetime::{FormatDetector, FormatGuesser, materialize};
use crate::numeric::{detect_padding, split_numeric_literal, strip_grouping};
use crate::patterns::{HEX, NUMBER, PERCENT, UNPREFIXED_HEX};
use crate::spec::{SampleValue, ValueKind};
use chrono::{NaiveDate, NaiveDateTime};

/// Value handed out when a datetime sample cannot be materialized.
pub fn placeholder_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 1, 24)
        .and_then(|date| date.and_hms_opt(5, 45, 13))
        .unwrap_or_default()
}

impl<D: FormatDetector> Engine<D> {
    /// Representative value of `kind` for `sample`. Never fails; unparseable
    /// input degrades to `0`, `0.0`, the stripped text or the placeholder
    /// datetime.
    pub fn synthesize(&self, sample: &str, kind: ValueKind) -> SampleValue {
        if kind == ValueKind::Datetime {
            return SampleValue::Datetime(self.datetime_value(sample));
        }

        let parts = split_numeric_literal(sample);
        let text = if parts.has_literals() { parts.core } else { sample };
        let core = detect_padding(text).core;

        match kind {
            ValueKind::Str => SampleValue::Str(core.to_string()),
            ValueKind::Int => SampleValue::Int(int_value(core)),
            _ => SampleValue::Float(float_value(core)),
        }
    }

    fn datetime_value(&self, sample: &str) -> NaiveDateTime {
        let whole = self
            .datetime
            .detect(sample)
            .and_then(|pattern| materialize(sample, &pattern));
        if let Some(value) = whole {
            return value;
        }

        self.datetime
            .split_literal(sample)
            .and_then(|split| materialize(split.span, &split.pattern))
            .unwrap_or_else(placeholder_datetime)
    }
}

fn int_value(core: &str) -> i128 {
    let clean = strip_grouping(core);
    let clean = clean.strip_prefix('+').unwrap_or(&clean);
    let unsigned = clean.strip_prefix('-').unwrap_or(clean);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return clean.parse().unwrap_or_default();
    }

    let digits = if HEX.is_match(core) {
        &core[2..]
    } else if UNPREFIXED_HEX.is_match(core) {
        core
    } else {
        return 0;
    };
    i128::from_str_radix(digits, 16).unwrap_or_default()
}

fn float_value(core: &str) -> f64 {
    let clean = strip_grouping(core);
    let clean = clean.strip_prefix('+').unwrap_or(&clean);

    if PERCENT.is_match(core) {
        let number = clean.strip_suffix('%').unwrap_or(clean);
        if NUMBER.is_match(number) {
            return number.parse::<f64>().unwrap_or_default() / 100.0;
        }
    }

    if NUMBER.is_match(clean) {
        clean.parse().unwrap_or_default()
    } else {
        0.0
    }
}

/// Synthesize with the built-in format detector.
pub fn synthesize(sample: &str, kind: ValueKind) -> SampleValue {
    Engine::<FormatGuesser>::default().synthesize(sample, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> SampleValue {
        SampleValue::Datetime(
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(h, min, s))
                .expect("valid datetime"),
        )
    }

    #[test]
    fn integers_drop_grouping_and_plus() {
        assert_eq!(synthesize("1,234", ValueKind::Int), SampleValue::Int(1234));
        assert_eq!(synthesize("+42", ValueKind::Int), SampleValue::Int(42));
        assert_eq!(synthesize("-7", ValueKind::Int), SampleValue::Int(-7));
        assert_eq!(synthesize("***7***", ValueKind::Int), SampleValue::Int(7));
        assert_eq!(synthesize("007", ValueKind::Int), SampleValue::Int(7));
    }

    #[test]
    fn hex_integers() {
        assert_eq!(synthesize("0x1A", ValueKind::Int), SampleValue::Int(26));
        assert_eq!(synthesize("FF", ValueKind::Int), SampleValue::Int(255));
        assert_eq!(synthesize("id=0x1f;", ValueKind::Int), SampleValue::Int(31));
    }

    #[test]
    fn unparseable_integers_degrade_to_zero() {
        assert_eq!(synthesize("3.14", ValueKind::Int), SampleValue::Int(0));
        assert_eq!(synthesize("hello", ValueKind::Int), SampleValue::Int(0));
        assert_eq!(synthesize("-", ValueKind::Int), SampleValue::Int(0));
    }

    #[test]
    fn floats_and_percentages() {
        assert_eq!(synthesize("Total: 1,234.50 USD", ValueKind::Float), SampleValue::Float(1234.5));
        assert_eq!(synthesize("50%", ValueKind::Float), SampleValue::Float(0.5));
        assert_eq!(synthesize("hello", ValueKind::Float), SampleValue::Float(0.0));
        match synthesize("3.14%", ValueKind::Float) {
            SampleValue::Float(v) => assert!((v - 0.0314).abs() < 1e-12),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn strings_are_stripped_of_literals_and_padding() {
        assert_eq!(
            synthesize("Total: 1,234.50 USD", ValueKind::Str),
            SampleValue::Str("1,234.50".to_string())
        );
        assert_eq!(synthesize("__x", ValueKind::Str), SampleValue::Str("x".to_string()));
        assert_eq!(synthesize("hello", ValueKind::Str), SampleValue::Str("hello".to_string()));
    }

    #[test]
    fn datetimes_parse_whole_or_embedded() {
        assert_eq!(synthesize("2024-01-15", ValueKind::Datetime), at(2024, 1, 15, 0, 0, 0));
        assert_eq!(
            synthesize("Created: 2024-01-15 10:30 by admin", ValueKind::Datetime),
            at(2024, 1, 15, 10, 30, 0)
        );
    }

    #[test]
    fn unknown_datetimes_use_the_placeholder() {
        assert_eq!(synthesize("hello", ValueKind::Datetime), at(2030, 1, 24, 5, 45, 13));
        assert_eq!(
            SampleValue::Datetime(placeholder_datetime()),
            at(2030, 1, 24, 5, 45, 13)
        );
    }
}
