//! Analysis orchestrator: runs the datetime and numeric paths over a sample,
//! orders their candidates and removes duplicates.

use crate::datetime::{
    DatetimeDetector, FormatDetector, FormatGuesser, has_datetime_structure, is_single_numeric,
    materialize,
};
use crate::numeric::{NumericContext, detect_padding, parse_numeric, split_numeric_literal};
use crate::spec::{Align, Layout, StructuredSpec, ValueKind, render};
use crate::synth::placeholder_datetime;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;
use tracing::debug;

/// One ranked candidate: the value kind and its rendered expression.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub kind: ValueKind,
    pub text: String,
    pub spec: StructuredSpec,
}

impl Candidate {
    fn new(spec: StructuredSpec) -> Self {
        Self {
            kind: spec.value_kind,
            text: render(&spec),
            spec,
        }
    }
}

/// Inference engine over a format-detection collaborator.
#[derive(Debug, Clone, Default)]
pub struct Engine<D = FormatGuesser> {
    pub(crate) datetime: DatetimeDetector<D>,
}

/// Datetime candidate plus where in the sample it was found.
struct DatetimeMatch {
    spec: StructuredSpec,
    range: Range<usize>,
    single_numeric: bool,
}

impl<D: FormatDetector> Engine<D> {
    pub fn new(collaborator: D) -> Self {
        Self {
            datetime: DatetimeDetector::new(collaborator),
        }
    }

    /// Ranked, duplicate-free candidates for `sample`. Never fails; an empty
    /// list means no shape was recognized.
    pub fn analyze(&self, sample: &str) -> Vec<Candidate> {
        let datetime = self.datetime_match(sample);
        let numeric = numeric_candidates(sample, datetime.as_ref());

        let ordered = match datetime {
            None => numeric,
            Some(dt) if numeric.is_empty() => vec![dt.spec],
            Some(dt) => {
                let datetime_first = !dt.single_numeric && has_datetime_structure(sample);
                debug!(sample, datetime_first, "merging datetime and numeric candidates");
                if datetime_first {
                    std::iter::once(dt.spec).chain(numeric).collect()
                } else {
                    numeric.into_iter().chain(std::iter::once(dt.spec)).collect()
                }
            }
        };

        dedup(ordered)
    }

    fn datetime_match(&self, sample: &str) -> Option<DatetimeMatch> {
        if let Some(pattern) = self.datetime.detect(sample) {
            debug!(sample, pattern = pattern.as_str(), "sample is a datetime");
            let value = materialize(sample, &pattern).unwrap_or_else(placeholder_datetime);
            return Some(DatetimeMatch {
                single_numeric: is_single_numeric(&pattern),
                range: 0..sample.len(),
                spec: StructuredSpec::datetime(pattern, value),
            });
        }

        let split = self.datetime.split_literal(sample)?;
        debug!(
            sample,
            prefix = split.prefix,
            span = split.span,
            pattern = split.pattern.as_str(),
            "datetime embedded in literals"
        );
        let value = materialize(split.span, &split.pattern).unwrap_or_else(placeholder_datetime);
        Some(DatetimeMatch {
            single_numeric: is_single_numeric(&split.pattern),
            range: split.range(),
            spec: StructuredSpec::datetime(split.pattern.clone(), value)
                .wrapped(split.prefix, split.suffix),
        })
    }
}

/// Candidates from the literal splitter, padding detector and numeric parser.
fn numeric_candidates(sample: &str, datetime: Option<&DatetimeMatch>) -> Vec<StructuredSpec> {
    let parts = split_numeric_literal(sample);
    if parts.has_literals() {
        let start = parts.prefix.len();
        let inside_datetime = datetime.is_some_and(|dt| {
            !dt.single_numeric && dt.range.start <= start && start + parts.core.len() <= dt.range.end
        });
        // A number carved out of a recognized date ("2024" in "2024-01-15") is not a candidate.
        if inside_datetime {
            debug!(sample, core = parts.core, "numeric core lies inside the datetime span");
            return Vec::new();
        }

        debug!(
            sample,
            prefix = parts.prefix,
            core = parts.core,
            suffix = parts.suffix,
            "literal split"
        );
        let mut specs = parse_numeric(parts.core, &NumericContext::literal(parts.prefix, parts.suffix));
        specs.push(StructuredSpec::string(parts.core).wrapped(parts.prefix, parts.suffix));
        return specs;
    }

    let padding = detect_padding(sample);
    if !padding.is_padded() {
        return parse_numeric(sample, &NumericContext::default());
    }

    let align = match (padding.left.is_empty(), padding.right.is_empty()) {
        (false, false) if padding.left.len() == padding.right.len() => Align::Center,
        (false, false) => {
            // Uneven pads on both sides read as literal text, not alignment.
            debug!(sample, "uneven padding kept as literals");
            return vec![StructuredSpec::string(padding.core).wrapped(padding.left, padding.right)];
        }
        (false, true) => Align::Right,
        _ => Align::Left,
    };
    let layout = Layout {
        align,
        fill: padding.pad_char,
        width: sample.chars().count(),
    };
    debug!(sample, core = padding.core, ?layout, "padding detected");

    let mut specs = parse_numeric(padding.core, &NumericContext::padded(layout));
    if layout.is_decorated() {
        specs.push(StructuredSpec::string(padding.core).aligned(&layout));
    }
    specs
}

/// Keep the first occurrence of each (kind, rendered text) pair.
fn dedup(specs: Vec<StructuredSpec>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    specs
        .into_iter()
        .map(Candidate::new)
        .filter(|c| seen.insert((c.kind, c.text.clone())))
        .collect()
}

/// Analyze with the built-in format detector.
pub fn analyze(sample: &str) -> Vec<Candidate> {
    Engine::<FormatGuesser>::default().analyze(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Grouping, SampleValue, TypeIndicator};
    use pretty_assertions::assert_eq;

    fn pairs(sample: &str) -> Vec<(ValueKind, String)> {
        analyze(sample).into_iter().map(|c| (c.kind, c.text)).collect()
    }

    fn owned(expected: &[(ValueKind, &str)]) -> Vec<(ValueKind, String)> {
        expected.iter().map(|(k, t)| (*k, t.to_string())).collect()
    }

    #[test]
    fn zero_padded_int_then_float_then_day_of_year() {
        assert_eq!(
            pairs("007"),
            owned(&[
                (ValueKind::Int, "{variable:03d}"),
                (ValueKind::Float, "{variable:03.0f}"),
                (ValueKind::Datetime, "{variable:%j}"),
            ])
        );
    }

    #[test]
    fn percent_is_a_single_candidate() {
        let out = analyze("3.14%");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ValueKind::Float);
        assert_eq!(out[0].spec.type_indicator, TypeIndicator::Percent);
        assert_eq!(out[0].spec.precision, Some(2));
        assert_eq!(out[0].text, "{variable:.2%}");
    }

    #[test]
    fn prefixed_hex_is_a_single_candidate() {
        let out = analyze("0x1A");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ValueKind::Int);
        assert_eq!(out[0].spec.sample_value, SampleValue::Int(26));
    }

    #[test]
    fn iso_date_is_a_single_candidate() {
        assert_eq!(
            pairs("2024-01-15"),
            owned(&[(ValueKind::Datetime, "{variable:%Y-%m-%d}")])
        );
    }

    #[test]
    fn grouped_amount_with_literals() {
        let out = analyze("Total: 1,234.50 USD");
        assert_eq!(
            out.iter().map(|c| (c.kind, c.text.clone())).collect::<Vec<_>>(),
            owned(&[
                (ValueKind::Float, "Total: {variable:,.2f} USD"),
                (ValueKind::Str, "Total: {variable} USD"),
            ])
        );
        assert_eq!(out[0].spec.grouping, Grouping::Comma);
        assert_eq!(out[0].spec.literal_prefix, "Total: ");
        assert_eq!(out[0].spec.literal_suffix, " USD");
    }

    #[test]
    fn centered_asterisk_padding() {
        assert_eq!(
            pairs("***7***"),
            owned(&[
                (ValueKind::Int, "{variable:*^7d}"),
                (ValueKind::Float, "{variable:*^7.0f}"),
                (ValueKind::Str, "{variable:*^7}"),
            ])
        );
    }

    #[test]
    fn right_aligned_space_padding() {
        assert_eq!(
            pairs("   42"),
            owned(&[
                (ValueKind::Int, "{variable:>5d}"),
                (ValueKind::Float, "{variable:>5.0f}"),
                (ValueKind::Str, "{variable:>5}"),
            ])
        );
    }

    #[test]
    fn uneven_padding_becomes_literals() {
        assert_eq!(
            pairs("  abc "),
            owned(&[(ValueKind::Str, "  {variable} ")])
        );
    }

    #[test]
    fn datetime_with_structure_comes_first() {
        assert_eq!(
            pairs("Jan 5: 3.14%"),
            owned(&[
                (ValueKind::Datetime, "{variable:%b %d}: 3.14%"),
                (ValueKind::Float, "Jan 5: {variable:.2%}"),
                (ValueKind::Str, "Jan 5: {variable}"),
            ])
        );
    }

    #[test]
    fn compact_date_without_separators_comes_last() {
        assert_eq!(
            pairs("20240115"),
            owned(&[
                (ValueKind::Float, "{variable:.0f}"),
                (ValueKind::Datetime, "{variable:%Y%m%d}"),
            ])
        );
    }

    #[test]
    fn words_without_shapes_yield_nothing() {
        assert!(analyze("hello").is_empty());
        assert!(analyze("").is_empty());
        assert!(analyze("   ").is_empty());
    }

    #[test]
    fn hex_word_and_month_abbreviation() {
        let out = analyze("Dec");
        assert_eq!(
            out.iter().map(|c| (c.kind, c.text.clone())).collect::<Vec<_>>(),
            owned(&[
                (ValueKind::Int, "{variable:x}"),
                (ValueKind::Datetime, "{variable:%b}"),
            ])
        );
        assert_eq!(out[0].spec.sample_value, SampleValue::Int(0xdec));
    }

    #[test]
    fn collaborator_seam_is_pluggable() {
        struct Never;
        impl FormatDetector for Never {
            fn detect_format(&self, _text: &str) -> Option<String> {
                None
            }
        }

        let engine = Engine::new(Never);
        let kinds: Vec<_> = engine.analyze("007").into_iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ValueKind::Int, ValueKind::Float]);
    }

    #[test]
    fn no_duplicate_candidates() {
        for sample in ["007", "***7***", "Total: 1,234.50 USD", "2024-01-15", "Dec", "+42"] {
            let out = analyze(sample);
            let mut seen = HashSet::new();
            for c in &out {
                assert!(seen.insert((c.kind, c.text.clone())), "duplicate for {sample:?}");
            }
        }
    }
}
