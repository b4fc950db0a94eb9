//! Datetime detection on whole samples and on literal-embedded spans.

use crate::datetime::guess::{FormatDetector, FormatGuesser};
use crate::datetime::parse::materialize;
use crate::patterns::ISO_DATETIME_FRACTION;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use tracing::trace;

pub const ISO_FRACTION_PATTERN: &str = "%Y-%m-%dT%H:%M:%S.%f";

/// Patterns that are indistinguishable from a plain integer.
const SINGLE_NUMERIC: [&str; 9] = ["%d", "%m", "%y", "%Y", "%H", "%I", "%M", "%S", "%j"];

const DATETIME_SEPARATORS: [char; 6] = [' ', '-', '/', ':', 'T', '+'];

const TIME_TAIL: &str = r"(?:\s+[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?)?(?:\s*[AP]M)?";
const MONTH_ABBR: &str = r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";
const WEEKDAY_ABBR: &str = r"(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun)";

/// Embedding shapes, most specific first: a full date must never be split
/// as a bare month name.
static EMBEDDED: Lazy<Vec<Regex>> = Lazy::new(|| {
    let spans = [
        format!(r"[0-9]{{4}}-[0-9]{{2}}-[0-9]{{2}}{TIME_TAIL}"),
        r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}(?:\s+[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s*[AP]M?)?"
            .to_string(),
        r"[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?(?:\s*[AP]M)?".to_string(),
        format!(r"\b{MONTH_ABBR}[a-z]*\s+[0-9]{{1,2}}(?:,?\s+[0-9]{{4}})?{TIME_TAIL}"),
        format!(
            r"\b{WEEKDAY_ABBR}[a-z]*\s+{MONTH_ABBR}[a-z]*\s+[0-9]{{1,2}}(?:\s+[0-9]{{4}})?{TIME_TAIL}"
        ),
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday|Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec|Mon|Tue|Wed|Thu|Fri|Sat|Sun)\b"
            .to_string(),
    ];
    spans
        .iter()
        .map(|span| {
            Regex::new(&format!("(?i)^(.*?)({span})(.*)$"))
                .expect("embedded datetime regex is invalid")
        })
        .collect()
});

/// A datetime span found inside literal text.
///
/// `prefix + span + suffix` is always the original sample; whitespace
/// trimmed off the span moves into the literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatetimeSplit<'a> {
    pub prefix: &'a str,
    pub span: &'a str,
    pub suffix: &'a str,
    pub pattern: String,
}

impl DatetimeSplit<'_> {
    /// Byte range of the span within the sample.
    pub fn range(&self) -> Range<usize> {
        self.prefix.len()..self.prefix.len() + self.span.len()
    }
}

/// Datetime detector wrapping a format-detection collaborator.
#[derive(Debug, Clone, Default)]
pub struct DatetimeDetector<D = FormatGuesser> {
    collaborator: D,
}

impl<D: FormatDetector> DatetimeDetector<D> {
    pub fn new(collaborator: D) -> Self {
        Self { collaborator }
    }

    /// Pattern for the whole sample, if any.
    ///
    /// The collaborator goes first; an ISO timestamp with fractional seconds
    /// overrides any answer that does not already carry `%f`.
    pub fn detect(&self, sample: &str) -> Option<String> {
        let detected = self.collaborator.detect_format(sample);
        if detected.as_deref().is_some_and(|p| p.contains("%f")) {
            return detected;
        }
        iso_fraction(sample).or(detected)
    }

    /// Find a datetime span inside literal text.
    pub fn split_literal<'a>(&self, sample: &'a str) -> Option<DatetimeSplit<'a>> {
        for regex in EMBEDDED.iter() {
            let Some(span) = regex.captures(sample).and_then(|caps| caps.get(2)) else {
                continue;
            };
            let raw = span.as_str();
            let trimmed = raw.trim();
            let Some(pattern) = self.detect(trimmed) else {
                trace!(span = raw, "embedded span not recognized");
                continue;
            };
            let start = span.start() + (raw.len() - raw.trim_start().len());
            let end = start + trimmed.len();
            return Some(DatetimeSplit {
                prefix: &sample[..start],
                span: trimmed,
                suffix: &sample[end..],
                pattern,
            });
        }
        None
    }
}

fn iso_fraction(sample: &str) -> Option<String> {
    (ISO_DATETIME_FRACTION.is_match(sample) && materialize(sample, ISO_FRACTION_PATTERN).is_some())
        .then(|| ISO_FRACTION_PATTERN.to_string())
}

/// True when the pattern is one bare numeric directive such as `%d`.
pub fn is_single_numeric(pattern: &str) -> bool {
    SINGLE_NUMERIC.contains(&pattern)
}

/// True when the sample contains a separator typical of dates and times.
pub fn has_datetime_structure(sample: &str) -> bool {
    sample.contains(DATETIME_SEPARATORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Collaborator that never recognizes anything.
    struct Blind;

    impl FormatDetector for Blind {
        fn detect_format(&self, _text: &str) -> Option<String> {
            None
        }
    }

    /// Collaborator that misses fractional seconds.
    struct Coarse;

    impl FormatDetector for Coarse {
        fn detect_format(&self, _text: &str) -> Option<String> {
            Some("%Y-%m-%dT%H:%M:%S".to_string())
        }
    }

    #[test]
    fn iso_fraction_fallback_when_collaborator_fails() {
        let detector = DatetimeDetector::new(Blind);
        assert_eq!(
            detector.detect("2024-01-15T10:30:00.5").as_deref(),
            Some(ISO_FRACTION_PATTERN)
        );
        assert_eq!(detector.detect("2024-01-15"), None);
        assert_eq!(detector.detect("2024-13-15T10:30:00.5"), None);
    }

    #[test]
    fn iso_fraction_overrides_answer_without_fraction() {
        let detector = DatetimeDetector::new(Coarse);
        assert_eq!(
            detector.detect("2024-01-15T10:30:00.123").as_deref(),
            Some(ISO_FRACTION_PATTERN)
        );
        assert_eq!(
            detector.detect("2024-01-15T10:30:00").as_deref(),
            Some("%Y-%m-%dT%H:%M:%S")
        );
    }

    #[test]
    fn splits_date_out_of_log_line() {
        let detector = DatetimeDetector::<FormatGuesser>::default();
        let split = detector
            .split_literal("Created: 2024-01-15 10:30 by admin")
            .expect("embedded date");
        assert_eq!(split.prefix, "Created: ");
        assert_eq!(split.span, "2024-01-15 10:30");
        assert_eq!(split.suffix, " by admin");
        assert_eq!(split.pattern, "%Y-%m-%d %H:%M");
        assert_eq!(split.range(), 9..25);
    }

    #[test]
    fn full_dates_win_over_bare_month_names() {
        let detector = DatetimeDetector::<FormatGuesser>::default();
        let split = detector.split_literal("due Jan 15, 2024!").expect("embedded date");
        assert_eq!(split.span, "Jan 15, 2024");
        assert_eq!(split.pattern, "%b %d, %Y");

        let split = detector.split_literal("see you in March.").expect("month name");
        assert_eq!((split.prefix, split.span, split.suffix), ("see you in ", "March", "."));
        assert_eq!(split.pattern, "%B");
    }

    #[test]
    fn unrecognized_spans_fall_through() {
        let detector = DatetimeDetector::<FormatGuesser>::default();
        assert_eq!(detector.split_literal("Total: 1,234.50 USD"), None);
        assert_eq!(detector.split_literal("Market 12"), None);
    }

    #[test]
    fn single_numeric_patterns() {
        for pattern in ["%d", "%Y", "%j", "%I"] {
            assert!(is_single_numeric(pattern));
        }
        for pattern in ["%Y-%m-%d", "%Y%m%d", "%B", "%H:%M"] {
            assert!(!is_single_numeric(pattern));
        }
    }

    #[test]
    fn datetime_structure_signals() {
        assert!(has_datetime_structure("2024-01-15"));
        assert!(has_datetime_structure("10:30"));
        assert!(has_datetime_structure("Total"));
        assert!(!has_datetime_structure("20240115"));
        assert!(!has_datetime_structure("3.14"));
    }
}
