//! Literal splitting and padding detection around a numeric core.

use crate::patterns::{
    FULL_HEX, FULL_NUMBER, FULL_PERCENT, FULL_THOUSANDS, FULL_UNDERSCORE, FULL_UNPREFIXED_HEX,
    PAD_CHARS,
};
use regex::Regex;

/// A sample decomposed into literal prefix, numeric core and literal suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberParts<'a> {
    pub prefix: &'a str,
    pub core: &'a str,
    pub suffix: &'a str,
}

impl<'a> NumberParts<'a> {
    fn unsplit(sample: &'a str) -> Self {
        Self {
            prefix: "",
            core: sample,
            suffix: "",
        }
    }

    pub fn has_literals(&self) -> bool {
        !self.prefix.is_empty() || !self.suffix.is_empty()
    }
}

/// Uniform pad run detected around a core value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding<'a> {
    pub core: &'a str,
    pub left: &'a str,
    pub right: &'a str,
    pub pad_char: char,
}

impl Padding<'_> {
    pub fn is_padded(&self) -> bool {
        !self.left.is_empty() || !self.right.is_empty()
    }
}

/// How a shape's prefix/suffix captures are checked against padding.
#[derive(Clone, Copy)]
enum PadPolicy {
    /// Accept any split.
    Accept,
    /// Unsplit when a pad run makes the literals look like alignment.
    PreferPadding,
}

/// Non-empty run of one character from the pad set.
fn is_padding(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => PAD_CHARS.contains(&first) && chars.all(|c| c == first),
        None => false,
    }
}

fn shapes() -> [(&'static Regex, PadPolicy); 6] {
    [
        (&*FULL_HEX, PadPolicy::Accept),
        (&*FULL_PERCENT, PadPolicy::PreferPadding),
        // Whole-sample only, so there are never literals to check.
        (&*FULL_UNPREFIXED_HEX, PadPolicy::Accept),
        (&*FULL_THOUSANDS, PadPolicy::PreferPadding),
        (&*FULL_UNDERSCORE, PadPolicy::PreferPadding),
        (&*FULL_NUMBER, PadPolicy::PreferPadding),
    ]
}

/// Split `sample` into literal prefix, numeric core and literal suffix.
///
/// Shapes are tried in priority order; the first full match decides. When the
/// literals look like alignment padding instead, the sample comes back
/// unsplit so the padding detector can claim it.
pub fn split_numeric_literal(sample: &str) -> NumberParts<'_> {
    for (regex, policy) in shapes() {
        let Some(caps) = regex.captures(sample) else {
            continue;
        };
        let (Some(prefix), Some(core), Some(suffix)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        let parts = NumberParts {
            prefix: prefix.as_str(),
            core: core.as_str(),
            suffix: suffix.as_str(),
        };

        let left_pad = is_padding(parts.prefix);
        let right_pad = is_padding(parts.suffix);
        match policy {
            PadPolicy::Accept => return parts,
            PadPolicy::PreferPadding => {
                let same_char = parts.prefix.chars().next() == parts.suffix.chars().next();
                if (left_pad || right_pad) && (left_pad != right_pad || same_char) {
                    return NumberParts::unsplit(sample);
                }
                return parts;
            }
        }
    }

    NumberParts::unsplit(sample)
}

/// Strip uniform pad runs from both ends of `sample`.
///
/// Pad characters are tried in fixed priority order and the first one that
/// leaves a non-empty core with at least one padded side wins.
pub fn detect_padding(sample: &str) -> Padding<'_> {
    for pad_char in PAD_CHARS {
        let trimmed_start = sample.trim_start_matches(pad_char);
        let core = trimmed_start.trim_end_matches(pad_char);
        if core.is_empty() {
            continue;
        }
        let left = &sample[..sample.len() - trimmed_start.len()];
        let right = &trimmed_start[core.len()..];
        if !left.is_empty() || !right.is_empty() {
            return Padding {
                core,
                left,
                right,
                pad_char,
            };
        }
    }

    Padding {
        core: sample,
        left: "",
        right: "",
        pad_char: ' ',
    }
}
