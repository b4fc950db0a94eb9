//! Numeric shape parser: isolated numeric core -> candidate specs.
//!
//! The shapes form an ordered cascade of (matcher, builder) pairs. The first
//! matcher that accepts the core decides; its builder is pure and returns the
//! complete candidate list for that shape.

use crate::patterns::{HEX, NUMBER, PERCENT, THOUSANDS, UNDERSCORE, UNPREFIXED_HEX, ZERO_PADDED};
use crate::spec::{Grouping, Layout, SignMode, StructuredSpec, TypeIndicator};
use tracing::trace;

/// Everything the parser knows about the sample besides the core itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericContext<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
    pub layout: Layout,
}

impl<'a> NumericContext<'a> {
    pub fn literal(prefix: &'a str, suffix: &'a str) -> Self {
        Self {
            prefix,
            suffix,
            layout: Layout::default(),
        }
    }

    pub fn padded(layout: Layout) -> Self {
        Self {
            prefix: "",
            suffix: "",
            layout,
        }
    }
}

struct Shape {
    name: &'static str,
    matches: fn(&str) -> bool,
    build: fn(&str, &NumericContext<'_>) -> Vec<StructuredSpec>,
}

static CASCADE: [Shape; 5] = [
    Shape {
        name: "prefixed-hex",
        matches: is_prefixed_hex,
        build: prefixed_hex,
    },
    Shape {
        name: "unprefixed-hex",
        matches: is_unprefixed_hex,
        build: unprefixed_hex,
    },
    Shape {
        name: "percent",
        matches: is_percent,
        build: percent,
    },
    Shape {
        name: "zero-padded",
        matches: is_zero_padded,
        build: zero_padded,
    },
    Shape {
        name: "decimal",
        matches: is_decimal,
        build: decimal,
    },
];

/// Classify `core` into candidate specs; empty when no numeric shape fits.
pub fn parse_numeric(core: &str, cx: &NumericContext<'_>) -> Vec<StructuredSpec> {
    for shape in &CASCADE {
        if (shape.matches)(core) {
            trace!(core, shape = shape.name, "numeric shape matched");
            return (shape.build)(core, cx);
        }
    }
    Vec::new()
}

/// Digits after the decimal point, 0 when there is none.
pub fn count_decimals(number: &str) -> usize {
    number
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

/// Drop grouping separators.
pub fn strip_grouping(number: &str) -> String {
    number.replace([',', '_'], "")
}

fn sign_mode(number: &str) -> SignMode {
    if number.starts_with('+') {
        SignMode::AlwaysPlus
    } else {
        SignMode::Default
    }
}

fn hex_digits(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

fn parse_int(text: &str) -> i128 {
    text.parse().unwrap_or_default()
}

fn parse_hex(text: &str) -> i128 {
    i128::from_str_radix(hex_digits(text), 16).unwrap_or_default()
}

fn parse_float(text: &str) -> f64 {
    text.parse().unwrap_or_default()
}

fn is_prefixed_hex(core: &str) -> bool {
    HEX.is_match(core)
}

fn prefixed_hex(core: &str, cx: &NumericContext<'_>) -> Vec<StructuredSpec> {
    let mut spec = StructuredSpec::int(parse_hex(core))
        .with_alternate()
        .with_type(TypeIndicator::HexLower);
    if core.starts_with("0x0") {
        spec = spec.zero_filled(core.len());
    }
    vec![spec.wrapped(cx.prefix, cx.suffix)]
}

fn is_unprefixed_hex(core: &str) -> bool {
    UNPREFIXED_HEX.is_match(core)
}

fn unprefixed_hex(core: &str, cx: &NumericContext<'_>) -> Vec<StructuredSpec> {
    let upper = core.chars().any(|c| c.is_ascii_alphabetic())
        && !core.chars().any(|c| c.is_ascii_lowercase());
    let indicator = if upper {
        TypeIndicator::HexUpper
    } else {
        TypeIndicator::HexLower
    };
    let mut spec = StructuredSpec::int(parse_hex(core)).with_type(indicator);
    if core.len() > 1 && core.starts_with('0') {
        spec = spec.zero_filled(core.len());
    }
    vec![spec.wrapped(cx.prefix, cx.suffix)]
}

fn is_percent(core: &str) -> bool {
    PERCENT.is_match(core)
}

fn percent(core: &str, cx: &NumericContext<'_>) -> Vec<StructuredSpec> {
    let number = core.strip_suffix('%').unwrap_or(core);
    vec![
        StructuredSpec::float(parse_float(number) / 100.0)
            .aligned(&cx.layout)
            .with_sign(sign_mode(number))
            .with_precision(count_decimals(number))
            .with_type(TypeIndicator::Percent)
            .wrapped(cx.prefix, cx.suffix),
    ]
}

fn is_zero_padded(core: &str) -> bool {
    ZERO_PADDED.is_match(core.strip_prefix('+').unwrap_or(core))
}

fn zero_padded(core: &str, cx: &NumericContext<'_>) -> Vec<StructuredSpec> {
    let width = core.len();
    let sign = sign_mode(core);
    let mut out = Vec::with_capacity(2);

    if !core.contains('.') {
        out.push(
            StructuredSpec::int(parse_int(core))
                .zero_filled(width)
                .with_sign(sign)
                .with_type(TypeIndicator::DecimalInt)
                .wrapped(cx.prefix, cx.suffix),
        );
    }

    out.push(
        StructuredSpec::float(parse_float(core))
            .zero_filled(width)
            .with_sign(sign)
            .with_precision(count_decimals(core))
            .with_type(TypeIndicator::FixedPoint)
            .wrapped(cx.prefix, cx.suffix),
    );
    out
}

fn is_decimal(core: &str) -> bool {
    NUMBER.is_match(&strip_grouping(core))
}

fn decimal(core: &str, cx: &NumericContext<'_>) -> Vec<StructuredSpec> {
    let clean = strip_grouping(core);
    let grouping = Grouping::from_flags(THOUSANDS.is_match(core), UNDERSCORE.is_match(core));
    let decimals = count_decimals(&clean);
    let sign = sign_mode(core);

    let float_spec = StructuredSpec::float(parse_float(&clean))
        .aligned(&cx.layout)
        .with_grouping(grouping)
        .with_sign(sign)
        .with_precision(decimals)
        .with_type(TypeIndicator::FixedPoint)
        .wrapped(cx.prefix, cx.suffix);

    if decimals > 0 {
        return vec![float_spec];
    }

    let decorated = cx.layout.is_decorated() || grouping != Grouping::None || sign == SignMode::AlwaysPlus;
    if !decorated {
        return vec![float_spec];
    }

    let int_spec = StructuredSpec::int(parse_int(clean.trim_end_matches('.')))
        .aligned(&cx.layout)
        .with_grouping(grouping)
        .with_sign(sign)
        .with_type(TypeIndicator::DecimalInt)
        .wrapped(cx.prefix, cx.suffix);

    // Grouped whole numbers read more often as amounts than counts.
    if grouping != Grouping::None {
        vec![float_spec, int_spec]
    } else {
        vec![int_spec, float_spec]
    }
}
