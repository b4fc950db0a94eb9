//! StructuredSpec: the kind-tagged description of one substitution expression.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Value shape a candidate expects to be substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Float,
    Str,
    Datetime,
}

impl ValueKind {
    pub fn label(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Datetime => "datetime",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Align {
    pub fn marker(self) -> &'static str {
        match self {
            Align::None => "",
            Align::Left => "<",
            Align::Right => ">",
            Align::Center => "^",
        }
    }

    pub fn is_set(self) -> bool {
        self != Align::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    None,
    Comma,
    Underscore,
}

impl Grouping {
    /// Underscore wins when both separators were detected.
    pub fn from_flags(comma: bool, underscore: bool) -> Self {
        if underscore {
            Grouping::Underscore
        } else if comma {
            Grouping::Comma
        } else {
            Grouping::None
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Grouping::None => "",
            Grouping::Comma => ",",
            Grouping::Underscore => "_",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeIndicator {
    #[default]
    None,
    DecimalInt,
    FixedPoint,
    Percent,
    HexLower,
    HexUpper,
}

impl TypeIndicator {
    pub fn marker(self) -> &'static str {
        match self {
            TypeIndicator::None => "",
            TypeIndicator::DecimalInt => "d",
            TypeIndicator::FixedPoint => "f",
            TypeIndicator::Percent => "%",
            TypeIndicator::HexLower => "x",
            TypeIndicator::HexUpper => "X",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignMode {
    #[default]
    Default,
    AlwaysPlus,
}

/// Concrete value illustrating a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleValue {
    Int(i128),
    Float(f64),
    Str(String),
    Datetime(NaiveDateTime),
}

impl SampleValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SampleValue::Int(_) => ValueKind::Int,
            SampleValue::Float(_) => ValueKind::Float,
            SampleValue::Str(_) => ValueKind::Str,
            SampleValue::Datetime(_) => ValueKind::Datetime,
        }
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Int(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" on whole floats.
            SampleValue::Float(v) => write!(f, "{v:?}"),
            SampleValue::Str(v) => write!(f, "{v:?}"),
            SampleValue::Datetime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// A candidate substitution expression before rendering.
///
/// Equality between candidates is decided on `(value_kind, rendered text)`
/// by the analysis layer; `sample_value` is illustrative only.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredSpec {
    pub value_kind: ValueKind,
    pub align: Align,
    pub fill: char,
    pub width: usize,
    pub grouping: Grouping,
    pub precision: Option<usize>,
    pub type_indicator: TypeIndicator,
    pub sign_mode: SignMode,
    /// `#` base marker, only for `0x`-prefixed hex.
    pub alternate: bool,
    pub literal_prefix: String,
    pub literal_suffix: String,
    pub datetime_pattern: Option<String>,
    pub sample_value: SampleValue,
}

impl StructuredSpec {
    fn bare(value_kind: ValueKind, sample_value: SampleValue) -> Self {
        Self {
            value_kind,
            align: Align::None,
            fill: ' ',
            width: 0,
            grouping: Grouping::None,
            precision: None,
            type_indicator: TypeIndicator::None,
            sign_mode: SignMode::Default,
            alternate: false,
            literal_prefix: String::new(),
            literal_suffix: String::new(),
            datetime_pattern: None,
            sample_value,
        }
    }

    pub fn int(value: i128) -> Self {
        Self::bare(ValueKind::Int, SampleValue::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::bare(ValueKind::Float, SampleValue::Float(value))
    }

    pub fn string(core: impl Into<String>) -> Self {
        Self::bare(ValueKind::Str, SampleValue::Str(core.into()))
    }

    pub fn datetime(pattern: impl Into<String>, value: NaiveDateTime) -> Self {
        let mut spec = Self::bare(ValueKind::Datetime, SampleValue::Datetime(value));
        spec.datetime_pattern = Some(pattern.into());
        spec
    }

    pub fn wrapped(mut self, prefix: &str, suffix: &str) -> Self {
        self.literal_prefix = prefix.to_string();
        self.literal_suffix = suffix.to_string();
        self
    }

    pub fn aligned(mut self, layout: &Layout) -> Self {
        self.align = layout.align;
        self.fill = layout.fill;
        self.width = layout.width;
        self
    }

    /// Zero-fill flag: `0` fill without explicit alignment.
    pub fn zero_filled(mut self, width: usize) -> Self {
        self.align = Align::None;
        self.fill = '0';
        self.width = width;
        self
    }

    pub fn with_type(mut self, type_indicator: TypeIndicator) -> Self {
        self.type_indicator = type_indicator;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_sign(mut self, sign_mode: SignMode) -> Self {
        self.sign_mode = sign_mode;
        self
    }

    pub fn with_alternate(mut self) -> Self {
        self.alternate = true;
        self
    }
}

/// Alignment detected around a value before it reaches the numeric parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub align: Align,
    pub fill: char,
    pub width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            align: Align::None,
            fill: ' ',
            width: 0,
        }
    }
}

impl Layout {
    /// True when the layout carries something a bare placeholder would not.
    pub fn is_decorated(&self) -> bool {
        self.align.is_set() || self.fill != ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn underscore_grouping_wins_over_comma() {
        assert_eq!(Grouping::from_flags(true, true), Grouping::Underscore);
        assert_eq!(Grouping::from_flags(true, false), Grouping::Comma);
        assert_eq!(Grouping::from_flags(false, false), Grouping::None);
    }
}
