//! Expression builder: StructuredSpec -> substitution expression text.
//!
//! Output shape: `prefix + "{" + placeholder + (":" + spec)? + "}" + suffix`.

use crate::spec::format::{Grouping, SignMode, StructuredSpec, TypeIndicator, ValueKind};

pub const DEFAULT_PLACEHOLDER: &str = "variable";

/// Render with the default placeholder name.
pub fn render(spec: &StructuredSpec) -> String {
    render_with(spec, DEFAULT_PLACEHOLDER)
}

pub fn render_with(spec: &StructuredSpec, placeholder: &str) -> String {
    let inner = match spec.value_kind {
        ValueKind::Datetime => spec.datetime_pattern.clone().unwrap_or_default(),
        _ => inner_spec(spec),
    };

    let mut out = String::with_capacity(
        spec.literal_prefix.len() + placeholder.len() + inner.len() + spec.literal_suffix.len() + 3,
    );
    out.push_str(&spec.literal_prefix);
    out.push('{');
    out.push_str(placeholder);
    if !inner.is_empty() {
        out.push(':');
        out.push_str(&inner);
    }
    out.push('}');
    out.push_str(&spec.literal_suffix);
    out
}

fn inner_spec(spec: &StructuredSpec) -> String {
    let fill = if spec.fill == ' ' {
        String::new()
    } else {
        spec.fill.to_string()
    };

    let mut sign = String::new();
    if spec.sign_mode == SignMode::AlwaysPlus {
        sign.push('+');
    }
    if spec.alternate {
        sign.push('#');
    }

    let width = if spec.width > 0 {
        spec.width.to_string()
    } else {
        String::new()
    };

    let precision = spec
        .precision
        .map(|p| format!(".{p}"))
        .unwrap_or_default();

    // A grouped integer without a width renders the same with or without `d`.
    let type_indicator = if spec.type_indicator == TypeIndicator::DecimalInt
        && spec.grouping != Grouping::None
        && spec.width == 0
    {
        TypeIndicator::None
    } else {
        spec.type_indicator
    };

    let tail = format!(
        "{width}{}{precision}{}",
        spec.grouping.marker(),
        type_indicator.marker()
    );

    if spec.align.is_set() {
        format!("{fill}{}{sign}{tail}", spec.align.marker())
    } else {
        // Without alignment the fill can only be the zero flag, which follows the sign.
        format!("{sign}{fill}{tail}")
    }
}

/// Split a rendered expression back into `(prefix, inner spec, suffix)`.
///
/// The first `{placeholder` opens the substitution; the next `}` closes it.
pub fn unwrap_placeholder<'a>(text: &'a str, placeholder: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let open = format!("{{{placeholder}");
    let start = text.find(&open)?;
    let body_start = start + open.len();
    let close = body_start + text[body_start..].find('}')?;
    let body = &text[body_start..close];
    let inner = match body.strip_prefix(':') {
        Some(rest) => rest,
        None if body.is_empty() => "",
        None => return None,
    };
    Some((&text[..start], inner, &text[close + 1..]))
}
