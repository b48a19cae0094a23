//! Scalar value coercers: booleans, decimals, colors, and the enumerated
//! string kinds.

use crate::common::error::Result;
use crate::document::properties::Value;
use crate::formatter::registry::ElementKind;
use crate::formatter::{invalid, show};

/// Coerce any truthy/falsy representation to the schema's on/off token.
pub(crate) fn on_off(value: &Value) -> &'static str {
    if value.truthy() { "on" } else { "off" }
}

/// Validate a value against a fixed token set, normalizing synonyms first.
/// The error message enumerates the allowed set.
pub(crate) fn enumerated(
    kind: ElementKind,
    name: &str,
    value: &Value,
    valid: &'static [&'static str],
    synonyms: &[(&str, &str)],
) -> Result<String> {
    let raw = value
        .scalar_string()
        .ok_or_else(|| invalid(kind, name, format!("expects a string, got {}", show(value))))?;
    let token = synonyms
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| to.to_string())
        .unwrap_or(raw);
    if !valid.contains(&token.as_str()) {
        return Err(invalid(
            kind,
            name,
            format!(
                "invalid value \"{}\"; must be one of: {}",
                token,
                valid.join(",")
            ),
        ));
    }
    Ok(token)
}

static ALIGN_VALID: &[&str] = &[
    "both",
    "justify",
    "right",
    "center",
    "distribute",
    "highKashida",
    "lowKashida",
    "mediumKashida",
    "thaiDistribute",
];

/// Justification (`jc`). `justify` is a synonym for `both`.
pub(crate) fn align(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    enumerated(kind, name, value, ALIGN_VALID, &[("justify", "both")])
}

static LAYOUT_VALID: &[&str] = &["autofit", "fixed"];

/// Table layout algorithm (`tblLayout`). `auto` is a synonym for
/// `autofit`.
pub(crate) fn table_layout(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    enumerated(kind, name, value, LAYOUT_VALID, &[("auto", "autofit")])
}

static TEXT_VALIGN_VALID: &[&str] = &["auto", "baseline", "bottom", "center", "top"];

/// Paragraph vertical text alignment (`textAlignment`).
pub(crate) fn text_valign(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    enumerated(kind, name, value, TEXT_VALIGN_VALID, &[])
}

static CELL_VALIGN_VALID: &[&str] = &["top", "center", "both", "bottom"];

/// Cell vertical alignment (`vAlign`).
pub(crate) fn cell_valign(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    enumerated(kind, name, value, CELL_VALIGN_VALID, &[])
}

static DIRECTION_VALID: &[&str] = &["lrTb", "tbRl", "btLr", "lrTbV", "tbRlV", "tbLrV"];

/// Text flow direction (`textDirection`).
pub(crate) fn direction(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    enumerated(kind, name, value, DIRECTION_VALID, &[])
}

static TEXTWRAP_VALID: &[&str] = &[
    "none",
    "allLines",
    "firstAndLastLine",
    "firstLineOnly",
    "lastLineOnly",
];

/// Textbox tight wrap (`textboxTightWrap`).
pub(crate) fn text_wrap(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    enumerated(kind, name, value, TEXTWRAP_VALID, &[])
}

static UNDERLINE_VALID: &[&str] = &[
    "single",
    "double",
    "thick",
    "dotted",
    "dash",
    "dotDash",
    "dotDotDash",
    "wave",
    "none",
];

/// Underline pattern (`u`). A bare truthy value means `single`.
pub(crate) fn underline(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    if let Value::Bool(_) = value {
        return Ok(if value.truthy() { "single" } else { "none" }.to_string());
    }
    enumerated(kind, name, value, UNDERLINE_VALID, &[])
}

static MERGE_VALID: &[&str] = &["restart", "continue"];

/// Cell merge flag (`hMerge`/`vMerge`). A bare boolean selects `continue`
/// (truthy) or `restart` (falsy).
pub(crate) fn merge(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    if let Value::Bool(_) = value {
        return Ok(if value.truthy() { "continue" } else { "restart" }.to_string());
    }
    enumerated(kind, name, value, MERGE_VALID, &[])
}

/// Integer coercion; integral floats and integral strings are accepted.
pub(crate) fn decimal(kind: ElementKind, name: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| invalid(kind, name, format!("expects an integer, got {}", show(value))))
}

/// Hex RGB color or `auto`. Three-digit shorthand is expanded; output is
/// uppercased without a leading `#`.
pub(crate) fn color(kind: ElementKind, name: &str, value: &Value) -> Result<String> {
    let raw = value
        .scalar_string()
        .ok_or_else(|| invalid(kind, name, format!("expects a color, got {}", show(value))))?;
    if raw == "auto" {
        return Ok(raw);
    }
    let hex = raw.strip_prefix('#').unwrap_or(&raw);
    let expanded = match hex.len() {
        3 => hex
            .chars()
            .flat_map(|c| [c, c])
            .collect::<String>(),
        6 => hex.to_string(),
        _ => {
            return Err(invalid(
                kind,
                name,
                format!("\"{}\" is not a hex RGB color or \"auto\"", raw),
            ));
        },
    };
    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(
            kind,
            name,
            format!("\"{}\" is not a hex RGB color or \"auto\"", raw),
        ));
    }
    Ok(expanded.to_ascii_uppercase())
}
