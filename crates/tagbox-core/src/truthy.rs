//! Presence test used by [`TagBox::has`](crate::TagBox::has).
//!
//! A stored value only counts as present when it is truthy and does not
//! loosely equal `false`. That rules out `null`, `false`, `0`, `""`, and
//! also values that coerce to zero such as `"0"`, `" "`, `[]` or `[0]`.

use serde_json::Value;

/// Returns `true` if `value` counts as present.
pub fn is_present(value: &Value) -> bool {
    is_truthy(value) && !loosely_false(value)
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Loose equality with `false`: both sides are coerced to a number.
fn loosely_false(value: &Value) -> bool {
    match value {
        Value::Null | Value::Object(_) => false,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => numeric(s) == Some(0.0),
        Value::Array(items) => numeric(&join(items)) == Some(0.0),
    }
}

/// String to number coercion: surrounding whitespace (including U+FEFF) is
/// ignored, and unsigned `0x`, `0o` and `0b` literals are read in their radix.
fn numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let radix = match trimmed.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_literal(&trimmed[2..], radix);
    }
    trimmed.parse::<f64>().ok()
}

fn radix_literal(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// String form of an array: elements joined with `,`, `null` as empty.
fn join(items: &[Value]) -> String {
    items
        .iter()
        .map(|v| match v {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(inner) => join(inner),
            Value::Object(_) => "[object Object]".to_owned(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
