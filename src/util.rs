//! Shared helpers for turning loosely-typed request values into SQL text.
//!
//! Request bodies are taken as raw JSON and spliced into queries the way a
//! template string would print them. Nothing here escapes anything.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Field deserializer that keeps an explicit `null` as `Some(Value::Null)`.
///
/// Pair with `#[serde(default)]` so only an absent field is `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text a value produces when spliced into a query.
///
/// Strings print without quotes, numbers and booleans in their JSON form,
/// `null` as `null`, and a missing field as `undefined`.
pub fn splice(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => splice(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Same as [`splice`] for a value that is always present (nulls included).
pub fn splice_value(value: &Value) -> String {
    splice(Some(value))
}

/// Truthiness of a request value: false for missing, `null`, `false`,
/// `0`, `NaN` and the empty string.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Lenient float parsing: the longest numeric prefix of the text, or NaN.
///
/// `"12.5abc"` is 12.5, `" 3"` is 3, `"abc"` and `null` are NaN.
pub fn parse_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_float_prefix(s),
        Some(Value::Array(items)) if items.len() == 1 => parse_float(items.first()),
        _ => f64::NAN,
    }
}

fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    for prefix in ["Infinity", "+Infinity"] {
        if text.starts_with(prefix) {
            return f64::INFINITY;
        }
    }
    if text.starts_with("-Infinity") {
        return f64::NEG_INFINITY;
    }

    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut valid_end = 0;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                valid_end = end + 1;
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                if end + 1 < bytes.len() && (bytes[end + 1] == b'+' || bytes[end + 1] == b'-') {
                    end += 1;
                }
            }
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return f64::NAN;
    }
    text[..valid_end].parse().unwrap_or(f64::NAN)
}

/// Print a number the way it would appear in text: whole values lose
/// their fraction (`20.0` prints `20`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
