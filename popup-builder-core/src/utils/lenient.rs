//! Loose value coercions for request bodies and query strings.
//!
//! Clients of the popup API send loosely typed JSON; these helpers decide
//! which values count as present, truthy or numeric.

use serde_json::Value;

/// Parse the leading integer of a string, ignoring trailing garbage.
///
/// `" 42px"` gives `Some(42)`, `"abc"` gives `None`.
#[must_use]
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Trimmed string content, or `None` when the value is not a string or is blank.
#[must_use]
pub fn non_blank_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// JavaScript-style truthiness.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The value when it is a JSON boolean.
#[must_use]
pub fn strict_bool(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

/// The value when it is a JSON number, truncated towards zero.
#[must_use]
pub fn strict_int(value: Option<&Value>) -> Option<i32> {
    let value = value?;
    if let Some(i) = value.as_i64() {
        return i32::try_from(i).ok();
    }
    value.as_f64().and_then(f64_to_i32)
}

/// Integer from a number or a numeric-prefixed string.
#[must_use]
pub fn int_like(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n.as_f64().and_then(f64_to_i32),
        },
        Value::String(s) => parse_int_prefix(s).and_then(|i| i32::try_from(i).ok()),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn f64_to_i32(f: f64) -> Option<i32> {
    let t = f.trunc();
    if t.is_finite() && t >= f64::from(i32::MIN) && t <= f64::from(i32::MAX) {
        Some(t as i32)
    } else {
        None
    }
}
