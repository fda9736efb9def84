//! Loose comparison helpers shared by conditions and response validation.

use serde_json::Value as JsonValue;

/// Text form used for `equals` / `notEquals` and for splicing values into strings.
pub fn loose_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Numeric reading of a value. Strings use their leading numeric prefix, so `"12px"` is 12.
pub fn loose_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_leading_float(s),
        _ => None,
    }
}

pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let value = f64::INFINITY;
        return Some(if s.starts_with('-') { -value } else { value });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl NumericOp {
    pub fn apply(self, actual: f64, expected: f64) -> bool {
        match self {
            NumericOp::GreaterThan => actual > expected,
            NumericOp::LessThan => actual < expected,
            NumericOp::GreaterThanOrEqual => actual >= expected,
            NumericOp::LessThanOrEqual => actual <= expected,
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            NumericOp::GreaterThan => "greater than",
            NumericOp::LessThan => "less than",
            NumericOp::GreaterThanOrEqual => "greater than or equal to",
            NumericOp::LessThanOrEqual => "less than or equal to",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_string_forms() {
        assert_eq!(loose_string(&json!("abc")), "abc");
        assert_eq!(loose_string(&json!(200)), "200");
        assert_eq!(loose_string(&json!(200.0)), "200");
        assert_eq!(loose_string(&json!(1.5)), "1.5");
        assert_eq!(loose_string(&json!(true)), "true");
        assert_eq!(loose_string(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn leading_float_prefix() {
        assert_eq!(parse_leading_float("42"), Some(42.0));
        assert_eq!(parse_leading_float("  -3.5kg"), Some(-3.5));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float(""), None);
    }

    #[test]
    fn numbers_from_values() {
        assert_eq!(loose_number(&json!(7)), Some(7.0));
        assert_eq!(loose_number(&json!("7 items")), Some(7.0));
        assert_eq!(loose_number(&json!(true)), None);
        assert_eq!(loose_number(&json!(null)), None);
    }
}
