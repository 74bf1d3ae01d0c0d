//! Required-field validation and value coercion applied on commit.

use crate::error::ValidationError;
use crate::models::{is_empty_value, number_value, value_to_text, ColumnConfig};
use serde_json::Value;

/// Checks the required-field rule.
///
/// # Errors
/// Returns [`ValidationError::Required`] when the column is required and
/// `value` is empty.
pub fn validate(column: &ColumnConfig, value: &Value) -> Result<(), ValidationError> {
    if column.is_required() && is_empty_value(value) {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Normalizes a draft before it is handed to the save path.
///
/// Empty drafts on optional columns become `Null`; numeric drafts are parsed
/// leniently and fall back to `0`.
pub fn coerce_for_save(column: &ColumnConfig, draft: Value) -> Value {
    if is_empty_value(&draft) {
        return if column.allows_empty() {
            Value::Null
        } else {
            draft
        };
    }
    if !column.formatter.is_numeric() {
        return draft;
    }
    let parsed = match &draft {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_float_prefix(text),
        _ => None,
    };
    number_value(parsed.filter(|n| n.is_finite()).unwrap_or(0.0))
}

/// Live clamping for numeric inputs.
///
/// Input that does not start with a number is returned unchanged so the user
/// can keep typing.
pub fn clamp_numeric_input(input: &str, min: Option<f64>, max: Option<f64>) -> String {
    if input.is_empty() {
        return String::new();
    }
    let Some(parsed) = parse_float_prefix(input) else {
        return input.to_string();
    };
    match (min, max) {
        (Some(min), _) if parsed < min => value_to_text(&number_value(min)),
        (_, Some(max)) if parsed > max => value_to_text(&number_value(max)),
        _ => input.to_string(),
    }
}

/// Parses the longest leading decimal literal of `input`.
///
/// Leading whitespace is skipped; trailing garbage is ignored
/// (`"12.5kg"` is `12.5`).
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().ok()
}
