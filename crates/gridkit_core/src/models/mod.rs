//! Data models shared by the grid, cells, and datasets.

/// Column configuration, formatters, and select options.
pub mod column;
/// Open-ended row records with dot-path access.
pub mod row;

pub use column::{ColumnConfig, ColumnMeta, Formatter, SelectOption};
pub use row::RowRecord;

use serde_json::Value;

/// Returns `true` for values the grid treats as "empty".
///
/// Null, the empty string, and the empty list are empty; `false` and `0` are
/// not.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Renders a JSON value as plain text the way a loosely typed UI would.
///
/// Whole floats drop their fractional part, arrays join with commas, and null
/// renders empty.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => float_to_text(float),
            _ => number.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn float_to_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Builds a JSON number, preferring an integer when the value is whole.
///
/// Non-finite input collapses to `0`.
pub fn number_value(value: f64) -> Value {
    if !value.is_finite() {
        return Value::from(0);
    }
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values_cover_null_blank_string_and_empty_list() {
        assert!(is_empty_value(&Value::Null));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!(" ")));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
    }

    #[test]
    fn value_to_text_matches_loose_string_conversion() {
        assert_eq!(value_to_text(&json!(12.0)), "12");
        assert_eq!(value_to_text(&json!(12.5)), "12.5");
        assert_eq!(value_to_text(&json!(["a", "b"])), "a,b");
        assert_eq!(value_to_text(&Value::Null), "");
        assert_eq!(value_to_text(&json!(true)), "true");
    }

    #[test]
    fn number_value_prefers_integers() {
        assert_eq!(number_value(100.0), json!(100));
        assert_eq!(number_value(2.5), json!(2.5));
        assert_eq!(number_value(f64::NAN), json!(0));
    }
}
