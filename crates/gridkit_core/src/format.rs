//! Read-mode display formatting for cell values.

use crate::constants::DEFAULT_CURRENCY;
use crate::models::{value_to_text, ColumnConfig, Formatter};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency used to render `currency` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyContext {
    pub currency: String,
    /// Symbol override for codes without a built-in symbol.
    #[serde(
        default,
        rename = "currencySymbol",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_symbol: Option<String>,
}

impl Default for CurrencyContext {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl CurrencyContext {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into().to_ascii_uppercase(),
            currency_symbol: None,
        }
    }

    fn symbol_and_decimals(&self) -> (String, usize) {
        let known = match self.currency.as_str() {
            "USD" => Some(("$", 2)),
            "EUR" => Some(("€", 2)),
            "GBP" => Some(("£", 2)),
            "INR" => Some(("₹", 2)),
            "JPY" => Some(("¥", 0)),
            "KRW" => Some(("₩", 0)),
            "CAD" => Some(("CA$", 2)),
            "AUD" => Some(("A$", 2)),
            "CNY" => Some(("CN¥", 2)),
            "CHF" => Some(("CHF ", 2)),
            _ => None,
        };
        match known {
            Some((symbol, decimals)) => (symbol.to_string(), decimals),
            None => {
                let symbol = self
                    .currency_symbol
                    .clone()
                    .unwrap_or_else(|| format!("{} ", self.currency));
                (symbol, 2)
            }
        }
    }
}

/// Renders `value` for read mode according to the column's formatter.
///
/// # Arguments
/// - `value`: committed cell value (`Null` renders empty).
/// - `column`: formatter, options, and multi-select flag.
/// - `currency`: currency used by `currency` columns.
///
/// # Returns
/// Display text. Values the formatter cannot interpret render raw.
pub fn format_display(value: &Value, column: &ColumnConfig, currency: &CurrencyContext) -> String {
    if value.is_null() {
        return String::new();
    }
    match column.formatter {
        Formatter::Currency => match numeric(value) {
            Some(amount) => format_currency(amount, currency),
            None => value_to_text(value),
        },
        Formatter::Number => match numeric(value) {
            Some(amount) => format_number(amount),
            None => value_to_text(value),
        },
        Formatter::Datetime => format_long_date(value).unwrap_or_else(|| value_to_text(value)),
        Formatter::Boolean => match column.option_label(value) {
            Some(label) => label.to_string(),
            None if truthy(value) => "Yes".to_string(),
            None => "No".to_string(),
        },
        Formatter::Text if column.has_options() => option_labels(value, column),
        Formatter::Text => value_to_text(value),
    }
}

fn option_labels(value: &Value, column: &ColumnConfig) -> String {
    let label_for = |item: &Value| {
        column
            .option_label(item)
            .map(str::to_string)
            .unwrap_or_else(|| value_to_text(item))
    };
    match value {
        Value::Array(items) => items.iter().map(label_for).collect::<Vec<_>>().join(", "),
        single => label_for(single),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "false" | "0" | "no" => false,
            other => !other.is_empty(),
        },
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// en-US currency rendering, e.g. `$1,234.50` or `-¥1,235`.
pub fn format_currency(amount: f64, currency: &CurrencyContext) -> String {
    let (symbol, decimals) = currency.symbol_and_decimals();
    let body = fixed_grouped(amount.abs(), decimals);
    if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Grouped number with at most three fraction digits, e.g. `1,234.568`.
pub fn format_number(amount: f64) -> String {
    let mut body = fixed_grouped(amount.abs(), 3);
    if body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }
    if amount < 0.0 && body != "0" {
        format!("-{body}")
    } else {
        body
    }
}

/// Formats a count with thousands separators.
pub fn format_count(count: usize) -> String {
    group_digits(&count.to_string())
}

fn fixed_grouped(amount: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, amount);
    match fixed.split_once('.') {
        Some((whole, fraction)) => format!("{}.{}", group_digits(whole), fraction),
        None => group_digits(&fixed),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses the date forms a data source may hand us.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps,
/// `YYYY-MM-DD`, and epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.date_naive());
            }
            for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(parsed) = NaiveDateTime::parse_from_str(text, pattern) {
                    return Some(parsed.date());
                }
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|parsed| parsed.date_naive()),
        _ => None,
    }
}

/// Long date text such as `January 5, 2024`.
pub fn format_long_date(value: &Value) -> Option<String> {
    parse_date(value).map(|date| date.format("%B %-d, %Y").to_string())
}
