//! Row filtering: fuzzy ranking for column/global filters and the raw JSON
//! substring search.

use crate::models::{value_to_text, ColumnConfig, RowRecord};
use serde_json::Value;

/// Fuzzy match tier, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    CaseSensitiveEqual,
    Equal,
    StartsWith,
    WordStartsWith,
    Contains,
    Acronym,
    /// Every query character appears in order.
    Matches,
    NoMatch,
}

impl Rank {
    pub fn passed(self) -> bool {
        self != Self::NoMatch
    }
}

/// Ranks how well `item` matches `query`.
///
/// Comparison is case-insensitive except for the top tier. Queries longer
/// than the item never match, and single-character queries only match as a
/// substring.
pub fn rank_item(item: &str, query: &str) -> Rank {
    if query.chars().count() > item.chars().count() {
        return Rank::NoMatch;
    }
    if item == query {
        return Rank::CaseSensitiveEqual;
    }
    let item_lower = item.to_lowercase();
    let query_lower = query.to_lowercase();
    if item_lower == query_lower {
        return Rank::Equal;
    }
    if item_lower.starts_with(&query_lower) {
        return Rank::StartsWith;
    }
    if item_lower.contains(&format!(" {query_lower}")) {
        return Rank::WordStartsWith;
    }
    if item_lower.contains(&query_lower) {
        return Rank::Contains;
    }
    if query_lower.chars().count() == 1 {
        return Rank::NoMatch;
    }
    if acronym(&item_lower).contains(&query_lower) {
        return Rank::Acronym;
    }
    if is_subsequence(&item_lower, &query_lower) {
        Rank::Matches
    } else {
        Rank::NoMatch
    }
}

fn acronym(text: &str) -> String {
    text.split([' ', '-'])
        .filter_map(|word| word.chars().next())
        .collect()
}

fn is_subsequence(haystack: &str, needle: &str) -> bool {
    let mut remaining = haystack.chars();
    needle
        .chars()
        .all(|wanted| remaining.by_ref().any(|ch| ch == wanted))
}

/// Raw value at the column path rendered as text, for per-column filters.
pub fn raw_cell_text(row: &RowRecord, column: &ColumnConfig) -> String {
    value_to_text(&row.value_at(&column.path))
}

/// Text a column contributes to the global filter: option labels when the
/// column has options, otherwise the raw value rendered as text.
pub fn cell_text(row: &RowRecord, column: &ColumnConfig) -> String {
    let value = row.value_at(&column.path);
    if !column.has_options() {
        return value_to_text(&value);
    }
    let label = |item: &Value| {
        column
            .option_label(item)
            .map(str::to_string)
            .unwrap_or_else(|| value_to_text(item))
    };
    match &value {
        Value::Array(items) => items.iter().map(label).collect::<Vec<_>>().join(", "),
        other => label(other),
    }
}

/// Case-insensitive substring match against the row serialized as JSON.
///
/// Rows that carry both a `user` object and an `is_active` key are matched
/// against the serialized `user` object only. A blank term matches
/// everything.
pub fn global_search_matches(row: &RowRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let map = row.as_map();
    let user = map.get("user").filter(|user| truthy(user));
    let haystack = match user {
        Some(user) if map.contains_key("is_active") => serde_json::to_string(user),
        _ => serde_json::to_string(map),
    }
    .unwrap_or_default()
    .to_lowercase();
    haystack.contains(&term.to_lowercase())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Formatter, SelectOption};
    use serde_json::json;

    #[test]
    fn rank_tiers_are_ordered() {
        assert_eq!(rank_item("Acme", "Acme"), Rank::CaseSensitiveEqual);
        assert_eq!(rank_item("Acme", "acme"), Rank::Equal);
        assert_eq!(rank_item("Acme Corp", "acm"), Rank::StartsWith);
        assert_eq!(rank_item("Big Acme", "acm"), Rank::WordStartsWith);
        assert_eq!(rank_item("Bigacme", "acm"), Rank::Contains);
        assert_eq!(rank_item("North-west Trading", "nwt"), Rank::Acronym);
        assert_eq!(rank_item("Globex", "gbx"), Rank::Matches);
        assert_eq!(rank_item("Globex", "xg"), Rank::NoMatch);
        assert_eq!(rank_item("ab", "abc"), Rank::NoMatch);
        assert_eq!(rank_item("Globex", "z"), Rank::NoMatch);
        assert!(Rank::Matches < Rank::NoMatch);
        assert!(Rank::Matches.passed());
    }

    #[test]
    fn global_search_uses_user_object_for_user_rows() {
        let user_row = RowRecord::from_value(json!({
            "user": { "name": "Dana" },
            "is_active": true,
            "role": "admin"
        }))
        .expect("row");
        assert!(global_search_matches(&user_row, "dana"));
        assert!(!global_search_matches(&user_row, "admin"));

        let plain = RowRecord::from_value(json!({ "user": { "name": "Dana" }, "role": "admin" }))
            .expect("row");
        assert!(global_search_matches(&plain, "ADMIN"));
        assert!(global_search_matches(&plain, ""));
    }

    #[test]
    fn cell_text_maps_option_labels() {
        let column = ColumnConfig::new("stage", "stage", Formatter::Text)
            .with_options(vec![SelectOption::new("won", "Closed Won")]);
        let row = RowRecord::from_value(json!({ "stage": "won" })).expect("row");
        assert_eq!(cell_text(&row, &column), "Closed Won");
    }
}
