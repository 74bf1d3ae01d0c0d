//! Single-column sorting.

use crate::models::value_to_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Next sort state when a header is clicked: ascending, descending, unsorted.
pub fn next_sort(current: Option<&SortState>, column_id: &str) -> Option<SortState> {
    let direction = match current {
        Some(state) if state.column_id == column_id => match state.direction {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => return None,
        },
        _ => SortDirection::Asc,
    };
    Some(SortState {
        column_id: column_id.to_string(),
        direction,
    })
}

/// Orders two cell values for `direction`; missing values always sort last.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let ordering = match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => value_to_text(a)
            .to_lowercase()
            .cmp(&value_to_text(b).to_lowercase()),
    };
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn toggle_cycles_asc_desc_none() {
        let asc = next_sort(None, "amount").expect("asc");
        assert_eq!(asc.direction, SortDirection::Asc);
        let desc = next_sort(Some(&asc), "amount").expect("desc");
        assert_eq!(desc.direction, SortDirection::Desc);
        assert_eq!(next_sort(Some(&desc), "amount"), None);

        let other = next_sort(Some(&desc), "name").expect("new column");
        assert_eq!(other.direction, SortDirection::Asc);
    }

    #[test]
    fn numbers_compare_numerically_and_strings_ignore_case() {
        assert_eq!(
            compare_values(&json!(9), &json!(10), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&json!("apple"), &json!("Banana"), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&json!("apple"), &json!("Banana"), SortDirection::Desc),
            Ordering::Greater
        );
    }

    #[test]
    fn nulls_sort_last_in_both_directions() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(
                compare_values(&Value::Null, &json!(1), direction),
                Ordering::Greater
            );
        }
    }
}
