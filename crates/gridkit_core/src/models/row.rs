//! Row records: open-ended JSON objects owned by the caller's data source.

use crate::models::value_to_text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data entity rendered as a grid row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(Map<String, Value>);

impl RowRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON object; returns `None` for any other JSON kind.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Resolves a dot-separated path through nested objects.
    ///
    /// # Returns
    /// `None` when any segment is missing or an intermediate value is not an
    /// object.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Value at `path`, with missing fields reported as `Null`.
    pub fn value_at(&self, path: &str) -> Value {
        self.get_path(path).cloned().unwrap_or(Value::Null)
    }

    /// Writes `value` at `path`, creating intermediate objects as needed.
    ///
    /// Writing `Null` removes the leaf key so "no value" stays distinct from an
    /// empty string.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return;
        };
        let mut current = &mut self.0;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            let Value::Object(next) = entry else {
                return;
            };
            current = next;
        }
        if value.is_null() {
            current.remove(*leaf);
        } else {
            current.insert(leaf.to_string(), value);
        }
    }

    /// Identity of the row under `id_field`, rendered as text.
    pub fn id(&self, id_field: &str) -> Option<String> {
        match self.get_path(id_field)? {
            Value::Null => None,
            value => Some(value_to_text(value)),
        }
    }
}

impl From<Map<String, Value>> for RowRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RowRecord {
        RowRecord::from_value(json!({
            "_id": 42,
            "name": "Acme",
            "owner": { "name": "Dana", "address": { "city": "Oslo" } }
        }))
        .expect("object row")
    }

    #[test]
    fn get_path_walks_nested_objects() {
        let row = sample();
        assert_eq!(row.get_path("owner.address.city"), Some(&json!("Oslo")));
        assert_eq!(row.get_path("owner.missing"), None);
        assert_eq!(row.get_path("name.first"), None);
        assert_eq!(row.value_at("nope"), Value::Null);
    }

    #[test]
    fn set_path_creates_parents_and_null_removes_leaf() {
        let mut row = sample();
        row.set_path("deal.amount", json!(1200));
        assert_eq!(row.get_path("deal.amount"), Some(&json!(1200)));

        row.set_path("owner.name", Value::Null);
        assert_eq!(row.get_path("owner.name"), None);
        assert!(row.get_path("owner.address").is_some());
    }

    #[test]
    fn id_renders_numbers_and_strings() {
        assert_eq!(sample().id("_id").as_deref(), Some("42"));
        let row = RowRecord::from_value(json!({ "id": "r-1" })).expect("row");
        assert_eq!(row.id("id").as_deref(), Some("r-1"));
        assert_eq!(row.id("_id"), None);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(RowRecord::from_value(json!([1, 2])).is_none());
    }
}
