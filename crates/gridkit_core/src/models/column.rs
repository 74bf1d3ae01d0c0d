//! Column configuration consumed read-only by the grid and its cells.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared display/edit kind of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    #[default]
    Text,
    Number,
    Currency,
    Boolean,
    Datetime,
}

impl Formatter {
    /// Returns `true` for formatters edited through a numeric input.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency)
    }
}

/// One selectable value/label pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks the option as not selectable.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Optional per-column editor hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Declarative description of one grid column.
///
/// Deserializes from the same keys data sources already emit (`path`,
/// `formatter`, `list_options`, `is_multi_select`, `can_empty`, `meta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: String,
    /// Dot-separated key into a row record.
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub header: String,
    #[serde(default)]
    pub formatter: Formatter,
    #[serde(default)]
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list_options: Vec<SelectOption>,
    #[serde(default)]
    pub is_multi_select: bool,
    /// `Some(false)` marks an editable column as required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_empty: Option<bool>,
    #[serde(default)]
    pub meta: ColumnMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    /// Header group this column sits under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ColumnConfig {
    /// Build a read-only column with no options.
    pub fn new(id: impl Into<String>, path: impl Into<String>, formatter: Formatter) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            header: String::new(),
            formatter,
            editable: false,
            list_options: Vec::new(),
            is_multi_select: false,
            can_empty: None,
            meta: ColumnMeta::default(),
            size: None,
            group: None,
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Marks the column as required (`can_empty = false`).
    pub fn required(mut self) -> Self {
        self.can_empty = Some(false);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.list_options = options;
        self
    }

    pub fn multi_select(mut self) -> Self {
        self.is_multi_select = true;
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.meta.min = min;
        self.meta.max = max;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.meta.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// A field is required when it is editable and explicitly not nullable.
    pub fn is_required(&self) -> bool {
        self.editable && self.can_empty == Some(false)
    }

    /// Empty values may be cleared/committed unless `can_empty` is `false`.
    pub fn allows_empty(&self) -> bool {
        self.can_empty != Some(false)
    }

    pub fn has_options(&self) -> bool {
        !self.list_options.is_empty()
    }

    /// Header text, falling back to the field path.
    pub fn header_label(&self) -> &str {
        if self.header.trim().is_empty() {
            self.path.as_str()
        } else {
            self.header.as_str()
        }
    }

    /// Looks up the label for an option value.
    pub fn option_label(&self, value: &Value) -> Option<&str> {
        self.list_options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_source_configuration_keys() {
        let column: ColumnConfig = serde_json::from_value(json!({
            "id": "stage",
            "path": "deal.stage",
            "formatter": "text",
            "editable": true,
            "can_empty": false,
            "is_multi_select": true,
            "list_options": [
                { "value": "a", "label": "A" },
                { "value": "b", "label": "B", "disabled": true }
            ],
            "meta": { "placeholder": "Pick stages" }
        }))
        .expect("column");

        assert_eq!(column.formatter, Formatter::Text);
        assert!(column.is_required());
        assert!(column.is_multi_select);
        assert_eq!(column.list_options.len(), 2);
        assert!(column.list_options[1].disabled);
        assert_eq!(column.meta.placeholder.as_deref(), Some("Pick stages"));
        assert_eq!(column.header_label(), "deal.stage");
    }

    #[test]
    fn required_needs_editable_and_explicit_false() {
        let read_only = ColumnConfig::new("a", "a", Formatter::Text).required();
        assert!(!read_only.is_required());

        let optional = ColumnConfig::new("b", "b", Formatter::Text).editable();
        assert!(!optional.is_required());
        assert!(optional.allows_empty());

        let required = ColumnConfig::new("c", "c", Formatter::Text)
            .editable()
            .required();
        assert!(required.is_required());
        assert!(!required.allows_empty());
    }

    #[test]
    fn option_label_matches_by_value_equality() {
        let column = ColumnConfig::new("flag", "flag", Formatter::Boolean).with_options(vec![
            SelectOption::new(true, "Active"),
            SelectOption::new(false, "Inactive"),
        ]);
        assert_eq!(column.option_label(&json!(true)), Some("Active"));
        assert_eq!(column.option_label(&json!("true")), None);
    }
}
