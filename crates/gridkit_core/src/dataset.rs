//! Dataset files: column definitions plus rows, stored as one JSON document.

use crate::constants::DEFAULT_ID_FIELD;
use crate::error::GridError;
use crate::format::CurrencyContext;
use crate::models::{ColumnConfig, Formatter, RowRecord, SelectOption};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_empty_placeholder() -> String {
    "No records found".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub rows: Vec<RowRecord>,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Field whose editable cells open the row detail view instead of editing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_field: Option<String>,
    #[serde(default)]
    pub currency: CurrencyContext,
    #[serde(default = "default_empty_placeholder")]
    pub empty_placeholder: String,
}

impl Dataset {
    pub fn new(columns: Vec<ColumnConfig>, rows: Vec<RowRecord>) -> Self {
        Self {
            columns,
            rows,
            id_field: default_id_field(),
            detail_field: None,
            currency: CurrencyContext::default(),
            empty_placeholder: default_empty_placeholder(),
        }
    }

    /// Reads and validates a dataset file.
    ///
    /// # Errors
    /// I/O and JSON errors, or [`GridError::InvalidConfig`] when validation
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let dataset: Self = serde_json::from_str(&raw)?;
        dataset.validate()?;
        info!(
            path = %path.display(),
            columns = dataset.columns.len(),
            rows = dataset.rows.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Writes the dataset as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GridError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        debug!(path = %path.display(), rows = self.rows.len(), "dataset saved");
        Ok(())
    }

    /// Checks column ids are present and unique and every row has a unique id.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.columns.is_empty() {
            return Err(GridError::InvalidConfig("dataset has no columns".into()));
        }
        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if column.id.trim().is_empty() || column.path.trim().is_empty() {
                return Err(GridError::InvalidConfig(
                    "column id and path must not be blank".into(),
                ));
            }
            if !column_ids.insert(column.id.as_str()) {
                return Err(GridError::InvalidConfig(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }
        let mut row_ids = HashSet::new();
        for (index, row) in self.rows.iter().enumerate() {
            let id = row.id(&self.id_field).ok_or_else(|| {
                GridError::InvalidConfig(format!("row {index} is missing '{}'", self.id_field))
            })?;
            if !row_ids.insert(id) {
                return Err(GridError::InvalidConfig(format!(
                    "duplicate row id at row {index}"
                )));
            }
        }
        Ok(())
    }

    /// Column set shared by the demo dataset and the generator tool.
    pub fn demo_columns() -> Vec<ColumnConfig> {
        vec![
            ColumnConfig::new("name", "name", Formatter::Text)
                .with_header("Account")
                .editable()
                .required()
                .with_size(200.0),
            ColumnConfig::new("owner", "user.name", Formatter::Text)
                .with_header("Owner")
                .in_group("Contact"),
            ColumnConfig::new("email", "user.email", Formatter::Text)
                .with_header("Email")
                .with_size(220.0)
                .in_group("Contact"),
            ColumnConfig::new("amount", "amount", Formatter::Currency)
                .with_header("Amount")
                .editable()
                .with_bounds(Some(0.0), Some(10_000_000.0))
                .in_group("Deal"),
            ColumnConfig::new("stage", "stage", Formatter::Text)
                .with_header("Stage")
                .editable()
                .required()
                .with_options(stage_options())
                .in_group("Deal"),
            ColumnConfig::new("probability", "probability", Formatter::Number)
                .with_header("Probability %")
                .editable()
                .with_bounds(Some(0.0), Some(100.0))
                .in_group("Deal"),
            ColumnConfig::new("close_date", "close_date", Formatter::Datetime)
                .with_header("Close Date")
                .editable()
                .in_group("Deal"),
            ColumnConfig::new("tags", "tags", Formatter::Text)
                .with_header("Tags")
                .editable()
                .multi_select()
                .with_options(tag_options())
                .with_size(220.0),
            ColumnConfig::new("active", "active", Formatter::Boolean)
                .with_header("Active")
                .editable()
                .with_options(vec![
                    SelectOption::new(true, "Yes"),
                    SelectOption::new(false, "No"),
                ]),
            ColumnConfig::new("notes", "notes", Formatter::Text)
                .with_header("Notes")
                .editable()
                .with_placeholder("Add a note")
                .with_size(260.0),
        ]
    }

    /// Small built-in dataset used when no file is configured.
    pub fn demo() -> Self {
        const ACCOUNTS: [&str; 12] = [
            "Acme Corp",
            "Globex",
            "Initech",
            "Umbrella Health",
            "Stark Industries",
            "Wayne Logistics",
            "Hooli",
            "Vandelay Imports",
            "Soylent Foods",
            "Tyrell Systems",
            "Cyberdyne",
            "Wonka Confections",
        ];
        const OWNERS: [(&str, &str); 4] = [
            ("Avery Chen", "avery@example.com"),
            ("Jordan Patel", "jordan@example.com"),
            ("Sam Okafor", "sam@example.com"),
            ("Riley Novak", "riley@example.com"),
        ];
        let stages = stage_options();
        let tags = tag_options();

        let rows = (0..36)
            .map(|i| {
                let (owner, email) = OWNERS[i % OWNERS.len()];
                let stage = &stages[i % stages.len()].value;
                let tag_list: Vec<_> = tags
                    .iter()
                    .enumerate()
                    .filter(|(t, _)| (i + t) % 3 == 0)
                    .map(|(_, option)| option.value.clone())
                    .collect();
                let value = json!({
                    "_id": format!("deal-{:03}", i + 1),
                    "name": format!("{} #{}", ACCOUNTS[i % ACCOUNTS.len()], i / ACCOUNTS.len() + 1),
                    "user": { "name": owner, "email": email },
                    "amount": 2_500 + (i as i64 * 7_919) % 250_000,
                    "stage": stage,
                    "probability": (i * 13) % 101,
                    "close_date": format!("2025-{:02}-{:02}", i % 12 + 1, i % 27 + 1),
                    "tags": tag_list,
                    "active": i % 5 != 0,
                    "notes": if i % 4 == 0 { json!(null) } else { json!(format!("Follow up #{i}")) },
                });
                RowRecord::from_value(value).unwrap_or_default()
            })
            .collect();

        Self {
            detail_field: Some("name".to_string()),
            ..Self::new(Self::demo_columns(), rows)
        }
    }
}

pub fn stage_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("lead", "Lead"),
        SelectOption::new("qualified", "Qualified"),
        SelectOption::new("proposal", "Proposal"),
        SelectOption::new("negotiation", "Negotiation"),
        SelectOption::new("won", "Closed Won"),
        SelectOption::new("lost", "Closed Lost"),
        SelectOption::new("archived", "Archived").disabled(),
    ]
}

pub fn tag_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("enterprise", "Enterprise"),
        SelectOption::new("smb", "SMB"),
        SelectOption::new("renewal", "Renewal"),
        SelectOption::new("upsell", "Upsell"),
        SelectOption::new("partner", "Partner"),
        SelectOption::new("priority", "Priority"),
    ]
}
