//! The save seam between a cell and whatever persists its values.

use crate::error::SaveError;
use crate::models::RowRecord;
use serde_json::Value;

/// One committed edit, ready for persistence.
///
/// `row` is the record as it was when editing started.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub row_id: Option<String>,
    pub field_path: String,
    /// Coerced value; `Null` means "no value".
    pub value: Value,
    pub row: RowRecord,
    pub column_id: String,
}

/// Synchronous persistence hook.
///
/// Front ends that persist asynchronously can ship the request elsewhere and
/// return `Ok(())`; errors reported later go through
/// [`EditableCell::save_failed`](crate::cell::EditableCell::save_failed).
pub trait SaveSink {
    /// Persists one edit.
    ///
    /// # Errors
    /// Returns a [`SaveError`] when the edit was rejected.
    fn save(&self, request: SaveRequest) -> Result<(), SaveError>;
}

impl<F> SaveSink for F
where
    F: Fn(SaveRequest) -> Result<(), SaveError>,
{
    fn save(&self, request: SaveRequest) -> Result<(), SaveError> {
        self(request)
    }
}
