//! Protocol types for the grid's save worker.

use gridkit_core::{RowRecord, SaveRequest};
use serde_json::Value;

/// Commands issued by the UI thread for the save worker to execute.
#[derive(Debug)]
pub enum GridCmd {
    /// Fetch a snapshot of every row in the store.
    ListRows,
    /// Persist one committed cell edit.
    SaveCell {
        row_id: Option<String>,
        column_id: String,
        field_path: String,
        value: Value,
    },
}

impl GridCmd {
    /// Builds a `SaveCell` command from a cell's save request.
    pub fn save_cell(request: &SaveRequest) -> Self {
        Self::SaveCell {
            row_id: request.row_id.clone(),
            column_id: request.column_id.clone(),
            field_path: request.field_path.clone(),
            value: request.value.clone(),
        }
    }
}

/// Events produced by the save worker and polled by the UI thread.
#[derive(Debug)]
pub enum GridEvent {
    /// Response containing the current row snapshot.
    RowsLoaded { rows: Vec<RowRecord> },
    /// The edit was persisted; `row` is the stored record afterwards.
    CellSaved {
        row_id: String,
        column_id: String,
        field_path: String,
        value: Value,
        row: RowRecord,
    },
    /// The edit was rejected and the cell should revert.
    SaveFailed {
        row_id: Option<String>,
        column_id: String,
        field_path: String,
        message: String,
    },
}
