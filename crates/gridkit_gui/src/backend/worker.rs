//! Background worker thread that owns the row store and persists cell edits.

use crate::backend::{GridCmd, GridEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use gridkit_core::{Dataset, GridConfig, GridError, RowRecord};
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Handle for sending commands to, and receiving events from, the save worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<GridCmd>,
    pub evt_rx: Receiver<GridEvent>,
}

impl BackendHandle {
    #[cfg(test)]
    pub(crate) fn from_test_channels(cmd_tx: Sender<GridCmd>, evt_rx: Receiver<GridEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// In-memory rows indexed by id, backed by the dataset they came from.
#[derive(Debug, Clone)]
pub struct RowStore {
    dataset: Dataset,
    index: HashMap<String, usize>,
}

impl RowStore {
    pub fn new(dataset: Dataset) -> Self {
        let index = dataset
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.id(&dataset.id_field).map(|id| (id, i)))
            .collect();
        Self { dataset, index }
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.dataset.rows
    }

    pub fn row(&self, row_id: &str) -> Option<&RowRecord> {
        self.index.get(row_id).map(|&i| &self.dataset.rows[i])
    }

    /// Writes `value` at `path` in the row identified by `row_id`.
    ///
    /// # Returns
    /// The updated row.
    ///
    /// # Errors
    /// [`GridError::UnknownRow`] when the store has no such row.
    pub fn apply(&mut self, row_id: &str, path: &str, value: Value) -> Result<RowRecord, GridError> {
        let index = *self
            .index
            .get(row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        let row = &mut self.dataset.rows[index];
        row.set_path(path, value);
        Ok(row.clone())
    }

    fn persist(&self, path: &Path) -> Result<(), GridError> {
        self.dataset.save(path)
    }
}

/// Knobs for the worker; latency and failure rate exist for manual testing.
#[derive(Debug, Clone, Default)]
pub struct WorkerSettings {
    pub latency: Duration,
    /// Percentage of saves rejected on purpose (0-100).
    pub failure_rate: u8,
    /// Dataset file rewritten after every successful save.
    pub persist_path: Option<PathBuf>,
}

impl WorkerSettings {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.save_latency_ms),
            failure_rate: config.save_failure_rate.min(100),
            persist_path: config.dataset_path.as_ref().map(PathBuf::from),
        }
    }
}

/// Spawn the worker thread that owns the row store.
///
/// Saves never block the UI thread; the worker replies with [`GridEvent`]
/// values that are polled each frame. Commands are handled in FIFO order.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(store: RowStore, settings: WorkerSettings) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("gridkit-save-worker".to_string())
        .spawn(move || {
            let mut store = store;
            info!(
                rows = store.rows().len(),
                latency_ms = settings.latency.as_millis() as u64,
                failure_rate = settings.failure_rate,
                "save worker started"
            );
            for cmd in cmd_rx.iter() {
                match cmd {
                    GridCmd::ListRows => {
                        let _ = evt_tx.send(GridEvent::RowsLoaded {
                            rows: store.rows().to_vec(),
                        });
                    }
                    GridCmd::SaveCell {
                        row_id,
                        column_id,
                        field_path,
                        value,
                    } => {
                        let event =
                            handle_save(&mut store, &settings, row_id, column_id, field_path, value);
                        let _ = evt_tx.send(event);
                    }
                }
            }
            debug!("save worker channel closed");
        })
        .expect("spawn save worker thread");

    BackendHandle { cmd_tx, evt_rx }
}

fn handle_save(
    store: &mut RowStore,
    settings: &WorkerSettings,
    row_id: Option<String>,
    column_id: String,
    field_path: String,
    value: Value,
) -> GridEvent {
    if !settings.latency.is_zero() {
        thread::sleep(settings.latency);
    }

    let failed = |message: String| GridEvent::SaveFailed {
        row_id: row_id.clone(),
        column_id: column_id.clone(),
        field_path: field_path.clone(),
        message,
    };

    if settings.failure_rate > 0 && rand::thread_rng().gen_range(0..100) < settings.failure_rate {
        warn!(column = %column_id, "simulated save failure");
        return failed("Save rejected (simulated failure)".to_string());
    }
    let Some(id) = row_id.as_deref() else {
        warn!(column = %column_id, "save without row id");
        return failed("Row has no id".to_string());
    };

    let previous = store
        .row(id)
        .map(|row| row.value_at(&field_path))
        .unwrap_or(Value::Null);
    let row = match store.apply(id, &field_path, value.clone()) {
        Ok(row) => row,
        Err(err) => {
            warn!(row = id, error = %err, "save failed");
            return failed(format!("Save failed: {}", err));
        }
    };

    if let Some(path) = settings.persist_path.as_ref() {
        if let Err(err) = store.persist(path) {
            error!(path = %path.display(), error = %err, "dataset write-through failed");
            let _ = store.apply(id, &field_path, previous);
            return failed(format!("Save failed: {}", err));
        }
    }

    info!(row = id, column = %column_id, field = %field_path, "cell saved");
    GridEvent::CellSaved {
        row_id: id.to_string(),
        column_id,
        field_path,
        value,
        row,
    }
}
