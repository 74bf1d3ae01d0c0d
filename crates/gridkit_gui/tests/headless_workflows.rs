//! Headless workflows: engine cells feeding the real save worker.

use gridkit_core::cell::CellKey;
use gridkit_core::{CommitOutcome, Dataset, EditableCell, GridConfig};
use gridkit_gui::backend::{spawn_backend, GridCmd, GridEvent, RowStore, WorkerSettings};
use serde_json::json;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn recv(handle: &gridkit_gui::backend::BackendHandle) -> GridEvent {
    handle
        .evt_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("worker event")
}

fn committed_notes_edit(dataset: &Dataset, row_index: usize, text: &str) -> GridCmd {
    let column = dataset
        .columns
        .iter()
        .find(|column| column.id == "notes")
        .cloned()
        .expect("notes column");
    let mut cell = EditableCell::from_row(column, &dataset.rows[row_index], &dataset.id_field);
    cell.click(None);
    cell.set_draft_text(text);
    match cell.key(CellKey::Enter { shift: false }, Instant::now()) {
        CommitOutcome::Save(request) => GridCmd::save_cell(&request),
        other => panic!("expected save, got {:?}", other),
    }
}

#[test]
fn committed_cell_round_trips_through_worker_and_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("deals.json");
    let dataset = Dataset::demo();
    dataset.save(&path).expect("write dataset");

    let config = GridConfig {
        dataset_path: Some(path.to_string_lossy().to_string()),
        ..GridConfig::default()
    };
    let handle = spawn_backend(
        RowStore::new(dataset.clone()),
        WorkerSettings::from_config(&config),
    );

    handle
        .cmd_tx
        .send(committed_notes_edit(&dataset, 2, "Send revised quote"))
        .expect("send save");
    match recv(&handle) {
        GridEvent::CellSaved {
            row_id, value, row, ..
        } => {
            assert_eq!(row_id, "deal-003");
            assert_eq!(value, json!("Send revised quote"));
            assert_eq!(row.value_at("notes"), json!("Send revised quote"));
        }
        other => panic!("unexpected event: {:?}", other),
    }

    let reloaded = Dataset::load(&path).expect("reload dataset");
    let row = reloaded
        .rows
        .iter()
        .find(|row| row.id(&reloaded.id_field).as_deref() == Some("deal-003"))
        .expect("saved row");
    assert_eq!(row.value_at("notes"), json!("Send revised quote"));
}

#[test]
fn saves_are_answered_in_submission_order() {
    let dataset = Dataset::demo();
    let handle = spawn_backend(
        RowStore::new(dataset.clone()),
        WorkerSettings {
            latency: Duration::from_millis(5),
            ..WorkerSettings::default()
        },
    );

    for (index, text) in ["first", "second", "third"].into_iter().enumerate() {
        handle
            .cmd_tx
            .send(committed_notes_edit(&dataset, index, text))
            .expect("send save");
    }

    let answered: Vec<String> = (0..3)
        .map(|_| match recv(&handle) {
            GridEvent::CellSaved { row_id, .. } => row_id,
            other => panic!("unexpected event: {:?}", other),
        })
        .collect();
    assert_eq!(answered, vec!["deal-001", "deal-002", "deal-003"]);
}

#[test]
fn simulated_failures_leave_rows_untouched() {
    let dataset = Dataset::demo();
    let handle = spawn_backend(
        RowStore::new(dataset.clone()),
        WorkerSettings {
            failure_rate: 100,
            ..WorkerSettings::default()
        },
    );

    handle
        .cmd_tx
        .send(committed_notes_edit(&dataset, 1, "never stored"))
        .expect("send save");
    match recv(&handle) {
        GridEvent::SaveFailed {
            row_id, message, ..
        } => {
            assert_eq!(row_id.as_deref(), Some("deal-002"));
            assert!(message.contains("simulated"));
        }
        other => panic!("unexpected event: {:?}", other),
    }

    handle.cmd_tx.send(GridCmd::ListRows).expect("send list");
    match recv(&handle) {
        GridEvent::RowsLoaded { rows } => {
            assert_eq!(rows[1].value_at("notes"), json!("Follow up #1"));
        }
        other => panic!("unexpected event: {:?}", other),
    }
}
