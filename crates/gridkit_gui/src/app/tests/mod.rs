//! Integration-style app tests that drive editing, saves, overlays, and filters
//! without a window.

use super::state_ops::{CellAction, HeaderAction, OverlayAction};
use super::*;
use crate::backend::{BackendHandle, GridCmd, GridEvent};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use gridkit_core::analytics::MemorySink;
use gridkit_core::cell::{CellKey, OptionList};

mod search_and_filters;

struct TestHarness {
    app: GridApp,
    cmd_rx: Receiver<GridCmd>,
    _evt_tx: Sender<GridEvent>,
    sink: Arc<MemorySink>,
}

fn make_app() -> TestHarness {
    make_app_with(Dataset::demo())
}

fn make_app_with(dataset: Dataset) -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let sink = Arc::new(MemorySink::default());
    let analytics = AnalyticsClient::new(
        AnalyticsConfig {
            token: Some("test-token".to_string()),
            enabled: true,
            ..AnalyticsConfig::default()
        },
        sink.clone(),
    );
    let app = GridApp::with_backend(
        &GridConfig::default(),
        dataset,
        BackendHandle::from_test_channels(cmd_tx, evt_rx),
        analytics,
    )
    .expect("demo dataset builds a grid");
    TestHarness {
        app,
        cmd_rx,
        _evt_tx: evt_tx,
        sink,
    }
}

fn address(row_id: &str, column_id: &str) -> CellAddress {
    CellAddress::new(row_id, column_id)
}

/// Next save command sent to the worker.
///
/// # Panics
/// Panics when no command is queued or the command is not a save.
fn expect_save(harness: &TestHarness) -> (Option<String>, String, String, Value) {
    match harness.cmd_rx.try_recv() {
        Ok(GridCmd::SaveCell {
            row_id,
            column_id,
            field_path,
            value,
        }) => (row_id, column_id, field_path, value),
        other => panic!("expected SaveCell, got {:?}", other),
    }
}

fn assert_no_command(harness: &TestHarness) {
    assert!(matches!(harness.cmd_rx.try_recv(), Err(TryRecvError::Empty)));
}

fn view_value(harness: &TestHarness, row_id: &str, path: &str) -> Value {
    harness
        .app
        .view
        .row_by_id(row_id)
        .expect("row in view")
        .value_at(path)
}
