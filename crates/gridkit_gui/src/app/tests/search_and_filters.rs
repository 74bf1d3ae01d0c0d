//! Debounced search, column filters, header gestures, and row reloads.

use super::*;
use gridkit_core::grid::SortDirection;
use gridkit_core::{PinSide, RowRecord};

#[test]
fn search_applies_only_after_debounce_window() {
    let mut harness = make_app();
    let now = Instant::now();
    harness.app.set_search_input("Globex".to_string(), now);

    harness.app.poll_debouncers(now + Duration::from_millis(100));
    assert_eq!(harness.app.view.search_term(), "");
    assert_eq!(harness.app.view.filtered_row_count(), 36);

    harness.app.poll_debouncers(now + Duration::from_millis(500));
    assert_eq!(harness.app.view.search_term(), "Globex");
    assert_eq!(harness.app.view.filtered_row_count(), 3);
}

#[test]
fn rapid_typing_only_applies_last_search() {
    let mut harness = make_app();
    let start = Instant::now();
    harness.app.set_search_input("G".to_string(), start);
    harness
        .app
        .set_search_input("Gl".to_string(), start + Duration::from_millis(300));
    harness.app.poll_debouncers(start + Duration::from_millis(600));
    assert_eq!(harness.app.view.search_term(), "");

    harness.app.poll_debouncers(start + Duration::from_millis(800));
    assert_eq!(harness.app.view.search_term(), "Gl");
}

#[test]
fn pending_debounce_schedules_repaint() {
    let mut harness = make_app();
    let now = Instant::now();
    assert_eq!(harness.app.next_repaint(now), None);
    harness.app.set_global_filter_input("won".to_string(), now);
    assert_eq!(
        harness.app.next_repaint(now),
        Some(Duration::from_millis(500))
    );
}

#[test]
fn column_filter_input_is_debounced_per_column() {
    let mut harness = make_app();
    let now = Instant::now();
    harness.app.set_filter_input("owner", "Avery".to_string(), now);
    assert_eq!(
        harness.app.filter_inputs.get("owner").map(String::as_str),
        Some("Avery")
    );
    assert_eq!(harness.app.view.column_filter("owner"), None);

    harness.app.poll_debouncers(now + Duration::from_millis(500));
    assert_eq!(harness.app.view.column_filter("owner"), Some("Avery"));
    assert_eq!(harness.app.view.filtered_row_count(), 9);
}

#[test]
fn header_actions_sort_resize_and_pin() {
    let mut harness = make_app();
    harness
        .app
        .apply_header_action(HeaderAction::Sort("name".to_string()));
    assert_eq!(
        harness.app.view.sort_direction("name"),
        Some(SortDirection::Asc)
    );

    harness
        .app
        .apply_header_action(HeaderAction::Resize("name".to_string(), 150.0));
    assert_eq!(harness.app.view.column_size("name").expect("size"), 150.0);

    harness
        .app
        .apply_header_action(HeaderAction::PinGroup("Contact".to_string(), PinSide::Left));
    assert_eq!(harness.app.view.pin_side("owner"), PinSide::Left);
    assert_eq!(harness.app.view.pin_side("email"), PinSide::Left);
    assert!(harness.app.status.is_none());
}

#[test]
fn failed_header_action_sets_status() {
    let mut harness = make_app();
    harness
        .app
        .apply_header_action(HeaderAction::PinColumn("missing".to_string(), PinSide::Right));
    let status = harness.app.status.as_ref().expect("status");
    assert!(status.text.contains("missing"));
    assert_eq!(harness.app.toasts.len(), 1);
}

#[test]
fn rows_loaded_replaces_view_rows() {
    let mut harness = make_app();
    let rows: Vec<RowRecord> = Dataset::demo().rows.into_iter().take(2).collect();
    harness.app.apply_event(GridEvent::RowsLoaded { rows });
    assert_eq!(harness.app.view.rows().len(), 2);
    assert_eq!(harness.app.view.page_index(), 0);
}
