//! State transitions driven by worker events, user actions, and time.

use super::interaction::{classify_pointer, classify_scroll, is_popup_layer};
use super::{CellAddress, GridApp, PendingSave};
use crate::backend::{GridCmd, GridEvent};
use chrono::NaiveDate;
use eframe::egui;
use gridkit_core::analytics::events;
use gridkit_core::cell::{CellKey, ClickOutcome, OptionList};
use gridkit_core::{CommitOutcome, Debouncer, EditableCell, PinSide, SaveRequest};
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Something the user did to a body cell during rendering.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum CellAction {
    Click(CellAddress),
    DraftText(String),
    ToggleDropdown,
    PickDate(Option<NaiveDate>),
}

/// Something the user did in the header rows.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum HeaderAction {
    Sort(String),
    PinColumn(String, PinSide),
    PinGroup(String, PinSide),
    Resize(String, f32),
}

/// Something the user did inside the dropdown overlay.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum OverlayAction {
    Select(Value),
    Clear,
    Toggle(Value),
    SelectAll,
    ClearAll,
    Search(String),
}

impl GridApp {
    pub(super) fn apply_event(&mut self, event: GridEvent) {
        match event {
            GridEvent::RowsLoaded { rows } => {
                self.view.set_rows(rows);
            }
            GridEvent::CellSaved {
                row_id,
                column_id,
                field_path,
                value,
                row: _,
            } => {
                let address = CellAddress::new(row_id.clone(), column_id.clone());
                self.settle_pending(&address, Some(value.clone()));
                // A newer optimistic value stays on screen until its own answer.
                if self.pending_saves.contains_key(&address) {
                    debug!(row = %row_id, column = %column_id, "newer save still in flight");
                } else {
                    if let Err(err) = self
                        .view
                        .apply_cell_value(&row_id, &field_path, value.clone())
                    {
                        warn!(error = %err, "saved row is no longer in the view");
                    }
                    if let Some(cell) = self.cells.get_mut(&address) {
                        cell.save_succeeded(value);
                    }
                }
                let mut props = Map::new();
                props.insert("column_id".into(), Value::String(column_id));
                props.insert("row_id".into(), Value::String(row_id));
                self.track(events::GRID_CELL_SAVED, props);
            }
            GridEvent::SaveFailed {
                row_id,
                column_id,
                field_path,
                message,
            } => {
                warn!(row = ?row_id, column = %column_id, %message, "save rejected");
                if let Some(row_id) = row_id.as_deref() {
                    let address = CellAddress::new(row_id, column_id.clone());
                    self.revert_cell(&address, &field_path);
                }
                let label = self
                    .view
                    .column(&column_id)
                    .map(|column| column.header_label().to_string())
                    .unwrap_or_else(|_| column_id.clone());
                self.set_status(format!("Could not save {}: {}", label, message));
                let mut props = Map::new();
                props.insert("column_id".into(), Value::String(column_id));
                props.insert("message".into(), Value::String(message));
                self.track(events::GRID_SAVE_FAILED, props);
            }
        }
    }

    /// Marks one in-flight save as answered; `confirmed` is the stored value
    /// when it succeeded.
    ///
    /// # Returns
    /// The last value the worker confirmed for the cell.
    fn settle_pending(&mut self, address: &CellAddress, confirmed: Option<Value>) -> Option<Value> {
        let pending = self.pending_saves.get_mut(address)?;
        if let Some(value) = confirmed {
            pending.confirmed = value;
        }
        pending.in_flight = pending.in_flight.saturating_sub(1);
        let last = pending.confirmed.clone();
        if pending.in_flight == 0 {
            self.pending_saves.remove(address);
        }
        Some(last)
    }

    /// Rolls a rejected optimistic edit back to the last confirmed value.
    fn revert_cell(&mut self, address: &CellAddress, field_path: &str) {
        let confirmed = self.settle_pending(address, None);
        let Some(value) = confirmed.or_else(|| {
            self.cells
                .get(address)
                .map(|cell| cell.value().clone())
        }) else {
            return;
        };
        if let Err(err) = self
            .view
            .apply_cell_value(&address.row_id, field_path, value.clone())
        {
            debug!(error = %err, "reverted row is no longer in the view");
        }
        if let Some(cell) = self.cells.get_mut(address) {
            cell.save_failed();
            cell.sync_value(value);
        }
    }

    fn send_save(&mut self, address: &CellAddress, request: SaveRequest) {
        let confirmed = self
            .view
            .row_by_id(&address.row_id)
            .map(|row| row.value_at(&request.field_path))
            .unwrap_or(Value::Null);
        self.pending_saves
            .entry(address.clone())
            .or_insert(PendingSave {
                confirmed,
                in_flight: 0,
            })
            .in_flight += 1;
        if let Err(err) =
            self.view
                .apply_cell_value(&address.row_id, &request.field_path, request.value.clone())
        {
            debug!(error = %err, "optimistic update skipped");
        }
        if self.backend.cmd_tx.send(GridCmd::save_cell(&request)).is_err() {
            error!("save worker is gone; reverting edit");
            self.revert_cell(address, &request.field_path);
            self.set_status("Save failed: worker unavailable");
        }
    }

    /// Runs `f` against the cell at `address` and processes its outcome.
    fn drive_cell(
        &mut self,
        address: &CellAddress,
        f: impl FnOnce(&mut EditableCell) -> CommitOutcome,
    ) -> CommitOutcome {
        let Some(cell) = self.cells.get_mut(address) else {
            return CommitOutcome::Ignored;
        };
        let outcome = f(cell);
        match &outcome {
            CommitOutcome::Save(request) => self.send_save(address, request.clone()),
            CommitOutcome::Rejected(err) => {
                debug!(column = %address.column_id, error = %err, "commit rejected")
            }
            CommitOutcome::Busy => debug!(column = %address.column_id, "cell busy saving"),
            CommitOutcome::Exited | CommitOutcome::Ignored => {}
        }
        self.release_if_done();
        outcome
    }

    /// Clears the active address once its cell has left editing.
    fn release_if_done(&mut self) {
        let done = self
            .active
            .as_ref()
            .is_none_or(|address| !self.cells.get(address).is_some_and(EditableCell::is_editing));
        if done && self.active.take().is_some() {
            self.active_rects = Default::default();
            self.option_search_input.clear();
            self.option_search_debounce.cancel();
        }
        let active = self.active.clone();
        self.cells.retain(|address, cell| {
            cell.is_editing() || cell.is_saving() || active.as_ref() == Some(address)
        });
    }

    pub(super) fn apply_cell_action(&mut self, action: CellAction, now: Instant) {
        match action {
            CellAction::Click(address) => self.click_cell(address),
            CellAction::DraftText(text) => {
                if let Some(address) = self.active.clone() {
                    if let Some(cell) = self.cells.get_mut(&address) {
                        cell.set_draft_text(&text);
                    }
                }
            }
            CellAction::ToggleDropdown => {
                if let Some(address) = self.active.clone() {
                    if let Some(cell) = self.cells.get_mut(&address) {
                        cell.toggle_dropdown();
                    }
                    self.option_search_input.clear();
                    self.option_search_debounce.cancel();
                }
            }
            CellAction::PickDate(date) => {
                if let Some(address) = self.active.clone() {
                    self.drive_cell(&address, |cell| cell.pick_date(date, now));
                }
            }
        }
    }

    /// Starts editing the clicked cell unless another cell is still editing.
    fn click_cell(&mut self, address: CellAddress) {
        if self.active.is_some() {
            return;
        }
        let Some(row) = self.view.row_by_id(&address.row_id).cloned() else {
            return;
        };
        let Ok(column) = self.view.column(&address.column_id).cloned() else {
            return;
        };
        let id_field = self.view.id_field().to_string();
        let saving_indicator = self.saving_indicator;
        let cell = self.cells.entry(address.clone()).or_insert_with(|| {
            EditableCell::from_row(column, &row, &id_field).with_saving_indicator(saving_indicator)
        });
        match cell.click(self.detail_field.as_deref()) {
            ClickOutcome::Ignored => {}
            ClickOutcome::OpenDetail { row_id } => {
                debug!(row = ?row_id, "opening row detail");
                self.detail_row = row_id;
            }
            ClickOutcome::Editing { editor, popup } => {
                debug!(?editor, ?popup, column = %address.column_id, "editing cell");
                self.active = Some(address);
                self.focus_editor = true;
                self.option_search_input.clear();
            }
        }
        self.release_if_done();
    }

    pub(super) fn apply_header_action(&mut self, action: HeaderAction) {
        let result = match &action {
            HeaderAction::Sort(column_id) => self.view.toggle_sort(column_id).map(|_| ()),
            HeaderAction::PinColumn(column_id, side) => self.view.pin_column(column_id, *side),
            HeaderAction::PinGroup(group, side) => self.view.pin_group(group, *side),
            HeaderAction::Resize(column_id, width) => {
                self.view.resize_column(column_id, *width).map(|_| ())
            }
        };
        if let Err(err) = result {
            warn!(?action, error = %err, "header action failed");
            self.set_status(err.to_string());
        }
    }

    pub(super) fn apply_overlay_action(&mut self, action: OverlayAction, now: Instant) {
        let Some(address) = self.active.clone() else {
            return;
        };
        match action {
            OverlayAction::Select(value) => {
                self.drive_cell(&address, |cell| cell.select_single(&value, now));
            }
            OverlayAction::Clear => {
                self.drive_cell(&address, |cell| cell.clear_single(now));
            }
            OverlayAction::Toggle(value) => {
                self.drive_cell(&address, |cell| cell.toggle_multi(&value, now));
            }
            OverlayAction::SelectAll => {
                self.drive_cell(&address, |cell| cell.select_all_multi(now));
            }
            OverlayAction::ClearAll => {
                self.drive_cell(&address, |cell| cell.clear_all_multi(now));
            }
            OverlayAction::Search(text) => {
                self.option_search_input = text.clone();
                self.option_search_debounce.input(text, now);
            }
        }
    }

    /// Sends a pointer-down to the editing cell.
    pub(super) fn pointer_down_at(&mut self, pos: egui::Pos2, over_popup: bool, now: Instant) {
        let Some(address) = self.active.clone() else {
            return;
        };
        let target = classify_pointer(pos, &self.active_rects, over_popup);
        self.drive_cell(&address, |cell| cell.pointer_down(target, now));
    }

    pub(super) fn scroll_at(&mut self, hover: Option<egui::Pos2>, over_popup: bool) {
        let Some(address) = self.active.clone() else {
            return;
        };
        let origin = classify_scroll(hover, &self.active_rects, over_popup);
        if let Some(cell) = self.cells.get_mut(&address) {
            if cell.scroll(origin) {
                debug!(?origin, "overlay closed by scroll");
            }
        }
        self.release_if_done();
    }

    pub(super) fn key_pressed(&mut self, key: CellKey, now: Instant) {
        let Some(address) = self.active.clone() else {
            return;
        };
        self.drive_cell(&address, |cell| cell.key(key, now));
    }

    /// Feeds this frame's pointer, scroll, and key input to the editing cell.
    pub(super) fn route_input(&mut self, ctx: &egui::Context, now: Instant) {
        if self.active.is_none() {
            return;
        }
        let (pressed_at, hover, scrolled, escape, enter) = ctx.input(|input| {
            (
                input
                    .pointer
                    .any_pressed()
                    .then(|| input.pointer.interact_pos())
                    .flatten(),
                input.pointer.hover_pos(),
                input.raw_scroll_delta != egui::Vec2::ZERO,
                input.key_pressed(egui::Key::Escape),
                input.key_pressed(egui::Key::Enter) && !input.modifiers.shift,
            )
        });
        let over_popup =
            |pos: egui::Pos2| ctx.layer_id_at(pos).is_some_and(is_popup_layer);

        if let Some(pos) = pressed_at {
            self.pointer_down_at(pos, over_popup(pos), now);
        }
        if scrolled {
            let popup = hover.is_some_and(over_popup);
            self.scroll_at(hover, popup);
        }
        if escape {
            self.key_pressed(CellKey::Escape, now);
        } else if enter {
            self.key_pressed(CellKey::Enter { shift: false }, now);
        }
    }

    pub(super) fn set_search_input(&mut self, text: String, now: Instant) {
        self.search_input = text.clone();
        self.search_debounce.input(text, now);
    }

    pub(super) fn set_global_filter_input(&mut self, text: String, now: Instant) {
        self.global_filter_input = text.clone();
        self.global_filter_debounce.input(text, now);
    }

    pub(super) fn set_filter_input(&mut self, column_id: &str, text: String, now: Instant) {
        self.filter_inputs
            .insert(column_id.to_string(), text.clone());
        let delay = self.search_debounce.delay();
        self.filter_debounce
            .entry(column_id.to_string())
            .or_insert_with(|| Debouncer::new(delay))
            .input(text, now);
    }

    /// Applies debounced search and filter text whose window has elapsed.
    pub(super) fn poll_debouncers(&mut self, now: Instant) {
        if let Some(term) = self.search_debounce.poll(now) {
            debug!(term = %term, "search applied");
            self.view.set_search_term(term);
        }
        if let Some(text) = self.global_filter_debounce.poll(now) {
            self.view.set_global_filter(text);
        }
        let ready: Vec<(String, String)> = self
            .filter_debounce
            .iter_mut()
            .filter_map(|(column_id, debouncer)| {
                debouncer.poll(now).map(|text| (column_id.clone(), text))
            })
            .collect();
        for (column_id, text) in ready {
            if let Err(err) = self.view.set_column_filter(&column_id, text) {
                warn!(error = %err, "column filter rejected");
            }
        }
        if let Some(text) = self.option_search_debounce.poll(now) {
            let options = self
                .active
                .as_ref()
                .and_then(|address| self.cells.get_mut(address))
                .and_then(EditableCell::options_mut);
            match options {
                Some(OptionList::Single(select)) => select.set_search(text),
                Some(OptionList::Multi(select)) => select.set_search(text),
                None => {}
            }
        }
    }

    /// Advances "Saving..." indicators and drops cells that are back to display.
    pub(super) fn tick_cells(&mut self, now: Instant) {
        for cell in self.cells.values_mut() {
            cell.tick(now);
        }
        self.release_if_done();
    }
}
