//! Editable cell: display, editing, and saving phases for one grid cell.
//!
//! A cell is driven entirely by its caller: clicks, keys, pointer-downs,
//! option picks, and the current [`Instant`] come in; [`CommitOutcome`]s
//! carrying [`SaveRequest`]s come out. Saves are fire-and-forget. The cell
//! shows the committed value optimistically and reverts when told the save
//! failed.

pub mod editor;
pub mod save;
pub mod validation;

pub use editor::EditorKind;
pub use save::{SaveRequest, SaveSink};

use crate::constants::SAVING_INDICATOR_MIN;
use crate::dropdown::{
    DropdownLayout, DropdownTrigger, MultiSelect, PointerTarget, PortalDropdown, ScrollOrigin,
    SelectEffect, SingleSelect,
};
use crate::error::{SaveError, ValidationError};
use crate::format::{format_display, CurrencyContext};
use crate::models::{is_empty_value, value_to_text, ColumnConfig, RowRecord};
use chrono::NaiveDate;
use serde_json::Value;
use std::time::{Duration, Instant};
use validation::{clamp_numeric_input, coerce_for_save, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPhase {
    Display,
    Editing,
    /// Showing the "Saving..." indicator after a commit.
    Saving,
}

/// Uncommitted editor contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// Text typed into a text or numeric input.
    Text(String),
    /// Value chosen from an overlay or picker.
    Value(Value),
}

impl Draft {
    fn to_value(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Value(value) => value.clone(),
        }
    }
}

/// Transient state that only exists while editing or saving.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub draft: Draft,
    pub is_saving: bool,
    pub saving_since: Option<Instant>,
    pub validation_error: Option<ValidationError>,
}

/// Popup a freshly started editor wants opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Dropdown,
    DatePicker,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Ignored,
    /// The click targets the row's detail view instead of editing.
    OpenDetail { row_id: Option<String> },
    Editing {
        editor: EditorKind,
        popup: Option<Popup>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKey {
    Enter { shift: bool },
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The cell committed; the request must be persisted.
    Save(SaveRequest),
    /// Validation failed; nothing was saved.
    Rejected(ValidationError),
    /// A previous save is still showing its indicator.
    Busy,
    /// Editing ended without a save.
    Exited,
    /// Nothing happened.
    Ignored,
}

impl CommitOutcome {
    pub fn save_request(&self) -> Option<&SaveRequest> {
        match self {
            Self::Save(request) => Some(request),
            _ => None,
        }
    }
}

/// Option model backing a select editor.
#[derive(Debug, Clone)]
pub enum OptionList {
    Single(SingleSelect),
    Multi(MultiSelect),
}

#[derive(Debug, Clone)]
pub struct EditableCell {
    column: ColumnConfig,
    editor: Option<EditorKind>,
    row_id: Option<String>,
    row: RowRecord,
    value: Value,
    pre_edit: Value,
    editing: bool,
    buffer: Option<EditBuffer>,
    saving_min: Duration,
    dropdown: PortalDropdown,
    options: Option<OptionList>,
}

impl EditableCell {
    /// Builds a cell in the display phase.
    pub fn new(column: ColumnConfig, value: Value) -> Self {
        let editor = EditorKind::for_column(&column);
        Self {
            column,
            editor,
            row_id: None,
            row: RowRecord::new(),
            pre_edit: value.clone(),
            value,
            editing: false,
            buffer: None,
            saving_min: SAVING_INDICATOR_MIN,
            dropdown: PortalDropdown::new(DropdownLayout::default()),
            options: None,
        }
    }

    /// Builds a cell for `column` reading its value out of `row`.
    pub fn from_row(column: ColumnConfig, row: &RowRecord, id_field: &str) -> Self {
        let value = row.value_at(&column.path);
        Self::new(column, value).with_row(row.id(id_field), row.clone())
    }

    pub fn with_row(mut self, row_id: Option<String>, row: RowRecord) -> Self {
        self.row_id = row_id;
        self.row = row;
        self
    }

    /// Overrides the minimum "Saving..." duration.
    pub fn with_saving_indicator(mut self, duration: Duration) -> Self {
        self.saving_min = duration;
        self
    }

    pub fn column(&self) -> &ColumnConfig {
        &self.column
    }

    pub fn editor(&self) -> Option<EditorKind> {
        self.editor
    }

    pub fn row_id(&self) -> Option<&str> {
        self.row_id.as_deref()
    }

    /// Last committed (or optimistically saved) value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        self.buffer.as_ref()
    }

    pub fn phase(&self) -> CellPhase {
        if self.editing {
            CellPhase::Editing
        } else if self.is_saving() {
            CellPhase::Saving
        } else {
            CellPhase::Display
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.buffer.as_ref().is_some_and(|buffer| buffer.is_saving)
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.buffer.as_ref().and_then(|buffer| buffer.validation_error)
    }

    /// Text shown in a text or numeric editor.
    pub fn draft_text(&self) -> &str {
        match self.buffer.as_ref().map(|buffer| &buffer.draft) {
            Some(Draft::Text(text)) => text,
            _ => "",
        }
    }

    pub fn dropdown(&self) -> &PortalDropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut PortalDropdown {
        &mut self.dropdown
    }

    pub fn options(&self) -> Option<&OptionList> {
        self.options.as_ref()
    }

    pub fn options_mut(&mut self) -> Option<&mut OptionList> {
        self.options.as_mut()
    }

    /// Handles a click on the cell while it is displayed.
    ///
    /// # Arguments
    /// - `detail_field`: path that opens the row's detail view instead of
    ///   editing (matched case-insensitively, only for string values).
    ///
    /// # Returns
    /// What the front end should do next; select editors request their
    /// overlay and date editors their picker.
    pub fn click(&mut self, detail_field: Option<&str>) -> ClickOutcome {
        if self.editing || !self.column.editable {
            return ClickOutcome::Ignored;
        }
        if let Some(field) = detail_field {
            if self.column.path.to_lowercase() == field.to_lowercase() && self.value.is_string() {
                return ClickOutcome::OpenDetail {
                    row_id: self.row_id.clone(),
                };
            }
        }
        let Some(editor) = self.editor else {
            return ClickOutcome::Ignored;
        };

        self.begin_editing(editor);
        let popup = if editor.uses_dropdown() {
            self.open_dropdown();
            Some(Popup::Dropdown)
        } else if editor == EditorKind::Date {
            Some(Popup::DatePicker)
        } else {
            None
        };
        tracing::debug!(column = %self.column.id, row = ?self.row_id, "cell editing");
        ClickOutcome::Editing { editor, popup }
    }

    fn begin_editing(&mut self, editor: EditorKind) {
        self.editing = true;
        let draft = self.initial_draft();
        let buffer = self.buffer.get_or_insert(EditBuffer {
            draft: draft.clone(),
            is_saving: false,
            saving_since: None,
            validation_error: None,
        });
        buffer.draft = draft;
        buffer.validation_error = None;
        self.options = match editor {
            EditorKind::SingleSelect {
                allow_clear,
                show_search,
            } => Some(OptionList::Single(
                SingleSelect::new(self.column.list_options.clone(), self.value.clone())
                    .with_allow_clear(allow_clear)
                    .with_search(show_search),
            )),
            EditorKind::BooleanSelect { allow_clear } => Some(OptionList::Single(
                SingleSelect::new(self.column.list_options.clone(), self.value.clone())
                    .with_allow_clear(allow_clear),
            )),
            EditorKind::MultiSelect { show_search } => Some(OptionList::Multi(
                MultiSelect::new(self.column.list_options.clone(), self.committed_list())
                    .with_search(show_search),
            )),
            _ => None,
        };
    }

    fn initial_draft(&self) -> Draft {
        match self.editor {
            Some(editor) if editor.is_text_input() => Draft::Text(value_to_text(&self.value)),
            _ => Draft::Value(self.value.clone()),
        }
    }

    fn committed_list(&self) -> Vec<Value> {
        self.value.as_array().cloned().unwrap_or_default()
    }

    fn open_dropdown(&mut self) {
        let height = match &self.options {
            Some(OptionList::Single(select)) => select.default_overlay_height(),
            Some(OptionList::Multi(select)) => select.default_overlay_height(),
            None => self.dropdown.layout().max_height,
        };
        self.dropdown.set_max_height(height);
        self.dropdown.request_open();
    }

    /// Replaces the text draft; numeric editors clamp to their bounds.
    pub fn set_draft_text(&mut self, input: &str) {
        let Some(editor) = self.editor.filter(|editor| editor.is_text_input()) else {
            return;
        };
        if !self.editing {
            return;
        }
        let text = match editor {
            EditorKind::Numeric { min, max, .. } => clamp_numeric_input(input, min, max),
            _ => input.to_string(),
        };
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.draft = Draft::Text(text);
            buffer.validation_error = None;
        }
    }

    /// Opens or closes the overlay of a select editor without leaving editing.
    pub fn toggle_dropdown(&mut self) {
        if !self.editing || !self.editor.is_some_and(EditorKind::uses_dropdown) {
            return;
        }
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.validation_error = None;
        }
        if self.dropdown.is_open() {
            self.dropdown.close();
        } else {
            self.open_dropdown();
        }
    }

    pub fn key(&mut self, key: CellKey, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        match key {
            CellKey::Enter { shift } => match self.editor {
                Some(EditorKind::MultilineText) if shift => {
                    if let Some(Draft::Text(text)) =
                        self.buffer.as_mut().map(|buffer| &mut buffer.draft)
                    {
                        text.push('\n');
                    }
                    CommitOutcome::Ignored
                }
                Some(editor) if editor.uses_dropdown() => {
                    self.toggle_dropdown();
                    CommitOutcome::Ignored
                }
                Some(EditorKind::Date) | None => CommitOutcome::Ignored,
                Some(_) => self.commit(now),
            },
            CellKey::Escape => {
                if self.dropdown.is_open() {
                    self.close_dropdown();
                } else {
                    self.cancel();
                }
                CommitOutcome::Exited
            }
        }
    }

    /// Drops the draft and returns to display without saving.
    pub fn cancel(&mut self) {
        if !self.editing {
            return;
        }
        let draft = self.initial_draft();
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.draft = draft;
            buffer.validation_error = None;
        }
        tracing::debug!(column = %self.column.id, "cell edit cancelled");
        self.exit_editing();
    }

    /// Commits the text draft.
    ///
    /// # Returns
    /// `Save` with the coerced value, `Rejected` when a required field is
    /// empty (the cell keeps editing), or `Busy` while a previous save still
    /// shows its indicator.
    pub fn commit(&mut self, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        if self.is_saving() {
            return CommitOutcome::Busy;
        }
        let draft = self
            .buffer
            .as_ref()
            .map(|buffer| buffer.draft.to_value())
            .unwrap_or_else(|| self.value.clone());
        if let Err(err) = validate(&self.column, &draft) {
            self.set_validation_error(err);
            return CommitOutcome::Rejected(err);
        }
        self.start_save(draft, now, true)
    }

    fn start_save(&mut self, draft: Value, now: Instant, exit_editing: bool) -> CommitOutcome {
        let value = coerce_for_save(&self.column, draft);
        let request = SaveRequest {
            row_id: self.row_id.clone(),
            field_path: self.column.path.clone(),
            value: value.clone(),
            row: self.row.clone(),
            column_id: self.column.id.clone(),
        };
        self.pre_edit = std::mem::replace(&mut self.value, value);
        let draft = self.initial_draft();
        let buffer = self.buffer.get_or_insert(EditBuffer {
            draft: draft.clone(),
            is_saving: false,
            saving_since: None,
            validation_error: None,
        });
        buffer.draft = draft;
        buffer.is_saving = true;
        buffer.saving_since = Some(now);
        buffer.validation_error = None;
        self.sync_option_models();
        if exit_editing {
            self.exit_editing();
        }
        tracing::info!(
            column = %self.column.id,
            row = ?self.row_id,
            field = %self.column.path,
            "cell committed"
        );
        CommitOutcome::Save(request)
    }

    fn set_validation_error(&mut self, err: ValidationError) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.validation_error = Some(err);
        }
        tracing::debug!(column = %self.column.id, "cell validation failed");
    }

    fn exit_editing(&mut self) {
        self.editing = false;
        self.dropdown.close();
        if !self.is_saving() {
            self.buffer = None;
        }
    }

    /// Commit path for values picked from an overlay or date picker.
    fn commit_picked(&mut self, value: Value, now: Instant, keep_editing: bool) -> CommitOutcome {
        if let Err(err) = validate(&self.column, &value) {
            if keep_editing {
                self.sync_option_models();
            } else {
                self.set_validation_error(err);
            }
            return CommitOutcome::Rejected(err);
        }
        self.start_save(value, now, !keep_editing)
    }

    fn apply_single_effects(&mut self, effects: Vec<SelectEffect>, now: Instant) -> CommitOutcome {
        let mut outcome = CommitOutcome::Ignored;
        for effect in effects {
            match effect {
                SelectEffect::SelectionChanged(value) => {
                    outcome = self.commit_picked(value, now, false);
                }
                SelectEffect::Close => self.close_dropdown(),
            }
        }
        outcome
    }

    /// Picks an option in a single-select overlay; editing ends afterwards.
    pub fn select_single(&mut self, value: &Value, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        if self.is_saving() {
            return CommitOutcome::Busy;
        }
        let effects = match self.options.as_mut() {
            Some(OptionList::Single(select)) => select.select(value),
            _ => return CommitOutcome::Ignored,
        };
        self.apply_single_effects(effects, now)
    }

    /// Clears a single-select value when the column allows empty values.
    pub fn clear_single(&mut self, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        if self.is_saving() {
            return CommitOutcome::Busy;
        }
        let effects = match self.options.as_mut() {
            Some(OptionList::Single(select)) => select.clear(),
            _ => return CommitOutcome::Ignored,
        };
        self.apply_single_effects(effects, now)
    }

    /// Toggles one option of a multi-select; the overlay stays open.
    pub fn toggle_multi(&mut self, value: &Value, now: Instant) -> CommitOutcome {
        self.update_multi(now, |select| select.toggle(value))
    }

    pub fn select_all_multi(&mut self, now: Instant) -> CommitOutcome {
        self.update_multi(now, |select| Some(select.select_all()))
    }

    pub fn clear_all_multi(&mut self, now: Instant) -> CommitOutcome {
        self.update_multi(now, |select| Some(select.clear_all()))
    }

    fn update_multi(
        &mut self,
        now: Instant,
        change: impl FnOnce(&mut MultiSelect) -> Option<Vec<Value>>,
    ) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        if self.is_saving() {
            return CommitOutcome::Busy;
        }
        let values = match self.options.as_mut() {
            Some(OptionList::Multi(select)) => change(select),
            _ => return CommitOutcome::Ignored,
        };
        match values {
            Some(values) => self.commit_multi(values, now),
            None => CommitOutcome::Ignored,
        }
    }

    /// Commits a complete multi-select value list without leaving editing.
    ///
    /// A required field left empty is rejected without an inline message.
    pub fn commit_multi(&mut self, values: Vec<Value>, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        if self.is_saving() {
            self.sync_option_models();
            return CommitOutcome::Busy;
        }
        self.commit_picked(Value::Array(values), now, true)
    }

    /// Commits a date picked (or cleared) in the date picker and ends editing.
    pub fn pick_date(&mut self, date: Option<NaiveDate>, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        if self.is_saving() {
            return CommitOutcome::Busy;
        }
        let value = date
            .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null);
        let outcome = self.commit_picked(value, now, false);
        self.exit_editing();
        outcome
    }

    /// Closes the overlay and leaves editing.
    pub fn close_dropdown(&mut self) {
        self.dropdown.close();
        if self.editing {
            tracing::debug!(column = %self.column.id, "cell dropdown closed");
            self.exit_editing();
        }
    }

    /// Handles a pointer-down anywhere in the window.
    pub fn pointer_down(&mut self, target: PointerTarget, now: Instant) -> CommitOutcome {
        if self.dropdown.is_open() {
            if self.dropdown.on_pointer_down(target).is_close() {
                self.close_dropdown();
                return CommitOutcome::Exited;
            }
            return CommitOutcome::Ignored;
        }
        match target {
            PointerTarget::Outside => self.outside_click(now),
            _ => CommitOutcome::Ignored,
        }
    }

    /// Pointer-down outside the cell while no overlay is open.
    ///
    /// Text and numeric editors commit their draft. Select and date editors
    /// already saved on pick, so they only check the committed value before
    /// leaving editing.
    pub fn outside_click(&mut self, now: Instant) -> CommitOutcome {
        if !self.editing {
            return CommitOutcome::Ignored;
        }
        match self.editor {
            Some(editor) if editor.is_text_input() => {
                if self.dropdown.is_open() {
                    CommitOutcome::Ignored
                } else {
                    self.commit(now)
                }
            }
            Some(editor) if editor.uses_dropdown() && self.dropdown.is_open() => {
                CommitOutcome::Ignored
            }
            _ => match validate(&self.column, &self.value) {
                Err(err) => {
                    self.set_validation_error(err);
                    CommitOutcome::Rejected(err)
                }
                Ok(()) => {
                    self.exit_editing();
                    CommitOutcome::Exited
                }
            },
        }
    }

    /// Handles a scroll anywhere in the window.
    ///
    /// # Returns
    /// `true` when the scroll closed the overlay (and ended editing).
    pub fn scroll(&mut self, origin: ScrollOrigin) -> bool {
        if self.dropdown.on_scroll(origin).is_close() {
            self.close_dropdown();
            true
        } else {
            false
        }
    }

    /// Advances time; clears the "Saving..." indicator once it has been shown
    /// for the minimum duration.
    ///
    /// # Returns
    /// `true` when the indicator was cleared by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        let elapsed = match buffer.saving_since {
            Some(since) if buffer.is_saving => now.saturating_duration_since(since),
            _ => return false,
        };
        if elapsed < self.saving_min {
            return false;
        }
        buffer.is_saving = false;
        buffer.saving_since = None;
        if !self.editing {
            self.buffer = None;
        }
        true
    }

    /// Reverts an optimistic commit after the save was rejected. No retry.
    pub fn save_failed(&mut self) {
        tracing::warn!(column = %self.column.id, row = ?self.row_id, "cell save failed; reverting");
        self.value = self.pre_edit.clone();
        let draft = self.initial_draft();
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.draft = draft;
            buffer.is_saving = false;
            buffer.saving_since = None;
            buffer.validation_error = None;
        }
        if !self.editing {
            self.buffer = None;
        }
        self.sync_option_models();
    }

    /// Records a persisted value as the new baseline.
    pub fn save_succeeded(&mut self, value: Value) {
        self.row.set_path(&self.column.path, value.clone());
        self.pre_edit = value.clone();
        self.value = value;
        self.sync_option_models();
    }

    /// Applies a value change coming from outside the cell.
    pub fn sync_value(&mut self, value: Value) {
        self.pre_edit = value.clone();
        self.value = value;
        let draft = self.initial_draft();
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.draft = draft;
            buffer.validation_error = None;
        }
        self.sync_option_models();
    }

    fn sync_option_models(&mut self) {
        let committed = self.value.clone();
        match self.options.as_mut() {
            Some(OptionList::Single(select)) => select.set_selected(committed),
            Some(OptionList::Multi(select)) => {
                select.set_selected(committed.as_array().cloned().unwrap_or_default())
            }
            None => {}
        }
    }

    /// Hands a `Save` outcome to `sink`, reverting the cell when it fails.
    ///
    /// # Errors
    /// Propagates the sink's [`SaveError`] after reverting.
    pub fn dispatch_save<S>(&mut self, outcome: &CommitOutcome, sink: &S) -> Result<(), SaveError>
    where
        S: SaveSink + ?Sized,
    {
        let Some(request) = outcome.save_request() else {
            return Ok(());
        };
        if let Err(err) = sink.save(request.clone()) {
            self.save_failed();
            return Err(err);
        }
        Ok(())
    }

    /// Read-mode text for the committed value.
    pub fn display_text(&self, currency: &CurrencyContext) -> String {
        format_display(&self.value, &self.column, currency)
    }

    /// Placeholder of the active editor; the validation message wins.
    pub fn placeholder(&self) -> String {
        if let Some(err) = self.validation_error() {
            return err.to_string();
        }
        if let Some(placeholder) = self.column.meta.placeholder.as_deref() {
            if self.editor == Some(EditorKind::MultilineText) {
                return placeholder.to_string();
            }
        }
        self.editor
            .map(|editor| editor.default_placeholder().to_string())
            .unwrap_or_default()
    }

    /// Trigger label model for select editors.
    pub fn trigger(&self, currency: &CurrencyContext) -> Option<DropdownTrigger> {
        if !self.editor.is_some_and(EditorKind::uses_dropdown) {
            return None;
        }
        let value = if self.validation_error().is_some() {
            String::new()
        } else {
            self.display_text(currency)
        };
        Some(
            DropdownTrigger::new(value)
                .with_placeholder(self.placeholder())
                .open(self.dropdown.is_open()),
        )
    }

    /// Whether display mode should flag an empty required value.
    pub fn show_required_hint(&self) -> bool {
        self.phase() == CellPhase::Display
            && self.column.is_required()
            && is_empty_value(&self.value)
    }
}
