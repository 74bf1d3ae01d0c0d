//! Multi-select option list with select-all / clear over the filtered subset.

use super::filter_by_label;
use crate::constants::{OPTION_HEADER_HEIGHT, OPTION_ROW_HEIGHT, SELECT_MAX_HEIGHT};
use crate::models::SelectOption;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct MultiSelect {
    options: Vec<SelectOption>,
    selected: Vec<Value>,
    search: String,
    show_search: bool,
}

impl MultiSelect {
    pub fn new(options: Vec<SelectOption>, selected: Vec<Value>) -> Self {
        Self {
            options,
            selected,
            search: String::new(),
            show_search: true,
        }
    }

    pub fn with_search(mut self, show_search: bool) -> Self {
        self.show_search = show_search;
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &[Value] {
        &self.selected
    }

    pub fn is_selected(&self, value: &Value) -> bool {
        self.selected.contains(value)
    }

    /// Replaces the selection, e.g. after a rejected or reverted save.
    pub fn set_selected(&mut self, selected: Vec<Value>) {
        self.selected = selected;
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Header text, e.g. `(2 selected)`.
    pub fn header_text(&self) -> String {
        format!("({} selected)", self.selected_count())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn shows_search(&self) -> bool {
        self.show_search
    }

    pub fn filtered_options(&self) -> Vec<&SelectOption> {
        filter_by_label(&self.options, &self.search)
    }

    /// Adds or removes `value`.
    ///
    /// # Returns
    /// The new selection, or `None` for unknown and disabled options. Toggling
    /// never closes the overlay.
    pub fn toggle(&mut self, value: &Value) -> Option<Vec<Value>> {
        let option = self.options.iter().find(|option| &option.value == value)?;
        if option.disabled {
            return None;
        }
        if let Some(idx) = self.selected.iter().position(|selected| selected == value) {
            self.selected.remove(idx);
        } else {
            self.selected.push(value.clone());
        }
        Some(self.selected.clone())
    }

    /// Unions the enabled options of the filtered subset into the selection.
    pub fn select_all(&mut self) -> Vec<Value> {
        let additions: Vec<Value> = self
            .filtered_options()
            .into_iter()
            .filter(|option| !option.disabled)
            .map(|option| option.value.clone())
            .collect();
        for value in additions {
            if !self.selected.contains(&value) {
                self.selected.push(value);
            }
        }
        self.selected.clone()
    }

    /// Removes every filtered option from the selection; others are kept.
    pub fn clear_all(&mut self) -> Vec<Value> {
        let filtered: Vec<Value> = self
            .filtered_options()
            .into_iter()
            .map(|option| option.value.clone())
            .collect();
        self.selected.retain(|value| !filtered.contains(value));
        self.selected.clone()
    }

    /// `Select All` is offered while some enabled filtered option is unselected.
    pub fn select_all_enabled(&self) -> bool {
        let filtered = self.filtered_options();
        let enabled = filtered.iter().filter(|option| !option.disabled).count();
        self.filtered_selected_count(&filtered) != enabled
    }

    /// `Clear` is offered while some filtered option is selected.
    pub fn clear_all_enabled(&self) -> bool {
        self.filtered_selected_count(&self.filtered_options()) > 0
    }

    fn filtered_selected_count(&self, filtered: &[&SelectOption]) -> usize {
        filtered
            .iter()
            .filter(|option| self.selected.contains(&option.value))
            .count()
    }

    /// Overlay height: rows plus the header (and search box) when the list
    /// fits, otherwise `max_height`.
    pub fn overlay_height(&self, max_height: f32) -> f32 {
        let rows = self.filtered_options().len() as f32 * OPTION_ROW_HEIGHT;
        if max_height > 0.0 && rows + 2.0 * OPTION_HEADER_HEIGHT < max_height {
            if self.show_search {
                rows + 2.0 * OPTION_HEADER_HEIGHT
            } else {
                rows + OPTION_HEADER_HEIGHT
            }
        } else {
            max_height
        }
    }

    pub fn default_overlay_height(&self) -> f32 {
        self.overlay_height(SELECT_MAX_HEIGHT)
    }

    pub fn empty_message(&self) -> &'static str {
        "No options found"
    }
}
