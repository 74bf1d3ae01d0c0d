//! Single-select option list.

use super::filter_by_label;
use crate::constants::{OPTION_HEADER_HEIGHT, OPTION_ROW_HEIGHT, SELECT_MAX_HEIGHT};
use crate::models::SelectOption;
use serde_json::Value;

/// Notification emitted by an option list, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEffect {
    /// New selection; `Null` for a cleared single select.
    SelectionChanged(Value),
    /// The overlay should close.
    Close,
}

#[derive(Debug, Clone)]
pub struct SingleSelect {
    options: Vec<SelectOption>,
    selected: Value,
    search: String,
    allow_clear: bool,
    close_on_select: bool,
    show_search: bool,
}

impl SingleSelect {
    pub fn new(options: Vec<SelectOption>, selected: Value) -> Self {
        Self {
            options,
            selected,
            search: String::new(),
            allow_clear: false,
            close_on_select: true,
            show_search: false,
        }
    }

    pub fn with_allow_clear(mut self, allow_clear: bool) -> Self {
        self.allow_clear = allow_clear;
        self
    }

    pub fn with_close_on_select(mut self, close_on_select: bool) -> Self {
        self.close_on_select = close_on_select;
        self
    }

    pub fn with_search(mut self, show_search: bool) -> Self {
        self.show_search = show_search;
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &Value {
        &self.selected
    }

    pub fn is_selected(&self, value: &Value) -> bool {
        !self.selected.is_null() && &self.selected == value
    }

    pub fn set_selected(&mut self, selected: Value) {
        self.selected = selected;
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == self.selected)
            .map(|option| option.label.as_str())
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

    /// The clear action is offered only when allowed and something is selected.
    pub fn shows_clear(&self) -> bool {
        self.allow_clear && !self.selected.is_null()
    }

    pub fn filtered_options(&self) -> Vec<&SelectOption> {
        filter_by_label(&self.options, &self.search)
    }

    /// Picks `value`.
    ///
    /// # Returns
    /// `SelectionChanged(value)` followed by one `Close` when `close_on_select`
    /// is set. Unknown and disabled options produce no effects.
    pub fn select(&mut self, value: &Value) -> Vec<SelectEffect> {
        let Some(option) = self.options.iter().find(|option| &option.value == value) else {
            return Vec::new();
        };
        if option.disabled {
            return Vec::new();
        }
        self.selected = option.value.clone();
        self.finish(SelectEffect::SelectionChanged(self.selected.clone()))
    }

    /// Clears the selection when clearing is allowed.
    pub fn clear(&mut self) -> Vec<SelectEffect> {
        if !self.allow_clear {
            return Vec::new();
        }
        self.selected = Value::Null;
        self.finish(SelectEffect::SelectionChanged(Value::Null))
    }

    fn finish(&self, changed: SelectEffect) -> Vec<SelectEffect> {
        let mut effects = vec![changed];
        if self.close_on_select {
            effects.push(SelectEffect::Close);
        }
        effects
    }

    /// Overlay height for the current filter.
    ///
    /// Rows are 40 px; the clear action and the search box add 50 px each.
    /// A list that does not fit uses `max_height`, trimmed by 35 px when
    /// exactly one header item is shown.
    pub fn overlay_height(&self, max_height: f32) -> f32 {
        let header_items = usize::from(self.show_search) + usize::from(self.shows_clear());
        let header = header_items as f32 * OPTION_HEADER_HEIGHT;
        let rows = self.filtered_options().len() as f32 * OPTION_ROW_HEIGHT;
        if max_height > 0.0 && rows < max_height {
            rows + header
        } else if header_items == 1 {
            max_height - 35.0
        } else {
            max_height
        }
    }

    pub fn default_overlay_height(&self) -> f32 {
        self.overlay_height(SELECT_MAX_HEIGHT)
    }

    pub fn empty_message(&self) -> &'static str {
        if self.search.is_empty() {
            "No options available"
        } else {
            "No matching options found"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stages() -> Vec<SelectOption> {
        vec![
            SelectOption::new("lead", "Lead"),
            SelectOption::new("won", "Closed Won"),
            SelectOption::new("lost", "Closed Lost").disabled(),
        ]
    }

    #[test]
    fn select_emits_change_then_exactly_one_close() {
        let mut select = SingleSelect::new(stages(), Value::Null);
        let effects = select.select(&json!("won"));
        assert_eq!(
            effects,
            vec![
                SelectEffect::SelectionChanged(json!("won")),
                SelectEffect::Close
            ]
        );
        assert_eq!(select.selected_label(), Some("Closed Won"));
    }

    #[test]
    fn select_without_close_keeps_overlay() {
        let mut select = SingleSelect::new(stages(), Value::Null).with_close_on_select(false);
        assert_eq!(
            select.select(&json!("lead")),
            vec![SelectEffect::SelectionChanged(json!("lead"))]
        );
    }

    #[test]
    fn disabled_and_unknown_options_are_ignored() {
        let mut select = SingleSelect::new(stages(), json!("lead"));
        assert!(select.select(&json!("lost")).is_empty());
        assert!(select.select(&json!("nope")).is_empty());
        assert_eq!(select.selected(), &json!("lead"));
    }

    #[test]
    fn clear_requires_allow_clear() {
        let mut locked = SingleSelect::new(stages(), json!("lead"));
        assert!(locked.clear().is_empty());

        let mut clearable = SingleSelect::new(stages(), json!("lead")).with_allow_clear(true);
        assert!(clearable.shows_clear());
        assert_eq!(
            clearable.clear(),
            vec![
                SelectEffect::SelectionChanged(Value::Null),
                SelectEffect::Close
            ]
        );
        assert!(!clearable.shows_clear());
    }

    #[test]
    fn search_filters_by_label_case_insensitively() {
        let mut select = SingleSelect::new(stages(), Value::Null).with_search(true);
        select.set_search("CLOSED");
        let labels: Vec<_> = select
            .filtered_options()
            .iter()
            .map(|option| option.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Closed Won", "Closed Lost"]);

        select.set_search("zzz");
        assert!(select.filtered_options().is_empty());
        assert_eq!(select.empty_message(), "No matching options found");

        select.set_search("   ");
        assert_eq!(select.filtered_options().len(), 3);
    }

    #[test]
    fn overlay_height_follows_rows_and_header_items() {
        let plain = SingleSelect::new(stages(), Value::Null);
        assert_eq!(plain.overlay_height(320.0), 120.0);

        let both = SingleSelect::new(stages(), json!("lead"))
            .with_allow_clear(true)
            .with_search(true);
        assert_eq!(both.overlay_height(320.0), 220.0);

        let many: Vec<_> = (0..20)
            .map(|i| SelectOption::new(i, format!("Option {i}")))
            .collect();
        let searchable = SingleSelect::new(many.clone(), Value::Null).with_search(true);
        assert_eq!(searchable.overlay_height(320.0), 285.0);
        let bare = SingleSelect::new(many, Value::Null);
        assert_eq!(bare.overlay_height(320.0), 320.0);
    }
}
