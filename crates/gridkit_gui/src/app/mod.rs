//! egui application shell for the editable grid.

mod interaction;
mod state_feedback;
mod state_ops;
mod style;
mod ui;

use crate::backend::{spawn_backend, BackendHandle, RowStore, WorkerSettings};
use eframe::egui;
use gridkit_core::analytics::{events, AnalyticsClient, AnalyticsConfig, TracingSink};
use gridkit_core::constants::{DEFAULT_CURRENCY, OPTION_SEARCH_DEBOUNCE};
use gridkit_core::{
    CurrencyContext, Dataset, Debouncer, EditableCell, GridConfig, GridError, GridOptions,
    GridView,
};
use interaction::ActiveRects;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use style::*;
use tracing::{debug, info};

/// egui application shell for the grid.
///
/// Owns the view and the cells being edited or saved, and talks to the save
/// worker over channels so the `update` loop never blocks on persistence.
pub(crate) struct GridApp {
    backend: BackendHandle,
    view: GridView,
    detail_field: Option<String>,
    currency: CurrencyContext,
    empty_placeholder: String,
    saving_indicator: Duration,
    /// Cells that are editing or still showing "Saving...".
    cells: HashMap<CellAddress, EditableCell>,
    /// The one cell allowed to be in the editing phase.
    active: Option<CellAddress>,
    active_rects: ActiveRects,
    focus_editor: bool,
    pending_saves: HashMap<CellAddress, PendingSave>,
    search_input: String,
    search_debounce: Debouncer<String>,
    global_filter_input: String,
    global_filter_debounce: Debouncer<String>,
    show_column_filters: bool,
    filter_inputs: HashMap<String, String>,
    filter_debounce: HashMap<String, Debouncer<String>>,
    option_search_input: String,
    option_search_debounce: Debouncer<String>,
    detail_row: Option<String>,
    analytics: AnalyticsClient,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    style_applied: bool,
}

/// Identity of one body cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CellAddress {
    pub(crate) row_id: String,
    pub(crate) column_id: String,
}

impl CellAddress {
    pub(crate) fn new(row_id: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            column_id: column_id.into(),
        }
    }
}

/// Saves sent to the worker for one cell and the last value it confirmed.
#[derive(Debug, Clone, PartialEq)]
struct PendingSave {
    confirmed: Value,
    in_flight: usize,
}

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

struct ToastMessage {
    text: String,
    expires_at: Instant,
}

const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;
/// Repaint cadence while a "Saving..." indicator is visible.
const SAVING_REPAINT: Duration = Duration::from_millis(50);
#[doc = "Default initial window size for startup."]
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1280.0, 760.0];
#[doc = "Minimum enforced window size to keep toolbar and footer usable."]
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [900.0, 560.0];

impl GridApp {
    /// Builds the app and spawns the save worker over a copy of the rows.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidConfig`] when the dataset's columns cannot
    /// back a grid view.
    pub(crate) fn new(config: GridConfig, dataset: Dataset) -> Result<Self, GridError> {
        let backend = spawn_backend(
            RowStore::new(dataset.clone()),
            WorkerSettings::from_config(&config),
        );
        let analytics = AnalyticsClient::new(
            AnalyticsConfig::from_grid_config(&config),
            Arc::new(TracingSink),
        );
        let mut app = Self::with_backend(&config, dataset, backend, analytics)?;
        let mut props = Map::new();
        props.insert("page".into(), Value::String("grid".into()));
        app.track(events::PAGE_VIEW, props);
        Ok(app)
    }

    pub(crate) fn with_backend(
        config: &GridConfig,
        dataset: Dataset,
        backend: BackendHandle,
        analytics: AnalyticsClient,
    ) -> Result<Self, GridError> {
        let options = GridOptions::from_config(config).with_id_field(dataset.id_field.clone());
        let mut view = GridView::new(dataset.columns, options)?;
        view.set_rows(dataset.rows);

        // An explicit currency setting overrides the dataset's own code.
        let currency = if config.currency.eq_ignore_ascii_case(DEFAULT_CURRENCY) {
            dataset.currency
        } else {
            CurrencyContext {
                currency: config.currency.to_ascii_uppercase(),
                ..dataset.currency
            }
        };

        info!(
            columns = view.columns().len(),
            rows = view.rows().len(),
            currency = %currency.currency,
            "grid ready"
        );

        Ok(Self {
            backend,
            view,
            detail_field: dataset.detail_field,
            currency,
            empty_placeholder: dataset.empty_placeholder,
            saving_indicator: config.saving_indicator(),
            cells: HashMap::new(),
            active: None,
            active_rects: ActiveRects::default(),
            focus_editor: false,
            pending_saves: HashMap::new(),
            search_input: String::new(),
            search_debounce: Debouncer::new(config.search_debounce()),
            global_filter_input: String::new(),
            global_filter_debounce: Debouncer::new(config.search_debounce()),
            show_column_filters: false,
            filter_inputs: HashMap::new(),
            filter_debounce: HashMap::new(),
            option_search_input: String::new(),
            option_search_debounce: Debouncer::new(OPTION_SEARCH_DEBOUNCE),
            detail_row: None,
            analytics,
            status: None,
            toasts: VecDeque::new(),
            style_applied: false,
        })
    }

    fn track(&mut self, name: &str, properties: Map<String, Value>) {
        if let Err(err) = self.analytics.track(name, properties) {
            debug!(event = name, error = %err, "analytics event dropped");
        }
    }

    /// Time until something on screen changes without input.
    fn next_repaint(&self, now: Instant) -> Option<Duration> {
        let mut next = [
            self.search_debounce.remaining(now),
            self.global_filter_debounce.remaining(now),
            self.option_search_debounce.remaining(now),
        ]
        .into_iter()
        .flatten()
        .chain(
            self.filter_debounce
                .values()
                .filter_map(|debouncer| debouncer.remaining(now)),
        )
        .min();
        if self.cells.values().any(EditableCell::is_saving) {
            next = Some(next.map_or(SAVING_REPAINT, |d| d.min(SAVING_REPAINT)));
        }
        let expiries = self
            .status
            .iter()
            .map(|status| status.expires_at)
            .chain(self.toasts.iter().map(|toast| toast.expires_at))
            .map(|at| at.saturating_duration_since(now))
            .min();
        match (next, expiries) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);

        let now = Instant::now();
        if let Some(status) = &self.status {
            if now >= status.expires_at {
                self.status = None;
            }
        }
        while self
            .toasts
            .front()
            .map(|toast| now >= toast.expires_at)
            .unwrap_or(false)
        {
            self.toasts.pop_front();
        }

        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
        }

        self.route_input(ctx, now);
        self.poll_debouncers(now);
        self.tick_cells(now);

        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        self.render_pagination(ctx);
        self.render_grid(ctx);
        self.render_dropdown_overlay(ctx);
        self.render_detail_window(ctx);
        self.render_toasts(ctx);

        if let Some(after) = self.next_repaint(Instant::now()) {
            ctx.request_repaint_after(after.max(Duration::from_millis(1)));
        }
    }
}

#[cfg(test)]
mod tests;
