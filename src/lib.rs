//! Root crate facade for the gridkit engine and its egui front end.

pub use gridkit_core::{
    analytics, cell, config, constants, dataset, debounce, dropdown, error, format, grid, models,
    AnalyticsClient, AnalyticsConfig, CellPhase, CommitOutcome, CurrencyContext, Dataset,
    Debouncer, EditableCell, GridConfig, GridError, GridOptions, GridView, PinSide, RowRecord,
    SaveRequest, SaveSink,
};

#[cfg(feature = "gui")]
/// Native grid UI and its save worker (feature-gated).
pub use gridkit_gui as gui;
