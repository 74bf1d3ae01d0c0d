//! Core engine for gridkit (columns, cells, dropdowns, grid view).
//!
//! Everything in this crate is headless: callers feed it measured geometry,
//! input events, and the current [`std::time::Instant`], and render whatever
//! state it reports back.

/// Injectable analytics client and sinks.
pub mod analytics;
/// Editable cell state machine, editors, and validation.
pub mod cell;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants (timings, geometry, page sizes).
pub mod constants;
/// Dataset files (columns plus rows) and the built-in demo dataset.
pub mod dataset;
/// Single-timer debouncing for search inputs.
pub mod debounce;
/// Overlay geometry, dismissal, and option-list models.
pub mod dropdown;
/// Engine error types.
pub mod error;
/// Read-mode display formatting.
pub mod format;
/// Grid view: filtering, sorting, pagination, pinning, headers.
pub mod grid;
/// Column configuration and row records.
pub mod models;

pub use analytics::{AnalyticsClient, AnalyticsConfig};
pub use cell::{CellPhase, CommitOutcome, EditableCell, SaveRequest, SaveSink};
pub use config::GridConfig;
pub use dataset::Dataset;
pub use debounce::Debouncer;
pub use error::{AnalyticsError, GridError, SaveError, ValidationError};
pub use format::CurrencyContext;
pub use grid::{GridOptions, GridView, PinSide};
pub use models::{ColumnConfig, Formatter, RowRecord, SelectOption};
