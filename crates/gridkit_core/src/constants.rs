//! Shared constants used across gridkit crates.

use std::time::Duration;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Currency code used when the caller supplies none.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Row field used as the identity key when the dataset does not name one.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Minimum time the "Saving..." indicator stays visible after a commit.
pub const SAVING_INDICATOR_MIN: Duration = Duration::from_millis(300);
/// Debounce window for the global search box and column filter inputs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
/// Debounce window for the search box inside option overlays.
pub const OPTION_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Column width used when neither the column nor the sizing state has one.
pub const DEFAULT_COLUMN_SIZE: f32 = 150.0;
/// Lower bound applied to drag-resized columns.
pub const MIN_COLUMN_SIZE: f32 = 20.0;
/// Upper bound applied to drag-resized columns.
pub const MAX_COLUMN_SIZE: f32 = 1000.0;

/// Default overlay width floor.
pub const DROPDOWN_MIN_WIDTH: f32 = 250.0;
/// Default overlay height used for placement decisions.
pub const DROPDOWN_MAX_HEIGHT: f32 = 300.0;
/// Gap between the trigger and the overlay.
pub const DROPDOWN_OFFSET: f32 = 4.0;
/// Margin kept between the overlay and the viewport's left/right edges.
pub const VIEWPORT_MARGIN: f32 = 10.0;
/// Height budget handed to option-list overlays.
pub const SELECT_MAX_HEIGHT: f32 = 320.0;
/// Height of one option row inside an overlay.
pub const OPTION_ROW_HEIGHT: f32 = 40.0;
/// Height of one overlay header item (search box or clear action).
pub const OPTION_HEADER_HEIGHT: f32 = 50.0;
/// Option lists longer than this get a search box.
pub const OPTION_SEARCH_THRESHOLD: usize = 5;

/// Inline message shown for required fields left empty.
pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required";
