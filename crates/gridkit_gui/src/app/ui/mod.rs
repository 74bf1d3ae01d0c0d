//! UI panel modules extracted from the main app update loop.

/// Row detail window opened from the detail field.
pub(super) mod detail_window;
/// Header rows, pinned blocks, and body cells.
pub(super) mod grid_panel;
/// Option overlay for select editors.
pub(super) mod overlay;
/// Page navigation footer.
pub(super) mod pagination;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Transient toast notifications.
pub(super) mod toasts;
/// Page size, search, and filter controls.
pub(super) mod toolbar;
