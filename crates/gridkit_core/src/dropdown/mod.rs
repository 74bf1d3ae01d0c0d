//! Portal-style dropdown primitives.
//!
//! An overlay is opened in two phases: `request_open` marks it as measuring,
//! and the first `place` call after the trigger has been laid out fixes its
//! position. The position is never recomputed while the overlay stays open;
//! any scroll outside the overlay closes it instead.

pub mod dismiss;
pub mod multi;
pub mod position;
pub mod single;
pub mod trigger;

pub use dismiss::{DismissDecision, PointerTarget, ScrollOrigin};
pub use multi::MultiSelect;
pub use position::{
    compute_position, DropdownLayout, DropdownPosition, Placement, Rect, ScrollOffset, Viewport,
};
pub use single::{SelectEffect, SingleSelect};
pub use trigger::{DropdownTrigger, TriggerKey};

use crate::models::SelectOption;

/// Lifecycle of one overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    /// Open requested; waiting for the trigger's measured rect.
    Measuring,
    Open(DropdownPosition),
}

/// Open/closed state plus the one-time measured position of an overlay.
#[derive(Debug, Clone, Default)]
pub struct PortalDropdown {
    state: OverlayState,
    layout: DropdownLayout,
}

impl PortalDropdown {
    pub fn new(layout: DropdownLayout) -> Self {
        Self {
            state: OverlayState::Closed,
            layout,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn layout(&self) -> DropdownLayout {
        self.layout
    }

    /// Overrides the height used for placement, e.g. from an option list.
    pub fn set_max_height(&mut self, max_height: f32) {
        self.layout.max_height = max_height;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, OverlayState::Closed)
    }

    pub fn position(&self) -> Option<DropdownPosition> {
        match self.state {
            OverlayState::Open(position) => Some(position),
            _ => None,
        }
    }

    /// Marks the overlay as wanting to open. No-op when already open.
    pub fn request_open(&mut self) {
        if matches!(self.state, OverlayState::Closed) {
            tracing::debug!("dropdown measuring");
            self.state = OverlayState::Measuring;
        }
    }

    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("dropdown closed");
        }
        self.state = OverlayState::Closed;
    }

    /// Flips between closed and measuring.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.request_open();
        }
    }

    /// Resolves a pending open against the measured trigger rect.
    ///
    /// # Returns
    /// The overlay position, or `None` while closed. An already-open overlay
    /// keeps its original position.
    pub fn place(
        &mut self,
        trigger: Rect,
        viewport: Viewport,
        scroll: ScrollOffset,
    ) -> Option<DropdownPosition> {
        match self.state {
            OverlayState::Closed => None,
            OverlayState::Open(position) => Some(position),
            OverlayState::Measuring => {
                let position = compute_position(trigger, viewport, scroll, self.layout);
                tracing::debug!(
                    top = position.top,
                    left = position.left,
                    width = position.width,
                    "dropdown positioned"
                );
                self.state = OverlayState::Open(position);
                Some(position)
            }
        }
    }

    /// Opens and positions in one step when the trigger rect is already known.
    pub fn open(&mut self, trigger: Rect, viewport: Viewport, scroll: ScrollOffset) -> DropdownPosition {
        self.request_open();
        self.place(trigger, viewport, scroll)
            .unwrap_or_else(|| compute_position(trigger, viewport, scroll, self.layout))
    }

    pub fn on_pointer_down(&self, target: PointerTarget) -> DismissDecision {
        if !self.is_open() || target.keeps_overlay() {
            DismissDecision::Keep
        } else {
            DismissDecision::Close
        }
    }

    pub fn on_escape(&self) -> DismissDecision {
        if self.is_open() {
            DismissDecision::Close
        } else {
            DismissDecision::Keep
        }
    }

    pub fn on_scroll(&self, origin: ScrollOrigin) -> DismissDecision {
        match origin {
            _ if !self.is_open() => DismissDecision::Keep,
            ScrollOrigin::Overlay | ScrollOrigin::Trigger => DismissDecision::Keep,
            ScrollOrigin::Elsewhere => DismissDecision::Close,
        }
    }
}

/// Case-insensitive label filter shared by the option lists.
///
/// A blank (whitespace-only) search shows every option.
pub(crate) fn filter_by_label<'a>(options: &'a [SelectOption], search: &str) -> Vec<&'a SelectOption> {
    if search.trim().is_empty() {
        return options.iter().collect();
    }
    let needle = search.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 30.0)
    }

    #[test]
    fn open_is_two_phase_and_never_repositions() {
        let mut dropdown = PortalDropdown::default();
        dropdown.request_open();
        assert_eq!(dropdown.state(), OverlayState::Measuring);
        assert!(dropdown.is_open());
        assert!(dropdown.position().is_none());

        let viewport = Viewport::new(1000.0, 800.0);
        let first = dropdown
            .place(trigger(), viewport, ScrollOffset::default())
            .expect("placed");
        let moved = Rect::new(400.0, 600.0, 200.0, 30.0);
        let second = dropdown
            .place(moved, viewport, ScrollOffset::default())
            .expect("still open");
        assert_eq!(first, second);
    }

    #[test]
    fn pointer_inside_trigger_or_overlay_keeps_overlay() {
        let mut dropdown = PortalDropdown::default();
        dropdown.open(trigger(), Viewport::new(1000.0, 800.0), ScrollOffset::default());
        assert_eq!(dropdown.on_pointer_down(PointerTarget::Trigger), DismissDecision::Keep);
        assert_eq!(dropdown.on_pointer_down(PointerTarget::Overlay), DismissDecision::Keep);
        assert_eq!(dropdown.on_pointer_down(PointerTarget::Outside), DismissDecision::Close);
        assert_eq!(dropdown.on_pointer_down(PointerTarget::InsideCell), DismissDecision::Close);
    }

    #[test]
    fn escape_and_external_scroll_close() {
        let mut dropdown = PortalDropdown::default();
        assert_eq!(dropdown.on_escape(), DismissDecision::Keep);
        dropdown.open(trigger(), Viewport::new(1000.0, 800.0), ScrollOffset::default());
        assert!(dropdown.on_escape().is_close());
        assert_eq!(dropdown.on_scroll(ScrollOrigin::Overlay), DismissDecision::Keep);
        assert_eq!(dropdown.on_scroll(ScrollOrigin::Trigger), DismissDecision::Keep);
        assert!(dropdown.on_scroll(ScrollOrigin::Elsewhere).is_close());

        dropdown.close();
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.on_scroll(ScrollOrigin::Elsewhere), DismissDecision::Keep);
    }

    #[test]
    fn toggle_flips_between_closed_and_measuring() {
        let mut dropdown = PortalDropdown::default();
        dropdown.toggle();
        assert_eq!(dropdown.state(), OverlayState::Measuring);
        dropdown.toggle();
        assert_eq!(dropdown.state(), OverlayState::Closed);
    }
}
