//! Pure helpers that translate egui geometry into the engine's input types.

use eframe::egui;
use gridkit_core::dropdown::{PointerTarget, Rect, ScrollOrigin, Viewport};

/// Screen rects recorded for the editing cell during the last frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(super) struct ActiveRects {
    pub(super) cell: Option<egui::Rect>,
    pub(super) trigger: Option<egui::Rect>,
    pub(super) overlay: Option<egui::Rect>,
}

impl ActiveRects {
    fn in_overlay(&self, pos: egui::Pos2, over_popup: bool) -> bool {
        over_popup || self.overlay.is_some_and(|rect| rect.contains(pos))
    }

    fn in_trigger(&self, pos: egui::Pos2) -> bool {
        self.trigger.is_some_and(|rect| rect.contains(pos))
    }
}

/// Classifies a pointer-down at `pos`.
///
/// `over_popup` is true when a foreground layer (the overlay or a date
/// picker popup) sits under the pointer.
pub(super) fn classify_pointer(
    pos: egui::Pos2,
    rects: &ActiveRects,
    over_popup: bool,
) -> PointerTarget {
    if rects.in_overlay(pos, over_popup) {
        PointerTarget::Overlay
    } else if rects.in_trigger(pos) {
        PointerTarget::Trigger
    } else if rects.cell.is_some_and(|rect| rect.contains(pos)) {
        PointerTarget::InsideCell
    } else {
        PointerTarget::Outside
    }
}

/// Classifies a scroll by where the pointer hovered when it happened.
pub(super) fn classify_scroll(
    hover: Option<egui::Pos2>,
    rects: &ActiveRects,
    over_popup: bool,
) -> ScrollOrigin {
    match hover {
        Some(pos) if rects.in_overlay(pos, over_popup) => ScrollOrigin::Overlay,
        Some(pos) if rects.in_trigger(pos) => ScrollOrigin::Trigger,
        _ => ScrollOrigin::Elsewhere,
    }
}

pub(super) fn is_popup_layer(layer: egui::LayerId) -> bool {
    matches!(layer.order, egui::Order::Foreground | egui::Order::Tooltip)
}

pub(super) fn to_core_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(super) fn to_viewport(screen: egui::Rect) -> Viewport {
    Viewport::new(screen.width(), screen.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> ActiveRects {
        ActiveRects {
            cell: Some(egui::Rect::from_min_size(
                egui::pos2(100.0, 100.0),
                egui::vec2(200.0, 36.0),
            )),
            trigger: Some(egui::Rect::from_min_size(
                egui::pos2(104.0, 104.0),
                egui::vec2(150.0, 28.0),
            )),
            overlay: Some(egui::Rect::from_min_size(
                egui::pos2(104.0, 140.0),
                egui::vec2(250.0, 200.0),
            )),
        }
    }

    #[test]
    fn pointer_classification_prefers_overlay_then_trigger_then_cell() {
        let rects = rects();
        assert_eq!(
            classify_pointer(egui::pos2(120.0, 200.0), &rects, false),
            PointerTarget::Overlay
        );
        assert_eq!(
            classify_pointer(egui::pos2(120.0, 110.0), &rects, false),
            PointerTarget::Trigger
        );
        assert_eq!(
            classify_pointer(egui::pos2(280.0, 110.0), &rects, false),
            PointerTarget::InsideCell
        );
        assert_eq!(
            classify_pointer(egui::pos2(600.0, 600.0), &rects, false),
            PointerTarget::Outside
        );
        assert_eq!(
            classify_pointer(egui::pos2(600.0, 600.0), &rects, true),
            PointerTarget::Overlay
        );
    }

    #[test]
    fn scroll_classification_uses_hover_position() {
        let rects = rects();
        assert_eq!(
            classify_scroll(Some(egui::pos2(120.0, 200.0)), &rects, false),
            ScrollOrigin::Overlay
        );
        assert_eq!(
            classify_scroll(Some(egui::pos2(120.0, 110.0)), &rects, false),
            ScrollOrigin::Trigger
        );
        assert_eq!(classify_scroll(None, &rects, false), ScrollOrigin::Elsewhere);
    }

    #[test]
    fn geometry_converts_to_engine_types() {
        let rect = to_core_rect(egui::Rect::from_min_size(
            egui::pos2(10.0, 20.0),
            egui::vec2(30.0, 40.0),
        ));
        assert_eq!(rect, Rect::new(10.0, 20.0, 30.0, 40.0));
        let viewport = to_viewport(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(800.0, 600.0),
        ));
        assert_eq!(viewport, Viewport::new(800.0, 600.0));
    }
}
