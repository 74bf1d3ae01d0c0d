//! Overlay geometry: where a dropdown lands relative to its trigger.

use crate::constants::{DROPDOWN_MAX_HEIGHT, DROPDOWN_MIN_WIDTH, DROPDOWN_OFFSET, VIEWPORT_MARGIN};

/// Axis-aligned rectangle in logical pixels, viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Visible window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Page scroll offset added to viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

/// Requested vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    Bottom,
    Top,
    /// Below the trigger unless that would overflow the viewport bottom.
    #[default]
    Auto,
}

/// Overlay sizing and placement knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropdownLayout {
    pub min_width: f32,
    pub max_height: f32,
    pub placement: Placement,
    pub offset: f32,
}

impl Default for DropdownLayout {
    fn default() -> Self {
        Self {
            min_width: DROPDOWN_MIN_WIDTH,
            max_height: DROPDOWN_MAX_HEIGHT,
            placement: Placement::Auto,
            offset: DROPDOWN_OFFSET,
        }
    }
}

impl DropdownLayout {
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }
}

/// Absolute overlay position, computed once when the overlay opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropdownPosition {
    pub top: f32,
    pub left: f32,
    pub width: f32,
}

/// Places an overlay next to `trigger`.
///
/// Vertical: below the trigger by `offset`, or above it (`max_height + offset`
/// higher than the trigger top) for `Top`, and for `Auto` when the bottom
/// placement would overflow `viewport.height`.
/// Horizontal: aligned with the trigger's left edge, pulled back inside the
/// right edge, never closer than the margin to the left edge.
///
/// # Returns
/// The overlay's top-left corner and width (`max(trigger.width, min_width)`).
pub fn compute_position(
    trigger: Rect,
    viewport: Viewport,
    scroll: ScrollOffset,
    layout: DropdownLayout,
) -> DropdownPosition {
    let below = trigger.bottom() + scroll.y + layout.offset;
    let above = trigger.top + scroll.y - layout.max_height - layout.offset;
    let top = match layout.placement {
        Placement::Bottom => below,
        Placement::Top => above,
        Placement::Auto => {
            if trigger.bottom() + layout.max_height + layout.offset > viewport.height {
                above
            } else {
                below
            }
        }
    };

    let mut left = trigger.left + scroll.x;
    if left + layout.min_width > viewport.width {
        left = viewport.width - layout.min_width - VIEWPORT_MARGIN;
    }
    if left < VIEWPORT_MARGIN {
        left = VIEWPORT_MARGIN;
    }

    DropdownPosition {
        top,
        left,
        width: trigger.width.max(layout.min_width),
    }
}
