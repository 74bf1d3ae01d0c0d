//! Input classification used to decide whether an open overlay survives.

/// Where a pointer-down landed relative to an editing cell and its overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The element that opened the overlay.
    Trigger,
    /// Inside the overlay itself.
    Overlay,
    /// Inside the cell, outside any trigger.
    InsideCell,
    /// Anywhere else.
    Outside,
}

impl PointerTarget {
    pub fn keeps_overlay(self) -> bool {
        matches!(self, Self::Trigger | Self::Overlay)
    }
}

/// Which element a scroll event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrigin {
    Overlay,
    Trigger,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissDecision {
    Keep,
    Close,
}

impl DismissDecision {
    pub fn is_close(self) -> bool {
        self == Self::Close
    }
}
