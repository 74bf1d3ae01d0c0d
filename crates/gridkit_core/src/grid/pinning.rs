//! Column pinning state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
    #[default]
    None,
}

impl PinSide {
    pub fn is_pinned(self) -> bool {
        self != Self::None
    }
}

/// Aggregate pin state of a column group's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPinStatus {
    Left,
    Right,
    /// Some children are pinned, but not all to the same side.
    Mixed,
    Unpinned,
}

impl GroupPinStatus {
    pub fn from_sides(sides: impl IntoIterator<Item = PinSide>) -> Self {
        let sides: Vec<PinSide> = sides.into_iter().collect();
        if sides.is_empty() {
            return Self::Unpinned;
        }
        if sides.iter().all(|side| *side == PinSide::Left) {
            Self::Left
        } else if sides.iter().all(|side| *side == PinSide::Right) {
            Self::Right
        } else if sides.iter().any(|side| side.is_pinned()) {
            Self::Mixed
        } else {
            Self::Unpinned
        }
    }
}

/// Ordered pin lists; a column id appears in at most one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPinningState {
    #[serde(default)]
    pub left: Vec<String>,
    #[serde(default)]
    pub right: Vec<String>,
}

impl ColumnPinningState {
    pub fn side_of(&self, column_id: &str) -> PinSide {
        if self.left.iter().any(|id| id == column_id) {
            PinSide::Left
        } else if self.right.iter().any(|id| id == column_id) {
            PinSide::Right
        } else {
            PinSide::None
        }
    }

    /// Moves `column_id` to `side`; pinned columns are appended to the list.
    pub fn pin(&mut self, column_id: &str, side: PinSide) {
        self.left.retain(|id| id != column_id);
        self.right.retain(|id| id != column_id);
        match side {
            PinSide::Left => self.left.push(column_id.to_string()),
            PinSide::Right => self.right.push(column_id.to_string()),
            PinSide::None => {}
        }
    }
}
