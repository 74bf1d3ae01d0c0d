//! Header row construction, including the split of groups whose children are
//! pinned to different sides.

use super::pinning::PinSide;
use crate::models::ColumnConfig;
use std::collections::{HashMap, HashSet};

/// Background treatment for a cell or header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnShade {
    #[default]
    Editable,
    /// Gray background marking read-only data.
    ReadOnly,
}

impl ColumnShade {
    pub fn for_column(column: &ColumnConfig) -> Self {
        if column.editable {
            Self::Editable
        } else {
            Self::ReadOnly
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderKind {
    Leaf { column_id: String },
    /// A group whose children all live in one pin section.
    Group { group: String },
    /// One section's slice of a group split across pin sections.
    VirtualGroup { group: String, side: PinSide },
    /// Fills the group row above an ungrouped leaf.
    Placeholder { column_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub kind: HeaderKind,
    pub colspan: usize,
    pub width: f32,
    pub side: PinSide,
    /// Sticky offset from the pinned edge; `None` for unpinned cells.
    pub sticky_offset: Option<f32>,
    pub shade: ColumnShade,
}

impl HeaderCell {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, HeaderKind::Leaf { .. })
    }
}

/// One leaf column as laid out by the view.
#[derive(Debug, Clone, Copy)]
pub struct LeafLayout<'a> {
    pub column: &'a ColumnConfig,
    pub side: PinSide,
    pub width: f32,
    pub sticky_offset: Option<f32>,
}

/// Builds the header rows for leaves given in display order.
///
/// # Returns
/// The group row followed by the leaf row when any leaf has a group,
/// otherwise just the leaf row.
pub fn build_header_rows(leaves: &[LeafLayout<'_>]) -> Vec<Vec<HeaderCell>> {
    let leaf_row: Vec<HeaderCell> = leaves.iter().map(leaf_cell).collect();
    if leaves.iter().all(|leaf| leaf.column.group.is_none()) {
        return vec![leaf_row];
    }
    vec![group_row(leaves), leaf_row]
}

fn leaf_cell(leaf: &LeafLayout<'_>) -> HeaderCell {
    HeaderCell {
        id: leaf.column.id.clone(),
        label: leaf.column.header_label().to_string(),
        kind: HeaderKind::Leaf {
            column_id: leaf.column.id.clone(),
        },
        colspan: 1,
        width: leaf.width,
        side: leaf.side,
        sticky_offset: leaf.sticky_offset,
        shade: ColumnShade::for_column(leaf.column),
    }
}

fn group_row(leaves: &[LeafLayout<'_>]) -> Vec<HeaderCell> {
    let mut sections: HashMap<&str, HashSet<PinSide>> = HashMap::new();
    for leaf in leaves {
        if let Some(group) = leaf.column.group.as_deref() {
            sections.entry(group).or_default().insert(leaf.side);
        }
    }

    let mut seen_ids: HashMap<String, usize> = HashMap::new();
    let mut row = Vec::new();
    for run in runs(leaves) {
        let first = &run[0];
        let Some(group) = first.column.group.as_deref() else {
            row.extend(run.iter().map(placeholder_cell));
            continue;
        };
        let split = sections.get(group).is_some_and(|sides| sides.len() > 1);
        let (base_id, kind) = if split {
            (
                format!("{group}-{}", segment_suffix(first.side)),
                HeaderKind::VirtualGroup {
                    group: group.to_string(),
                    side: first.side,
                },
            )
        } else {
            (
                group.to_string(),
                HeaderKind::Group {
                    group: group.to_string(),
                },
            )
        };
        let count = seen_ids.entry(base_id.clone()).or_insert(0);
        *count += 1;
        let id = if *count == 1 {
            base_id
        } else {
            format!("{base_id}-{count}")
        };
        row.push(group_cell(id, group, kind, run));
    }
    row
}

/// Splits leaves into maximal runs sharing a pin section and group.
fn runs<'l, 'a>(leaves: &'l [LeafLayout<'a>]) -> Vec<&'l [LeafLayout<'a>]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for index in 1..=leaves.len() {
        let boundary = index == leaves.len()
            || leaves[index].side != leaves[start].side
            || leaves[index].column.group != leaves[start].column.group;
        if boundary {
            runs.push(&leaves[start..index]);
            start = index;
        }
    }
    runs
}

fn segment_suffix(side: PinSide) -> &'static str {
    match side {
        PinSide::Left => "left-pinned",
        PinSide::None => "unpinned",
        PinSide::Right => "right-pinned",
    }
}

fn group_cell(id: String, group: &str, kind: HeaderKind, run: &[LeafLayout<'_>]) -> HeaderCell {
    let side = run[0].side;
    let sticky_offset = if side.is_pinned() {
        run.iter()
            .filter_map(|leaf| leaf.sticky_offset)
            .min_by(f32::total_cmp)
    } else {
        None
    };
    let shade = if run.iter().any(|leaf| !leaf.column.editable) {
        ColumnShade::ReadOnly
    } else {
        ColumnShade::Editable
    };
    HeaderCell {
        id,
        label: group.to_string(),
        kind,
        colspan: run.len(),
        width: run.iter().map(|leaf| leaf.width).sum(),
        side,
        sticky_offset,
        shade,
    }
}

fn placeholder_cell(leaf: &LeafLayout<'_>) -> HeaderCell {
    HeaderCell {
        id: format!("{}-placeholder", leaf.column.id),
        label: String::new(),
        kind: HeaderKind::Placeholder {
            column_id: leaf.column.id.clone(),
        },
        colspan: 1,
        width: leaf.width,
        side: leaf.side,
        sticky_offset: leaf.sticky_offset,
        shade: ColumnShade::for_column(leaf.column),
    }
}
