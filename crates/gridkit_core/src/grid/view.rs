//! The headless grid view: derived sort/filter/page/pin/size state over
//! caller-owned rows.

use super::filter::{cell_text, global_search_matches, rank_item, raw_cell_text};
use super::headers::{build_header_rows, ColumnShade, HeaderCell, LeafLayout};
use super::pagination::Pagination;
use super::pinning::{ColumnPinningState, GroupPinStatus, PinSide};
use super::sort::{compare_values, next_sort, SortDirection, SortState};
use crate::config::GridConfig;
use crate::constants::{
    DEFAULT_COLUMN_SIZE, DEFAULT_ID_FIELD, DEFAULT_PAGE_SIZE, MAX_COLUMN_SIZE, MIN_COLUMN_SIZE,
};
use crate::error::GridError;
use crate::format::format_count;
use crate::models::{ColumnConfig, RowRecord};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

static NULL: Value = Value::Null;

/// Construction options for [`GridView`].
#[derive(Debug, Clone)]
pub struct GridOptions {
    pub id_field: String,
    pub page_size: usize,
    pub enable_pinning: bool,
    pub pinning: ColumnPinningState,
    pub sizing: HashMap<String, f32>,
    pub default_column_size: f32,
    pub min_column_size: f32,
    pub max_column_size: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            enable_pinning: true,
            pinning: ColumnPinningState::default(),
            sizing: HashMap::new(),
            default_column_size: DEFAULT_COLUMN_SIZE,
            min_column_size: MIN_COLUMN_SIZE,
            max_column_size: MAX_COLUMN_SIZE,
        }
    }
}

impl GridOptions {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            page_size: config.page_size,
            enable_pinning: config.enable_pinning,
            ..Self::default()
        }
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_pinning(mut self, pinning: ColumnPinningState) -> Self {
        self.pinning = pinning;
        self
    }

    pub fn without_pinning(mut self) -> Self {
        self.enable_pinning = false;
        self
    }
}

/// Where a column renders horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnPlacement {
    Flow,
    /// Sticky at `offset` px from the left edge.
    Left { offset: f32 },
    /// Sticky at `offset` px from the right edge.
    Right { offset: f32 },
}

impl ColumnPlacement {
    pub fn side(self) -> PinSide {
        match self {
            Self::Flow => PinSide::None,
            Self::Left { .. } => PinSide::Left,
            Self::Right { .. } => PinSide::Right,
        }
    }

    pub fn sticky_offset(self) -> Option<f32> {
        match self {
            Self::Flow => None,
            Self::Left { offset } | Self::Right { offset } => Some(offset),
        }
    }
}

/// Visual treatment of a body cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub shade: ColumnShade,
    pub placement: ColumnPlacement,
    pub width: f32,
}

impl CellStyle {
    /// Background to paint; `None` inherits the row background.
    ///
    /// Pinned cells are always opaque so scrolled content cannot show through.
    pub fn background(&self) -> Option<ColumnShade> {
        match (self.shade, self.placement) {
            (ColumnShade::ReadOnly, _) => Some(ColumnShade::ReadOnly),
            (ColumnShade::Editable, ColumnPlacement::Flow) => None,
            (ColumnShade::Editable, _) => Some(ColumnShade::Editable),
        }
    }
}

/// A row that survived filtering, with its index into the caller's rows.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub index: usize,
    pub row: &'a RowRecord,
}

#[derive(Debug, Clone)]
pub struct GridView {
    columns: Vec<ColumnConfig>,
    id_field: String,
    enable_pinning: bool,
    rows: Vec<RowRecord>,
    search_term: String,
    column_filters: Vec<(String, String)>,
    global_filter: String,
    sorting: Option<SortState>,
    pagination: Pagination,
    pinning: ColumnPinningState,
    sizing: HashMap<String, f32>,
    default_column_size: f32,
    min_column_size: f32,
    max_column_size: f32,
    visible: Vec<usize>,
}

impl GridView {
    /// Creates an empty view over `columns`.
    ///
    /// # Errors
    /// [`GridError::InvalidConfig`] for blank or duplicate column ids or an
    /// inverted size range.
    pub fn new(columns: Vec<ColumnConfig>, options: GridOptions) -> Result<Self, GridError> {
        let mut ids = HashSet::new();
        for column in &columns {
            if column.id.trim().is_empty() {
                return Err(GridError::InvalidConfig("column id must not be blank".into()));
            }
            if !ids.insert(column.id.as_str()) {
                return Err(GridError::InvalidConfig(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }
        if options.min_column_size > options.max_column_size {
            return Err(GridError::InvalidConfig(format!(
                "min column size {} exceeds max {}",
                options.min_column_size, options.max_column_size
            )));
        }

        let mut pinning = options.pinning;
        pinning.left.retain(|id| ids.contains(id.as_str()));
        pinning.right.retain(|id| ids.contains(id.as_str()));

        Ok(Self {
            columns,
            id_field: options.id_field,
            enable_pinning: options.enable_pinning,
            rows: Vec::new(),
            search_term: String::new(),
            column_filters: Vec::new(),
            global_filter: String::new(),
            sorting: None,
            pagination: Pagination::new(options.page_size),
            pinning,
            sizing: options.sizing,
            default_column_size: options.default_column_size,
            min_column_size: options.min_column_size,
            max_column_size: options.max_column_size,
            visible: Vec::new(),
        })
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Result<&ColumnConfig, GridError> {
        self.columns
            .iter()
            .find(|column| column.id == column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowRecord> {
        self.rows.get(index)
    }

    pub fn row_by_id(&self, row_id: &str) -> Option<&RowRecord> {
        self.position_of(row_id).map(|index| &self.rows[index])
    }

    fn position_of(&self, row_id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.id(&self.id_field).as_deref() == Some(row_id))
    }

    /// Replaces all rows. The page index is clamped, not reset.
    pub fn set_rows(&mut self, rows: Vec<RowRecord>) {
        self.rows = rows;
        self.refresh();
    }

    /// Writes one field of the row identified by `row_id`.
    ///
    /// # Errors
    /// [`GridError::UnknownRow`] when no row carries that id.
    pub fn apply_cell_value(
        &mut self,
        row_id: &str,
        path: &str,
        value: Value,
    ) -> Result<(), GridError> {
        let index = self
            .position_of(row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        self.rows[index].set_path(path, value);
        self.refresh();
        Ok(())
    }

    /// Replaces the row sharing `row`'s id.
    ///
    /// # Errors
    /// [`GridError::UnknownRow`] when the row has no id or no match.
    pub fn replace_row(&mut self, row: RowRecord) -> Result<(), GridError> {
        let row_id = row
            .id(&self.id_field)
            .ok_or_else(|| GridError::UnknownRow(format!("<missing {}>", self.id_field)))?;
        let index = self
            .position_of(&row_id)
            .ok_or(GridError::UnknownRow(row_id))?;
        self.rows[index] = row;
        self.refresh();
        Ok(())
    }

    // -- search, filters, sorting ---------------------------------------

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.reset_page_and_refresh();
    }

    /// Sets a fuzzy filter on one column; empty text removes it.
    pub fn set_column_filter(
        &mut self,
        column_id: &str,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        self.column(column_id)?;
        let text = text.into();
        self.column_filters.retain(|(id, _)| id != column_id);
        if !text.is_empty() {
            self.column_filters.push((column_id.to_string(), text));
        }
        self.reset_page_and_refresh();
        Ok(())
    }

    pub fn clear_column_filter(&mut self, column_id: &str) -> Result<(), GridError> {
        self.set_column_filter(column_id, String::new())
    }

    pub fn column_filter(&self, column_id: &str) -> Option<&str> {
        self.column_filters
            .iter()
            .find(|(id, _)| id == column_id)
            .map(|(_, text)| text.as_str())
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.global_filter = text.into();
        self.reset_page_and_refresh();
    }

    /// Advances the column's sort: ascending, descending, then unsorted.
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<Option<SortDirection>, GridError> {
        self.column(column_id)?;
        self.sorting = next_sort(self.sorting.as_ref(), column_id);
        debug!(column = column_id, sort = ?self.sorting, "sort changed");
        self.reset_page_and_refresh();
        Ok(self.sort_direction(column_id))
    }

    pub fn sorting(&self) -> Option<&SortState> {
        self.sorting.as_ref()
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sorting
            .as_ref()
            .filter(|state| state.column_id == column_id)
            .map(|state| state.direction)
    }

    fn reset_page_and_refresh(&mut self) {
        self.pagination.page_index = 0;
        self.refresh();
    }

    fn refresh(&mut self) {
        let mut visible: Vec<usize> = (0..self.rows.len())
            .filter(|&index| self.row_passes(&self.rows[index]))
            .collect();
        if let Some(state) = &self.sorting {
            if let Some(column) = self.columns.iter().find(|c| c.id == state.column_id) {
                let rows = &self.rows;
                visible.sort_by(|&a, &b| {
                    compare_values(
                        rows[a].get_path(&column.path).unwrap_or(&NULL),
                        rows[b].get_path(&column.path).unwrap_or(&NULL),
                        state.direction,
                    )
                });
            }
        }
        self.visible = visible;
        self.pagination
            .set_page_index(self.pagination.page_index, self.visible.len());
    }

    fn row_passes(&self, row: &RowRecord) -> bool {
        if !global_search_matches(row, &self.search_term) {
            return false;
        }
        let filters_pass = self.column_filters.iter().all(|(column_id, text)| {
            self.columns
                .iter()
                .find(|column| &column.id == column_id)
                .is_none_or(|column| rank_item(&raw_cell_text(row, column), text).passed())
        });
        if !filters_pass {
            return false;
        }
        self.global_filter.is_empty()
            || self
                .columns
                .iter()
                .any(|column| rank_item(&cell_text(row, column), &self.global_filter).passed())
    }

    // -- rows and pagination --------------------------------------------

    /// Filtered and sorted rows across all pages.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        self.visible
            .iter()
            .map(|&index| VisibleRow {
                index,
                row: &self.rows[index],
            })
            .collect()
    }

    /// The current page of [`Self::visible_rows`].
    pub fn page_rows(&self) -> Vec<VisibleRow<'_>> {
        self.visible[self.pagination.range(self.visible.len())]
            .iter()
            .map(|&index| VisibleRow {
                index,
                row: &self.rows[index],
            })
            .collect()
    }

    pub fn filtered_row_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty_view(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn page_index(&self) -> usize {
        self.pagination.page_index
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.visible.len())
    }

    /// Zero-based page indices; buttons show `index + 1`.
    pub fn page_options(&self) -> Vec<usize> {
        (0..self.page_count()).collect()
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next(self.visible.len())
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous()
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.pagination.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.pagination.page_index -= 1;
        }
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.pagination.set_page_index(index, self.visible.len());
    }

    /// Footer text, e.g. `"Showing 10 of 1,250 Results"`.
    pub fn showing_summary(&self) -> String {
        let on_page = self.pagination.range(self.visible.len()).len();
        format!(
            "Showing {} of {} Results",
            format_count(on_page),
            format_count(self.visible.len())
        )
    }

    // -- pinning ---------------------------------------------------------

    pub fn pinning_enabled(&self) -> bool {
        self.enable_pinning
    }

    pub fn pinning(&self) -> &ColumnPinningState {
        &self.pinning
    }

    pub fn pin_side(&self, column_id: &str) -> PinSide {
        self.pinning.side_of(column_id)
    }

    pub fn pin_column(&mut self, column_id: &str, side: PinSide) -> Result<(), GridError> {
        if !self.enable_pinning {
            return Err(GridError::PinningDisabled);
        }
        self.column(column_id)?;
        self.pinning.pin(column_id, side);
        debug!(column = column_id, ?side, "column pinned");
        Ok(())
    }

    /// Pins every child of `group` to `side`.
    pub fn pin_group(&mut self, group: &str, side: PinSide) -> Result<(), GridError> {
        if !self.enable_pinning {
            return Err(GridError::PinningDisabled);
        }
        let children: Vec<String> = self
            .group_children(group)?
            .into_iter()
            .map(|column| column.id.clone())
            .collect();
        for column_id in &children {
            self.pinning.pin(column_id, side);
        }
        debug!(group, ?side, columns = children.len(), "group pinned");
        Ok(())
    }

    pub fn group_pin_status(&self, group: &str) -> Result<GroupPinStatus, GridError> {
        let children = self.group_children(group)?;
        Ok(GroupPinStatus::from_sides(
            children.iter().map(|column| self.pinning.side_of(&column.id)),
        ))
    }

    /// Distinct group names in declaration order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.columns.iter().filter_map(|c| c.group.as_deref()) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    pub fn group_children(&self, group: &str) -> Result<Vec<&ColumnConfig>, GridError> {
        let children: Vec<&ColumnConfig> = self
            .columns
            .iter()
            .filter(|column| column.group.as_deref() == Some(group))
            .collect();
        if children.is_empty() {
            return Err(GridError::UnknownGroup(group.to_string()));
        }
        Ok(children)
    }

    // -- sizing and layout -----------------------------------------------

    /// Sets a column width, clamped to the configured size range.
    pub fn resize_column(&mut self, column_id: &str, width: f32) -> Result<f32, GridError> {
        self.column(column_id)?;
        let width = self.clamp_size(width);
        self.sizing.insert(column_id.to_string(), width);
        Ok(width)
    }

    pub fn column_size(&self, column_id: &str) -> Result<f32, GridError> {
        let column = self.column(column_id)?;
        Ok(self.size_of(column))
    }

    fn size_of(&self, column: &ColumnConfig) -> f32 {
        let size = self
            .sizing
            .get(&column.id)
            .copied()
            .or(column.size)
            .unwrap_or(self.default_column_size);
        self.clamp_size(size)
    }

    fn clamp_size(&self, width: f32) -> f32 {
        if width.is_nan() {
            return self.min_column_size;
        }
        width.clamp(self.min_column_size, self.max_column_size)
    }

    /// Left-pinned, then unpinned, then right-pinned columns; declaration
    /// order within each block.
    pub fn column_order(&self) -> Vec<&ColumnConfig> {
        [PinSide::Left, PinSide::None, PinSide::Right]
            .into_iter()
            .flat_map(|side| self.columns_on(side))
            .collect()
    }

    fn columns_on(&self, side: PinSide) -> impl Iterator<Item = &ColumnConfig> {
        self.columns
            .iter()
            .filter(move |column| self.pinning.side_of(&column.id) == side)
    }

    /// Total width of one pin section.
    pub fn section_width(&self, side: PinSide) -> f32 {
        self.columns_on(side)
            .map(|column| self.size_of(column))
            .fold(0.0, |total, width| total + width)
    }

    pub fn column_offset(&self, column_id: &str) -> Result<ColumnPlacement, GridError> {
        let column = self.column(column_id)?;
        Ok(self.placement_of(column))
    }

    fn placement_of(&self, column: &ColumnConfig) -> ColumnPlacement {
        match self.pinning.side_of(&column.id) {
            PinSide::None => ColumnPlacement::Flow,
            PinSide::Left => ColumnPlacement::Left {
                offset: self
                    .columns_on(PinSide::Left)
                    .take_while(|other| other.id != column.id)
                    .map(|other| self.size_of(other))
                    .fold(0.0, |total, width| total + width),
            },
            PinSide::Right => ColumnPlacement::Right {
                offset: self
                    .columns_on(PinSide::Right)
                    .skip_while(|other| other.id != column.id)
                    .skip(1)
                    .map(|other| self.size_of(other))
                    .fold(0.0, |total, width| total + width),
            },
        }
    }

    pub fn cell_style(&self, column_id: &str) -> Result<CellStyle, GridError> {
        let column = self.column(column_id)?;
        Ok(CellStyle {
            shade: ColumnShade::for_column(column),
            placement: self.placement_of(column),
            width: self.size_of(column),
        })
    }

    pub fn header_rows(&self) -> Vec<Vec<HeaderCell>> {
        let leaves: Vec<LeafLayout<'_>> = self
            .column_order()
            .into_iter()
            .map(|column| {
                let placement = self.placement_of(column);
                LeafLayout {
                    column,
                    side: placement.side(),
                    width: self.size_of(column),
                    sticky_offset: placement.sticky_offset(),
                }
            })
            .collect();
        build_header_rows(&leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::HeaderKind;
    use crate::models::{Formatter, SelectOption};
    use serde_json::json;

    fn columns() -> Vec<ColumnConfig> {
        vec![
            ColumnConfig::new("name", "name", Formatter::Text)
                .editable()
                .with_size(200.0),
            ColumnConfig::new("amount", "amount", Formatter::Currency)
                .editable()
                .with_size(120.0)
                .in_group("deal"),
            ColumnConfig::new("stage", "stage", Formatter::Text)
                .editable()
                .with_size(100.0)
                .in_group("deal"),
            ColumnConfig::new("owner", "owner", Formatter::Text)
                .with_size(90.0)
                .in_group("deal"),
        ]
    }

    fn row(id: usize, name: &str, amount: f64) -> RowRecord {
        RowRecord::from_value(json!({
            "_id": format!("r{id}"),
            "name": name,
            "amount": amount,
            "stage": "lead",
            "owner": "sam"
        }))
        .expect("row")
    }

    fn view_with_rows(count: usize) -> GridView {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.set_rows((0..count).map(|i| row(i, &format!("Account {i}"), i as f64)).collect());
        view
    }

    #[test]
    fn new_rejects_duplicate_column_ids() {
        let mut cols = columns();
        cols.push(ColumnConfig::new("name", "other", Formatter::Text));
        assert!(matches!(
            GridView::new(cols, GridOptions::default()),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn all_left_group_renders_single_sticky_header() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("name", PinSide::Left).expect("pin name");
        view.pin_group("deal", PinSide::Left).expect("pin group");
        assert_eq!(view.group_pin_status("deal").expect("status"), GroupPinStatus::Left);

        let rows = view.header_rows();
        assert_eq!(rows.len(), 2);
        let group = rows[0]
            .iter()
            .find(|cell| cell.id == "deal")
            .expect("group cell");
        assert!(matches!(group.kind, HeaderKind::Group { .. }));
        assert_eq!(group.colspan, 3);
        assert_eq!(group.width, 310.0);
        assert_eq!(group.sticky_offset, Some(200.0));
        assert_eq!(group.shade, ColumnShade::ReadOnly);
    }

    #[test]
    fn mixed_group_splits_into_segments_per_section() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("amount", PinSide::Left).expect("pin");
        assert_eq!(view.group_pin_status("deal").expect("status"), GroupPinStatus::Mixed);

        let group_row = &view.header_rows()[0];
        let segments: Vec<_> = group_row
            .iter()
            .filter(|cell| matches!(cell.kind, HeaderKind::VirtualGroup { .. }))
            .collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].id, "deal-left-pinned");
        assert_eq!(segments[0].colspan, 1);
        assert_eq!(segments[0].width, 120.0);
        assert_eq!(segments[0].sticky_offset, Some(0.0));
        assert_eq!(segments[0].shade, ColumnShade::Editable);
        assert_eq!(segments[1].id, "deal-unpinned");
        assert_eq!(segments[1].colspan, 2);
        assert_eq!(segments[1].width, 190.0);
        assert_eq!(segments[1].sticky_offset, None);
        assert_eq!(segments[1].shade, ColumnShade::ReadOnly);
    }

    #[test]
    fn all_right_group_sticks_at_smallest_trailing_offset() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("name", PinSide::Right).expect("pin name");
        view.pin_group("deal", PinSide::Right).expect("pin group");
        assert_eq!(view.group_pin_status("deal").expect("status"), GroupPinStatus::Right);

        let group_row = &view.header_rows()[0];
        let groups: Vec<_> = group_row
            .iter()
            .filter(|cell| !matches!(cell.kind, HeaderKind::Placeholder { .. }))
            .collect();
        assert_eq!(groups.len(), 1);
        let group = groups[0];
        assert_eq!(group.id, "deal");
        assert!(matches!(group.kind, HeaderKind::Group { .. }));
        assert_eq!(group.colspan, 3);
        assert_eq!(group.width, 310.0);
        assert_eq!(group.side, PinSide::Right);
        assert_eq!(group.sticky_offset, Some(0.0));

        let name = group_row
            .iter()
            .find(|cell| cell.id == "name-placeholder")
            .expect("name placeholder");
        assert_eq!(name.sticky_offset, Some(310.0));
    }

    #[test]
    fn group_split_across_all_three_sections() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("amount", PinSide::Left).expect("pin amount");
        view.pin_column("owner", PinSide::Right).expect("pin owner");
        assert_eq!(view.group_pin_status("deal").expect("status"), GroupPinStatus::Mixed);

        let group_row = &view.header_rows()[0];
        let segments: Vec<_> = group_row
            .iter()
            .filter(|cell| matches!(cell.kind, HeaderKind::VirtualGroup { .. }))
            .collect();
        let ids: Vec<&str> = segments.iter().map(|cell| cell.id.as_str()).collect();
        assert_eq!(ids, vec!["deal-left-pinned", "deal-unpinned", "deal-right-pinned"]);
        let widths: Vec<f32> = segments.iter().map(|cell| cell.width).collect();
        assert_eq!(widths, vec![120.0, 100.0, 90.0]);
        assert_eq!(segments[0].sticky_offset, Some(0.0));
        assert_eq!(segments[1].sticky_offset, None);
        assert_eq!(segments[2].sticky_offset, Some(0.0));
        assert_eq!(segments[2].side, PinSide::Right);
        assert_eq!(segments[2].shade, ColumnShade::ReadOnly);
    }

    #[test]
    fn edge_pinned_offsets_are_positive_zero() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("name", PinSide::Left).expect("pin left");
        view.pin_column("owner", PinSide::Right).expect("pin right");
        let offsets = [
            view.column_offset("name").expect("name").sticky_offset(),
            view.column_offset("owner").expect("owner").sticky_offset(),
        ];
        for offset in offsets {
            let offset = offset.expect("pinned offset");
            assert_eq!(offset, 0.0);
            assert!(offset.is_sign_positive());
        }
        assert!(view.section_width(PinSide::None).is_sign_positive());
    }

    #[test]
    fn right_pinned_offsets_count_following_columns() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("stage", PinSide::Right).expect("pin");
        view.pin_column("owner", PinSide::Right).expect("pin");
        view.pin_column("name", PinSide::Left).expect("pin");
        view.pin_column("amount", PinSide::Left).expect("pin");

        assert_eq!(
            view.column_offset("stage").expect("offset"),
            ColumnPlacement::Right { offset: 90.0 }
        );
        assert_eq!(
            view.column_offset("owner").expect("offset"),
            ColumnPlacement::Right { offset: 0.0 }
        );
        assert_eq!(
            view.column_offset("amount").expect("offset"),
            ColumnPlacement::Left { offset: 200.0 }
        );
        assert_eq!(view.section_width(PinSide::Right), 190.0);
    }

    #[test]
    fn column_order_groups_pinned_blocks() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.pin_column("owner", PinSide::Left).expect("pin");
        view.pin_column("name", PinSide::Right).expect("pin");
        let ids: Vec<_> = view.column_order().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["owner", "amount", "stage", "name"]);
    }

    #[test]
    fn pinning_disabled_rejects_pin_requests() {
        let mut view =
            GridView::new(columns(), GridOptions::default().without_pinning()).expect("view");
        assert!(matches!(
            view.pin_column("name", PinSide::Left),
            Err(GridError::PinningDisabled)
        ));
    }

    #[test]
    fn read_only_shade_survives_pinning() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        let unpinned = view.cell_style("owner").expect("style");
        assert_eq!(unpinned.background(), Some(ColumnShade::ReadOnly));
        assert_eq!(view.cell_style("name").expect("style").background(), None);

        view.pin_column("owner", PinSide::Left).expect("pin");
        view.pin_column("name", PinSide::Left).expect("pin");
        assert_eq!(
            view.cell_style("owner").expect("style").background(),
            Some(ColumnShade::ReadOnly)
        );
        assert_eq!(
            view.cell_style("name").expect("style").background(),
            Some(ColumnShade::Editable)
        );
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        assert_eq!(view.resize_column("name", 5.0).expect("resize"), 20.0);
        assert_eq!(view.resize_column("name", 5000.0).expect("resize"), 1000.0);
        assert_eq!(view.column_size("name").expect("size"), 1000.0);
        assert!(matches!(
            view.resize_column("missing", 100.0),
            Err(GridError::UnknownColumn(_))
        ));
    }

    #[test]
    fn summary_counts_current_page_and_filtered_rows() {
        let mut view = view_with_rows(1250);
        assert_eq!(view.showing_summary(), "Showing 10 of 1,250 Results");
        assert_eq!(view.page_count(), 125);
        view.set_page_index(124);
        assert_eq!(view.page_rows().len(), 10);
        assert!(!view.can_next_page());

        view.set_search_term("Account 12");
        assert_eq!(view.page_index(), 0);
        // Account 12, 120..=129, 1200..=1249
        assert_eq!(view.filtered_row_count(), 61);
        assert_eq!(view.showing_summary(), "Showing 10 of 61 Results");
    }

    #[test]
    fn page_size_change_and_filters_reset_page() {
        let mut view = view_with_rows(60);
        view.next_page();
        view.next_page();
        assert_eq!(view.page_index(), 2);
        view.set_page_size(25);
        assert_eq!(view.page_index(), 0);
        assert_eq!(view.page_options(), vec![0, 1, 2]);

        view.next_page();
        view.set_column_filter("name", "Account 5").expect("filter");
        assert_eq!(view.page_index(), 0);
        assert!(view.filtered_row_count() >= 1);
        view.clear_column_filter("name").expect("clear");
        assert_eq!(view.filtered_row_count(), 60);
    }

    #[test]
    fn column_filter_ranks_raw_values_while_global_filter_uses_labels() {
        let columns = vec![
            ColumnConfig::new("name", "name", Formatter::Text).with_size(200.0),
            ColumnConfig::new("stage", "stage", Formatter::Text).with_options(vec![
                SelectOption::new("qualified", "Qualified lead"),
                SelectOption::new("won", "Closed won"),
            ]),
        ];
        let mut view = GridView::new(columns, GridOptions::default()).expect("view");
        view.set_rows(vec![
            RowRecord::from_value(json!({"_id": "r1", "name": "Acme", "stage": "qualified"}))
                .expect("row"),
            RowRecord::from_value(json!({"_id": "r2", "name": "Globex", "stage": "won"}))
                .expect("row"),
        ]);

        view.set_column_filter("stage", "won").expect("filter");
        assert_eq!(view.filtered_row_count(), 1);
        view.set_column_filter("stage", "Closed won").expect("filter");
        assert_eq!(view.filtered_row_count(), 0);
        view.clear_column_filter("stage").expect("clear");

        view.set_global_filter("Closed won");
        assert_eq!(view.filtered_row_count(), 1);
        assert_eq!(view.visible_rows()[0].row.id("_id").as_deref(), Some("r2"));
    }

    #[test]
    fn set_rows_clamps_page_index() {
        let mut view = view_with_rows(30);
        view.set_page_index(2);
        view.set_rows(vec![row(0, "Only", 1.0)]);
        assert_eq!(view.page_index(), 0);
        assert_eq!(view.page_rows().len(), 1);
    }

    #[test]
    fn sort_cycles_and_orders_numbers() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.set_rows(vec![row(0, "b", 9.0), row(1, "a", 10.0), row(2, "c", 2.0)]);

        assert_eq!(view.toggle_sort("amount").expect("sort"), Some(SortDirection::Asc));
        let order: Vec<_> = view.visible_rows().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 0, 1]);

        assert_eq!(view.toggle_sort("amount").expect("sort"), Some(SortDirection::Desc));
        let order: Vec<_> = view.visible_rows().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0, 2]);

        assert_eq!(view.toggle_sort("amount").expect("sort"), None);
        let order: Vec<_> = view.visible_rows().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn global_filter_matches_any_column_fuzzily() {
        let mut view = GridView::new(columns(), GridOptions::default()).expect("view");
        view.set_rows(vec![row(0, "Globex", 1.0), row(1, "Initech", 2.0)]);
        view.set_global_filter("gbx");
        assert_eq!(view.filtered_row_count(), 1);
        view.set_global_filter("");
        assert_eq!(view.filtered_row_count(), 2);
        view.set_global_filter("zzzz");
        assert!(view.is_empty_view());
    }

    #[test]
    fn apply_cell_value_updates_row_by_id() {
        let mut view = view_with_rows(3);
        view.apply_cell_value("r1", "stage", json!("won"))
            .expect("apply");
        assert_eq!(
            view.row_by_id("r1").expect("row").value_at("stage"),
            json!("won")
        );
        assert!(matches!(
            view.apply_cell_value("missing", "stage", json!("won")),
            Err(GridError::UnknownRow(_))
        ));
    }
}
