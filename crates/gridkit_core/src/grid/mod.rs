//! Headless grid view: search, fuzzy filters, sorting, pagination, pinning,
//! sizing, and grouped headers.

/// Fuzzy ranking and raw JSON search.
pub mod filter;
/// Header row construction.
pub mod headers;
pub mod pagination;
pub mod pinning;
pub mod sort;
mod view;

pub use filter::{global_search_matches, rank_item, Rank};
pub use headers::{ColumnShade, HeaderCell, HeaderKind};
pub use pagination::Pagination;
pub use pinning::{ColumnPinningState, GroupPinStatus, PinSide};
pub use sort::{SortDirection, SortState};
pub use view::{CellStyle, ColumnPlacement, GridOptions, GridView, VisibleRow};
