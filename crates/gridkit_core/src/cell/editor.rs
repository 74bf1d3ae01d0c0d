//! Editor variants chosen from a column's formatter and options.

use crate::constants::OPTION_SEARCH_THRESHOLD;
use crate::models::{ColumnConfig, Formatter};

/// The input widget a cell shows while editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorKind {
    /// Free text; Shift+Enter inserts a newline.
    MultilineText,
    SingleSelect { allow_clear: bool, show_search: bool },
    MultiSelect { show_search: bool },
    Numeric {
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
    },
    Date,
    BooleanSelect { allow_clear: bool },
}

impl EditorKind {
    /// Picks the editor for `column`.
    ///
    /// # Returns
    /// `None` for read-only columns and for boolean columns without options,
    /// which have nothing to edit with.
    pub fn for_column(column: &ColumnConfig) -> Option<Self> {
        if !column.editable {
            return None;
        }
        let allow_clear = column.allows_empty();
        let show_search = column.list_options.len() > OPTION_SEARCH_THRESHOLD;
        let kind = match column.formatter {
            Formatter::Text if column.has_options() && column.is_multi_select => {
                Self::MultiSelect { show_search }
            }
            Formatter::Text if column.has_options() => Self::SingleSelect {
                allow_clear,
                show_search,
            },
            Formatter::Text => Self::MultilineText,
            Formatter::Number => Self::Numeric {
                min: column.meta.min,
                max: column.meta.max,
                step: 1.0,
            },
            Formatter::Currency => Self::Numeric {
                min: column.meta.min,
                max: column.meta.max,
                step: 10.0,
            },
            Formatter::Datetime => Self::Date,
            Formatter::Boolean if column.has_options() => Self::BooleanSelect { allow_clear },
            Formatter::Boolean => return None,
        };
        Some(kind)
    }

    /// Editors whose value is chosen from an option overlay.
    pub fn uses_dropdown(self) -> bool {
        matches!(
            self,
            Self::SingleSelect { .. } | Self::MultiSelect { .. } | Self::BooleanSelect { .. }
        )
    }

    /// Editors backed by a text buffer the user types into.
    pub fn is_text_input(self) -> bool {
        matches!(self, Self::MultilineText | Self::Numeric { .. })
    }

    /// Placeholder shown in the empty editor (before any validation message).
    pub fn default_placeholder(self) -> &'static str {
        match self {
            Self::SingleSelect { .. } | Self::BooleanSelect { .. } => "Select option...",
            Self::MultiSelect { .. } => "Select options...",
            Self::Date => "Select date",
            Self::MultilineText | Self::Numeric { .. } => "",
        }
    }
}
