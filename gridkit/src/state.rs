//! View state owned by one table instance.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::value::CellValue;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(TableError::invalid(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

/// One entry of the sort list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column_id: String,
    pub direction: SortDirection,
}

impl ColumnSort {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    pub fn asc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Asc)
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Desc)
    }
}

/// The value of an active column filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    /// Case-insensitive substring match.
    Text(String),
    /// Exact match against the stringified cell value.
    Select(String),
    /// Cell value must be one of the selected values.
    MultiSelect(BTreeSet<String>),
}

impl FilterValue {
    /// An empty value means "no filter".
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) | FilterValue::Select(s) => s.is_empty(),
            FilterValue::MultiSelect(set) => set.is_empty(),
        }
    }

    /// Whether a cell value passes this filter.
    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            FilterValue::Text(needle) => contains_ignore_case(&value.to_string(), needle),
            FilterValue::Select(selected) => value.to_string() == *selected,
            FilterValue::MultiSelect(selected) => selected.contains(&value.to_string()),
        }
    }
}

/// Case-insensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Current page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// 0-based page index.
    pub page_index: usize,
    /// Rows per page, always positive.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    /// Index of the first row on the current page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// All mutable state of one table.
///
/// Serializable so callers can persist a user's table preferences; the
/// engine itself never writes it anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Sort keys in priority order. Empty means unsorted.
    pub sorting: Vec<ColumnSort>,
    /// Active column filters.
    pub column_filters: BTreeMap<String, FilterValue>,
    /// Free-text filter across all filterable columns.
    pub global_filter: String,
    /// Explicit visibility overrides. Missing entries are visible.
    pub column_visibility: BTreeMap<String, bool>,
    /// Page window.
    pub pagination: PaginationState,
}

impl ViewState {
    /// Whether a column is visible.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.column_visibility
            .get(column_id)
            .copied()
            .unwrap_or(true)
    }

    /// Whether any column or global filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.column_filters.is_empty() || !self.global_filter.is_empty()
    }

    /// Sort direction of a column, if it is sorted.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    /// Position of a column in the sort list.
    pub fn sort_index(&self, column_id: &str) -> Option<usize> {
        self.sorting.iter().position(|s| s.column_id == column_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_values() {
        assert!(FilterValue::Text(String::new()).is_empty());
        assert!(FilterValue::Select(String::new()).is_empty());
        assert!(FilterValue::MultiSelect(BTreeSet::new()).is_empty());
        assert!(!FilterValue::Text("a".into()).is_empty());
    }

    #[test]
    fn test_filter_matching() {
        let text = FilterValue::Text("SHIRT".into());
        assert!(text.matches(&CellValue::from("Blue shirt")));
        assert!(!text.matches(&CellValue::from("Hat")));

        let select = FilterValue::Select("active".into());
        assert!(select.matches(&CellValue::from("active")));
        assert!(!select.matches(&CellValue::from("inactive")));

        let multi = FilterValue::MultiSelect(["1".to_string(), "3".to_string()].into());
        assert!(multi.matches(&CellValue::Int(3)));
        assert!(!multi.matches(&CellValue::Int(2)));
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_visibility_defaults_to_visible() {
        let mut state = ViewState::default();
        assert!(state.is_visible("name"));
        state.column_visibility.insert("name".into(), false);
        assert!(!state.is_visible("name"));
    }
}
