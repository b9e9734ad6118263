//! Column header control and the column visibility menu.

use crate::column::Alignment;
use crate::engine::Table;
use crate::state::SortDirection;

/// An action offered by a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    SortAscending,
    SortDescending,
    ClearSort,
    /// Advance to the next sort state (header click).
    ToggleSort,
    Hide,
}

/// Presentation model of one column header.
///
/// Holds no state of its own; every action goes straight to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub column_id: String,
    pub label: String,
    pub align: Alignment,
    pub sortable: bool,
    pub hideable: bool,
    pub sort: Option<SortDirection>,
    /// Position in the sort list, shown when several columns are sorted.
    pub sort_index: Option<usize>,
}

impl ColumnHeader {
    /// Header for one column, or `None` for an unknown column.
    pub fn for_column<T: Clone>(table: &Table<T>, column_id: &str) -> Option<Self> {
        let column = table.column(column_id)?;
        let state = table.view_state();
        let options = table.options();
        let sort = state.sort_direction(column_id);
        Some(Self {
            column_id: column.id.clone(),
            label: column.render_header(sort),
            align: column.align,
            sortable: options.enable_sorting && column.sortable,
            hideable: options.enable_column_visibility && column.hideable,
            sort,
            sort_index: state.sort_index(column_id).filter(|_| state.sorting.len() > 1),
        })
    }

    /// Headers of all visible columns, in order.
    pub fn visible<T: Clone>(table: &Table<T>) -> Vec<Self> {
        table
            .visible_columns()
            .iter()
            .filter_map(|c| Self::for_column(table, &c.id))
            .collect()
    }

    /// Sort indicator: `▲`, `▼`, `↕` for sortable but unsorted, or nothing.
    pub fn indicator(&self) -> &'static str {
        match (self.sortable, self.sort) {
            (_, Some(SortDirection::Asc)) => "▲",
            (_, Some(SortDirection::Desc)) => "▼",
            (true, None) => "↕",
            (false, None) => "",
        }
    }

    /// Label with the sort indicator and, for multi-sort, the sort position.
    pub fn decorated_label(&self) -> String {
        let indicator = self.indicator();
        match (indicator.is_empty(), self.sort_index) {
            (true, _) => self.label.clone(),
            (false, Some(index)) => format!("{} {}{}", self.label, indicator, index + 1),
            (false, None) => format!("{} {}", self.label, indicator),
        }
    }

    /// Actions that make sense for this header right now.
    pub fn actions(&self) -> Vec<HeaderAction> {
        let mut actions = Vec::new();
        if self.sortable {
            actions.push(HeaderAction::ToggleSort);
            if self.sort != Some(SortDirection::Asc) {
                actions.push(HeaderAction::SortAscending);
            }
            if self.sort != Some(SortDirection::Desc) {
                actions.push(HeaderAction::SortDescending);
            }
            if self.sort.is_some() {
                actions.push(HeaderAction::ClearSort);
            }
        }
        if self.hideable {
            actions.push(HeaderAction::Hide);
        }
        actions
    }

    /// Forward an action to the table.
    pub fn dispatch<T: Clone>(&self, table: &Table<T>, action: HeaderAction) {
        match action {
            HeaderAction::SortAscending => {
                table.set_sort(&self.column_id, Some(SortDirection::Asc))
            }
            HeaderAction::SortDescending => {
                table.set_sort(&self.column_id, Some(SortDirection::Desc))
            }
            HeaderAction::ClearSort => table.set_sort(&self.column_id, None),
            HeaderAction::ToggleSort => table.toggle_sort(&self.column_id),
            HeaderAction::Hide => table.toggle_column_visibility(&self.column_id, false),
        }
    }
}

/// One line of the column visibility menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub column_id: String,
    pub label: String,
    pub visible: bool,
}

/// Lists the hideable columns and toggles them ("view options").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnVisibilityMenu {
    pub entries: Vec<VisibilityEntry>,
}

impl ColumnVisibilityMenu {
    /// Build the menu from the table's current state.
    pub fn from_table<T: Clone>(table: &Table<T>) -> Self {
        if !table.options().enable_column_visibility {
            return Self::default();
        }
        let entries = table
            .columns()
            .iter()
            .filter(|c| c.hideable)
            .map(|c| VisibilityEntry {
                column_id: c.id.clone(),
                label: c.header.clone(),
                visible: table.is_column_visible(&c.id),
            })
            .collect();
        Self { entries }
    }

    /// Flip one column and refresh the menu.
    pub fn toggle<T: Clone>(&mut self, table: &Table<T>, column_id: &str) {
        let visible = table.is_column_visible(column_id);
        table.toggle_column_visibility(column_id, !visible);
        *self = Self::from_table(table);
    }
}
