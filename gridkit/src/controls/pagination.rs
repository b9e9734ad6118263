//! Pagination control.

use crate::engine::{Table, TableSnapshot};

/// Presentation model of the pagination bar.
///
/// Built from the table; navigation actions read the live page state when
/// dispatched, so a stale control cannot push the table out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControl {
    /// 0-based page index.
    pub page_index: usize,
    pub page_size: usize,
    /// Total pages, at least 1.
    pub page_count: usize,
    /// Rows matching the filters.
    pub row_count: usize,
    /// Choices for the page-size selector.
    pub page_size_options: Vec<usize>,
}

impl PaginationControl {
    /// Build from the table's current state.
    pub fn from_table<T: Clone>(table: &Table<T>) -> Self {
        let pagination = table.pagination();
        Self {
            page_index: pagination.page_index,
            page_size: pagination.page_size,
            page_count: table.page_count(),
            row_count: table.row_count(),
            page_size_options: Self::size_options(
                table.options().page_size_options,
                pagination.page_size,
            ),
        }
    }

    /// Build from a snapshot, with the given selector choices.
    pub fn from_snapshot<T>(snapshot: &TableSnapshot<T>, page_size_options: Vec<usize>) -> Self {
        let pagination = snapshot.state.pagination;
        Self {
            page_index: pagination.page_index,
            page_size: pagination.page_size,
            page_count: snapshot.page_count,
            row_count: snapshot.row_count,
            page_size_options: Self::size_options(page_size_options, pagination.page_size),
        }
    }

    /// The current size is always offered, even if it is not a preset.
    fn size_options(mut options: Vec<usize>, current: usize) -> Vec<usize> {
        if !options.contains(&current) {
            options.push(current);
        }
        options.sort_unstable();
        options.dedup();
        options
    }

    /// 1-based page number for display.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn can_first(&self) -> bool {
        self.can_previous()
    }

    pub fn can_last(&self) -> bool {
        self.can_next()
    }

    /// "Page 2 of 5".
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_number(), self.page_count)
    }

    /// "12 rows" / "1 row".
    pub fn rows_label(&self) -> String {
        if self.row_count == 1 {
            "1 row".to_string()
        } else {
            format!("{} rows", self.row_count)
        }
    }

    pub fn first<T: Clone>(&mut self, table: &Table<T>) {
        table.set_page(0);
        *self = Self::from_table(table);
    }

    pub fn previous<T: Clone>(&mut self, table: &Table<T>) {
        let current = table.pagination().page_index;
        if current > 0 {
            table.set_page(current - 1);
        }
        *self = Self::from_table(table);
    }

    pub fn next<T: Clone>(&mut self, table: &Table<T>) {
        let current = table.pagination().page_index;
        table.set_page(current + 1);
        *self = Self::from_table(table);
    }

    pub fn last<T: Clone>(&mut self, table: &Table<T>) {
        table.set_page(table.page_count() - 1);
        *self = Self::from_table(table);
    }

    /// Change rows per page; the table returns to the first page.
    pub fn set_page_size<T: Clone>(&mut self, table: &Table<T>, page_size: usize) {
        table.set_page_size(page_size);
        *self = Self::from_table(table);
    }
}
