//! Table engine: column definitions, rows, view state and the derived view.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::column::Column;
use crate::error::TableError;
use crate::filter::{faceted_values, filter_indices};
use crate::sort::{apply_sort, sort_indices, toggle_sort};
use crate::state::{
    ColumnSort, DEFAULT_PAGE_SIZE, FilterValue, PaginationState, SortDirection, ViewState,
};

/// Called with the new page window whenever it changes.
pub type PaginationCallback = Arc<dyn Fn(PaginationState) + Send + Sync>;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

// =============================================================================
// Options
// =============================================================================

/// Behaviour switches and defaults for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Allow sorting at all.
    pub enable_sorting: bool,
    /// Keep several sort keys instead of replacing the sorted column.
    pub enable_multi_sort: bool,
    /// Allow columns to be hidden.
    pub enable_column_visibility: bool,
    /// The caller pages on the server and hands in one page of rows.
    pub manual_pagination: bool,
    /// Initial rows per page.
    pub page_size: usize,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<usize>,
    /// Initial sort list.
    pub initial_sorting: Vec<ColumnSort>,
    /// Total pages, for manual pagination.
    pub page_count: Option<usize>,
    /// Total matching rows, for manual pagination.
    pub row_count: Option<usize>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_sorting: true,
            enable_multi_sort: false,
            enable_column_visibility: true,
            manual_pagination: false,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 30, 40, 50],
            initial_sorting: Vec::new(),
            page_count: None,
            row_count: None,
        }
    }
}

impl TableOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page-size selector choices.
    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Enable or disable sorting.
    pub fn sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    /// Enable or disable multi-column sorting.
    pub fn multi_sort(mut self, enabled: bool) -> Self {
        self.enable_multi_sort = enabled;
        self
    }

    /// Enable or disable column hiding.
    pub fn column_visibility(mut self, enabled: bool) -> Self {
        self.enable_column_visibility = enabled;
        self
    }

    /// Set the initial sort list.
    pub fn initial_sorting(mut self, sorting: Vec<ColumnSort>) -> Self {
        self.initial_sorting = sorting;
        self
    }

    /// Switch to server-side pagination with a known page count.
    pub fn manual_pagination(mut self, page_count: usize) -> Self {
        self.manual_pagination = true;
        self.page_count = Some(page_count);
        self
    }

    /// Set the server-side total row count.
    pub fn row_count(mut self, count: usize) -> Self {
        self.row_count = Some(count);
        self
    }
}

fn validate<T>(columns: &[Column<T>], options: &TableOptions) -> Result<(), TableError> {
    if options.page_size == 0 {
        return Err(TableError::invalid("page size must be positive"));
    }
    if options.page_size_options.contains(&0) {
        return Err(TableError::invalid("page size options must be positive"));
    }
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].iter().any(|c| c.id == column.id) {
            return Err(TableError::invalid(format!(
                "duplicate column id '{}'",
                column.id
            )));
        }
    }
    if let Some(sort) = options
        .initial_sorting
        .iter()
        .find(|s| !columns.iter().any(|c| c.id == s.column_id))
    {
        return Err(TableError::invalid(format!(
            "initial sorting references unknown column '{}'",
            sort.column_id
        )));
    }
    Ok(())
}

// =============================================================================
// Inner state
// =============================================================================

struct TableInner<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    options: TableOptions,
    state: ViewState,
    /// Filtered and sorted row indices.
    derived: Vec<usize>,
    on_pagination_change: Option<PaginationCallback>,
}

impl<T> TableInner<T> {
    fn new(columns: Vec<Column<T>>, rows: Vec<T>, options: TableOptions) -> Self {
        let state = ViewState {
            sorting: options.initial_sorting.clone(),
            pagination: PaginationState {
                page_index: 0,
                page_size: options.page_size,
            },
            ..ViewState::default()
        };
        let mut inner = Self {
            columns,
            rows,
            options,
            state,
            derived: Vec::new(),
            on_pagination_change: None,
        };
        inner.recompute();
        inner
    }

    fn column(&self, column_id: &str) -> Result<&Column<T>, TableError> {
        self.columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| TableError::unknown_column(column_id))
    }

    /// Drop state that refers to columns which no longer exist.
    fn prune_state(&mut self) {
        let columns = &self.columns;
        let known = |id: &str| columns.iter().any(|c| c.id == id);
        self.state.sorting.retain(|s| known(&s.column_id));
        self.state.column_filters.retain(|id, _| known(id));
        self.state.column_visibility.retain(|id, _| known(id));
    }

    fn recompute(&mut self) {
        if self.options.manual_pagination {
            self.derived = (0..self.rows.len()).collect();
        } else {
            let mut indices = filter_indices(
                &self.columns,
                &self.rows,
                &self.state.column_filters,
                &self.state.global_filter,
            );
            if self.options.enable_sorting {
                sort_indices(&self.columns, &self.rows, &mut indices, &self.state.sorting);
            }
            self.derived = indices;
        }
        self.clamp_page();
        log::debug!(
            "Table recomputed: {} of {} rows match, page {}/{}",
            self.row_count(),
            self.rows.len(),
            self.state.pagination.page_index + 1,
            self.page_count()
        );
    }

    fn clamp_page(&mut self) {
        let last = self.page_count() - 1;
        if self.state.pagination.page_index > last {
            self.state.pagination.page_index = last;
        }
    }

    fn row_count(&self) -> usize {
        if self.options.manual_pagination {
            self.options.row_count.unwrap_or(self.rows.len())
        } else {
            self.derived.len()
        }
    }

    fn page_count(&self) -> usize {
        let size = self.state.pagination.page_size.max(1);
        let count = if self.options.manual_pagination {
            self.options
                .page_count
                .or_else(|| self.options.row_count.map(|n| n.div_ceil(size)))
                .unwrap_or(1)
        } else {
            self.derived.len().div_ceil(size)
        };
        count.max(1)
    }

    /// Indices of the rows on the current page.
    fn page_indices(&self) -> &[usize] {
        if self.options.manual_pagination {
            return &self.derived;
        }
        let offset = self.state.pagination.offset().min(self.derived.len());
        let end = offset
            .saturating_add(self.state.pagination.page_size)
            .min(self.derived.len());
        &self.derived[offset..end]
    }

    fn reset_page_index(&mut self) {
        self.state.pagination.page_index = 0;
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// A consistent copy of everything needed to paint a table once.
#[derive(Debug, Clone)]
pub struct TableSnapshot<T> {
    /// Columns that are currently visible, in definition order.
    pub columns: Vec<Column<T>>,
    /// Rows of the current page.
    pub rows: Vec<T>,
    /// All rows that pass the filters, in sorted order.
    pub filtered_rows: Vec<T>,
    /// View state at the time of the snapshot.
    pub state: ViewState,
    /// Rows matching the filters, before pagination.
    pub row_count: usize,
    /// Total pages, at least 1.
    pub page_count: usize,
}

// =============================================================================
// Table
// =============================================================================

/// A headless data table.
///
/// `Table<T>` holds column definitions, the caller's rows and the view
/// state (sorting, filters, visibility, pagination), and derives the
/// visible rows from them. Every setter recomputes the derived view before
/// returning. The handle is cheap to clone; clones address the same table.
///
/// # Example
///
/// ```
/// use gridkit::{CellValue, Column, FilterValue, Table, TableOptions};
///
/// let columns = vec![
///     Column::new("sku", "SKU", |r: &(String, i64)| CellValue::from(&r.0)),
///     Column::new("stock", "Stock", |r: &(String, i64)| CellValue::from(r.1)),
/// ];
/// let rows = vec![("A-1".to_string(), 3), ("B-2".to_string(), 0)];
/// let table = Table::new(columns, rows, TableOptions::new().page_size(5)).unwrap();
///
/// table.set_column_filter("sku", Some(FilterValue::Text("b-".into())));
/// assert_eq!(table.row_count(), 1);
/// ```
pub struct Table<T> {
    id: TableId,
    inner: Arc<RwLock<TableInner<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("id", &self.id).finish()
    }
}

impl<T: Clone> Table<T> {
    /// Create a table from columns, rows and options.
    ///
    /// Fails with [`TableError::InvalidConfiguration`] for a zero page size,
    /// duplicate column ids, or an initial sort on an unknown column.
    pub fn new(
        columns: Vec<Column<T>>,
        rows: Vec<T>,
        options: TableOptions,
    ) -> Result<Self, TableError> {
        validate(&columns, &options)?;
        Ok(Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(columns, rows, options))),
            dirty: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Register the pagination change callback.
    ///
    /// Fired with the new `{page_index, page_size}` whenever either changes,
    /// including clamps caused by filtering. Intended for server-side paging.
    pub fn on_pagination_change(&self, callback: impl Fn(PaginationState) + Send + Sync + 'static) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.on_pagination_change = Some(Arc::new(callback));
    }

    /// Apply a mutation, recompute the derived view and notify listeners.
    ///
    /// The closure returns whether it changed anything.
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut TableInner<T>) -> bool,
    {
        let notify = {
            // A panic during an earlier update may have left the state ahead
            // of the derived view, so a poisoned lock always recomputes.
            let (mut guard, recovered) = match self.inner.write() {
                Ok(guard) => (guard, false),
                Err(poisoned) => {
                    log::warn!("Recovering table {} after a panic", self.id);
                    self.inner.clear_poison();
                    (poisoned.into_inner(), true)
                }
            };
            let before = guard.state.pagination;
            if !f(&mut *guard) && !recovered {
                return;
            }
            guard.recompute();
            self.dirty.store(true, Ordering::SeqCst);

            let after = guard.state.pagination;
            if before != after {
                guard.on_pagination_change.clone().map(|cb| (cb, after))
            } else {
                None
            }
        };

        // Call outside the lock so the callback may read the table.
        if let Some((callback, pagination)) = notify {
            callback(pagination);
        }
    }

    fn read<R>(&self, f: impl FnOnce(&TableInner<T>) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replace columns, rows and options.
    ///
    /// Existing view state is kept, minus entries for columns that are gone.
    /// A changed default page size is applied and resets to the first page.
    pub fn configure(
        &self,
        columns: Vec<Column<T>>,
        rows: Vec<T>,
        options: TableOptions,
    ) -> Result<(), TableError> {
        validate(&columns, &options)?;
        self.update(move |inner| {
            if inner.options.page_size != options.page_size {
                inner.state.pagination = PaginationState {
                    page_index: 0,
                    page_size: options.page_size,
                };
            }
            if !options.enable_sorting {
                inner.state.sorting.clear();
            }
            inner.columns = columns;
            inner.rows = rows;
            inner.options = options;
            inner.prune_state();
            true
        });
        Ok(())
    }

    /// Replace the rows, keeping the view state.
    pub fn set_data(&self, rows: Vec<T>) {
        self.update(move |inner| {
            inner.rows = rows;
            true
        });
    }

    /// Update the server-side page count (manual pagination).
    pub fn set_page_count(&self, page_count: Option<usize>) {
        self.update(move |inner| {
            inner.options.page_count = page_count;
            true
        });
    }

    /// Update the server-side row count (manual pagination).
    pub fn set_row_count(&self, row_count: Option<usize>) {
        self.update(move |inner| {
            inner.options.row_count = row_count;
            true
        });
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    fn sortable_column(inner: &TableInner<T>, column_id: &str) -> bool {
        if !inner.options.enable_sorting {
            log::debug!("Ignoring sort on '{}': sorting is disabled", column_id);
            return false;
        }
        match inner.column(column_id) {
            Ok(column) if column.sortable => true,
            Ok(_) => {
                log::warn!("Ignoring sort on '{}': column is not sortable", column_id);
                false
            }
            Err(err) => {
                log::warn!("Ignoring sort: {}", err);
                false
            }
        }
    }

    /// Set or clear the sort direction of one column.
    pub fn set_sort(&self, column_id: &str, direction: Option<SortDirection>) {
        self.update(|inner| {
            if !Self::sortable_column(inner, column_id) {
                return false;
            }
            let multi = inner.options.enable_multi_sort;
            inner.state.sorting = apply_sort(&inner.state.sorting, column_id, direction, multi);
            true
        });
    }

    /// Advance the sort of one column to its next state.
    pub fn toggle_sort(&self, column_id: &str) {
        self.update(|inner| {
            if !Self::sortable_column(inner, column_id) {
                return false;
            }
            let multi = inner.options.enable_multi_sort;
            inner.state.sorting = toggle_sort(&inner.state.sorting, column_id, multi);
            true
        });
    }

    /// Remove every sort key.
    pub fn clear_sorting(&self) {
        self.update(|inner| {
            if inner.state.sorting.is_empty() {
                return false;
            }
            inner.state.sorting.clear();
            true
        });
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Set or clear the filter of one column.
    ///
    /// `None` and empty values remove the filter. Any change returns to the
    /// first page.
    pub fn set_column_filter(&self, column_id: &str, value: Option<FilterValue>) {
        self.update(|inner| {
            if let Err(err) = inner.column(column_id) {
                log::warn!("Ignoring filter: {}", err);
                return false;
            }
            let value = value.filter(|v| !v.is_empty());
            if inner.state.column_filters.get(column_id) == value.as_ref() {
                return false;
            }
            match value {
                Some(value) => {
                    inner
                        .state
                        .column_filters
                        .insert(column_id.to_string(), value);
                }
                None => {
                    inner.state.column_filters.remove(column_id);
                }
            }
            inner.reset_page_index();
            true
        });
    }

    /// Set the global filter. An empty string clears it.
    pub fn set_global_filter(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(move |inner| {
            if inner.state.global_filter == value {
                return false;
            }
            inner.state.global_filter = value;
            inner.reset_page_index();
            true
        });
    }

    /// Clear all column filters and the global filter in one update.
    pub fn reset_filters(&self) {
        self.update(|inner| {
            if !inner.state.is_filtered() {
                return false;
            }
            inner.state.column_filters.clear();
            inner.state.global_filter.clear();
            inner.reset_page_index();
            true
        });
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Show or hide a column.
    pub fn toggle_column_visibility(&self, column_id: &str, visible: bool) {
        self.update(|inner| {
            if !inner.options.enable_column_visibility {
                log::debug!("Ignoring visibility of '{}': hiding is disabled", column_id);
                return false;
            }
            match inner.column(column_id) {
                Ok(column) if !visible && !column.hideable => {
                    log::warn!("Ignoring hide of '{}': column cannot be hidden", column_id);
                    return false;
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Ignoring visibility change: {}", err);
                    return false;
                }
            }
            if visible {
                inner.state.column_visibility.remove(column_id);
            } else {
                inner
                    .state
                    .column_visibility
                    .insert(column_id.to_string(), false);
            }
            true
        });
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Go to a page, clamped to the available pages.
    pub fn set_page(&self, page_index: usize) {
        self.update(|inner| {
            let target = page_index.min(inner.page_count() - 1);
            if target == inner.state.pagination.page_index {
                return false;
            }
            inner.state.pagination.page_index = target;
            true
        });
    }

    /// Change rows per page. Always returns to the first page.
    pub fn set_page_size(&self, page_size: usize) {
        self.update(|inner| {
            if page_size == 0 {
                log::warn!("Ignoring page size of 0");
                return false;
            }
            let next = PaginationState {
                page_index: 0,
                page_size,
            };
            if next == inner.state.pagination {
                return false;
            }
            inner.state.pagination = next;
            true
        });
    }

    // -------------------------------------------------------------------------
    // View state persistence
    // -------------------------------------------------------------------------

    /// Copy of the current view state.
    pub fn view_state(&self) -> ViewState {
        self.read(|inner| inner.state.clone())
    }

    /// Re-apply a previously saved view state.
    ///
    /// Entries for unknown columns, unsortable columns and a zero page size
    /// are dropped with a warning, the same way the individual setters
    /// would ignore them.
    pub fn restore_view_state(&self, state: ViewState) {
        self.update(move |inner| {
            let mut state = state;
            let known = |id: &str| inner.columns.iter().any(|c| c.id == id);

            state.sorting.retain(|s| {
                let keep = inner.options.enable_sorting
                    && inner
                        .columns
                        .iter()
                        .any(|c| c.id == s.column_id && c.sortable);
                if !keep {
                    log::warn!("Dropping saved sort on '{}'", s.column_id);
                }
                keep
            });
            if !inner.options.enable_multi_sort {
                state.sorting.truncate(1);
            }
            state.column_filters.retain(|id, value| {
                let keep = known(id) && !value.is_empty();
                if !keep {
                    log::warn!("Dropping saved filter on '{}'", id);
                }
                keep
            });
            state.column_visibility.retain(|id, visible| {
                let keep = inner.options.enable_column_visibility
                    && inner
                        .columns
                        .iter()
                        .any(|c| c.id == *id && (*visible || c.hideable));
                if !keep {
                    log::warn!("Dropping saved visibility of '{}'", id);
                }
                keep
            });
            if state.pagination.page_size == 0 {
                log::warn!("Dropping saved page size of 0");
                state.pagination = inner.state.pagination;
            }

            inner.state = state;
            true
        });
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    /// Rows of the current page, after filtering and sorting.
    ///
    /// With manual pagination the rows are returned as given.
    pub fn visible_rows(&self) -> Vec<T> {
        self.read(|inner| {
            inner
                .page_indices()
                .iter()
                .map(|&i| inner.rows[i].clone())
                .collect()
        })
    }

    /// All rows that pass the filters, in sorted order.
    pub fn filtered_rows(&self) -> Vec<T> {
        self.read(|inner| inner.derived.iter().map(|&i| inner.rows[i].clone()).collect())
    }

    /// Number of rows matching the filters, before pagination.
    pub fn row_count(&self) -> usize {
        self.read(|inner| inner.row_count())
    }

    /// Total number of pages, never less than 1.
    pub fn page_count(&self) -> usize {
        self.read(|inner| inner.page_count())
    }

    /// Take a consistent snapshot for rendering.
    pub fn snapshot(&self) -> TableSnapshot<T> {
        self.read(|inner| TableSnapshot {
            columns: inner
                .columns
                .iter()
                .filter(|c| inner.state.is_visible(&c.id))
                .cloned()
                .collect(),
            rows: inner
                .page_indices()
                .iter()
                .map(|&i| inner.rows[i].clone())
                .collect(),
            filtered_rows: inner.derived.iter().map(|&i| inner.rows[i].clone()).collect(),
            state: inner.state.clone(),
            row_count: inner.row_count(),
            page_count: inner.page_count(),
        })
    }

    /// Distinct values of a column across all rows, with counts.
    pub fn faceted_values(&self, column_id: &str) -> Vec<(String, usize)> {
        self.read(|inner| match inner.column(column_id) {
            Ok(column) => faceted_values(column, &inner.rows),
            Err(err) => {
                log::warn!("No facets: {}", err);
                Vec::new()
            }
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// All column definitions.
    pub fn columns(&self) -> Vec<Column<T>> {
        self.read(|inner| inner.columns.clone())
    }

    /// Columns that are currently visible.
    pub fn visible_columns(&self) -> Vec<Column<T>> {
        self.read(|inner| {
            inner
                .columns
                .iter()
                .filter(|c| inner.state.is_visible(&c.id))
                .cloned()
                .collect()
        })
    }

    /// A column definition by id.
    pub fn column(&self, column_id: &str) -> Option<Column<T>> {
        self.read(|inner| inner.column(column_id).ok().cloned())
    }

    /// Whether a column is visible.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.read(|inner| inner.state.is_visible(column_id))
    }

    /// Current options.
    pub fn options(&self) -> TableOptions {
        self.read(|inner| inner.options.clone())
    }

    /// Current sort list.
    pub fn sorting(&self) -> Vec<ColumnSort> {
        self.read(|inner| inner.state.sorting.clone())
    }

    /// Sort direction of a column.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.read(|inner| inner.state.sort_direction(column_id))
    }

    /// Filter value of a column.
    pub fn column_filter(&self, column_id: &str) -> Option<FilterValue> {
        self.read(|inner| inner.state.column_filters.get(column_id).cloned())
    }

    /// All column filters.
    pub fn column_filters(&self) -> BTreeMap<String, FilterValue> {
        self.read(|inner| inner.state.column_filters.clone())
    }

    /// Current global filter.
    pub fn global_filter(&self) -> String {
        self.read(|inner| inner.state.global_filter.clone())
    }

    /// Whether any filter is active.
    pub fn is_filtered(&self) -> bool {
        self.read(|inner| inner.state.is_filtered())
    }

    /// Current page window.
    pub fn pagination(&self) -> PaginationState {
        self.read(|inner| inner.state.pagination)
    }

    /// Number of rows held, ignoring filters.
    pub fn len(&self) -> usize {
        self.read(|inner| inner.rows.len())
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}
