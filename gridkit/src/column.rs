//! Column definitions and per-column filter specifications.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::error::extract_panic_message;
use crate::state::SortDirection;
use crate::value::CellValue;

/// Reads a value out of a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Renders a row's cell as display text.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Renders a footer from all rows that pass the current filters.
pub type FooterRenderer<T> = Arc<dyn Fn(&[T]) -> String + Send + Sync>;

/// Renders a header given the column's current sort direction.
pub type HeaderRenderer = Arc<dyn Fn(Option<SortDirection>) -> String + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// One choice of a select or multiselect filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterOption {
    /// Text shown to the user.
    pub label: String,
    /// Value matched against the stringified cell value.
    pub value: String,
}

impl FilterOption {
    /// Creates a new option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How a column can be filtered.
///
/// Filter adapters dispatch on this exhaustively; there is no string-keyed
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSpec {
    /// The column has no filter input.
    #[default]
    None,
    /// Free-text substring filter.
    Text { placeholder: Option<String> },
    /// Single choice from a fixed option list.
    Select {
        options: Vec<FilterOption>,
        placeholder: Option<String>,
    },
    /// Any number of choices from a fixed option list (faceted filter).
    MultiSelect {
        options: Vec<FilterOption>,
        placeholder: Option<String>,
    },
}

impl FilterSpec {
    /// Returns the option list for select-like specs.
    pub fn options(&self) -> &[FilterOption] {
        match self {
            FilterSpec::Select { options, .. } | FilterSpec::MultiSelect { options, .. } => {
                options
            }
            FilterSpec::None | FilterSpec::Text { .. } => &[],
        }
    }

    /// Returns the placeholder text, if any.
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            FilterSpec::None => None,
            FilterSpec::Text { placeholder }
            | FilterSpec::Select { placeholder, .. }
            | FilterSpec::MultiSelect { placeholder, .. } => placeholder.as_deref(),
        }
    }
}

/// A table column definition.
///
/// Columns are immutable once handed to the engine. Sorting, hiding and
/// global filtering are enabled by default and can be switched off per
/// column.
///
/// # Example
///
/// ```
/// use gridkit::{Column, FilterOption};
///
/// struct Product {
///     name: String,
///     status: String,
///     stock: i64,
/// }
///
/// let columns: Vec<Column<Product>> = vec![
///     Column::new("name", "Name", |p: &Product| p.name.as_str().into()).text_filter("Search names"),
///     Column::new("status", "Status", |p: &Product| p.status.as_str().into()).select_filter(vec![
///         FilterOption::new("Active", "active"),
///         FilterOption::new("Draft", "draft"),
///     ]),
///     Column::new("stock", "Stock", |p: &Product| p.stock.into()).disable_hiding(),
/// ];
/// ```
pub struct Column<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text displayed at the top.
    pub header: String,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Preferred width in characters, for text painting.
    pub width: Option<u16>,
    /// Whether the column may be sorted.
    pub sortable: bool,
    /// Whether the column may be hidden by the user.
    pub hideable: bool,
    /// Whether the column takes part in the global filter.
    pub filterable: bool,
    /// Filter input for this column.
    pub filter: FilterSpec,
    accessor: Accessor<T>,
    cell: Option<CellRenderer<T>>,
    header_renderer: Option<HeaderRenderer>,
    footer: Option<FooterRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a new column with the given id, header and accessor.
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            align: Alignment::Left,
            width: None,
            sortable: true,
            hideable: true,
            filterable: true,
            filter: FilterSpec::None,
            accessor: Arc::new(accessor),
            cell: None,
            header_renderer: None,
            footer: None,
        }
    }

    /// Set a custom cell renderer.
    pub fn cell(mut self, renderer: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(renderer));
        self
    }

    /// Set a custom header renderer.
    pub fn header_with(
        mut self,
        renderer: impl Fn(Option<SortDirection>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.header_renderer = Some(Arc::new(renderer));
        self
    }

    /// Set a footer renderer.
    pub fn footer(mut self, renderer: impl Fn(&[T]) -> String + Send + Sync + 'static) -> Self {
        self.footer = Some(Arc::new(renderer));
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set a preferred width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Prevent sorting by this column.
    pub fn disable_sorting(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Prevent the user from hiding this column.
    pub fn disable_hiding(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Exclude this column from the global filter.
    pub fn disable_global_filter(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Set the filter spec.
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filter = spec;
        self
    }

    /// Use a free-text filter.
    pub fn text_filter(self, placeholder: impl Into<String>) -> Self {
        self.filter(FilterSpec::Text {
            placeholder: Some(placeholder.into()),
        })
    }

    /// Use a single-choice filter.
    pub fn select_filter(self, options: Vec<FilterOption>) -> Self {
        self.filter(FilterSpec::Select {
            options,
            placeholder: None,
        })
    }

    /// Use a multiple-choice filter.
    pub fn multi_select_filter(self, options: Vec<FilterOption>) -> Self {
        self.filter(FilterSpec::MultiSelect {
            options,
            placeholder: None,
        })
    }

    /// Read this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Read this column's value, or `None` when the accessor panics.
    ///
    /// Used while filtering and sorting so one malformed row cannot take
    /// the table down.
    pub fn try_value(&self, row: &T) -> Option<CellValue> {
        match catch_unwind(AssertUnwindSafe(|| self.value(row))) {
            Ok(value) => Some(value),
            Err(panic) => {
                log::warn!(
                    "Accessor of column '{}' failed: {}",
                    self.id,
                    extract_panic_message(&*panic)
                );
                None
            }
        }
    }

    /// Render a cell, falling back to the raw value.
    pub fn render_cell(&self, row: &T) -> String {
        match &self.cell {
            Some(renderer) => renderer(row),
            None => self.value(row).to_string(),
        }
    }

    /// Render the header text for the given sort direction.
    pub fn render_header(&self, sort: Option<SortDirection>) -> String {
        match &self.header_renderer {
            Some(renderer) => renderer(sort),
            None => self.header.clone(),
        }
    }

    /// Whether a footer renderer is defined.
    pub fn has_footer(&self) -> bool {
        self.footer.is_some()
    }

    /// Render the footer, if any.
    pub fn render_footer(&self, rows: &[T]) -> Option<String> {
        self.footer.as_ref().map(|renderer| renderer(rows))
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            align: self.align,
            width: self.width,
            sortable: self.sortable,
            hideable: self.hideable,
            filterable: self.filterable,
            filter: self.filter.clone(),
            accessor: Arc::clone(&self.accessor),
            cell: self.cell.clone(),
            header_renderer: self.header_renderer.clone(),
            footer: self.footer.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("filterable", &self.filterable)
            .field("filter", &self.filter)
            .field("has_cell_renderer", &self.cell.is_some())
            .field("has_footer", &self.footer.is_some())
            .finish()
    }
}
