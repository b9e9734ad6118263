//! Render surface: maps a table's visible rows and columns to a grid of cells.
//!
//! The output is a plain data structure. Front ends paint it however they
//! like; [`text`] paints it as a fixed-width text grid.

pub mod text;

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::column::{Alignment, Column};
use crate::controls::PaginationControl;
use crate::engine::{Table, TableSnapshot};
use crate::error::extract_panic_message;
use crate::state::SortDirection;

/// Skeleton rows shown while loading.
pub const DEFAULT_SKELETON_ROWS: usize = 10;

/// Message of the empty-state row.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No results.";

/// Class/style overrides per structural region.
///
/// Carried through to the output untouched; they never change behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionStyles {
    pub header: Option<String>,
    pub body: Option<String>,
    pub row: Option<String>,
    pub cell: Option<String>,
    pub footer: Option<String>,
    pub pagination: Option<String>,
    pub filter_bar: Option<String>,
}

/// Which of the three body variants was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Loading,
    Empty,
    Rows,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: String,
    pub text: String,
    pub align: Alignment,
    pub width: Option<u16>,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Rendered content.
    Text(String),
    /// The accessor or renderer panicked; holds the panic message.
    Failed(String),
}

impl Cell {
    /// Text to show for this cell.
    pub fn display(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Failed(_) => "⚠",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Cell::Failed(_))
    }
}

/// One body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub cells: Vec<Cell>,
}

/// Body content, one variant per render mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Placeholder rows while data loads.
    Skeleton { rows: usize, columns: usize },
    /// A single full-width row.
    Empty { colspan: usize, message: String },
    /// Data rows.
    Rows(Vec<RenderedRow>),
}

/// A fully rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub header: Vec<HeaderCell>,
    pub body: Body,
    /// Present only when some visible column defines a footer.
    pub footer: Option<Vec<String>>,
    pub pagination: PaginationControl,
    pub styles: RegionStyles,
}

impl RenderedTable {
    pub fn mode(&self) -> RenderMode {
        match self.body {
            Body::Skeleton { .. } => RenderMode::Loading,
            Body::Empty { .. } => RenderMode::Empty,
            Body::Rows(_) => RenderMode::Rows,
        }
    }

    /// Data rows, empty for skeleton and empty modes.
    pub fn rows(&self) -> &[RenderedRow] {
        match &self.body {
            Body::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Renders tables in one of three modes.
///
/// Precedence: `loading` renders skeleton rows, no visible rows renders the
/// empty row, otherwise one row per visible row. A cell whose accessor or
/// renderer panics becomes [`Cell::Failed`] and the rest of the table still
/// renders.
///
/// # Example
///
/// ```
/// use gridkit::{CellValue, Column, Table, TableOptions};
/// use gridkit::render::{RenderMode, RenderSurface};
///
/// let table = Table::new(
///     vec![Column::new("n", "N", |n: &i64| CellValue::from(*n))],
///     vec![],
///     TableOptions::new(),
/// )
/// .unwrap();
///
/// let surface = RenderSurface::new();
/// assert_eq!(surface.loading(true).render(&table).mode(), RenderMode::Loading);
/// assert_eq!(RenderSurface::new().render(&table).mode(), RenderMode::Empty);
/// ```
#[derive(Debug, Clone)]
pub struct RenderSurface {
    loading: bool,
    skeleton_rows: usize,
    empty_message: String,
    styles: RegionStyles,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface {
    pub fn new() -> Self {
        Self {
            loading: false,
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            styles: RegionStyles::default(),
        }
    }

    /// Render skeleton rows instead of data.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Number of skeleton rows.
    pub fn skeleton_rows(mut self, rows: usize) -> Self {
        self.skeleton_rows = rows;
        self
    }

    /// Message of the empty-state row.
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Region style overrides.
    pub fn styles(mut self, styles: RegionStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Render the table's current page.
    pub fn render<T: Clone>(&self, table: &Table<T>) -> RenderedTable {
        let snapshot = table.snapshot();
        self.render_snapshot(&snapshot, table.options().page_size_options)
    }

    /// Render a snapshot taken earlier.
    pub fn render_snapshot<T>(
        &self,
        snapshot: &TableSnapshot<T>,
        page_size_options: Vec<usize>,
    ) -> RenderedTable {
        let columns = &snapshot.columns;
        let header = columns
            .iter()
            .map(|column| {
                let sort = snapshot.state.sort_direction(&column.id);
                HeaderCell {
                    column_id: column.id.clone(),
                    text: column.render_header(sort),
                    align: column.align,
                    width: column.width,
                    sortable: column.sortable,
                    sort,
                }
            })
            .collect();

        let body = if self.loading {
            Body::Skeleton {
                rows: self.skeleton_rows,
                columns: columns.len(),
            }
        } else if snapshot.rows.is_empty() {
            Body::Empty {
                colspan: columns.len().max(1),
                message: self.empty_message.clone(),
            }
        } else {
            Body::Rows(
                snapshot
                    .rows
                    .iter()
                    .map(|row| RenderedRow {
                        cells: columns.iter().map(|c| render_cell(c, row)).collect(),
                    })
                    .collect(),
            )
        };

        let footer = columns.iter().any(|c| c.has_footer()).then(|| {
            columns
                .iter()
                .map(|c| render_footer(c, &snapshot.filtered_rows))
                .collect()
        });

        RenderedTable {
            header,
            body,
            footer,
            pagination: PaginationControl::from_snapshot(snapshot, page_size_options),
            styles: self.styles.clone(),
        }
    }
}

fn render_cell<T>(column: &Column<T>, row: &T) -> Cell {
    match catch_unwind(AssertUnwindSafe(|| column.render_cell(row))) {
        Ok(text) => Cell::Text(text),
        Err(panic) => {
            let message = extract_panic_message(&*panic);
            log::warn!("Cell '{}' failed to render: {}", column.id, message);
            Cell::Failed(message)
        }
    }
}

fn render_footer<T>(column: &Column<T>, rows: &[T]) -> String {
    match catch_unwind(AssertUnwindSafe(|| column.render_footer(rows))) {
        Ok(text) => text.unwrap_or_default(),
        Err(panic) => {
            log::warn!(
                "Footer '{}' failed to render: {}",
                column.id,
                extract_panic_message(&*panic)
            );
            String::new()
        }
    }
}
