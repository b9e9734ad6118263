pub mod column;
pub mod controls;
pub mod engine;
pub mod error;
pub mod filter;
pub mod render;
pub mod sort;
pub mod state;
pub mod utils;
pub mod value;

pub use column::{Alignment, Column, FilterOption, FilterSpec};
pub use engine::{Table, TableId, TableOptions, TableSnapshot};
pub use error::TableError;
pub use state::{
    ColumnSort, DEFAULT_PAGE_SIZE, FilterValue, PaginationState, SortDirection, ViewState,
};
pub use value::CellValue;

pub mod prelude {
    pub use crate::column::{Alignment, Column, FilterOption, FilterSpec};
    pub use crate::controls::{
        ColumnHeader, ColumnVisibilityMenu, FilterBar, FilterControl, FilterTarget, HeaderAction,
        MultiSelectFilter, PaginationControl, SelectFilter, TextFilter,
    };
    pub use crate::engine::{Table, TableId, TableOptions, TableSnapshot};
    pub use crate::error::TableError;
    pub use crate::render::text::{TextOptions, paint};
    pub use crate::render::{RegionStyles, RenderMode, RenderSurface, RenderedTable};
    pub use crate::state::{ColumnSort, FilterValue, PaginationState, SortDirection, ViewState};
    pub use crate::value::CellValue;
}
