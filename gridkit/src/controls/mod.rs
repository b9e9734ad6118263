//! Controls that sit around a table and dispatch into its setters.

mod filter;
mod header;
mod pagination;

pub use filter::*;
pub use header::*;
pub use pagination::*;
