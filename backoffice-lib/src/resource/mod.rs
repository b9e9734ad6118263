//! Async resource slices: fetch a collection, track loading and error
//! state, mutate records and re-fetch, reporting outcomes as toasts.

mod endpoints;
mod slice;
mod state;

pub use endpoints::*;
pub use slice::*;
pub use state::*;
