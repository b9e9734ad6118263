//! Entity models

mod entity;
mod record;

pub use entity::*;
pub use record::*;
