//! Back-office service library
//!
//! Generic REST resource slices (fetch, loading/error/data, toasts), the API
//! client, configuration and persisted table preferences for `gridkit` tables.

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod resource;
pub mod settings;
pub mod toast;

mod client;

pub use client::*;
pub use config::BackofficeConfig;
pub use error::{ApiError, Error};
pub use model::{Entity, Record};
pub use resource::{Endpoints, ResourceSlice, ResourceState, RestEndpoints};
pub use toast::{Toast, ToastLevel, ToastQueue};
