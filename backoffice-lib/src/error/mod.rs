//! Error types

mod api;

pub use api::*;

pub use crate::config::ConfigError;
pub use crate::settings::SettingsError;

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] gridkit::TableError),
}
