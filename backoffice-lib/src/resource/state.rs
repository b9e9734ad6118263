use thiserror::Error;

use crate::error::ApiError;

/// Error type for resource loading failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResourceError {
    /// Error message
    pub message: String,
    /// Whether retrying might succeed.
    pub retryable: bool,
}

impl From<&ApiError> for ResourceError {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

/// The state of an async-loadable resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Resource has not started loading
    #[default]
    Idle,
    /// Resource is loading
    Loading,
    /// Resource loaded successfully
    Ready(T),
    /// Resource failed to load
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Get reference to ready value
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present
    pub fn as_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}
