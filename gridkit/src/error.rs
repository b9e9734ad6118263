//! Table error types

/// Errors reported by the table engine.
///
/// Only configuration errors are surfaced to callers. Unknown column
/// references from setters are logged and ignored, since they come from a
/// wiring mistake in the caller rather than from user interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// `configure()` was called with an impossible state.
    #[error("Invalid table configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// A setter addressed a column id that is not defined.
    #[error("Unknown column '{column_id}'")]
    UnknownColumnReference {
        /// The column id that was not found.
        column_id: String,
    },
}

impl TableError {
    /// Creates a new invalid configuration error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Creates a new unknown column error.
    pub fn unknown_column(column_id: impl Into<String>) -> Self {
        Self::UnknownColumnReference {
            column_id: column_id.into(),
        }
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
