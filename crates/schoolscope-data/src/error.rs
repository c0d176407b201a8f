//! Error taxonomy for the data layer.

use std::time::Duration;

/// Convenience alias for data layer results.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors surfaced by the warehouse store and query builders.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A free-text search term contained no usable tokens.
    #[error("search term contains no searchable tokens")]
    EmptySearchTerm,

    /// Establishing the connection pool failed.
    #[error("failed to connect to the warehouse")]
    Connect {
        /// Underlying driver error.
        source: sqlx::Error,
    },

    /// The startup liveness ping failed.
    #[error("warehouse ping failed")]
    Ping {
        /// Underlying driver error.
        source: sqlx::Error,
    },

    /// The startup liveness ping did not complete in time.
    #[error("warehouse ping timed out after {timeout:?}")]
    PingTimeout {
        /// Configured ping deadline.
        timeout: Duration,
    },

    /// A query failed while executing against the warehouse.
    #[error("query failed during {operation}")]
    QueryFailed {
        /// Logical operation being performed when the failure occurred.
        operation: &'static str,
        /// Underlying driver error.
        source: sqlx::Error,
    },
}

impl DataError {
    /// Build a [`DataError::QueryFailed`] tagged with the failing operation.
    #[must_use]
    pub const fn query_failed(operation: &'static str, source: sqlx::Error) -> Self {
        Self::QueryFailed { operation, source }
    }

    /// Whether the error represents invalid caller input rather than a
    /// warehouse fault.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptySearchTerm)
    }
}
