//! Error types.

use thiserror::Error;

/// Failure reported by a remote sort source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    /// Error message
    pub message: String,
}

impl RemoteError {
    /// Create a new remote error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for RemoteError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RemoteError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Why a sort request was not carried out.
///
/// Rejections leave the sort state, the rows and the subscribers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// No column with this id.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The column exists but is not sortable.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    /// The remote source failed; the previous rows are still in place.
    #[error("remote sort failed: {0}")]
    Remote(#[from] RemoteError),

    /// The table state is no longer reachable (poisoned lock).
    #[error("table state is unavailable")]
    Unavailable,
}

/// Why a drag could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("a drag is already in progress")]
    SessionActive,

    #[error("item is not in the list")]
    UnknownItem,

    #[error("the view has no geometry for the item")]
    NoGeometry,
}

/// Invalid table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page step must be at least 1")]
    ZeroPageStep,

    #[error("notice capacity must be at least 1")]
    ZeroNoticeCapacity,
}
