//! Remote sorting: requests, tickets and the source trait.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::order::Order;

/// What a remote source is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub field: String,
    pub order: Order,
    pub range_start: usize,
    pub range_count: usize,
}

/// A data source that returns rows already sorted.
///
/// # Example
///
/// ```
/// use arrange::error::RemoteError;
/// use arrange::row::Record;
/// use arrange::sort::{RemoteSource, SortRequest};
///
/// struct Empty;
///
/// #[async_trait::async_trait]
/// impl RemoteSource<Record> for Empty {
///     async fn fetch(&self, _request: SortRequest) -> Result<Vec<Record>, RemoteError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait RemoteSource<T>: Send + Sync {
    async fn fetch(&self, request: SortRequest) -> Result<Vec<T>, RemoteError>;
}

/// An outstanding remote request issued by a sort engine.
///
/// Only the ticket with the newest generation may change the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTicket {
    pub(crate) generation: u64,
    pub(crate) request: SortRequest,
    pub(crate) append: bool,
}

impl RemoteTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &SortRequest {
        &self.request
    }

    /// Whether the response extends the collection instead of replacing it.
    pub fn is_append(&self) -> bool {
        self.append
    }
}

/// How a remote response was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResolution {
    /// The response was applied; the collection now has `len` rows.
    Applied { len: usize },
    /// A newer request was issued; the response was dropped.
    Stale,
    /// The source failed; the collection was left as it was.
    Failed(RemoteError),
}
