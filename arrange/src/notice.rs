//! Change notifications.
//!
//! Engines publish [`Notice`]s on a broadcast channel. Every subscriber sees
//! every notice sent after it subscribed; a subscriber that falls more than
//! the channel capacity behind observes `RecvError::Lagged`.

use tokio::sync::broadcast;

use crate::order::Order;

/// Something observable happened to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice<K> {
    /// The collection was (re)rendered with `len` items.
    CollectionChanged { len: usize },
    /// The sort state changed.
    SortChanged { field: String, order: Order },
    /// A drag was committed.
    ItemReordered {
        key: K,
        old_index: usize,
        new_index: usize,
    },
    /// An item was removed explicitly.
    ItemRemoved { key: K, index: usize },
    /// A remote request started or finished.
    Loading(bool),
    /// A remote request failed; the collection is unchanged.
    RemoteFailed { message: String },
}

/// Publishing side of the notice channel.
#[derive(Debug, Clone)]
pub struct Notifier<K> {
    tx: broadcast::Sender<Notice<K>>,
}

impl<K: Clone> Notifier<K> {
    /// Create a notifier buffering up to `capacity` notices per subscriber.
    ///
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice<K>> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish a notice. Having no subscribers is not an error.
    pub fn emit(&self, notice: Notice<K>) {
        let _ = self.tx.send(notice);
    }
}

impl<K: Clone> Default for Notifier<K> {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_NOTICE_CAPACITY)
    }
}
