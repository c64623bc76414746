use std::fmt::Debug;
use std::hash::Hash;

/// Anything with a stable identity that survives reordering.
///
/// Views and engines correlate items by key, never by position.
pub trait Keyed {
    /// The key type used to identify an item.
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Return the unique key for this item.
    fn key(&self) -> Self::Key;
}
