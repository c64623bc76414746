//! The reorder engine: `Idle → Dragging → Idle` over an ordered collection.

use arrange_view::{Keyed, Point, ViewAdapter};

use crate::error::DragError;
use crate::notice::{Notice, Notifier};

/// The drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<K> {
    key: K,
    origin_index: usize,
    pointer_offset: Point,
    insertion_index: usize,
}

impl<K> DragSession<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Index of the dragged item when the drag began.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Pointer position relative to the item's box origin at grab time.
    pub fn pointer_offset(&self) -> Point {
        self.pointer_offset
    }

    /// Where the item lands if the drag ends now, as an index of the final
    /// order.
    pub fn insertion_index(&self) -> usize {
        self.insertion_index
    }
}

/// A committed drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reordered<K> {
    pub key: K,
    pub old_index: usize,
    pub new_index: usize,
}

/// Moves one item at a time to a new position by following the pointer.
///
/// Pointer sequences are untrusted: every operation is a no-op or a typed
/// rejection when it does not fit the current state.
pub struct ReorderEngine<T: Keyed, V: ViewAdapter<T>> {
    items: Vec<T>,
    view: V,
    session: Option<DragSession<T::Key>>,
    notifier: Notifier<T::Key>,
}

impl<T: Keyed, V: ViewAdapter<T>> ReorderEngine<T, V> {
    /// Create an engine and render the initial order.
    pub fn new(items: Vec<T>, view: V) -> Self {
        Self::with_notifier(items, view, Notifier::default())
    }

    pub fn with_notifier(items: Vec<T>, mut view: V, notifier: Notifier<T::Key>) -> Self {
        view.render_collection_changed(&items);
        Self {
            items,
            view,
            session: None,
            notifier,
        }
    }

    /// Grab the item `key` with the pointer at `pointer`.
    ///
    /// Returns the item's current index.
    pub fn begin_drag(&mut self, key: &T::Key, pointer: Point) -> Result<usize, DragError> {
        if self.session.is_some() {
            return Err(DragError::SessionActive);
        }
        let index = self
            .index_of(key)
            .ok_or(DragError::UnknownItem)?;
        let bounds = self
            .view
            .bounding_box_of(key)
            .ok_or(DragError::NoGeometry)?;

        let pointer_offset = pointer - bounds.origin();
        self.view.show_placeholder(key, index);
        self.view.set_item_visual_position(key, pointer - pointer_offset);
        self.session = Some(DragSession {
            key: key.clone(),
            origin_index: index,
            pointer_offset,
            insertion_index: index,
        });

        log::debug!("[reorder] drag {:?} from {}", key, index);
        Ok(index)
    }

    /// Follow the pointer. Returns the insertion index, or `None` when idle.
    ///
    /// The item under the pointer (ignoring the dragged one) decides the drop
    /// position: above its vertical midpoint means before it, at or below
    /// means after it. Over empty space the previous position is kept.
    pub fn update_drag(&mut self, pointer: Point) -> Option<usize> {
        let session = self.session.as_mut()?;

        self.view
            .set_item_visual_position(&session.key, pointer - session.pointer_offset);

        let target = self
            .view
            .item_at_point(pointer, Some(&session.key))
            .and_then(|candidate| {
                let bounds = self.view.bounding_box_of(&candidate)?;
                let index = self
                    .items
                    .iter()
                    .filter(|item| item.key() != session.key)
                    .position(|item| item.key() == candidate)?;
                Some(if pointer.y < bounds.mid_y() { index } else { index + 1 })
            });

        if let Some(index) = target
            && index != session.insertion_index
        {
            log::trace!("[reorder] insertion {} -> {}", session.insertion_index, index);
            session.insertion_index = index;
            self.view.show_placeholder(&session.key, index);
        }
        Some(session.insertion_index)
    }

    /// Drop the item at the current insertion index.
    pub fn end_drag(&mut self) -> Option<Reordered<T::Key>> {
        let session = self.session.take()?;
        self.view.clear_placeholder();

        // Keyed lookup, so an explicit edit during the drag cannot misplace it
        let Some(old_index) = self.index_of(&session.key) else {
            self.render();
            return None;
        };
        let item = self.items.remove(old_index);
        let new_index = session.insertion_index.min(self.items.len());
        self.items.insert(new_index, item);

        log::debug!(
            "[reorder] drop {:?}: {} -> {}",
            session.key,
            old_index,
            new_index
        );
        self.notifier.emit(Notice::ItemReordered {
            key: session.key.clone(),
            old_index,
            new_index,
        });
        self.render();
        Some(Reordered {
            key: session.key,
            old_index,
            new_index,
        })
    }

    /// Abandon the drag. Returns whether one was active.
    pub fn cancel_drag(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.view.clear_placeholder();
                log::debug!("[reorder] drag {:?} cancelled", session.key);
                true
            }
            None => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<T::Key>> {
        self.session.as_ref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Insert an item at `index` (clamped to the end). Refused while dragging.
    pub fn insert(&mut self, index: usize, item: T) -> Result<usize, DragError> {
        if self.session.is_some() {
            return Err(DragError::SessionActive);
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.render();
        Ok(index)
    }

    /// Remove the item `key`. Refused while dragging.
    pub fn remove(&mut self, key: &T::Key) -> Result<T, DragError> {
        if self.session.is_some() {
            return Err(DragError::SessionActive);
        }
        let index = self.index_of(key).ok_or(DragError::UnknownItem)?;
        let item = self.items.remove(index);
        log::debug!("[reorder] removed {:?} at {}", key, index);
        self.notifier.emit(Notice::ItemRemoved {
            key: key.clone(),
            index,
        });
        self.render();
        Ok(item)
    }

    /// Replace all items, abandoning any drag.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.cancel_drag();
        self.items = items;
        self.render();
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Notice<T::Key>> {
        self.notifier.subscribe()
    }

    pub fn notifier(&self) -> &Notifier<T::Key> {
        &self.notifier
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn index_of(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    fn render(&mut self) {
        self.view.render_collection_changed(&self.items);
        self.notifier.emit(Notice::CollectionChanged {
            len: self.items.len(),
        });
    }
}
