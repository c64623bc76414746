//! A drag-to-reorder list wired to a pointer hub.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use arrange_view::{Handle, Keyed, Listener, PointerEvent, PointerHub, ViewAdapter};

use crate::notice::{Notice, Notifier};

use super::engine::ReorderEngine;

/// Routes pointer events from a [`PointerHub`] into a [`ReorderEngine`].
///
/// - down on a grab handle starts a drag
/// - down on a delete handle removes the item
/// - move follows the pointer, up drops, cancel abandons
///
/// Dropping the list (or calling [`teardown`](SortableList::teardown))
/// deregisters from the hub and cancels any drag in progress.
pub struct SortableList<T: Keyed, V: ViewAdapter<T>> {
    engine: Arc<Mutex<ReorderEngine<T, V>>>,
    notifier: Notifier<T::Key>,
    listener: Option<Listener<T::Key>>,
}

impl<T, V> SortableList<T, V>
where
    T: Keyed + Send + 'static,
    V: ViewAdapter<T> + Send + 'static,
{
    /// Take ownership of `engine` and start listening on `hub`.
    pub fn attach(engine: ReorderEngine<T, V>, hub: &PointerHub<T::Key>) -> Self {
        let notifier = engine.notifier().clone();
        let engine = Arc::new(Mutex::new(engine));

        let target = Arc::clone(&engine);
        let listener = hub.listen(move |event| {
            if let Ok(mut engine) = target.lock() {
                route(&mut engine, event);
            }
        });

        Self {
            engine,
            notifier,
            listener: Some(listener),
        }
    }
}

impl<T: Keyed, V: ViewAdapter<T>> SortableList<T, V> {
    /// Stop listening and abandon any drag. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.detach();
        }
        if let Ok(mut engine) = self.engine.lock() {
            engine.cancel_drag();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener
            .as_ref()
            .is_some_and(|listener| listener.is_attached())
    }

    pub fn is_dragging(&self) -> bool {
        self.engine
            .lock()
            .map(|engine| engine.is_dragging())
            .unwrap_or(false)
    }

    /// Snapshot of the items in display order.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.engine
            .lock()
            .map(|engine| engine.items().to_vec())
            .unwrap_or_default()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice<T::Key>> {
        self.notifier.subscribe()
    }

    /// Run `f` against the engine.
    ///
    /// Must not be called from inside a hub callback.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut ReorderEngine<T, V>) -> R) -> Option<R> {
        self.engine.lock().ok().map(|mut engine| f(&mut engine))
    }
}

impl<T: Keyed, V: ViewAdapter<T>> Drop for SortableList<T, V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn route<T: Keyed, V: ViewAdapter<T>>(
    engine: &mut ReorderEngine<T, V>,
    event: &PointerEvent<T::Key>,
) {
    match event {
        PointerEvent::Down {
            position,
            handle: Some(Handle::Grab(key)),
        } => {
            if let Err(err) = engine.begin_drag(key, *position) {
                log::debug!("[list] grab {:?} ignored: {}", key, err);
            }
        }
        PointerEvent::Down {
            handle: Some(Handle::Delete(key)),
            ..
        } => {
            if let Err(err) = engine.remove(key) {
                log::debug!("[list] delete {:?} ignored: {}", key, err);
            }
        }
        PointerEvent::Down { handle: None, .. } => {}
        PointerEvent::Move { position } => {
            engine.update_drag(*position);
        }
        PointerEvent::Up { position } => {
            if engine.is_dragging() {
                engine.update_drag(*position);
                engine.end_drag();
            }
        }
        PointerEvent::Cancel => {
            engine.cancel_drag();
        }
    }
}
