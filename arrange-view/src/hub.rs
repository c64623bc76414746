//! Listener registry for pointer events.
//!
//! Widgets register a callback and hold the returned [`Listener`]. Dropping
//! (or detaching) the guard deregisters the callback, so a torn-down widget
//! can never receive another event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::event::PointerEvent;

type Callback<K> = Box<dyn FnMut(&PointerEvent<K>) + Send>;

fn next_listener_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

struct Registry<K> {
    listeners: Vec<(u64, Callback<K>)>,
}

/// Fan-out point for pointer events.
///
/// Cheap to clone; all clones share the same listeners.
///
/// Callbacks run while the registry is locked: a callback must not register
/// or drop a listener on the same hub.
pub struct PointerHub<K> {
    inner: Arc<Mutex<Registry<K>>>,
}

impl<K: 'static> PointerHub<K> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a callback. It stays registered until the guard goes away.
    pub fn listen<F>(&self, callback: F) -> Listener<K>
    where
        F: FnMut(&PointerEvent<K>) + Send + 'static,
    {
        let id = next_listener_id();
        if let Ok(mut guard) = self.inner.lock() {
            guard.listeners.push((id, Box::new(callback)));
            log::debug!("[hub] listener {} attached", id);
        }
        Listener {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every listener in registration order.
    ///
    /// Returns the number of listeners that saw the event.
    pub fn dispatch(&self, event: &PointerEvent<K>) -> usize {
        if let Ok(mut guard) = self.inner.lock() {
            for (_, callback) in guard.listeners.iter_mut() {
                callback(event);
            }
            return guard.listeners.len();
        }
        0
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().map(|g| g.listeners.len()).unwrap_or(0)
    }
}

impl<K: 'static> Default for PointerHub<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for PointerHub<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> std::fmt::Debug for PointerHub<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.inner.lock().map(|g| g.listeners.len()).unwrap_or(0);
        f.debug_struct("PointerHub")
            .field("listeners", &count)
            .finish()
    }
}

/// Registration guard returned by [`PointerHub::listen`].
#[must_use = "dropping the listener deregisters it immediately"]
pub struct Listener<K> {
    id: u64,
    registry: Weak<Mutex<Registry<K>>>,
}

impl<K> Listener<K> {
    /// Deregister now. Equivalent to dropping the guard.
    pub fn detach(self) {}

    /// Whether the callback is still registered on a live hub.
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .and_then(|registry| {
                registry
                    .lock()
                    .ok()
                    .map(|g| g.listeners.iter().any(|(id, _)| *id == self.id))
            })
            .unwrap_or(false)
    }
}

impl<K> Drop for Listener<K> {
    fn drop(&mut self) {
        // Hub already gone: nothing left to deregister from.
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if let Ok(mut guard) = registry.lock() {
            guard.listeners.retain(|(id, _)| *id != self.id);
            log::debug!("[hub] listener {} detached", self.id);
        }
    }
}

impl<K> std::fmt::Debug for Listener<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}
