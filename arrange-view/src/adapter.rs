//! The contract between the engines and whatever actually draws the items.

use crate::geometry::{Point, Rect};
use crate::keyed::Keyed;

/// Rendering surface consumed by the sort and reorder engines.
///
/// Only [`render_collection_changed`](ViewAdapter::render_collection_changed)
/// is required. Geometry queries default to "unknown", which makes a view
/// usable for sorting but not for dragging.
pub trait ViewAdapter<T: Keyed> {
    /// Current bounding box of an item, if it is laid out.
    fn bounding_box_of(&self, _key: &T::Key) -> Option<Rect> {
        None
    }

    /// Topmost item under `point`, skipping `exclude`.
    ///
    /// The dragged item floats under the pointer for the whole gesture, so
    /// the reorder engine always excludes it when probing.
    fn item_at_point(&self, _point: Point, _exclude: Option<&T::Key>) -> Option<T::Key> {
        None
    }

    /// Move an item's visual box so its origin sits at `position`.
    fn set_item_visual_position(&mut self, _key: &T::Key, _position: Point) {}

    /// Show the drop placeholder for `key` at `index` of the final order.
    fn show_placeholder(&mut self, _key: &T::Key, _index: usize) {}

    /// Remove the placeholder and put any floating item back into the flow.
    fn clear_placeholder(&mut self) {}

    /// Redraw after a committed change of the ordered collection.
    fn render_collection_changed(&mut self, items: &[T]);

    /// Toggle the busy indicator around a remote round-trip.
    fn set_loading(&mut self, _loading: bool) {}
}
