//! In-memory vertical stack layout.
//!
//! `StackView` lays items out top to bottom in fixed-height rows, the way a
//! plain block list renders. During a drag the placeholder occupies a slot
//! in the flow and the dragged item floats at its visual position, on top of
//! everything else. It records what the engines asked of it so callers can
//! inspect the outcome.

use std::collections::HashMap;
use std::hash::Hash;

use crate::adapter::ViewAdapter;
use crate::geometry::{Point, Rect};
use crate::hit::hit_test;
use crate::keyed::Keyed;

#[derive(Debug, Clone)]
pub struct StackView<K> {
    origin: Point,
    width: f64,
    row_height: f64,
    /// Keys in the last rendered order.
    order: Vec<K>,
    /// Dragged key and the slot its placeholder occupies.
    placeholder: Option<(K, usize)>,
    /// Items moved out of the flow by `set_item_visual_position`.
    floating: HashMap<K, Point>,
    loading: bool,
    loading_log: Vec<bool>,
    renders: usize,
}

impl<K: Clone + Eq + Hash> StackView<K> {
    pub fn new(width: f64, row_height: f64) -> Self {
        Self {
            origin: Point::default(),
            width,
            row_height,
            order: Vec::new(),
            placeholder: None,
            floating: HashMap::new(),
            loading: false,
            loading_log: Vec::new(),
            renders: 0,
        }
    }

    /// Offset the whole stack, e.g. when the list sits below a header.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Keys in the order last passed to `render_collection_changed`.
    pub fn order(&self) -> &[K] {
        &self.order
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.placeholder.as_ref().map(|(_, index)| *index)
    }

    pub fn floating_position(&self, key: &K) -> Option<Point> {
        self.floating.get(key).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every loading flag change, in order.
    pub fn loading_log(&self) -> &[bool] {
        &self.loading_log
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The box of the `slot`-th row of the flow.
    pub fn slot_rect(&self, slot: usize) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y + slot as f64 * self.row_height,
            self.width,
            self.row_height,
        )
    }

    fn placed(&self, key: &K, home: Rect) -> Rect {
        self.floating
            .get(key)
            .map_or(home, |position| home.moved_to(*position))
    }

    /// Current boxes in render order (floating items last, i.e. on top).
    pub fn layout(&self) -> Vec<(K, Rect)> {
        let Some((dragged, index)) = &self.placeholder else {
            let (floating, mut flow): (Vec<_>, Vec<_>) = self
                .order
                .iter()
                .enumerate()
                .map(|(slot, key)| (key.clone(), self.placed(key, self.slot_rect(slot))))
                .partition(|(key, _)| self.floating.contains_key(key));
            flow.extend(floating);
            return flow;
        };

        let mut boxes = Vec::with_capacity(self.order.len());
        let mut slot = 0;
        for key in self.order.iter().filter(|key| *key != dragged) {
            if slot == *index {
                slot += 1;
            }
            boxes.push((key.clone(), self.slot_rect(slot)));
            slot += 1;
        }
        if self.order.contains(dragged) {
            boxes.push((dragged.clone(), self.placed(dragged, self.slot_rect(*index))));
        }
        boxes
    }
}

impl<T: Keyed> ViewAdapter<T> for StackView<T::Key> {
    fn bounding_box_of(&self, key: &T::Key) -> Option<Rect> {
        self.layout()
            .into_iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, rect)| rect)
    }

    fn item_at_point(&self, point: Point, exclude: Option<&T::Key>) -> Option<T::Key> {
        let boxes = self.layout();
        hit_test(&boxes, point, exclude).cloned()
    }

    fn set_item_visual_position(&mut self, key: &T::Key, position: Point) {
        self.floating.insert(key.clone(), position);
    }

    fn show_placeholder(&mut self, key: &T::Key, index: usize) {
        self.placeholder = Some((key.clone(), index));
    }

    fn clear_placeholder(&mut self) {
        if let Some((key, _)) = self.placeholder.take() {
            self.floating.remove(&key);
        }
    }

    fn render_collection_changed(&mut self, items: &[T]) {
        self.order = items.iter().map(Keyed::key).collect();
        self.renders += 1;
        log::trace!("[stack] rendered {} items", self.order.len());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_log.push(loading);
    }
}
