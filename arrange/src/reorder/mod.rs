//! Drag-to-reorder lists.

mod engine;
mod list;

pub use engine::{DragSession, ReorderEngine, Reordered};
pub use list::SortableList;
