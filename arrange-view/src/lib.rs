pub mod adapter;
pub mod event;
pub mod geometry;
pub mod hit;
pub mod hub;
pub mod keyed;
pub mod stack;

pub use adapter::ViewAdapter;
pub use event::{Handle, PointerEvent};
pub use geometry::{Point, Rect};
pub use hit::hit_test;
pub use hub::{Listener, PointerHub};
pub use keyed::Keyed;
pub use stack::StackView;
