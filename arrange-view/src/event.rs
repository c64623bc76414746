use crate::geometry::Point;

/// The affordance a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handle<K> {
    /// The grab handle of an item: starts a drag.
    Grab(K),
    /// The delete handle of an item: removes it.
    Delete(K),
}

/// Pointer events as delivered by the presentation layer.
///
/// Sequences are untrusted: a `Up` may arrive without a `Down`, moves may
/// arrive after a cancel, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent<K> {
    /// Button pressed. `handle` is set when the press hit an item affordance.
    Down {
        position: Point,
        handle: Option<Handle<K>>,
    },
    /// Pointer moved (button held or not).
    Move { position: Point },
    /// Button released.
    Up { position: Point },
    /// Gesture aborted by the platform (focus loss, touch cancel).
    Cancel,
}

impl<K> PointerEvent<K> {
    /// The pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. } | Self::Move { position } | Self::Up { position } => {
                Some(*position)
            }
            Self::Cancel => None,
        }
    }
}
