use crate::geometry::{Point, Rect};

/// Find the topmost box containing `point`.
///
/// `boxes` is in render order, so later entries are on top. Entries whose
/// key equals `exclude` are skipped, which is how a dragged item is made
/// transparent to probing.
pub fn hit_test<'a, K: PartialEq>(
    boxes: &'a [(K, Rect)],
    point: Point,
    exclude: Option<&K>,
) -> Option<&'a K> {
    // Check in reverse order (last rendered = on top)
    boxes
        .iter()
        .rev()
        .filter(|(key, _)| exclude != Some(key))
        .find(|(_, rect)| rect.contains(point))
        .map(|(key, _)| key)
}
