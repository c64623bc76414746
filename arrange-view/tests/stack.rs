use arrange_view::{Keyed, Point, Rect, StackView, ViewAdapter};

#[derive(Debug, Clone, PartialEq)]
struct Item(&'static str);

impl Keyed for Item {
    type Key = String;

    fn key(&self) -> String {
        self.0.to_string()
    }
}

fn items() -> Vec<Item> {
    vec![Item("a"), Item("b"), Item("c"), Item("d")]
}

fn rendered() -> StackView<String> {
    let mut view = StackView::new(100.0, 10.0);
    ViewAdapter::<Item>::render_collection_changed(&mut view, &items());
    view
}

fn top_of(view: &StackView<String>, key: &str) -> f64 {
    ViewAdapter::<Item>::bounding_box_of(view, &key.to_string())
        .map(|rect| rect.top)
        .unwrap_or(f64::NAN)
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_render_records_order() {
    let view = rendered();
    assert_eq!(view.order(), ["a", "b", "c", "d"]);
    assert_eq!(view.render_count(), 1);
}

#[test]
fn test_rows_stack_from_origin() {
    let mut view = StackView::new(100.0, 10.0).with_origin(Point::new(0.0, 50.0));
    ViewAdapter::<Item>::render_collection_changed(&mut view, &items());
    assert_eq!(
        ViewAdapter::<Item>::bounding_box_of(&view, &"c".to_string()),
        Some(Rect::new(0.0, 70.0, 100.0, 10.0))
    );
}

#[test]
fn test_unknown_key_has_no_box() {
    let view = rendered();
    assert_eq!(
        ViewAdapter::<Item>::bounding_box_of(&view, &"zz".to_string()),
        None
    );
}

#[test]
fn test_placeholder_shifts_following_rows() {
    let mut view = rendered();
    // Drag "a" and park its placeholder after "c"
    ViewAdapter::<Item>::show_placeholder(&mut view, &"a".to_string(), 2);
    assert_eq!(top_of(&view, "b"), 0.0);
    assert_eq!(top_of(&view, "c"), 10.0);
    assert_eq!(top_of(&view, "a"), 20.0);
    assert_eq!(top_of(&view, "d"), 30.0);
    assert_eq!(view.placeholder_index(), Some(2));
}

#[test]
fn test_floating_item_is_on_top_and_excludable() {
    let mut view = rendered();
    ViewAdapter::<Item>::show_placeholder(&mut view, &"a".to_string(), 0);
    ViewAdapter::<Item>::set_item_visual_position(&mut view, &"a".to_string(), Point::new(0.0, 22.0));

    let probe = Point::new(5.0, 25.0);
    assert_eq!(
        ViewAdapter::<Item>::item_at_point(&view, probe, None),
        Some("a".to_string())
    );
    assert_eq!(
        ViewAdapter::<Item>::item_at_point(&view, probe, Some(&"a".to_string())),
        Some("c".to_string())
    );
}

#[test]
fn test_clear_placeholder_restores_flow() {
    let mut view = rendered();
    ViewAdapter::<Item>::show_placeholder(&mut view, &"a".to_string(), 3);
    ViewAdapter::<Item>::set_item_visual_position(&mut view, &"a".to_string(), Point::new(3.0, 33.0));
    ViewAdapter::<Item>::clear_placeholder(&mut view);

    assert_eq!(view.placeholder_index(), None);
    assert_eq!(view.floating_position(&"a".to_string()), None);
    assert_eq!(top_of(&view, "a"), 0.0);
    assert_eq!(top_of(&view, "d"), 30.0);
}

#[test]
fn test_loading_log() {
    let mut view = rendered();
    ViewAdapter::<Item>::set_loading(&mut view, true);
    assert!(view.is_loading());
    ViewAdapter::<Item>::set_loading(&mut view, false);
    assert!(!view.is_loading());
    assert_eq!(view.loading_log(), [true, false]);
}
