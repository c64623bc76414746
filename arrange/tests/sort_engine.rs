use std::cmp::Ordering;

use arrange::prelude::*;
use arrange::sort::SortOutcome;

type Engine = SortEngine<Record, StackView<String>>;

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("images", "Image"),
        Column::new("title", "Name").sortable(SortType::String),
        Column::new("price", "Price").sortable(SortType::Number),
        Column::new("created", "Created").sortable(SortType::Date),
    ]
}

fn record(id: &str, title: &str, price: impl Into<Value>) -> Record {
    Record::new(id).with("title", title).with("price", price)
}

fn engine(rows: Vec<Record>) -> Engine {
    SortEngine::new(columns(), rows, StackView::new(100.0, 20.0), &TableConfig::new())
        .unwrap()
}

fn keys(engine: &Engine) -> Vec<String> {
    engine.rows().iter().map(|row| row.key()).collect()
}

fn drain<K: Clone>(rx: &mut tokio::sync::broadcast::Receiver<Notice<K>>) -> Vec<Notice<K>> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}

// ============================================================================
// Local sorting
// ============================================================================

#[test]
fn test_sort_strings_uppercase_first() {
    let mut engine = engine(vec![
        record("1", "banana", 1),
        record("2", "Apple", 2),
        record("3", "apple", 3),
    ]);
    let outcome = engine.sort("title", Order::Asc).unwrap();
    assert_eq!(outcome, SortOutcome::Sorted { len: 3 });
    assert_eq!(keys(&engine), ["2", "3", "1"]);
}

#[test]
fn test_sort_numbers_descending_invalid_last() {
    let mut engine = engine(vec![
        record("a", "a", 5),
        record("b", "b", "x"),
        record("c", "c", 2),
    ]);
    engine.sort("price", Order::Desc).unwrap();
    assert_eq!(keys(&engine), ["a", "c", "b"]);
}

#[test]
fn test_sort_numbers_ascending_invalid_last() {
    let mut engine = engine(vec![
        record("a", "a", 5),
        record("b", "b", "x"),
        record("c", "c", 2),
        record("d", "d", Value::Missing),
    ]);
    engine.sort("price", Order::Asc).unwrap();
    assert_eq!(keys(&engine), ["c", "a", "b", "d"]);
}

#[test]
fn test_sort_is_idempotent() {
    let mut engine = engine(vec![
        record("1", "pear", 3),
        record("2", "fig", 1),
        record("3", "kiwi", 2),
    ]);
    engine.sort("price", Order::Desc).unwrap();
    let first = keys(&engine);
    engine.sort("price", Order::Desc).unwrap();
    assert_eq!(keys(&engine), first);
}

#[test]
fn test_sort_is_stable() {
    let mut engine = engine(vec![
        record("1", "x", 2),
        record("2", "y", 1),
        record("3", "z", 2),
        record("4", "w", 1),
    ]);
    engine.sort("price", Order::Asc).unwrap();
    assert_eq!(keys(&engine), ["2", "4", "1", "3"]);
    engine.sort("price", Order::Desc).unwrap();
    assert_eq!(keys(&engine), ["1", "3", "2", "4"]);
}

#[test]
fn test_sort_dates() {
    let mut engine = engine(vec![
        Record::new("old").with("created", "2020-01-01"),
        Record::new("bad").with("created", "soon"),
        Record::new("new").with("created", "2024-06-01 10:00:00"),
    ]);
    engine.sort("created", Order::Desc).unwrap();
    assert_eq!(keys(&engine), ["new", "old", "bad"]);
}

#[test]
fn test_custom_comparator_sign_respected() {
    // Orders by title length, ignoring the value
    let columns = vec![Column::new("title", "Name").custom(
        |_: &Value, _: &Value, a: &Record, b: &Record| {
            let len = |row: &Record| row.value("title").as_text().chars().count();
            len(a).cmp(&len(b))
        },
    )];
    let rows = vec![
        record("long", "watermelon", 1),
        record("short", "fig", 2),
        record("mid", "apple", 3),
    ];
    let mut engine: Engine =
        SortEngine::new(columns, rows, StackView::new(100.0, 20.0), &TableConfig::new()).unwrap();

    engine.sort("title", Order::Asc).unwrap();
    assert_eq!(keys(&engine), ["short", "mid", "long"]);
    engine.sort("title", Order::Desc).unwrap();
    assert_eq!(keys(&engine), ["long", "mid", "short"]);
}

#[test]
fn test_sort_renders_view() {
    let mut engine = engine(vec![record("1", "b", 1), record("2", "a", 2)]);
    engine.sort("title", Order::Asc).unwrap();
    assert_eq!(engine.view().order(), ["2", "1"]);
    assert_eq!(engine.view().render_count(), 1);
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_unknown_column_rejected() {
    let mut engine = engine(vec![record("1", "b", 1), record("2", "a", 2)]);
    let mut rx = engine.subscribe();

    let err = engine.sort("weight", Order::Asc).unwrap_err();
    assert_eq!(err, SortError::UnknownColumn("weight".into()));
    assert_eq!(engine.current_order(), SortState::new(SortMode::Local));
    assert_eq!(keys(&engine), ["1", "2"]);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_non_sortable_column_rejected() {
    let mut engine = engine(vec![record("1", "b", 1), record("2", "a", 2)]);
    engine.sort("price", Order::Desc).unwrap();
    let before = engine.current_order();
    let mut rx = engine.subscribe();

    let err = engine.sort("images", Order::Asc).unwrap_err();
    assert_eq!(err, SortError::NotSortable("images".into()));
    assert_eq!(engine.current_order(), before);
    assert_eq!(keys(&engine), ["2", "1"]);
    assert!(drain(&mut rx).is_empty());
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_sort_notifies() {
    let mut engine = engine(vec![record("1", "b", 1), record("2", "a", 2)]);
    let mut rx = engine.subscribe();

    engine.sort("title", Order::Asc).unwrap();
    assert_eq!(
        drain(&mut rx),
        vec![
            Notice::SortChanged {
                field: "title".into(),
                order: Order::Asc
            },
            Notice::CollectionChanged { len: 2 },
        ]
    );
    assert_eq!(engine.current_order().field.as_deref(), Some("title"));
    assert_eq!(engine.current_order().order, Some(Order::Asc));
}

#[test]
fn test_empty_collection_still_notifies() {
    let mut engine = engine(Vec::new());
    let mut rx = engine.subscribe();

    let outcome = engine.sort("price", Order::Asc).unwrap();
    assert_eq!(outcome, SortOutcome::Sorted { len: 0 });
    assert!(drain(&mut rx).contains(&Notice::CollectionChanged { len: 0 }));
    assert_eq!(engine.view().render_count(), 1);
}

// ============================================================================
// Initial sort
// ============================================================================

#[test]
fn test_start_uses_configured_sort() {
    let config = TableConfig::new().sorted_by("price", Order::Desc);
    let rows = vec![record("1", "b", 1), record("2", "a", 2)];
    let mut engine: Engine =
        SortEngine::new(columns(), rows, StackView::new(100.0, 20.0), &config).unwrap();

    engine.start();
    assert_eq!(keys(&engine), ["2", "1"]);
    assert_eq!(engine.current_order().order, Some(Order::Desc));
}

#[test]
fn test_start_falls_back_to_first_sortable() {
    let config = TableConfig::new().sorted_by("images", Order::Desc);
    let rows = vec![record("1", "b", 1), record("2", "a", 2)];
    let mut engine: Engine =
        SortEngine::new(columns(), rows, StackView::new(100.0, 20.0), &config).unwrap();

    engine.start();
    assert_eq!(engine.current_order().field.as_deref(), Some("title"));
    assert_eq!(engine.current_order().order, Some(Order::Asc));
    assert_eq!(keys(&engine), ["2", "1"]);
}

#[test]
fn test_start_without_sortable_columns_renders_as_given() {
    let columns = vec![Column::new("title", "Name")];
    let rows = vec![record("1", "b", 1), record("2", "a", 2)];
    let mut engine: Engine =
        SortEngine::new(columns, rows, StackView::new(100.0, 20.0), &TableConfig::new())
            .unwrap();

    assert!(engine.start().is_none());
    assert_eq!(engine.current_order().field, None);
    assert_eq!(engine.view().order(), ["1", "2"]);
}

#[test]
fn test_zero_page_step_rejected() {
    let result: Result<Engine, _> = SortEngine::new(
        columns(),
        Vec::new(),
        StackView::new(100.0, 20.0),
        &TableConfig::new().page(0, 0),
    );
    assert!(matches!(result, Err(ConfigError::ZeroPageStep)));
}

// ============================================================================
// Remote bookkeeping
// ============================================================================

fn remote_engine(rows: Vec<Record>) -> Engine {
    SortEngine::new(
        columns(),
        rows,
        StackView::new(100.0, 20.0),
        &TableConfig::remote().page(0, 2),
    )
    .unwrap()
}

fn ticket(outcome: SortOutcome) -> RemoteTicket {
    match outcome {
        SortOutcome::Requested(ticket) => ticket,
        other => panic!("expected a remote request, got {:?}", other),
    }
}

#[test]
fn test_remote_sort_does_not_reorder_locally() {
    let mut engine = remote_engine(vec![record("1", "b", 1), record("2", "a", 2)]);
    let ticket = ticket(engine.sort("title", Order::Asc).unwrap());

    assert_eq!(keys(&engine), ["1", "2"]);
    assert!(engine.is_loading());
    assert_eq!(engine.view().loading_log(), [true]);
    assert_eq!(
        ticket.request(),
        &SortRequest {
            field: "title".into(),
            order: Order::Asc,
            range_start: 0,
            range_count: 2,
        }
    );
}

#[test]
fn test_stale_response_ignored() {
    let mut engine = remote_engine(Vec::new());
    let first = ticket(engine.sort("title", Order::Asc).unwrap());
    let second = ticket(engine.sort("title", Order::Desc).unwrap());

    let newest = vec![record("z", "z", 1)];
    assert_eq!(
        engine.apply_remote(second, Ok(newest)),
        RemoteResolution::Applied { len: 1 }
    );
    assert_eq!(
        engine.apply_remote(first, Ok(vec![record("a", "a", 1)])),
        RemoteResolution::Stale
    );
    assert_eq!(keys(&engine), ["z"]);
    assert!(!engine.is_loading());
}

#[test]
fn test_stale_response_leaves_loading_on() {
    let mut engine = remote_engine(Vec::new());
    let first = ticket(engine.sort("title", Order::Asc).unwrap());
    let _second = ticket(engine.sort("price", Order::Asc).unwrap());

    assert_eq!(engine.apply_remote(first, Ok(Vec::new())), RemoteResolution::Stale);
    assert!(engine.is_loading());
    assert_eq!(engine.view().loading_log(), [true, true]);
}

#[test]
fn test_remote_failure_keeps_rows() {
    let mut engine = remote_engine(vec![record("1", "b", 1)]);
    let ticket = ticket(engine.sort("title", Order::Asc).unwrap());
    let mut rx = engine.subscribe();

    let resolution = engine.apply_remote(ticket, Err(RemoteError::new("timeout")));
    assert_eq!(resolution, RemoteResolution::Failed(RemoteError::new("timeout")));
    assert_eq!(keys(&engine), ["1"]);
    assert!(!engine.is_loading());
    assert_eq!(
        drain(&mut rx),
        vec![
            Notice::Loading(false),
            Notice::RemoteFailed {
                message: "timeout".into()
            },
        ]
    );
}

#[test]
fn test_request_page_continues_after_loaded_rows() {
    let mut engine = remote_engine(Vec::new());
    assert!(engine.request_page().is_none());

    let first = ticket(engine.sort("title", Order::Asc).unwrap());
    engine.apply_remote(first, Ok(vec![record("1", "a", 1), record("2", "b", 2)]));

    let next = engine.request_page().unwrap();
    assert!(next.is_append());
    assert_eq!(next.request().range_start, 2);
    assert_eq!(next.request().range_count, 2);

    engine.apply_remote(next, Ok(vec![record("3", "c", 3)]));
    assert_eq!(keys(&engine), ["1", "2", "3"]);
}

// ============================================================================
// Explicit edits
// ============================================================================

#[test]
fn test_insert_and_remove() {
    let mut engine = engine(vec![record("1", "b", 1), record("2", "a", 2)]);
    let mut rx = engine.subscribe();

    assert_eq!(engine.insert(99, record("3", "c", 3)), 2);
    assert_eq!(keys(&engine), ["1", "2", "3"]);

    let removed = engine.remove(&"1".to_string()).unwrap();
    assert_eq!(removed.key(), "1");
    assert!(engine.remove(&"nope".to_string()).is_none());
    assert_eq!(keys(&engine), ["2", "3"]);

    let notices = drain(&mut rx);
    assert!(notices.contains(&Notice::ItemRemoved {
        key: "1".into(),
        index: 0
    }));
}

#[test]
fn test_column_lookup() {
    let engine = engine(Vec::new());
    let price = engine.column("price").unwrap();
    assert_eq!(price.sort_type, SortType::Number);
    assert!(engine.column("weight").is_none());
    assert_eq!(
        arrange::compare::compare(SortType::Number, &Value::from(1), &Value::from(2)),
        Ordering::Less
    );
}

#[test]
fn test_no_page_while_resort_pending() {
    let mut engine = remote_engine(Vec::new());
    let first = ticket(engine.sort("title", Order::Asc).unwrap());
    engine.apply_remote(first, Ok(vec![record("1", "a", 1), record("2", "b", 2)]));

    let resort = ticket(engine.sort("title", Order::Desc).unwrap());
    assert!(engine.request_page().is_none());
    assert_eq!(
        engine.apply_remote(resort, Ok(vec![record("4", "d", 4), record("3", "c", 3)])),
        RemoteResolution::Applied { len: 2 }
    );

    let next = engine.request_page().unwrap();
    assert_eq!(next.request().order, Order::Desc);
    assert_eq!(next.request().range_start, 2);
    engine.apply_remote(next, Ok(vec![record("2", "b", 2), record("1", "a", 1)]));
    assert_eq!(keys(&engine), ["4", "3", "2", "1"]);
}

#[test]
fn test_repeated_page_request_supersedes_same_window() {
    let mut engine = remote_engine(Vec::new());
    let first = ticket(engine.sort("title", Order::Asc).unwrap());
    engine.apply_remote(first, Ok(vec![record("1", "a", 1), record("2", "b", 2)]));

    let page = engine.request_page().unwrap();
    let again = engine.request_page().unwrap();
    assert_eq!(again.request().range_start, page.request().range_start);

    assert_eq!(engine.apply_remote(page, Ok(vec![record("3", "c", 3)])), RemoteResolution::Stale);
    engine.apply_remote(again, Ok(vec![record("3", "c", 3)]));
    assert_eq!(keys(&engine), ["1", "2", "3"]);
}
