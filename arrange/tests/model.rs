use arrange::prelude::*;

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_record_from_json() {
    let record: Record = serde_json::from_str(
        r#"{ "id": 7, "title": "Monitor", "price": 249.5, "images": null, "active": true }"#,
    )
    .unwrap();

    assert_eq!(record.key(), "7");
    assert_eq!(record.value("title"), Value::from("Monitor"));
    assert_eq!(record.value("price"), Value::Number(249.5));
    assert_eq!(record.value("images"), Value::Missing);
    assert_eq!(record.value("active"), Value::from("true"));
    assert_eq!(record.value("absent"), Value::Missing);
}

#[test]
fn test_record_requires_id() {
    let result: Result<Record, _> = serde_json::from_str(r#"{ "title": "Monitor" }"#);
    assert!(result.is_err());
}

#[test]
fn test_record_builder() {
    let mut record = Record::new("a").with("title", "x");
    record.set("price", 3);
    assert_eq!(record.get("price"), Some(&Value::Number(3.0)));
    assert_eq!(record.fields().len(), 2);
}

#[test]
fn test_value_type_names() {
    assert_eq!(Value::from("x").type_name(), "string");
    assert_eq!(Value::from(1).type_name(), "number");
    assert_eq!(Value::from(chrono::Utc::now()).type_name(), "date");
    assert_eq!(Value::Missing.type_name(), "missing");
}

#[test]
fn test_value_text_forms() {
    assert_eq!(Value::Number(42.0).as_text(), "42");
    assert_eq!(Value::Number(4.25).as_text(), "4.25");
    assert_eq!(Value::Missing.as_text(), "");
    assert_eq!(Value::from(None::<&str>), Value::Missing);
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_column_spec_from_json() {
    let specs: Vec<ColumnSpec> = serde_json::from_str(
        r#"[
            { "id": "images", "title": "Image" },
            { "id": "price", "title": "Price", "sortable": true, "sortType": "number" }
        ]"#,
    )
    .unwrap();

    assert!(!specs[0].sortable);
    assert_eq!(specs[0].sort_type, SortType::String);

    let column: Column<Record> = specs[1].clone().into_column();
    assert!(column.sortable);
    assert_eq!(column.sort_type, SortType::Number);
    assert!(column.comparator().is_none());
}

#[test]
fn test_custom_column_is_sortable() {
    let column: Column<Record> = Column::new("status", "Status").custom(|a, b, _, _| {
        a.as_text().len().cmp(&b.as_text().len())
    });
    assert!(column.sortable);
    assert_eq!(column.sort_type, SortType::Custom);
    assert!(column.comparator().is_some());
}

// ============================================================================
// Order
// ============================================================================

#[test]
fn test_order_parse_falls_back_to_asc() {
    assert_eq!(Order::parse("desc"), Order::Desc);
    assert_eq!(Order::parse(" DESC "), Order::Desc);
    assert_eq!(Order::parse("asc"), Order::Asc);
    assert_eq!(Order::parse("sideways"), Order::Asc);
}

#[test]
fn test_order_direction() {
    assert_eq!(Order::Asc.direction(), 1);
    assert_eq!(Order::Desc.direction(), -1);
    assert_eq!(Order::Desc.toggled(), Order::Asc);
    assert_eq!(Order::Desc.to_string(), "desc");
}

#[test]
fn test_next_order_for_header_click() {
    let mut state = SortState::new(SortMode::Local);
    assert_eq!(state.next_order_for("title"), Order::Desc);

    state.field = Some("title".into());
    state.order = Some(Order::Desc);
    assert_eq!(state.next_order_for("title"), Order::Asc);
    assert_eq!(state.next_order_for("price"), Order::Desc);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_from_json() {
    let config: TableConfig = serde_json::from_str(
        r#"{ "sorted": { "id": "price", "order": "desc" }, "locales": ["en"] }"#,
    )
    .unwrap();

    assert_eq!(config.mode, SortMode::Local);
    assert_eq!(config.page, PageWindow::default());
    assert_eq!(config.locales, [Locale::En]);
    assert_eq!(
        config.initial_sort,
        Some(InitialSort {
            id: "price".into(),
            order: Order::Desc
        })
    );
}

// ============================================================================
// Errors and notices
// ============================================================================

#[test]
fn test_remote_error_conversions() {
    let from_string = RemoteError::from(format!("status {}", 503));
    assert_eq!(from_string.message, "status 503");
    assert_eq!(RemoteError::from("timeout"), RemoteError::new("timeout"));
    assert_eq!(
        SortError::from(RemoteError::new("timeout")).to_string(),
        "remote sort failed: timeout"
    );
}

#[test]
fn test_notifier_fan_out() {
    let notifier: Notifier<String> = Notifier::new(4);
    assert_eq!(notifier.subscriber_count(), 0);
    notifier.emit(Notice::Loading(true));

    let mut first = notifier.subscribe();
    let mut second = notifier.subscribe();
    assert_eq!(notifier.subscriber_count(), 2);

    notifier.emit(Notice::CollectionChanged { len: 3 });
    assert_eq!(first.try_recv().unwrap(), Notice::CollectionChanged { len: 3 });
    assert_eq!(second.try_recv().unwrap(), Notice::CollectionChanged { len: 3 });

    drop(second);
    assert_eq!(notifier.subscriber_count(), 1);
}
