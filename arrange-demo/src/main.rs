mod error;
mod fixture;
mod source;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::broadcast;

use arrange::prelude::*;

use crate::error::DemoError;
use crate::fixture::Fixture;
use crate::source::Catalog;

type Table = SortableTable<Record, StackView<String>>;

const ROW_HEIGHT: f64 = 24.0;

#[tokio::main]
async fn main() {
    match File::create("arrange-demo.log") {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Warning: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DemoError> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/products.json")));
    let fixture = Fixture::load(&path)?;

    local_sorting(&fixture).await?;
    remote_sorting(&fixture).await?;
    reordering(&fixture)?;
    Ok(())
}

// ============================================================================
// Local sorting
// ============================================================================

async fn local_sorting(fixture: &Fixture) -> Result<(), DemoError> {
    let table: Table = SortableTable::new(
        fixture.columns(),
        fixture.rows.clone(),
        StackView::new(640.0, ROW_HEIGHT),
        fixture.config.clone(),
    )?;
    log_notices("local", table.subscribe());

    table.start().await?;
    print_table("initial sort", &table, fixture);

    for field in ["price", "price", "createdAt", "status"] {
        table.toggle(field).await?;
        let state = table.current_order();
        let heading = format!(
            "header click on {}: {}",
            field,
            state.order.unwrap_or_default()
        );
        print_table(&heading, &table, fixture);
    }

    if let Err(e) = table.sort("images", Order::Asc).await {
        println!("sort by images refused: {}\n", e);
    }
    Ok(())
}

// ============================================================================
// Remote sorting
// ============================================================================

async fn remote_sorting(fixture: &Fixture) -> Result<(), DemoError> {
    let catalog = Arc::new(Catalog::new(
        fixture.rows.clone(),
        fixture.columns(),
        &fixture.config.locales,
    ));
    let config = fixture.config.clone().mode(SortMode::Remote);
    let table: Table = SortableTable::new(
        fixture.columns(),
        Vec::new(),
        StackView::new(640.0, ROW_HEIGHT),
        config,
    )?
    .with_source(catalog.clone());
    log_notices("remote", table.subscribe());

    table.start().await?;
    print_table("remote first page", &table, fixture);

    // The slow first response arrives after the fast second one and is dropped
    catalog.queue_latency(&[120, 20]);
    let (first, second) = tokio::join!(
        table.sort("quantity", Order::Asc),
        table.sort("quantity", Order::Desc)
    );
    println!("quantity asc: {:?}, quantity desc: {:?}", first?, second?);
    print_table("after overlapping requests", &table, fixture);

    let mut loaded = table.len();
    while let Some(SortStatus::Applied { len }) = table.load_more().await? {
        if len == loaded {
            break;
        }
        loaded = len;
    }
    print_table("all pages loaded", &table, fixture);
    Ok(())
}

// ============================================================================
// Drag to reorder
// ============================================================================

fn reordering(fixture: &Fixture) -> Result<(), DemoError> {
    let hub = PointerHub::new();
    let engine = ReorderEngine::new(fixture.rows.clone(), StackView::new(320.0, ROW_HEIGHT));
    let list = SortableList::attach(engine, &hub);
    log_notices("list", list.subscribe());

    let first = fixture.rows.first().map(|row| row.key());
    let Some(first) = first else {
        return Ok(());
    };

    // Grab the first row and drop it just past the middle of the third
    let grab = Point::new(10.0, ROW_HEIGHT / 2.0);
    let target = Point::new(10.0, ROW_HEIGHT * 2.5 + 2.0);
    hub.dispatch(&PointerEvent::Down {
        position: grab,
        handle: Some(Handle::Grab(first.clone())),
    });
    hub.dispatch(&PointerEvent::Move { position: target });
    hub.dispatch(&PointerEvent::Up { position: target });
    print_list(&format!("after dragging {}", first), &list);

    if let Some(last) = fixture.rows.last().map(|row| row.key()) {
        hub.dispatch(&PointerEvent::Down {
            position: Point::default(),
            handle: Some(Handle::Delete(last.clone())),
        });
        print_list(&format!("after deleting {}", last), &list);
    }

    // Direct engine access reports why a second grab is refused mid-drag
    list.with_engine(|engine| -> Result<(), DemoError> {
        let key = engine.items().first().map(|row| row.key());
        if let Some(key) = key {
            engine.begin_drag(&key, grab)?;
            if let Err(e) = engine.begin_drag(&key, grab) {
                println!("second grab refused: {}\n", e);
            }
            engine.cancel_drag();
        }
        Ok(())
    })
    .transpose()?;
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn log_notices(label: &'static str, mut rx: broadcast::Receiver<Notice<String>>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => log::debug!("[{}] {:?}", label, notice),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::debug!("[{}] skipped {} notices", label, skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

fn print_table(heading: &str, table: &Table, fixture: &Fixture) {
    let columns: Vec<&ColumnSpec> = fixture.columns.iter().filter(|c| c.id != "images").collect();
    println!("== {} ({} rows)", heading, table.len());
    let header: Vec<String> = columns.iter().map(|c| format!("{:<18}", c.title)).collect();
    println!("{}", header.join(""));
    for row in table.rows() {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| format!("{:<18}", truncate(&row.value(&c.id).as_text(), 17)))
            .collect();
        println!("{}", cells.join(""));
    }
    println!();
}

fn print_list(heading: &str, list: &SortableList<Record, StackView<String>>) {
    let titles: Vec<String> = list
        .items()
        .iter()
        .map(|row| row.value("title").as_text().into_owned())
        .collect();
    println!("== {}\n{}\n", heading, titles.join(" | "));
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
