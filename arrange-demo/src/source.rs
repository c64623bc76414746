//! An in-process remote source standing in for a paged HTTP endpoint.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use arrange::prelude::*;

pub struct Catalog {
    rows: Vec<Record>,
    columns: Vec<Column<Record>>,
    comparators: Comparators,
    latency: Mutex<VecDeque<u64>>,
}

impl Catalog {
    pub fn new(rows: Vec<Record>, columns: Vec<Column<Record>>, locales: &[Locale]) -> Self {
        Self {
            rows,
            columns,
            comparators: Comparators::with_locales(locales),
            latency: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue response delays, consumed one per request.
    pub fn queue_latency(&self, millis: &[u64]) {
        if let Ok(mut latency) = self.latency.lock() {
            latency.extend(millis);
        }
    }
}

#[async_trait]
impl RemoteSource<Record> for Catalog {
    async fn fetch(&self, request: SortRequest) -> Result<Vec<Record>, RemoteError> {
        let delay = self
            .latency
            .lock()
            .ok()
            .and_then(|mut latency| latency.pop_front())
            .unwrap_or(10);
        log::debug!(
            "[catalog] {} {} [{}..+{}] in {}ms",
            request.field,
            request.order,
            request.range_start,
            request.range_count,
            delay
        );
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let column = self
            .columns
            .iter()
            .find(|column| column.id == request.field)
            .ok_or_else(|| RemoteError::new(format!("unknown field '{}'", request.field)))?;

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let (va, vb) = (a.value(&column.id), b.value(&column.id));
            match column.comparator() {
                Some(comparator) => request.order.apply(comparator(&va, &vb, a, b)),
                None => Comparators::order_keys(
                    &self.comparators.key(column.sort_type, &va),
                    &self.comparators.key(column.sort_type, &vb),
                    request.order,
                ),
            }
        });

        Ok(rows
            .into_iter()
            .skip(request.range_start)
            .take(request.range_count)
            .collect())
    }
}
