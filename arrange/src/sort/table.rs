//! Async driver for a [`SortEngine`].

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use arrange_view::ViewAdapter;

use crate::column::Column;
use crate::config::TableConfig;
use crate::error::{ConfigError, RemoteError, SortError};
use crate::notice::{Notice, Notifier};
use crate::order::{Order, SortState};
use crate::row::Row;

use super::engine::{SortEngine, SortOutcome};
use super::remote::{RemoteResolution, RemoteSource, RemoteTicket};

/// How an awaited sort ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStatus {
    /// The new order is on screen; the collection has `len` rows.
    Applied { len: usize },
    /// A newer request was issued while this one was in flight.
    Superseded,
}

/// A sortable table: a shared [`SortEngine`] plus an optional remote source.
///
/// Cheap to clone; clones drive the same engine, so several sorts may be in
/// flight at once. The engine lock is never held across an `.await`.
///
/// # Example
///
/// ```
/// use arrange::prelude::*;
///
/// # tokio_test_block(async {
/// let columns = vec![Column::new("title", "Name").sortable(SortType::String)];
/// let rows = vec![
///     Record::new("1").with("title", "banana"),
///     Record::new("2").with("title", "Apple"),
/// ];
/// let table: SortableTable<Record, StackView<String>> =
///     SortableTable::new(columns, rows, StackView::new(100.0, 20.0), TableConfig::new())
///         .unwrap();
/// table.sort("title", Order::Asc).await.unwrap();
/// assert_eq!(table.rows()[0].key(), "2");
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
pub struct SortableTable<T: Row, V: ViewAdapter<T>> {
    engine: Arc<RwLock<SortEngine<T, V>>>,
    source: Option<Arc<dyn RemoteSource<T>>>,
    notifier: Notifier<T::Key>,
}

impl<T: Row, V: ViewAdapter<T>> SortableTable<T, V> {
    pub fn new(
        columns: Vec<Column<T>>,
        rows: Vec<T>,
        view: V,
        config: TableConfig,
    ) -> Result<Self, ConfigError> {
        let engine = SortEngine::new(columns, rows, view, &config)?;
        let notifier = engine.notifier().clone();
        Ok(Self {
            engine: Arc::new(RwLock::new(engine)),
            source: None,
            notifier,
        })
    }

    /// Attach the source that serves remote sorts.
    pub fn with_source(mut self, source: Arc<dyn RemoteSource<T>>) -> Self {
        self.source = Some(source);
        self
    }

    /// Apply the initial sort (see [`SortEngine::start`]).
    pub async fn start(&self) -> Result<Option<SortStatus>, SortError> {
        match self.write(|engine| engine.start())? {
            Some(outcome) => self.resolve(outcome).await.map(Some),
            None => Ok(None),
        }
    }

    /// Sort by `field` in `order` and wait for the result to be on screen.
    pub async fn sort(&self, field: &str, order: Order) -> Result<SortStatus, SortError> {
        let outcome = self.write(|engine| engine.sort(field, order))??;
        self.resolve(outcome).await
    }

    /// Header click: the current column flips direction, any other column
    /// starts descending.
    pub async fn toggle(&self, field: &str) -> Result<SortStatus, SortError> {
        let order = self.read(|engine| engine.current_order().next_order_for(field))?;
        self.sort(field, order).await
    }

    /// Fetch and append the next page of the current remote sort.
    ///
    /// `Ok(None)` when there is nothing to load: local mode, no sort yet, or
    /// a re-sort still in flight.
    pub async fn load_more(&self) -> Result<Option<SortStatus>, SortError> {
        match self.write(|engine| engine.request_page())? {
            Some(ticket) => self.fetch(ticket).await.map(Some),
            None => Ok(None),
        }
    }

    /// Re-issue the current sort, reloading remote data.
    pub async fn refresh(&self) -> Result<Option<SortStatus>, SortError> {
        match self.write(|engine| engine.refresh())? {
            Some(outcome) => self.resolve(outcome).await.map(Some),
            None => Ok(None),
        }
    }

    pub fn current_order(&self) -> SortState {
        self.read(|engine| engine.current_order())
            .unwrap_or_default()
    }

    /// Snapshot of the rows in display order.
    pub fn rows(&self) -> Vec<T> {
        self.read(|engine| engine.rows().to_vec()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.read(|engine| engine.rows().len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.read(|engine| engine.is_loading()).unwrap_or(false)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice<T::Key>> {
        self.notifier.subscribe()
    }

    /// Run `f` against the view.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.read(|engine| f(engine.view())).ok()
    }

    /// Run `f` against the engine, for explicit edits such as
    /// [`SortEngine::insert`].
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut SortEngine<T, V>) -> R) -> Option<R> {
        self.write(f).ok()
    }

    async fn resolve(&self, outcome: SortOutcome) -> Result<SortStatus, SortError> {
        match outcome {
            SortOutcome::Sorted { len } => Ok(SortStatus::Applied { len }),
            SortOutcome::Requested(ticket) => self.fetch(ticket).await,
        }
    }

    async fn fetch(&self, ticket: RemoteTicket) -> Result<SortStatus, SortError> {
        let result = match &self.source {
            Some(source) => source.fetch(ticket.request().clone()).await,
            None => Err(RemoteError::new("no remote source configured")),
        };
        match self.write(|engine| engine.apply_remote(ticket, result))? {
            RemoteResolution::Applied { len } => Ok(SortStatus::Applied { len }),
            RemoteResolution::Stale => Ok(SortStatus::Superseded),
            RemoteResolution::Failed(err) => Err(SortError::Remote(err)),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&SortEngine<T, V>) -> R) -> Result<R, SortError> {
        let guard = self.engine.read().map_err(|_| SortError::Unavailable)?;
        Ok(f(&guard))
    }

    fn write<R>(&self, f: impl FnOnce(&mut SortEngine<T, V>) -> R) -> Result<R, SortError> {
        let mut guard = self.engine.write().map_err(|_| SortError::Unavailable)?;
        Ok(f(&mut guard))
    }
}

impl<T: Row, V: ViewAdapter<T>> Clone for SortableTable<T, V> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            source: self.source.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
