//! The sort engine: a single-owner state machine over an ordered collection.

use std::sync::Arc;

use arrange_view::ViewAdapter;

use crate::column::Column;
use crate::compare::{Comparators, SortKey};
use crate::config::{InitialSort, PageWindow, TableConfig};
use crate::error::{ConfigError, RemoteError, SortError};
use crate::notice::{Notice, Notifier};
use crate::order::{Order, SortMode, SortState};
use crate::row::Row;
use crate::value::Value;

use super::remote::{RemoteResolution, RemoteTicket, SortRequest};

/// What a successful [`SortEngine::sort`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// The rows were reordered locally.
    Sorted { len: usize },
    /// A remote request must be carried out and fed back through
    /// [`SortEngine::apply_remote`].
    Requested(RemoteTicket),
}

/// Orders rows by a column, locally or through a remote source.
///
/// The engine owns the collection and the view. It never awaits: remote
/// sorts hand out a [`RemoteTicket`] and the caller performs the fetch.
pub struct SortEngine<T: Row, V: ViewAdapter<T>> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    state: SortState,
    comparators: Comparators,
    page: PageWindow,
    initial_sort: Option<InitialSort>,
    view: V,
    notifier: Notifier<T::Key>,
    /// Newest remote request issued.
    generation: u64,
    /// Request still waiting for its response: generation and whether it
    /// appends.
    pending: Option<(u64, bool)>,
}

impl<T: Row, V: ViewAdapter<T>> SortEngine<T, V> {
    pub fn new(
        columns: Vec<Column<T>>,
        rows: Vec<T>,
        view: V,
        config: &TableConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            columns,
            rows,
            state: SortState::new(config.mode),
            comparators: Comparators::with_locales(&config.locales),
            page: config.page,
            initial_sort: config.initial_sort.clone(),
            view,
            notifier: Notifier::new(config.notice_capacity),
            generation: 0,
            pending: None,
        })
    }

    /// Apply the initial sort.
    ///
    /// Uses the configured sort when it names a sortable column, otherwise
    /// the first sortable column ascending. Without any sortable column the
    /// rows are rendered as given and `None` is returned.
    pub fn start(&mut self) -> Option<SortOutcome> {
        let configured = self
            .initial_sort
            .as_ref()
            .filter(|initial| self.sortable_column(&initial.id).is_ok())
            .map(|initial| (initial.id.clone(), initial.order));
        let fallback = || {
            self.columns
                .iter()
                .find(|column| column.sortable)
                .map(|column| (column.id.clone(), Order::Asc))
        };

        match configured.or_else(fallback) {
            Some((field, order)) => self.sort(&field, order).ok(),
            None => {
                log::debug!("[sort] no sortable column, rendering as given");
                self.render();
                None
            }
        }
    }

    /// Sort by `field` in `order`.
    ///
    /// Unknown and non-sortable columns are rejected without touching the
    /// state, the rows or the subscribers.
    pub fn sort(&mut self, field: &str, order: Order) -> Result<SortOutcome, SortError> {
        let index = self.sortable_column(field)?;

        self.state.field = Some(field.to_string());
        self.state.order = Some(order);
        self.notifier.emit(Notice::SortChanged {
            field: field.to_string(),
            order,
        });

        match self.state.mode {
            SortMode::Local => {
                self.sort_local(index, order);
                log::debug!("[sort] {} {} ({} rows)", field, order, self.rows.len());
                self.render();
                Ok(SortOutcome::Sorted {
                    len: self.rows.len(),
                })
            }
            SortMode::Remote => {
                let request = SortRequest {
                    field: field.to_string(),
                    order,
                    range_start: self.page.start,
                    range_count: self.page.step,
                };
                Ok(SortOutcome::Requested(self.issue(request, false)))
            }
        }
    }

    /// Request the next page for the current remote sort.
    ///
    /// `None` in local mode, before any sort was applied, or while a
    /// replacing request is in flight. Pages always continue the rows of
    /// the order currently on screen.
    pub fn request_page(&mut self) -> Option<RemoteTicket> {
        if self.state.mode != SortMode::Remote {
            return None;
        }
        if let Some((generation, false)) = self.pending {
            log::debug!("[sort] page request deferred, #{} still pending", generation);
            return None;
        }
        let field = self.state.field.clone()?;
        let order = self.state.order?;
        let window = self.page.after(self.rows.len());
        let request = SortRequest {
            field,
            order,
            range_start: window.start,
            range_count: window.step,
        };
        Some(self.issue(request, true))
    }

    /// Re-issue the current sort, or the initial one if nothing is sorted.
    pub fn refresh(&mut self) -> Option<SortOutcome> {
        match (self.state.field.clone(), self.state.order) {
            (Some(field), Some(order)) => self.sort(&field, order).ok(),
            _ => self.start(),
        }
    }

    /// Feed the response of a remote request back into the engine.
    ///
    /// Only the newest outstanding ticket is applied; anything older is
    /// dropped and leaves the loading state alone.
    pub fn apply_remote(
        &mut self,
        ticket: RemoteTicket,
        result: Result<Vec<T>, RemoteError>,
    ) -> RemoteResolution {
        if self.pending.map(|(generation, _)| generation) != Some(ticket.generation) {
            log::debug!(
                "[sort] dropping stale response #{} (newest #{})",
                ticket.generation,
                self.generation
            );
            return RemoteResolution::Stale;
        }

        self.pending = None;
        self.view.set_loading(false);
        self.notifier.emit(Notice::Loading(false));

        match result {
            Ok(rows) => {
                if ticket.append {
                    self.rows.extend(rows);
                } else {
                    self.rows = rows;
                }
                log::debug!(
                    "[sort] applied response #{} ({} rows)",
                    ticket.generation,
                    self.rows.len()
                );
                self.render();
                RemoteResolution::Applied {
                    len: self.rows.len(),
                }
            }
            Err(err) => {
                log::debug!("[sort] response #{} failed: {}", ticket.generation, err);
                self.notifier.emit(Notice::RemoteFailed {
                    message: err.message.clone(),
                });
                RemoteResolution::Failed(err)
            }
        }
    }

    /// Snapshot of the sort state.
    pub fn current_order(&self) -> SortState {
        self.state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Replace the rows as given, without sorting.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.render();
    }

    /// Insert a row at `index` (clamped to the end). Returns the index used.
    pub fn insert(&mut self, index: usize, row: T) -> usize {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
        self.render();
        index
    }

    /// Remove the row with `key`.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let index = self.rows.iter().position(|row| row.key() == *key)?;
        let row = self.rows.remove(index);
        self.notifier.emit(Notice::ItemRemoved {
            key: key.clone(),
            index,
        });
        self.render();
        Some(row)
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Notice<T::Key>> {
        self.notifier.subscribe()
    }

    pub fn notifier(&self) -> &Notifier<T::Key> {
        &self.notifier
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn sortable_column(&self, field: &str) -> Result<usize, SortError> {
        let index = self
            .columns
            .iter()
            .position(|column| column.id == field)
            .ok_or_else(|| SortError::UnknownColumn(field.to_string()))?;
        if !self.columns[index].sortable {
            return Err(SortError::NotSortable(field.to_string()));
        }
        Ok(index)
    }

    fn sort_local(&mut self, index: usize, order: Order) {
        let column = &self.columns[index];
        let rows = std::mem::take(&mut self.rows);

        // Values are extracted once per row; `sort_by` is stable.
        self.rows = match column.comparator() {
            Some(comparator) => {
                let comparator = Arc::clone(comparator);
                let mut decorated: Vec<(Value, T)> = rows
                    .into_iter()
                    .map(|row| (row.value(&column.id), row))
                    .collect();
                decorated.sort_by(|(va, ra), (vb, rb)| order.apply(comparator(va, vb, ra, rb)));
                decorated.into_iter().map(|(_, row)| row).collect()
            }
            None => {
                let mut decorated: Vec<(SortKey, T)> = rows
                    .into_iter()
                    .map(|row| {
                        let key = self.comparators.key(column.sort_type, &row.value(&column.id));
                        (key, row)
                    })
                    .collect();
                decorated.sort_by(|(ka, _), (kb, _)| Comparators::order_keys(ka, kb, order));
                decorated.into_iter().map(|(_, row)| row).collect()
            }
        };
    }

    fn issue(&mut self, request: SortRequest, append: bool) -> RemoteTicket {
        self.generation += 1;
        self.pending = Some((self.generation, append));
        log::debug!(
            "[sort] remote request #{}: {} {} [{}..+{}]",
            self.generation,
            request.field,
            request.order,
            request.range_start,
            request.range_count
        );
        self.view.set_loading(true);
        self.notifier.emit(Notice::Loading(true));
        RemoteTicket {
            generation: self.generation,
            request,
            append,
        }
    }

    fn render(&mut self) {
        self.view.render_collection_changed(&self.rows);
        self.notifier.emit(Notice::CollectionChanged {
            len: self.rows.len(),
        });
    }
}
