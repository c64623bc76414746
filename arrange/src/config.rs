//! Table configuration.

use serde::Deserialize;

use crate::compare::collation::{DEFAULT_LOCALES, Locale};
use crate::error::ConfigError;
use crate::order::{Order, SortMode};

/// Capacity of a table's notice channel unless configured otherwise.
pub const DEFAULT_NOTICE_CAPACITY: usize = 64;

/// The row window requested from a remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageWindow {
    /// Index of the first row.
    pub start: usize,
    /// Number of rows per request.
    pub step: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { start: 0, step: 30 }
    }
}

impl PageWindow {
    pub fn new(start: usize, step: usize) -> Self {
        Self { start, step }
    }

    /// The window following one that already yielded `loaded` rows.
    pub fn after(&self, loaded: usize) -> Self {
        Self {
            start: self.start + loaded,
            step: self.step,
        }
    }
}

/// The sort applied when a table starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InitialSort {
    pub id: String,
    #[serde(default)]
    pub order: Order,
}

/// Configuration for a sortable table.
///
/// # Example
///
/// ```
/// use arrange::config::TableConfig;
/// use arrange::order::Order;
///
/// let config = TableConfig::remote()
///     .sorted_by("title", Order::Desc)
///     .page(0, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Local reordering or remote delegation.
    pub mode: SortMode,

    /// Sort applied on start; falls back to the first sortable column.
    #[serde(rename = "sorted")]
    pub initial_sort: Option<InitialSort>,

    /// Rows requested per remote fetch.
    pub page: PageWindow,

    /// Collation candidates, most preferred first.
    pub locales: Vec<Locale>,

    /// Buffered notices per subscriber before the slowest one lags.
    pub notice_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Local,
            initial_sort: None,
            page: PageWindow::default(),
            locales: DEFAULT_LOCALES.to_vec(),
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

impl TableConfig {
    /// A local-sorting config.
    pub fn new() -> Self {
        Self::default()
    }

    /// A remote-sorting config.
    pub fn remote() -> Self {
        Self {
            mode: SortMode::Remote,
            ..Default::default()
        }
    }

    /// Set the sort mode.
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sort by `id` when the table starts.
    pub fn sorted_by(mut self, id: impl Into<String>, order: Order) -> Self {
        self.initial_sort = Some(InitialSort {
            id: id.into(),
            order,
        });
        self
    }

    /// Set the remote paging window.
    pub fn page(mut self, start: usize, step: usize) -> Self {
        self.page = PageWindow::new(start, step);
        self
    }

    /// Set the collation candidates.
    pub fn locales(mut self, locales: impl Into<Vec<Locale>>) -> Self {
        self.locales = locales.into();
        self
    }

    /// Set the notice channel capacity.
    pub fn notice_capacity(mut self, capacity: usize) -> Self {
        self.notice_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page.step == 0 {
            return Err(ConfigError::ZeroPageStep);
        }
        if self.notice_capacity == 0 {
            return Err(ConfigError::ZeroNoticeCapacity);
        }
        Ok(())
    }
}
