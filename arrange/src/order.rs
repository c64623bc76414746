//! Sort direction, mode and the per-table sort state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl Order {
    /// Multiplier applied to a raw comparison: `1` or `-1`.
    pub fn direction(self) -> i32 {
        match self {
            Order::Asc => 1,
            Order::Desc => -1,
        }
    }

    /// Apply the direction to a raw comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Asc => ordering,
            Order::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Order::Asc => Order::Desc,
            Order::Desc => Order::Asc,
        }
    }

    /// Parse `"asc"` / `"desc"`; anything else falls back to ascending.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            s if s.eq_ignore_ascii_case("desc") => Order::Desc,
            _ => Order::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where sorting happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Rows are reordered in place by the engine.
    #[default]
    Local,
    /// Ordering is delegated to a remote source that returns replacement rows.
    Remote,
}

/// The active sort of a table.
///
/// `field` always names a sortable column when set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<String>,
    pub order: Option<Order>,
    pub mode: SortMode,
}

impl SortState {
    pub fn new(mode: SortMode) -> Self {
        Self {
            field: None,
            order: None,
            mode,
        }
    }

    /// Whether the table is currently sorted by `field`.
    pub fn is_sorted_by(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }

    /// The direction a header click on `field` should request: the same
    /// column flips, a different column starts descending.
    pub fn next_order_for(&self, field: &str) -> Order {
        match self.order {
            Some(order) if self.is_sorted_by(field) => order.toggled(),
            _ => Order::Desc,
        }
    }
}
