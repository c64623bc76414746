pub mod column;
pub mod compare;
pub mod config;
pub mod error;
pub mod notice;
pub mod order;
pub mod reorder;
pub mod row;
pub mod sort;
pub mod value;

pub use arrange_view::{Keyed, Point, Rect, ViewAdapter};

pub mod prelude {
    pub use crate::column::{Column, ColumnSpec, CustomComparator};
    pub use crate::compare::{Comparators, SortType, compare, sort_strings};
    pub use crate::compare::collation::{Collator, Locale};
    pub use crate::config::{InitialSort, PageWindow, TableConfig};
    pub use crate::error::{ConfigError, DragError, RemoteError, SortError};
    pub use crate::notice::{Notice, Notifier};
    pub use crate::order::{Order, SortMode, SortState};
    pub use crate::reorder::{DragSession, Reordered, ReorderEngine, SortableList};
    pub use crate::row::{Record, Row};
    pub use crate::sort::{
        RemoteResolution, RemoteSource, RemoteTicket, SortEngine, SortOutcome, SortRequest,
        SortStatus, SortableTable,
    };
    pub use crate::value::Value;

    pub use arrange_view::{
        Handle, Keyed, Listener, Point, PointerEvent, PointerHub, Rect, StackView, ViewAdapter,
    };
}
