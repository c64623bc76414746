//! Column definitions.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;

use crate::compare::SortType;
use crate::value::Value;

/// Column-supplied comparator: `(value_a, value_b, row_a, row_b)`.
///
/// Its sign is respected as-is; only the sort direction is applied on top.
pub type CustomComparator<T> = Arc<dyn Fn(&Value, &Value, &T, &T) -> Ordering + Send + Sync>;

/// A table column definition.
///
/// # Example
///
/// ```
/// use arrange::column::Column;
/// use arrange::compare::SortType;
/// use arrange::row::Record;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("images", "Image"),
///     Column::new("title", "Name").sortable(SortType::String),
///     Column::new("price", "Price").sortable(SortType::Number),
/// ];
/// assert!(!columns[0].sortable);
/// ```
pub struct Column<T> {
    /// Unique identifier within a table; also the row field it reads.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Whether the table may be sorted by this column.
    pub sortable: bool,
    /// Comparator family for this column.
    pub sort_type: SortType,
    comparator: Option<CustomComparator<T>>,
}

impl<T> Column<T> {
    /// Create a non-sortable column.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sortable: false,
            sort_type: SortType::String,
            comparator: None,
        }
    }

    /// Make the column sortable with the given comparator family.
    pub fn sortable(mut self, sort_type: SortType) -> Self {
        self.sortable = true;
        self.sort_type = sort_type;
        self
    }

    /// Make the column sortable with its own comparator.
    pub fn custom<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Value, &Value, &T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.sortable = true;
        self.sort_type = SortType::Custom;
        self.comparator = Some(Arc::new(comparator));
        self
    }

    pub fn comparator(&self) -> Option<&CustomComparator<T>> {
        self.comparator.as_ref()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            sort_type: self.sort_type,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("sort_type", &self.sort_type)
            .field("custom", &self.comparator.is_some())
            .finish()
    }
}

/// Serializable column description, as found in a header config file.
///
/// Custom comparators cannot be expressed in data; attach them with
/// [`Column::custom`] after conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default, rename = "sortType")]
    pub sort_type: SortType,
}

impl ColumnSpec {
    pub fn into_column<T>(self) -> Column<T> {
        Column {
            id: self.id,
            title: self.title,
            sortable: self.sortable,
            sort_type: self.sort_type,
            comparator: None,
        }
    }
}

impl<T> From<ColumnSpec> for Column<T> {
    fn from(spec: ColumnSpec) -> Self {
        spec.into_column()
    }
}
