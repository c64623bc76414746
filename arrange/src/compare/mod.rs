//! Comparator registry: one ordering function per declared column type.
//!
//! Comparators return the raw ordering of two values and know nothing about
//! direction. The sort engine applies the direction once, through
//! [`Comparators::order_keys`], which also pins invalid numbers and dates to
//! the end of the displayed order whatever the direction.

pub mod collation;

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::value::Value;

use collation::{CollationKey, Collator, Locale};

/// How a column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// Locale-aware collation of the text form.
    #[default]
    String,
    /// Numeric difference; unparsable values are invalid.
    Number,
    /// Chronological; unparsable values are invalid.
    Date,
    /// The column's own comparator. Without one, behaves like `String`.
    Custom,
}

/// Precomputed comparison key for one value under one sort type.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(CollationKey),
    Number(Option<f64>),
    Date(Option<DateTime<Utc>>),
}

impl SortKey {
    /// Whether the value failed to parse for its sort type.
    pub fn is_invalid(&self) -> bool {
        matches!(self, SortKey::Number(None) | SortKey::Date(None))
    }
}

/// The comparator registry, owning the configured collator.
#[derive(Debug, Clone, Default)]
pub struct Comparators {
    collator: Collator,
}

impl Comparators {
    pub fn new(collator: Collator) -> Self {
        Self { collator }
    }

    pub fn with_locales(locales: &[Locale]) -> Self {
        Self::new(Collator::new(locales))
    }

    pub fn collator(&self) -> &Collator {
        &self.collator
    }

    /// Build the comparison key of `value` for `sort_type`.
    pub fn key(&self, sort_type: SortType, value: &Value) -> SortKey {
        match sort_type {
            SortType::String | SortType::Custom => {
                SortKey::Text(self.collator.sort_key(&value.as_text()))
            }
            SortType::Number => SortKey::Number(value.as_number()),
            SortType::Date => SortKey::Date(value.as_date()),
        }
    }

    /// Raw ordering of two values, ignoring direction. Invalid values
    /// compare greater than valid ones and equal to each other.
    pub fn compare(&self, sort_type: SortType, a: &Value, b: &Value) -> Ordering {
        Self::compare_keys(&self.key(sort_type, a), &self.key(sort_type, b))
    }

    /// Raw ordering of two precomputed keys.
    pub fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
        match (a, b) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => {
                valid_first(a, b, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (SortKey::Date(a), SortKey::Date(b)) => valid_first(a, b, Ord::cmp),
            // Keys of one column always share a variant
            _ => Ordering::Equal,
        }
    }

    /// Displayed ordering: `order` applied to the raw comparison, except
    /// that invalid values go last in both directions.
    pub fn order_keys(a: &SortKey, b: &SortKey, order: Order) -> Ordering {
        match (a.is_invalid(), b.is_invalid()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => order.apply(Self::compare_keys(a, b)),
        }
    }
}

fn valid_first<T>(a: &Option<T>, b: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => cmp(a, b),
    }
}

static DEFAULT_COMPARATORS: LazyLock<Comparators> = LazyLock::new(Comparators::default);

/// Compare two values with the default registry (`ru`, then `en`).
pub fn compare(sort_type: SortType, a: &Value, b: &Value) -> Ordering {
    DEFAULT_COMPARATORS.compare(sort_type, a, b)
}

/// Sort strings with the default collation, stable in both directions.
///
/// # Example
///
/// ```
/// use arrange::compare::sort_strings;
/// use arrange::order::Order;
///
/// let sorted = sort_strings(&["banana", "apple", "Apple"], Order::Asc);
/// assert_eq!(sorted, ["Apple", "apple", "banana"]);
/// ```
pub fn sort_strings<S: AsRef<str>>(values: &[S], order: Order) -> Vec<String> {
    let collator = DEFAULT_COMPARATORS.collator();
    let mut keyed: Vec<(CollationKey, &str)> = values
        .iter()
        .map(|value| (collator.sort_key(value.as_ref()), value.as_ref()))
        .collect();
    keyed.sort_by(|a, b| order.apply(a.0.cmp(&b.0)));
    keyed.into_iter().map(|(_, value)| value.to_string()).collect()
}
