//! Row access for the sort engine.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde::de::Error as _;

use arrange_view::Keyed;

use crate::value::Value;

/// Trait for rows a sort engine can order.
///
/// Rows are opaque beyond their identity and field lookup by column id.
///
/// # Example
///
/// ```
/// use arrange::Keyed;
/// use arrange::row::Row;
/// use arrange::value::Value;
///
/// #[derive(Clone)]
/// struct Product {
///     id: u32,
///     title: String,
///     price: f64,
/// }
///
/// impl Keyed for Product {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
/// }
///
/// impl Row for Product {
///     fn value(&self, column_id: &str) -> Value {
///         match column_id {
///             "title" => Value::from(self.title.as_str()),
///             "price" => Value::from(self.price),
///             _ => Value::Missing,
///         }
///     }
/// }
/// ```
pub trait Row: Keyed + Clone + Send + Sync + 'static {
    /// The value of a field, `Value::Missing` when the row has none.
    fn value(&self, column_id: &str) -> Value;
}

/// A free-form row: a key plus named fields.
///
/// Deserializes from a JSON object; the key is read from its `id` field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    key: String,
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: HashMap::new(),
        }
    }

    /// Set a field, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field in place.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }
}

impl Keyed for Record {
    type Key = String;

    fn key(&self) -> String {
        self.key.clone()
    }
}

impl Row for Record {
    fn value(&self, column_id: &str) -> Value {
        self.fields.get(column_id).cloned().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let fields: HashMap<String, Value> = raw
            .into_iter()
            .map(|(name, value)| (name, Value::from_json(value)))
            .collect();
        let key = match fields.get("id") {
            Some(id) if !id.is_missing() => id.as_text().into_owned(),
            _ => return Err(D::Error::custom("record is missing an `id` field")),
        };
        Ok(Self { key, fields })
    }
}
