//! Demo data loaded from a JSON file.

use std::cmp::Ordering;
use std::path::Path;

use serde::Deserialize;

use arrange::prelude::*;

use crate::error::DemoError;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub config: TableConfig,
    pub rows: Vec<Record>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)?;
        let fixture: Fixture = serde_json::from_str(&text)?;
        fixture.config.validate()?;
        log::debug!(
            "[demo] loaded {} columns and {} rows from {}",
            fixture.columns.len(),
            fixture.rows.len(),
            path.display()
        );
        Ok(fixture)
    }

    /// Column definitions with the custom comparators data cannot express.
    pub fn columns(&self) -> Vec<Column<Record>> {
        self.columns
            .iter()
            .cloned()
            .map(|spec| match spec.sort_type {
                SortType::Custom => {
                    let column: Column<Record> = spec.into_column();
                    column.custom(by_status)
                }
                _ => spec.into_column(),
            })
            .collect()
    }
}

/// Workflow order: drafts, then active, then archived.
fn by_status(a: &Value, b: &Value, _: &Record, _: &Record) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value.as_text().as_ref() {
            "draft" => 0,
            "active" => 1,
            "archived" => 2,
            _ => 3,
        }
    }
    rank(a).cmp(&rank(b))
}
