// SPDX-License-Identifier: Apache-2.0

use crate::gateway::{StoreError, StoreErrorCode};
use rusqlite::types::Value;
use std::collections::HashSet;

/// Shaped query result: column names plus rows in the order the statement
/// produced them. The shaper never re-sorts; aggregate reports rely on
/// their own ORDER BY.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at (row, column name), or None if either is out of range.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Chart-ready view: the first column is the categorical axis and every
    /// all-numeric trailing column becomes a series. Duplicate category
    /// labels are an error rather than a silent row collapse.
    pub fn chart_series(&self) -> Result<ChartSeries, StoreError> {
        let Some(category_column) = self.columns.first() else {
            return Err(StoreError::new(
                StoreErrorCode::Chart,
                "result has no columns to chart",
            ));
        };

        let categories: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.first().map(render_label).unwrap_or_default())
            .collect();
        let mut seen = HashSet::new();
        for label in &categories {
            if !seen.insert(label.as_str()) {
                return Err(StoreError::new(
                    StoreErrorCode::Chart,
                    format!("duplicate category label in first column: {label}"),
                ));
            }
        }

        let mut series = Vec::new();
        for (idx, name) in self.columns.iter().enumerate().skip(1) {
            let mut values = Vec::with_capacity(self.rows.len());
            let mut numeric = true;
            for row in &self.rows {
                match row.get(idx) {
                    Some(Value::Integer(v)) => values.push(*v as f64),
                    Some(Value::Real(v)) => values.push(*v),
                    _ => {
                        numeric = false;
                        break;
                    }
                }
            }
            if numeric {
                series.push(SeriesColumn {
                    name: name.clone(),
                    values,
                });
            }
        }

        Ok(ChartSeries {
            category_column: category_column.clone(),
            categories,
            series,
        })
    }

    /// JSON rendering for the presentation boundary: one object per row,
    /// keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let obj: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .zip(row.iter())
                    .map(|(c, v)| (c.clone(), value_to_json(v)))
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();
        serde_json::json!({ "columns": self.columns, "rows": rows })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub category_column: String,
    pub categories: Vec<String>,
    pub series: Vec<SeriesColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumn {
    pub name: String,
    pub values: Vec<f64>,
}

fn render_label(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => v.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

#[must_use]
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(v) => serde_json::json!(v),
        Value::Real(v) => serde_json::json!(v),
        Value::Text(v) => serde_json::json!(v),
        Value::Blob(b) => serde_json::json!(format!("<{} bytes>", b.len())),
    }
}
