// SPDX-License-Identifier: Apache-2.0

use crate::table::Table;
use rusqlite::{params_from_iter, types::Value, Connection};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Open,
    Sql,
    Chart,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open_error",
            Self::Sql => "sql_error",
            Self::Chart => "chart_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Handle on the database file. Holds only the path; connections are scoped
/// to a single call so release is guaranteed on every exit path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path)
            .map_err(|e| StoreError::new(StoreErrorCode::Open, e.to_string()))
    }

    /// Executes a single SELECT and fetches the full result set, preserving
    /// the statement's own row order.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<Table, StoreError> {
        tracing::debug!(sql, param_count = params.len(), "store query");
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StoreError::new(StoreErrorCode::Sql, e.to_string()))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| (*c).to_string()).collect();
        let column_count = columns.len();

        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .map_err(|e| StoreError::new(StoreErrorCode::Sql, e.to_string()))?;
        let mut data: Vec<Vec<Value>> = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| StoreError::new(StoreErrorCode::Sql, e.to_string()))?
        {
            let mut out = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let v = row
                    .get::<_, Value>(i)
                    .map_err(|e| StoreError::new(StoreErrorCode::Sql, e.to_string()))?;
                out.push(v);
            }
            data.push(out);
        }
        Ok(Table::new(columns, data))
    }

    /// Executes a single INSERT/UPDATE/DELETE and returns the affected-row
    /// count. The statement auto-commits; no multi-statement transaction
    /// scope is exposed.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize, StoreError> {
        tracing::debug!(sql, param_count = params.len(), "store execute");
        let conn = self.connect()?;
        conn.execute(sql, params_from_iter(params.iter()))
            .map_err(|e| StoreError::new(StoreErrorCode::Sql, e.to_string()))
    }

    /// Runs a multi-statement script. Test fixtures and one-off setup only;
    /// the operational surface is `query`/`execute`.
    #[doc(hidden)]
    pub fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(sql)
            .map_err(|e| StoreError::new(StoreErrorCode::Sql, e.to_string()))
    }
}
