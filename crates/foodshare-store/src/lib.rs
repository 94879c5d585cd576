#![forbid(unsafe_code)]
//! Storage gateway for the foodshare database.
//!
//! Every operation opens a fresh connection, executes exactly one statement
//! with positionally bound parameters, and releases the connection before
//! returning. No connection is ever held across operations; SQLite's own
//! file locking is the only cross-process coordination.

mod gateway;
mod table;

pub use gateway::{Store, StoreError, StoreErrorCode};
pub use table::{value_to_json, ChartSeries, SeriesColumn, Table};

pub const CRATE_NAME: &str = "foodshare-store";
