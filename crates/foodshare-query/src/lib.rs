#![forbid(unsafe_code)]
//! Query layer for the foodshare database: incremental parameterized filter
//! queries over listings and the provider/receiver directory, single-statement
//! CRUD command handlers, and the canned analytical report catalog.
//!
//! Every user-supplied value is bound positionally; statement text only ever
//! contains code-owned table and column names.

mod builder;
mod commands;
mod query_error;
mod reports;

pub use builder::{
    build_filtered_query, fetch_listings, fetch_providers, fetch_receivers, FieldFilter,
    FilterValue, LISTINGS_TABLE, PROVIDERS_TABLE, RECEIVERS_TABLE,
};
pub use commands::{
    add_listing, add_provider, add_receiver, delete_listing, update_listing_quantity,
    MutationOutcome,
};
pub use query_error::{QueryError, QueryErrorCode};
pub use reports::{find_report, report_catalog, run_report, trend_reports, Report, ReportArity};

use foodshare_store::Table;

/// Outcome of a read: zero rows is not an error, but it is distinguishable
/// from a populated result. The empty variant keeps column names so the
/// presentation boundary can still render a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Rows(Table),
    Empty(Table),
}

impl Fetched {
    #[must_use]
    pub fn from_table(table: Table) -> Self {
        if table.is_empty() {
            Self::Empty(table)
        } else {
            Self::Rows(table)
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        match self {
            Self::Rows(t) | Self::Empty(t) => t,
        }
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        match self {
            Self::Rows(t) | Self::Empty(t) => t,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

pub const CRATE_NAME: &str = "foodshare-query";

#[cfg(test)]
mod query_tests;
