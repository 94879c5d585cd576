// SPDX-License-Identifier: Apache-2.0

use crate::{Fetched, QueryError};
use foodshare_model::{ListingFilter, ProviderFilter, ReceiverFilter};
use foodshare_store::Store;
use rusqlite::types::Value;

pub const LISTINGS_TABLE: &str = "Food_Listings";
pub const PROVIDERS_TABLE: &str = "Providers";
pub const RECEIVERS_TABLE: &str = "Receivers";

/// One optional equality constraint. Text counts as unset when empty after
/// trimming; identifiers count as unset at exactly zero. Unset filters are
/// silently skipped, the historical form-input policy, kept on purpose.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Id(i64),
}

impl FilterValue {
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Id(v) => *v != 0,
        }
    }

    #[must_use]
    fn into_sql_value(self) -> Value {
        match self {
            Self::Text(s) => Value::Text(s),
            Self::Id(v) => Value::Integer(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub column: &'static str,
    pub value: FilterValue,
}

/// Builds `SELECT * FROM <table> WHERE <base>` plus one `AND <column> = ?`
/// per set filter, in the given field order, with the matching positional
/// parameter list. Table and column names are code-owned constants; every
/// user value goes through the parameter list.
#[must_use]
pub fn build_filtered_query(
    table: &str,
    base_predicate: Option<&str>,
    filters: Vec<FieldFilter>,
) -> (String, Vec<Value>) {
    let base = base_predicate.unwrap_or("1=1");
    let mut sql = format!("SELECT * FROM {table} WHERE {base}");
    let mut params: Vec<Value> = Vec::new();

    for filter in filters {
        if !filter.value.is_set() {
            continue;
        }
        sql.push_str(" AND ");
        sql.push_str(filter.column);
        sql.push_str(" = ?");
        params.push(filter.value.into_sql_value());
    }

    (sql, params)
}

fn listing_field_filters(filter: &ListingFilter) -> Vec<FieldFilter> {
    vec![
        FieldFilter {
            column: "Location",
            value: FilterValue::Text(filter.city.clone().unwrap_or_default()),
        },
        FieldFilter {
            column: "Provider_Type",
            value: FilterValue::Text(filter.provider_type.clone().unwrap_or_default()),
        },
        FieldFilter {
            column: "Food_Type",
            value: FilterValue::Text(
                filter.food_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            ),
        },
        FieldFilter {
            column: "Meal_Type",
            value: FilterValue::Text(
                filter.meal_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            ),
        },
    ]
}

fn provider_field_filters(filter: &ProviderFilter) -> Vec<FieldFilter> {
    vec![
        FieldFilter {
            column: "Provider_ID",
            value: FilterValue::Id(filter.provider_id.unwrap_or(0)),
        },
        FieldFilter {
            column: "Name",
            value: FilterValue::Text(filter.name.clone().unwrap_or_default()),
        },
    ]
}

fn receiver_field_filters(filter: &ReceiverFilter) -> Vec<FieldFilter> {
    vec![
        FieldFilter {
            column: "Receiver_ID",
            value: FilterValue::Id(filter.receiver_id.unwrap_or(0)),
        },
        FieldFilter {
            column: "Name",
            value: FilterValue::Text(filter.name.clone().unwrap_or_default()),
        },
    ]
}

pub fn fetch_listings(store: &Store, filter: &ListingFilter) -> Result<Fetched, QueryError> {
    let (sql, params) = build_filtered_query(LISTINGS_TABLE, None, listing_field_filters(filter));
    let table = store.query(&sql, &params)?;
    Ok(Fetched::from_table(table))
}

pub fn fetch_providers(store: &Store, filter: &ProviderFilter) -> Result<Fetched, QueryError> {
    let (sql, params) = build_filtered_query(PROVIDERS_TABLE, None, provider_field_filters(filter));
    let table = store.query(&sql, &params)?;
    Ok(Fetched::from_table(table))
}

pub fn fetch_receivers(store: &Store, filter: &ReceiverFilter) -> Result<Fetched, QueryError> {
    let (sql, params) = build_filtered_query(RECEIVERS_TABLE, None, receiver_field_filters(filter));
    let table = store.query(&sql, &params)?;
    Ok(Fetched::from_table(table))
}
