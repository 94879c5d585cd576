// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use foodshare_model::{FoodId, NewListing, NewProvider, NewReceiver, QuantityUpdate};
use foodshare_store::Store;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Result of a mutating command. Zero affected rows is success, not an
/// error; callers decide whether "nothing matched" deserves a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub rows_affected: usize,
}

impl MutationOutcome {
    #[must_use]
    pub fn matched_nothing(&self) -> bool {
        self.rows_affected == 0
    }
}

pub fn add_provider(store: &Store, provider: &NewProvider) -> Result<MutationOutcome, QueryError> {
    provider.validate()?;
    let rows_affected = store.execute(
        "INSERT INTO Providers (Name, Type, Address, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5)",
        &[
            Value::Text(provider.name.clone()),
            Value::Text(provider.provider_type.clone()),
            Value::Text(provider.address.clone()),
            Value::Text(provider.city.clone()),
            Value::Text(provider.contact.clone()),
        ],
    )?;
    Ok(MutationOutcome { rows_affected })
}

pub fn add_receiver(store: &Store, receiver: &NewReceiver) -> Result<MutationOutcome, QueryError> {
    receiver.validate()?;
    let rows_affected = store.execute(
        "INSERT INTO Receivers (Name, Type, City, Contact) VALUES (?1, ?2, ?3, ?4)",
        &[
            Value::Text(receiver.name.clone()),
            Value::Text(receiver.receiver_type.clone()),
            Value::Text(receiver.city.clone()),
            Value::Text(receiver.contact.clone()),
        ],
    )?;
    Ok(MutationOutcome { rows_affected })
}

pub fn add_listing(store: &Store, listing: &NewListing) -> Result<MutationOutcome, QueryError> {
    listing.validate()?;
    let rows_affected = store.execute(
        "INSERT INTO Food_Listings (Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        &[
            Value::Text(listing.food_name.clone()),
            Value::Integer(listing.quantity),
            Value::Text(listing.expiry_date.clone()),
            Value::Integer(listing.provider_id.get()),
            Value::Text(listing.provider_type.clone()),
            Value::Text(listing.location.clone()),
            Value::Text(listing.food_type.as_str().to_string()),
            Value::Text(listing.meal_type.as_str().to_string()),
        ],
    )?;
    Ok(MutationOutcome { rows_affected })
}

pub fn update_listing_quantity(
    store: &Store,
    update: QuantityUpdate,
) -> Result<MutationOutcome, QueryError> {
    update.validate()?;
    let rows_affected = store.execute(
        "UPDATE Food_Listings SET Quantity = ?1 WHERE Food_ID = ?2",
        &[
            Value::Integer(update.quantity),
            Value::Integer(update.food_id.get()),
        ],
    )?;
    if rows_affected == 0 {
        tracing::warn!(food_id = update.food_id.get(), "quantity update matched no listing");
    }
    Ok(MutationOutcome { rows_affected })
}

/// Removes a listing row. Claims referencing it are left in place; there is
/// no cascade in this system.
pub fn delete_listing(store: &Store, food_id: FoodId) -> Result<MutationOutcome, QueryError> {
    let rows_affected = store.execute(
        "DELETE FROM Food_Listings WHERE Food_ID = ?1",
        &[Value::Integer(food_id.get())],
    )?;
    if rows_affected == 0 {
        tracing::warn!(food_id = food_id.get(), "delete matched no listing");
    }
    Ok(MutationOutcome { rows_affected })
}
