#![forbid(unsafe_code)]
//! Foodshare model SSOT: the shapes of the four relations and the inputs
//! that mutate them. This crate owns validation that must happen before any
//! SQL statement is built; it knows nothing about storage.

mod category;
mod ids;
mod record;

pub use category::{ClaimStatus, FoodType, MealType};
pub use ids::{parse_food_id, parse_provider_id, parse_receiver_id, FoodId, ProviderId, ReceiverId};
pub use record::{
    Claim, FoodListing, ListingFilter, NewListing, NewProvider, NewReceiver, Provider,
    ProviderFilter, QuantityUpdate, Receiver, ReceiverFilter,
};

pub const CRATE_NAME: &str = "foodshare-model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}
