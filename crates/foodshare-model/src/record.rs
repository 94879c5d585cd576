use crate::category::{ClaimStatus, FoodType, MealType};
use crate::ids::{FoodId, ProviderId, ReceiverId};
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// A row of `Providers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: ProviderId,
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

/// A row of `Receivers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub receiver_id: ReceiverId,
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

/// A row of `Food_Listings`. `provider_type` is a denormalized copy of
/// `Providers.Type` taken at insert time; nothing keeps the two in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    pub food_id: FoodId,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    pub provider_id: ProviderId,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

/// A row of `Claims`. Read-only join input for reports; no command handler
/// creates or mutates claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: i64,
    pub food_id: FoodId,
    pub receiver_id: ReceiverId,
    pub status: ClaimStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProvider {
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl NewProvider {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError("provider name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewReceiver {
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

impl NewReceiver {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError("receiver name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewListing {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    pub provider_id: ProviderId,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

impl NewListing {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.food_name.trim().is_empty() {
            return Err(ValidationError("food name must not be empty".to_string()));
        }
        if self.quantity < 1 {
            return Err(ValidationError(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub food_id: FoodId,
    pub quantity: i64,
}

impl QuantityUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity < 1 {
            return Err(ValidationError(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Optional exact-match filters over `Food_Listings`. Field order here is
/// the fixed predicate order in the built statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingFilter {
    pub city: Option<String>,
    pub provider_type: Option<String>,
    pub food_type: Option<FoodType>,
    pub meal_type: Option<MealType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderFilter {
    pub provider_id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReceiverFilter {
    pub receiver_id: Option<i64>,
    pub name: Option<String>,
}
