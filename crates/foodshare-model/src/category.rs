use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lifecycle of a claim against a listing. Claims are read-only in this
/// system; the status vocabulary is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Completed,
    Pending,
    Cancelled,
}

impl ClaimStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim() {
            "Completed" => Ok(Self::Completed),
            "Pending" => Ok(Self::Pending),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError(format!("unknown claim status: {other}"))),
        }
    }
}

impl Display for ClaimStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Vegetarian,
    NonVegetarian,
    Vegan,
}

impl FoodType {
    /// Spelling used in the `Food_Listings.Food_Type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
            Self::Vegan => "Vegan",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim() {
            "Vegetarian" => Ok(Self::Vegetarian),
            "Non-Vegetarian" => Ok(Self::NonVegetarian),
            "Vegan" => Ok(Self::Vegan),
            other => Err(ValidationError(format!("unknown food type: {other}"))),
        }
    }
}

impl Display for FoodType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim() {
            "Breakfast" => Ok(Self::Breakfast),
            "Lunch" => Ok(Self::Lunch),
            "Dinner" => Ok(Self::Dinner),
            "Snacks" => Ok(Self::Snacks),
            other => Err(ValidationError(format!("unknown meal type: {other}"))),
        }
    }
}

impl Display for MealType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
