use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub fn parse_food_id(input: i64) -> Result<FoodId, ValidationError> {
    FoodId::parse(input)
}

pub fn parse_provider_id(input: i64) -> Result<ProviderId, ValidationError> {
    ProviderId::parse(input)
}

pub fn parse_receiver_id(input: i64) -> Result<ReceiverId, ValidationError> {
    ReceiverId::parse(input)
}

macro_rules! positive_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn parse(input: i64) -> Result<Self, ValidationError> {
                if input < 1 {
                    return Err(ValidationError(format!(
                        concat!($label, " must be positive, got {}"),
                        input
                    )));
                }
                Ok(Self(input))
            }

            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(FoodId, "food id");
positive_id!(ProviderId, "provider id");
positive_id!(ReceiverId, "receiver id");
