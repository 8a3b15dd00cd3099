//! Ticket quantity per registration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Number of seats taken by one registration, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u8);

impl Quantity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ValidationError::out_of_range(
                "quantity",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn seats(&self) -> u32 {
        u32::from(self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Quantity::try_new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_zero_six_and_negative() {
        assert!(Quantity::try_new(0).is_err());
        assert!(Quantity::try_new(6).is_err());
        assert!(Quantity::try_new(-1).is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Quantity::try_new(1).unwrap().seats(), 1);
        assert_eq!(Quantity::try_new(5).unwrap().seats(), 5);
    }

    proptest! {
        #[test]
        fn accepted_iff_in_one_to_five(n in -100i64..100) {
            prop_assert_eq!(Quantity::try_new(n).is_ok(), (1..=5).contains(&n));
        }
    }
}
