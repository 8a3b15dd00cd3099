//! Money value object in integer minor units.
//!
//! Amounts are never floating point. `Money::from_minor(10_000)` is 100.00
//! in the event's currency.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Percentage, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Wraps a raw amount. Negative values are allowed here; aggregates that
    /// need a floor enforce it themselves.
    pub fn from_minor(amount: i64) -> Self {
        Self(amount)
    }

    /// Creates a non-negative amount.
    pub fn try_non_negative(field: &str, amount: i64) -> Result<Self, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::out_of_range(field, 0, i64::MAX, amount));
        }
        Ok(Self(amount))
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Unit price times a quantity. Saturates rather than wrapping.
    pub fn times(&self, quantity: u8) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Price after taking `pct` off, rounded half-up to the nearest unit.
    ///
    /// Computed in `i128`; the result never exceeds the original magnitude.
    pub fn less_percent(&self, pct: Percentage) -> Self {
        let scaled = (i128::from(self.0) * i128::from(pct.remaining()) + 50) / 100;
        Self(i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
