//! Pricing engine.
//!
//! Pure function of an event snapshot, the event's discounts, a quantity and
//! the current instant. Callers must pass discounts read in the same
//! request; nothing here caches.
//!
//! Rules, in order:
//!
//! 1. Free events, or events whose price and discounted price are both
//!    zero, cost nothing.
//! 2. If at least one discount is active at `now` and the stored discounted
//!    price is positive, the unit price is the discounted price.
//! 3. Otherwise the unit price is the base price.
//!
//! Several simultaneously active discounts are not combined; the event's
//! single stored discounted price is used.

use serde::Serialize;

use crate::domain::discount::Discount;
use crate::domain::event::Event;
use crate::domain::foundation::{Money, Timestamp};
use crate::domain::registration::Quantity;

/// Which rule produced a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    Free,
    Discounted,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Charge {
    pub unit_price: Money,
    pub quantity: Quantity,
    pub amount: Money,
    pub basis: PriceBasis,
}

/// Computes what `quantity` tickets to `event` cost at `now`.
pub fn compute_charge(
    event: &Event,
    discounts: &[Discount],
    quantity: Quantity,
    now: &Timestamp,
) -> Charge {
    if event.is_free || (event.price.is_zero() && event.discounted_price.is_zero()) {
        return Charge {
            unit_price: Money::ZERO,
            quantity,
            amount: Money::ZERO,
            basis: PriceBasis::Free,
        };
    }

    let any_active = discounts
        .iter()
        .filter(|d| d.event_id == event.id)
        .any(|d| d.is_active_at(now));

    let (unit_price, basis) = if any_active && event.discounted_price.is_positive() {
        (event.discounted_price, PriceBasis::Discounted)
    } else {
        (event.price, PriceBasis::Full)
    };

    Charge {
        unit_price,
        quantity,
        amount: unit_price.times(quantity.value()),
        basis,
    }
}
