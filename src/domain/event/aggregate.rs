//! Event aggregate.
//!
//! # Invariants
//!
//! - `price >= 0`; a submitted price at or below zero is stored as 0 and the
//!   event is marked free
//! - a free event never carries a discounted price
//! - `seat_quantity` only decreases through a successful registration

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, EventId, Money, Percentage, Timestamp};

use super::Category;

/// Validated content of an event, as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: Money,
    pub discounted_price: Option<Money>,
    pub date: Timestamp,
    pub time: String,
    pub location: String,
    pub seat_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: Money,
    pub discounted_price: Money,
    pub is_free: bool,
    /// When the event takes place.
    pub date: Timestamp,
    /// Free-form start time as displayed to attendees, e.g. "19:30".
    pub time: String,
    pub location: String,
    pub seat_quantity: u32,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// Builds a new event from validated details.
    pub fn create(id: EventId, details: EventDetails, image_url: Option<String>) -> Self {
        let now = Timestamp::now();
        let mut event = Self {
            id,
            title: String::new(),
            description: String::new(),
            category: details.category,
            price: Money::ZERO,
            discounted_price: Money::ZERO,
            is_free: false,
            date: details.date,
            time: String::new(),
            location: String::new(),
            seat_quantity: 0,
            image_url,
            created_at: now,
            updated_at: now,
        };
        event.apply_details(details);
        event
    }

    /// Replaces the event's content.
    ///
    /// When the event is paid, an explicit discounted price wins; otherwise
    /// it is recomputed from `first_discount`, or reset when the event has
    /// no discounts. Returns `true` when the event is now free, meaning its
    /// discounts must be removed alongside the update.
    pub fn revise(&mut self, details: EventDetails, first_discount: Option<Percentage>) -> bool {
        let explicit = details.discounted_price;
        self.apply_details(details);
        if !self.is_free && explicit.is_none() {
            self.discounted_price = first_discount
                .map(|pct| self.price.less_percent(pct))
                .unwrap_or(Money::ZERO);
        }
        self.updated_at = Timestamp::now();
        self.is_free
    }

    fn apply_details(&mut self, details: EventDetails) {
        self.title = details.title;
        self.description = details.description;
        self.category = details.category;
        self.is_free = !details.price.is_positive();
        self.price = if self.is_free { Money::ZERO } else { details.price };
        self.discounted_price = match details.discounted_price {
            Some(price) if !self.is_free => price,
            _ => Money::ZERO,
        };
        self.date = details.date;
        self.time = details.time;
        self.location = details.location;
        self.seat_quantity = details.seat_quantity;
    }

    /// True when the event date lies strictly before `now`.
    pub fn is_past(&self, now: &Timestamp) -> bool {
        self.date.is_before(now)
    }

    pub fn has_seats(&self, quantity: u32) -> bool {
        self.seat_quantity >= quantity
    }

    /// Takes `quantity` seats, failing without change if too few remain.
    pub fn claim_seats(&mut self, quantity: u32) -> Result<(), DomainError> {
        if !self.has_seats(quantity) {
            return Err(
                DomainError::new(ErrorCode::InsufficientSeats, "Not enough seat available")
                    .with_detail("event_id", self.id.to_string())
                    .with_detail("available", self.seat_quantity.to_string())
                    .with_detail("requested", quantity.to_string()),
            );
        }
        self.seat_quantity -= quantity;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Stores the price after `pct` off as the discounted price.
    pub fn apply_discount(&mut self, pct: Percentage) {
        self.discounted_price = self.price.less_percent(pct);
        self.updated_at = Timestamp::now();
    }

    pub fn clear_discount(&mut self) {
        self.discounted_price = Money::ZERO;
        self.updated_at = Timestamp::now();
    }
}
