//! Discount aggregate and its validity window.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiscountId, EventId, Percentage, Timestamp};

use super::DiscountError;

/// Inclusive `[start, end]` interval during which a discount is active.
///
/// # Invariants
///
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountWindow {
    start: Timestamp,
    end: Timestamp,
}

impl DiscountWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, DiscountError> {
        if end.is_before(&start) {
            return Err(DiscountError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn contains(&self, instant: &Timestamp) -> bool {
        instant.is_within(&self.start, &self.end)
    }
}

/// Time-bounded percentage reduction on one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub event_id: EventId,
    pub percentage: Percentage,
    pub window: DiscountWindow,
    pub created_at: Timestamp,
}

impl Discount {
    pub fn new(id: DiscountId, event_id: EventId, percentage: Percentage, window: DiscountWindow) -> Self {
        Self {
            id,
            event_id,
            percentage,
            window,
            created_at: Timestamp::now(),
        }
    }

    pub fn is_active_at(&self, now: &Timestamp) -> bool {
        self.window.contains(now)
    }

    /// Replaces the terms of this discount.
    pub fn amend(&mut self, percentage: Percentage, window: DiscountWindow) {
        self.percentage = percentage;
        self.window = window;
    }
}
