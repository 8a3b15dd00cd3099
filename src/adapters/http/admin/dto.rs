//! Request and response bodies for admin endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::discount::Discount;
use crate::domain::event::Event;
use crate::domain::foundation::EventId;
use crate::domain::validation::DiscountInput;

/// Body of `POST /discounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountRequest {
    pub event_id: EventId,
    #[serde(flatten)]
    pub terms: DiscountInput,
}

/// A discount together with the event it repriced.
#[derive(Debug, Clone, Serialize)]
pub struct DiscountResponse {
    pub discount: Discount,
    pub event: Event,
}
