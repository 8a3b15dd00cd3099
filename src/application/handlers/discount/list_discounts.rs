//! Discount catalogue queries.

use std::sync::Arc;

use crate::domain::discount::{Discount, DiscountError};
use crate::domain::foundation::EventId;
use crate::ports::DiscountRepository;

pub struct ListDiscountsHandler {
    discounts: Arc<dyn DiscountRepository>,
}

impl ListDiscountsHandler {
    pub fn new(discounts: Arc<dyn DiscountRepository>) -> Self {
        Self { discounts }
    }

    pub async fn all(&self) -> Result<Vec<Discount>, DiscountError> {
        Ok(self.discounts.list_all().await?)
    }

    pub async fn for_event(&self, event_id: &EventId) -> Result<Vec<Discount>, DiscountError> {
        Ok(self.discounts.list_for_event(event_id).await?)
    }
}
