//! DeleteDiscountHandler - Command handler for removing a discount.

use std::sync::Arc;

use crate::domain::discount::DiscountError;
use crate::domain::event::Event;
use crate::domain::foundation::{DiscountId, ErrorCode};
use crate::ports::DiscountRepository;

#[derive(Debug, Clone)]
pub struct DeleteDiscountCommand {
    pub discount_id: DiscountId,
}

/// Deletes a discount and resets the event's discounted price to zero.
pub struct DeleteDiscountHandler {
    discounts: Arc<dyn DiscountRepository>,
}

impl DeleteDiscountHandler {
    pub fn new(discounts: Arc<dyn DiscountRepository>) -> Self {
        Self { discounts }
    }

    pub async fn handle(&self, cmd: DeleteDiscountCommand) -> Result<Event, DiscountError> {
        let event = self
            .discounts
            .remove(&cmd.discount_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::DiscountNotFound => DiscountError::not_found(cmd.discount_id),
                _ => e.into(),
            })?;

        tracing::info!(discount_id = %cmd.discount_id, event_id = %event.id, "Discount deleted");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::discount::{ApplyDiscountCommand, ApplyDiscountHandler};
    use crate::application::handlers::test_support::seed_event;
    use crate::domain::validation::DiscountInput;

    #[tokio::test]
    async fn deleting_discount_resets_discounted_price() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 10_000, 10).await;
        let applied = ApplyDiscountHandler::new(store.clone())
            .handle(ApplyDiscountCommand {
                event_id: event.id,
                input: DiscountInput {
                    percentage: 20,
                    start_date: "2020-01-01".to_string(),
                    end_date: "2099-01-01".to_string(),
                },
            })
            .await
            .unwrap();
        assert!(applied.event.discounted_price.is_positive());

        let event = DeleteDiscountHandler::new(store.clone())
            .handle(DeleteDiscountCommand {
                discount_id: applied.discount.id,
            })
            .await
            .unwrap();

        assert!(event.discounted_price.is_zero());
    }

    #[tokio::test]
    async fn unknown_discount_is_not_found() {
        let id = DiscountId::new();
        let err = DeleteDiscountHandler::new(Arc::new(InMemoryStore::new()))
            .handle(DeleteDiscountCommand { discount_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, DiscountError::NotFound(id));
    }
}
