//! ApplyDiscountHandler - Command handler for adding a discount to an event.

use std::sync::Arc;

use crate::domain::discount::{Discount, DiscountError, DiscountWindow};
use crate::domain::event::Event;
use crate::domain::foundation::{DiscountId, ErrorCode, EventId};
use crate::domain::validation::{validate_discount, DiscountInput};
use crate::ports::DiscountRepository;

#[derive(Debug, Clone)]
pub struct ApplyDiscountCommand {
    pub event_id: EventId,
    pub input: DiscountInput,
}

#[derive(Debug, Clone)]
pub struct ApplyDiscountResult {
    pub discount: Discount,
    /// The event with its rewritten discounted price.
    pub event: Event,
}

pub struct ApplyDiscountHandler {
    discounts: Arc<dyn DiscountRepository>,
}

impl ApplyDiscountHandler {
    pub fn new(discounts: Arc<dyn DiscountRepository>) -> Self {
        Self { discounts }
    }

    pub async fn handle(&self, cmd: ApplyDiscountCommand) -> Result<ApplyDiscountResult, DiscountError> {
        let terms = validate_discount(&cmd.input)?;
        let window = DiscountWindow::new(terms.start, terms.end)?;
        let discount = Discount::new(DiscountId::new(), cmd.event_id, terms.percentage, window);

        let event = self.discounts.apply(&discount).await.map_err(|e| match e.code {
            ErrorCode::EventNotFound => DiscountError::event_not_found(cmd.event_id),
            _ => e.into(),
        })?;

        tracing::info!(
            discount_id = %discount.id,
            event_id = %event.id,
            percentage = discount.percentage.value(),
            discounted_price = %event.discounted_price,
            "Discount applied"
        );
        Ok(ApplyDiscountResult { discount, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::seed_event;
    use crate::domain::foundation::Money;

    fn input(pct: i64, start: &str, end: &str) -> DiscountInput {
        DiscountInput {
            percentage: pct,
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[tokio::test]
    async fn applies_and_reprices_event() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 10_000, 10).await;

        let result = ApplyDiscountHandler::new(store.clone())
            .handle(ApplyDiscountCommand {
                event_id: event.id,
                input: input(20, "2020-01-01", "2099-01-01"),
            })
            .await
            .unwrap();

        assert_eq!(result.event.discounted_price, Money::from_minor(8_000));
        assert_eq!(result.discount.event_id, event.id);
    }

    #[tokio::test]
    async fn inverted_window_is_invalid_range_and_changes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 10_000, 10).await;

        let err = ApplyDiscountHandler::new(store.clone())
            .handle(ApplyDiscountCommand {
                event_id: event.id,
                input: input(20, "2099-01-10", "2099-01-01"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidRange);
        assert_eq!(err.message(), "End date cannot be before start date");
        assert!(DiscountRepository::list_all(&*store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn percentage_out_of_range_is_validation_error() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 10_000, 10).await;
        let handler = ApplyDiscountHandler::new(store);

        for pct in [0, 101, -5] {
            let err = handler
                .handle(ApplyDiscountCommand {
                    event_id: event.id,
                    input: input(pct, "2020-01-01", "2099-01-01"),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, DiscountError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let id = EventId::new();
        let err = ApplyDiscountHandler::new(Arc::new(InMemoryStore::new()))
            .handle(ApplyDiscountCommand {
                event_id: id,
                input: input(10, "2020-01-01", "2099-01-01"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, DiscountError::EventNotFound(id));
    }
}
