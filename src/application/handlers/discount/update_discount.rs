//! UpdateDiscountHandler - Command handler for changing a discount's terms.

use std::sync::Arc;

use crate::domain::discount::{Discount, DiscountError, DiscountWindow};
use crate::domain::event::Event;
use crate::domain::foundation::{DiscountId, ErrorCode};
use crate::domain::validation::{validate_discount, DiscountInput};
use crate::ports::DiscountRepository;

#[derive(Debug, Clone)]
pub struct UpdateDiscountCommand {
    pub discount_id: DiscountId,
    pub input: DiscountInput,
}

#[derive(Debug, Clone)]
pub struct UpdateDiscountResult {
    pub discount: Discount,
    pub event: Event,
}

pub struct UpdateDiscountHandler {
    discounts: Arc<dyn DiscountRepository>,
}

impl UpdateDiscountHandler {
    pub fn new(discounts: Arc<dyn DiscountRepository>) -> Self {
        Self { discounts }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDiscountCommand,
    ) -> Result<UpdateDiscountResult, DiscountError> {
        let terms = validate_discount(&cmd.input)?;
        let window = DiscountWindow::new(terms.start, terms.end)?;

        let mut discount = self
            .discounts
            .find_by_id(&cmd.discount_id)
            .await?
            .ok_or_else(|| DiscountError::not_found(cmd.discount_id))?;
        discount.amend(terms.percentage, window);

        let event = self.discounts.amend(&discount).await.map_err(|e| match e.code {
            ErrorCode::DiscountNotFound => DiscountError::not_found(cmd.discount_id),
            _ => e.into(),
        })?;

        tracing::info!(
            discount_id = %discount.id,
            event_id = %event.id,
            percentage = discount.percentage.value(),
            "Discount updated"
        );
        Ok(UpdateDiscountResult { discount, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::discount::{ApplyDiscountCommand, ApplyDiscountHandler};
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
    async fn amends_terms_and_reprices() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 10_000, 10).await;
        let applied = ApplyDiscountHandler::new(store.clone())
            .handle(ApplyDiscountCommand {
                event_id: event.id,
                input: input(10, "2020-01-01", "2099-01-01"),
            })
            .await
            .unwrap();

        let result = UpdateDiscountHandler::new(store.clone())
            .handle(UpdateDiscountCommand {
                discount_id: applied.discount.id,
                input: input(40, "2020-01-01", "2099-06-01"),
            })
            .await
            .unwrap();

        assert_eq!(result.event.discounted_price, Money::from_minor(6_000));
        assert_eq!(result.discount.percentage.value(), 40);
    }

    #[tokio::test]
    async fn inverted_window_leaves_discount_untouched() {
        let store = Arc::new(InMemoryStore::new());
        let event = seed_event(&store, 10_000, 10).await;
        let applied = ApplyDiscountHandler::new(store.clone())
            .handle(ApplyDiscountCommand {
                event_id: event.id,
                input: input(10, "2020-01-01", "2099-01-01"),
            })
            .await
            .unwrap();

        let err = UpdateDiscountHandler::new(store.clone())
            .handle(UpdateDiscountCommand {
                discount_id: applied.discount.id,
                input: input(40, "2099-01-01", "2020-01-01"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidRange);
        let stored = DiscountRepository::find_by_id(&*store, &applied.discount.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.percentage.value(), 10);
    }

    #[tokio::test]
    async fn unknown_discount_is_not_found() {
        let id = DiscountId::new();
        let err = UpdateDiscountHandler::new(Arc::new(InMemoryStore::new()))
            .handle(UpdateDiscountCommand {
                discount_id: id,
                input: input(10, "2020-01-01", "2099-01-01"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, DiscountError::NotFound(id));
    }
}
