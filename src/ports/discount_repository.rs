//! Discount repository port.
//!
//! Every write also rewrites the owning event's `discounted_price` inside
//! the same transaction, computed from the event's price as stored at that
//! moment. A reader never observes a discount without the matching price.

use async_trait::async_trait;

use crate::domain::discount::Discount;
use crate::domain::event::Event;
use crate::domain::foundation::{DiscountId, DomainError, EventId};

#[async_trait]
pub trait DiscountRepository: Send + Sync {
    /// Insert a discount and set the event's discounted price from it.
    ///
    /// Returns the event as updated.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    async fn apply(&self, discount: &Discount) -> Result<Event, DomainError>;

    /// Replace a discount's terms and recompute the event's discounted price.
    ///
    /// # Errors
    ///
    /// - `DiscountNotFound` if the discount doesn't exist
    async fn amend(&self, discount: &Discount) -> Result<Event, DomainError>;

    /// Delete a discount and reset the event's discounted price to zero.
    ///
    /// # Errors
    ///
    /// - `DiscountNotFound` if the discount doesn't exist
    async fn remove(&self, id: &DiscountId) -> Result<Event, DomainError>;

    async fn find_by_id(&self, id: &DiscountId) -> Result<Option<Discount>, DomainError>;

    /// All discounts for one event, oldest first.
    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Discount>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Discount>, DomainError>;
}
