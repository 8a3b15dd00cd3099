//! Event repository port.
//!
//! Persists the Event aggregate and owns the delete cascade: removing an
//! event removes its reviews, payments, registrations and discounts in the
//! same transaction.

use async_trait::async_trait;

use crate::domain::event::{Event, EventDetails, EventFilter};
use crate::domain::foundation::{DomainError, EventId};

/// Outcome of `EventRepository::revise`.
#[derive(Debug, Clone)]
pub struct EventRevision {
    pub event: Event,
    /// True when the event became free and its discounts were removed.
    pub discounts_cleared: bool,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event.
    async fn create(&self, event: &Event) -> Result<(), DomainError>;

    /// Apply new details to a stored event as one atomic step.
    ///
    /// The event is read under a write lock together with its first
    /// discount, revised with `Event::revise`, and written back. Discount
    /// writes on the same event wait for it. When the event becomes free its
    /// discounts are deleted before the lock is released. `image_url`
    /// replaces the poster when present.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    async fn revise(
        &self,
        id: &EventId,
        details: EventDetails,
        image_url: Option<String>,
    ) -> Result<EventRevision, DomainError>;

    /// Delete an event together with everything that references it.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    async fn delete(&self, id: &EventId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Events matching the filter, soonest first.
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EventRepository) {}
    }
}
