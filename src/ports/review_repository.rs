//! Review repository port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, EventId, RegistrationId, UserId};
use crate::domain::review::Review;

/// A review with its author's username, for public listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub username: String,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review.
    ///
    /// # Errors
    ///
    /// - `DuplicateReview` if the (registration, user) pair already has one;
    ///   enforced by the store, so a racing duplicate is still rejected
    async fn create(&self, review: &Review) -> Result<(), DomainError>;

    async fn find_by_registration_and_user(
        &self,
        registration_id: &RegistrationId,
        user_id: &UserId,
    ) -> Result<Option<Review>, DomainError>;

    /// Reviews left on any registration of the event, newest first.
    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ReviewWithAuthor>, DomainError>;

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReviewRepository) {}
    }
}
