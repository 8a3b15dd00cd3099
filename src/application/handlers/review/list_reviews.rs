//! Review queries.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::review::{Review, ReviewError};
use crate::ports::{ReviewRepository, ReviewWithAuthor};

pub struct ListReviewsHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListReviewsHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Reviews of an event with each reviewer's username.
    pub async fn for_event(&self, event_id: &EventId) -> Result<Vec<ReviewWithAuthor>, ReviewError> {
        Ok(self.reviews.list_for_event(event_id).await?)
    }

    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Review>, ReviewError> {
        Ok(self.reviews.list_for_user(user_id).await?)
    }
}
