//! SubmitReviewHandler - Command handler for reviewing a registration.

use std::sync::Arc;

use crate::domain::foundation::{
    authorize_ownership, ErrorCode, OwnedByUser, Principal, RegistrationId, ReviewId, UserId,
};
use crate::domain::review::{Review, ReviewError};
use crate::domain::validation::{validate_review, ReviewInput};
use crate::ports::{RegistrationRepository, ReviewRepository};

#[derive(Debug, Clone)]
pub struct SubmitReviewCommand {
    pub principal: Principal,
    /// User id sent in the request body, if any. Must be the caller.
    pub user_id: Option<UserId>,
    pub registration_id: RegistrationId,
    pub input: ReviewInput,
}

/// Creates at most one review per (registration, user).
///
/// Attendance is not required. The store's unique constraint still rejects
/// a duplicate that races past the lookup.
pub struct SubmitReviewHandler {
    registrations: Arc<dyn RegistrationRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl SubmitReviewHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            registrations,
            reviews,
        }
    }

    pub async fn handle(&self, cmd: SubmitReviewCommand) -> Result<Review, ReviewError> {
        // 1. Validate
        let valid = validate_review(&cmd.input)?;
        if let Some(user_id) = cmd.user_id {
            authorize_ownership(&cmd.principal, &user_id).into_result()?;
        }

        // 2. Only the registration's owner may review it
        let registration = self
            .registrations
            .find_by_id(&cmd.registration_id)
            .await?
            .ok_or(ReviewError::RegistrationNotFound(cmd.registration_id))?;
        registration.check_ownership(&cmd.principal)?;

        // 3. One review per registration and user
        let user_id = cmd.principal.id;
        if self
            .reviews
            .find_by_registration_and_user(&cmd.registration_id, &user_id)
            .await?
            .is_some()
        {
            return Err(ReviewError::duplicate(cmd.registration_id, user_id));
        }

        // 4. Persist
        let review = Review::new(
            ReviewId::new(),
            cmd.registration_id,
            user_id,
            valid.rating,
            valid.comment,
        );
        self.reviews.create(&review).await.map_err(|e| match e.code {
            ErrorCode::DuplicateReview => ReviewError::duplicate(cmd.registration_id, user_id),
            _ => e.into(),
        })?;

        tracing::info!(
            review_id = %review.id,
            registration_id = %review.registration_id,
            rating = review.rating.value(),
            "Review submitted"
        );
        Ok(review)
    }
}
