//! Review aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    OwnedByUser, Rating, RegistrationId, ReviewId, Timestamp, UserId, ValidationError,
};

/// Free-text part of a review, 1 to 256 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewComment(String);

impl ReviewComment {
    pub const MAX_CHARS: usize = 256;

    pub fn try_new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::empty_field("comment"));
        }
        let len = raw.chars().count();
        if len > Self::MAX_CHARS {
            return Err(ValidationError::out_of_range(
                "comment",
                1,
                Self::MAX_CHARS as i64,
                len as i64,
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: ReviewComment,
    pub created_at: Timestamp,
}

impl Review {
    pub fn new(
        id: ReviewId,
        registration_id: RegistrationId,
        user_id: UserId,
        rating: Rating,
        comment: ReviewComment,
    ) -> Self {
        Self {
            id,
            registration_id,
            user_id,
            rating,
            comment,
            created_at: Timestamp::now(),
        }
    }
}

impl OwnedByUser for Review {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
