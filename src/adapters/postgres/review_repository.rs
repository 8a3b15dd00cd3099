//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::db_error;
use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, Rating, RegistrationId, ReviewId, Timestamp, UserId,
};
use crate::domain::review::{Review, ReviewComment};
use crate::ports::{ReviewRepository, ReviewWithAuthor};

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    registration_id: Uuid,
    user_id: Uuid,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::try_new(i64::from(row.rating)).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid rating value: {}", e))
        })?;
        let comment = ReviewComment::try_new(row.comment).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid comment value: {}", e))
        })?;

        Ok(Review {
            id: ReviewId::from_uuid(row.id),
            registration_id: RegistrationId::from_uuid(row.registration_id),
            user_id: UserId::from_uuid(row.user_id),
            rating,
            comment,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewWithAuthorRow {
    #[sqlx(flatten)]
    review: ReviewRow,
    username: String,
}

const REVIEW_COLUMNS: &str =
    "rv.id, rv.registration_id, rv.user_id, rv.rating, rv.comment, rv.created_at";

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, registration_id, user_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.registration_id.as_uuid())
        .bind(review.user_id.as_uuid())
        .bind(i16::from(review.rating.value()))
        .bind(review.comment.as_str())
        .bind(review.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("reviews_registration_user_key") {
                    return DomainError::new(
                        ErrorCode::DuplicateReview,
                        "You have already reviewed this event.",
                    )
                    .with_detail("registration_id", review.registration_id.to_string())
                    .with_detail("user_id", review.user_id.to_string());
                }
            }
            DomainError::database(format!("Failed to insert review: {}", e))
        })?;

        Ok(())
    }

    async fn find_by_registration_and_user(
        &self,
        registration_id: &RegistrationId,
        user_id: &UserId,
    ) -> Result<Option<Review>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reviews rv WHERE rv.registration_id = $1 AND rv.user_id = $2",
            REVIEW_COLUMNS
        ))
        .bind(registration_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch review"))?;

        row.map(Review::try_from).transpose()
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ReviewWithAuthor>, DomainError> {
        let rows: Vec<ReviewWithAuthorRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, u.username
            FROM reviews rv
            JOIN registrations r ON r.id = rv.registration_id
            JOIN users u ON u.id = rv.user_id
            WHERE r.event_id = $1
            ORDER BY rv.created_at DESC
            "#,
            REVIEW_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list event reviews"))?;

        rows.into_iter()
            .map(|row| {
                Ok(ReviewWithAuthor {
                    review: Review::try_from(row.review)?,
                    username: row.username,
                })
            })
            .collect()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Review>, DomainError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reviews rv WHERE rv.user_id = $1 ORDER BY rv.created_at DESC",
            REVIEW_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list user reviews"))?;

        rows.into_iter().map(Review::try_from).collect()
    }
}
