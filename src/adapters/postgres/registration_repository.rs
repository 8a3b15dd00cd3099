//! PostgreSQL implementation of RegistrationRepository.
//!
//! The seat claim is a single conditional `UPDATE ... WHERE seat_quantity >=
//! $n`, so concurrent registrations serialise on the event row and at most
//! the ones that fit succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::rows::{db_error, JoinedPaymentRow, RegistrationRow};
use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, RegistrationId, Timestamp, UserId,
};
use crate::domain::registration::{Payment, Registration};
use crate::ports::{EventSummary, RegistrationRecord, RegistrationRepository, UserRegistration};

pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REGISTRATION_COLUMNS: &str = "r.id, r.user_id, r.event_id, r.quantity, r.status, r.created_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRegistrationRow {
    #[sqlx(flatten)]
    registration: RegistrationRow,
    #[sqlx(flatten)]
    payment: JoinedPaymentRow,
    event_title: String,
    event_date: DateTime<Utc>,
    event_location: String,
}

impl TryFrom<UserRegistrationRow> for UserRegistration {
    type Error = DomainError;

    fn try_from(row: UserRegistrationRow) -> Result<Self, Self::Error> {
        let registration_id = row.registration.id;
        let event_id = row.registration.event_id;
        Ok(UserRegistration {
            registration: Registration::try_from(row.registration)?,
            payment: row.payment.into_payment(registration_id)?,
            event: EventSummary {
                id: EventId::from_uuid(event_id),
                title: row.event_title,
                date: Timestamp::from_datetime(row.event_date),
                location: row.event_location,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegistrationRecordRow {
    #[sqlx(flatten)]
    registration: RegistrationRow,
    user_email: String,
    event_title: String,
}

impl TryFrom<RegistrationRecordRow> for RegistrationRecord {
    type Error = DomainError;

    fn try_from(row: RegistrationRecordRow) -> Result<Self, Self::Error> {
        Ok(RegistrationRecord {
            registration: Registration::try_from(row.registration)?,
            user_email: row.user_email,
            event_title: row.event_title,
        })
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn register(
        &self,
        registration: &Registration,
        payment: &Payment,
    ) -> Result<u32, DomainError> {
        let requested = registration.quantity.seats();
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let remaining: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE events SET seat_quantity = seat_quantity - $2, updated_at = now()
            WHERE id = $1 AND seat_quantity >= $2
            RETURNING seat_quantity
            "#,
        )
        .bind(registration.event_id.as_uuid())
        .bind(requested as i32)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("claim seats"))?;

        let remaining = match remaining {
            Some(seats) => seats,
            None => {
                let available: Option<i32> =
                    sqlx::query_scalar("SELECT seat_quantity FROM events WHERE id = $1")
                        .bind(registration.event_id.as_uuid())
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(db_error("fetch event seats"))?;

                return Err(match available {
                    None => DomainError::new(ErrorCode::EventNotFound, "Event not found")
                        .with_detail("event_id", registration.event_id.to_string()),
                    Some(available) => {
                        DomainError::new(ErrorCode::InsufficientSeats, "Not enough seat available")
                            .with_detail("event_id", registration.event_id.to_string())
                            .with_detail("available", available.to_string())
                            .with_detail("requested", requested.to_string())
                    }
                });
            }
        };

        sqlx::query(
            r#"
            INSERT INTO registrations (id, user_id, event_id, quantity, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.user_id.as_uuid())
        .bind(registration.event_id.as_uuid())
        .bind(i16::from(registration.quantity.value()))
        .bind(registration.status.as_str())
        .bind(registration.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert registration"))?;

        sqlx::query(
            r#"
            INSERT INTO payments (id, registration_id, amount, status, method, payment_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.registration_id.as_uuid())
        .bind(payment.amount.minor_units())
        .bind(payment.status.as_str())
        .bind(payment.method.as_str())
        .bind(payment.payment_date.as_ref().map(|d| *d.as_datetime()))
        .bind(payment.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert payment"))?;

        tx.commit().await.map_err(db_error("commit transaction"))?;

        u32::try_from(remaining).map_err(|_| DomainError::database("Negative seat count after claim"))
    }

    async fn update(&self, registration: &Registration) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE registrations SET status = $2 WHERE id = $1")
            .bind(registration.id.as_uuid())
            .bind(registration.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error("update registration"))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::RegistrationNotFound, "Registration not found")
                    .with_detail("registration_id", registration.id.to_string()),
            );
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM registrations r WHERE r.id = $1",
            REGISTRATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch registration"))?;

        row.map(Registration::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserRegistration>, DomainError> {
        let rows: Vec<UserRegistrationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {},
                   p.id AS payment_id,
                   p.amount AS payment_amount,
                   p.status AS payment_status,
                   p.method AS payment_method,
                   p.payment_date,
                   p.created_at AS payment_created_at,
                   e.title AS event_title,
                   e.date AS event_date,
                   e.location AS event_location
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            LEFT JOIN payments p ON p.registration_id = r.id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
            REGISTRATION_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list user registrations"))?;

        rows.into_iter().map(UserRegistration::try_from).collect()
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Registration>, DomainError> {
        let rows: Vec<RegistrationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM registrations r WHERE r.event_id = $1 ORDER BY r.created_at ASC",
            REGISTRATION_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list event registrations"))?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, DomainError> {
        let rows: Vec<RegistrationRecordRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}, u.email AS user_email, e.title AS event_title
            FROM registrations r
            JOIN users u ON u.id = r.user_id
            JOIN events e ON e.id = r.event_id
            ORDER BY r.created_at DESC
            "#,
            REGISTRATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list registrations"))?;

        rows.into_iter().map(RegistrationRecord::try_from).collect()
    }
}
