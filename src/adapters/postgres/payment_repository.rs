//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{db_error, PaymentRow, RegistrationRow};
use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId};
use crate::domain::registration::{Payment, Registration};
use crate::ports::{PaymentRecord, PaymentRepository};

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRecordRow {
    #[sqlx(flatten)]
    payment: PaymentRow,
    reg_user_id: uuid::Uuid,
    reg_event_id: uuid::Uuid,
    reg_quantity: i16,
    reg_status: String,
    reg_created_at: chrono::DateTime<chrono::Utc>,
    user_email: String,
    event_title: String,
}

impl TryFrom<PaymentRecordRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRecordRow) -> Result<Self, Self::Error> {
        let registration = Registration::try_from(RegistrationRow {
            id: row.payment.registration_id,
            user_id: row.reg_user_id,
            event_id: row.reg_event_id,
            quantity: row.reg_quantity,
            status: row.reg_status,
            created_at: row.reg_created_at,
        })?;

        Ok(PaymentRecord {
            payment: Payment::try_from(row.payment)?,
            registration,
            user_email: row.user_email,
            event_title: row.event_title,
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_by_registration(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, registration_id, amount, status, method, payment_date, created_at
            FROM payments WHERE registration_id = $1
            "#,
        )
        .bind(registration_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch payment"))?;

        row.map(Payment::try_from).transpose()
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE payments SET status = $2, method = $3, payment_date = $4 WHERE id = $1",
        )
        .bind(payment.id.as_uuid())
        .bind(payment.status.as_str())
        .bind(payment.method.as_str())
        .bind(payment.payment_date.as_ref().map(|d| *d.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db_error("update payment"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PaymentNotFound, "Payment not found")
                .with_detail("registration_id", payment.registration_id.to_string()));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        let rows: Vec<PaymentRecordRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.registration_id, p.amount, p.status, p.method, p.payment_date,
                   p.created_at,
                   r.user_id AS reg_user_id,
                   r.event_id AS reg_event_id,
                   r.quantity AS reg_quantity,
                   r.status AS reg_status,
                   r.created_at AS reg_created_at,
                   u.email AS user_email,
                   e.title AS event_title
            FROM payments p
            JOIN registrations r ON r.id = p.registration_id
            JOIN users u ON u.id = r.user_id
            JOIN events e ON e.id = r.event_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list payments"))?;

        rows.into_iter().map(PaymentRecord::try_from).collect()
    }
}
