//! Row types shared by the PostgreSQL repositories.
//!
//! Each row mirrors a table (or a join) column-for-column and converts into
//! its domain type with `TryFrom`, rejecting values the schema should never
//! have let through.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::domain::discount::{Discount, DiscountWindow};
use crate::domain::event::{Category, Event};
use crate::domain::foundation::{
    DiscountId, DomainError, ErrorCode, EventId, Money, PaymentId, Percentage, RegistrationId,
    Timestamp, UserId,
};
use crate::domain::registration::{
    Payment, PaymentMethod, PaymentStatus, Quantity, Registration, RegistrationStatus,
};

pub(super) const EVENT_COLUMNS: &str = "id, title, description, category, price, \
     discounted_price, is_free, date, time, location, seat_quantity, image_url, \
     created_at, updated_at";

pub(super) const DISCOUNT_COLUMNS: &str =
    "id, event_id, percentage, start_date, end_date, created_at";

/// Maps a sqlx failure to a `DatabaseError` naming the attempted action.
pub(super) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

/// Loads an event with `FOR UPDATE`, serialising every write that
/// touches its price or discounts until the transaction ends.
pub(super) async fn lock_event(
    tx: &mut Transaction<'_, Postgres>,
    id: &EventId,
) -> Result<Option<Event>, DomainError> {
    let row: Option<EventRow> = sqlx::query_as(&format!(
        "SELECT {} FROM events WHERE id = $1 FOR UPDATE",
        EVENT_COLUMNS
    ))
    .bind(id.as_uuid())
    .fetch_optional(&mut **tx)
    .await
    .map_err(db_error("lock event"))?;

    row.map(Event::try_from).transpose()
}

fn corrupt(column: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, value),
    )
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: i64,
    pub discounted_price: i64,
    pub is_free: bool,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub seat_quantity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let category: Category = row
            .category
            .parse()
            .map_err(|_| corrupt("category", &row.category))?;
        let seat_quantity =
            u32::try_from(row.seat_quantity).map_err(|_| corrupt("seat_quantity", row.seat_quantity))?;

        Ok(Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            category,
            price: Money::from_minor(row.price),
            discounted_price: Money::from_minor(row.discounted_price),
            is_free: row.is_free,
            date: Timestamp::from_datetime(row.date),
            time: row.time,
            location: row.location,
            seat_quantity,
            image_url: row.image_url,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct DiscountRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub percentage: i16,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DiscountRow> for Discount {
    type Error = DomainError;

    fn try_from(row: DiscountRow) -> Result<Self, Self::Error> {
        let percentage = Percentage::try_new(i64::from(row.percentage))
            .map_err(|_| corrupt("percentage", row.percentage))?;
        let window = DiscountWindow::new(
            Timestamp::from_datetime(row.start_date),
            Timestamp::from_datetime(row.end_date),
        )
        .map_err(|e| corrupt("discount window", e))?;

        Ok(Discount {
            id: DiscountId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            percentage,
            window,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct RegistrationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub quantity: i16,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let quantity = Quantity::try_new(i64::from(row.quantity))
            .map_err(|_| corrupt("quantity", row.quantity))?;
        let status =
            RegistrationStatus::parse(&row.status).map_err(|_| corrupt("status", &row.status))?;

        Ok(Registration {
            id: RegistrationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            event_id: EventId::from_uuid(row.event_id),
            quantity,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PaymentRow {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub amount: i64,
    pub status: String,
    pub method: String,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = PaymentStatus::parse(&row.status).map_err(|_| corrupt("status", &row.status))?;
        let method: PaymentMethod = row
            .method
            .parse()
            .map_err(|_| corrupt("method", &row.method))?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            registration_id: RegistrationId::from_uuid(row.registration_id),
            amount: Money::from_minor(row.amount),
            status,
            method,
            payment_date: row.payment_date.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

/// Payment columns of a `LEFT JOIN payments`; all absent when no payment
/// row exists.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct JoinedPaymentRow {
    pub payment_id: Option<Uuid>,
    pub payment_amount: Option<i64>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_created_at: Option<DateTime<Utc>>,
}

impl JoinedPaymentRow {
    pub fn into_payment(self, registration_id: Uuid) -> Result<Option<Payment>, DomainError> {
        let (Some(id), Some(amount), Some(status), Some(method), Some(created_at)) = (
            self.payment_id,
            self.payment_amount,
            self.payment_status,
            self.payment_method,
            self.payment_created_at,
        ) else {
            return Ok(None);
        };

        Payment::try_from(PaymentRow {
            id,
            registration_id,
            amount,
            status,
            method,
            payment_date: self.payment_date,
            created_at,
        })
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_row() -> EventRow {
        let now = Utc::now();
        EventRow {
            id: Uuid::new_v4(),
            title: "Rust Meetup".to_string(),
            description: "Monthly".to_string(),
            category: "TECHNOLOGY".to_string(),
            price: 10_000,
            discounted_price: 8_000,
            is_free: false,
            date: now,
            time: "19:00".to_string(),
            location: "Jakarta".to_string(),
            seat_quantity: 40,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn event_row_converts() {
        let event = Event::try_from(event_row()).unwrap();
        assert_eq!(event.category, Category::Technology);
        assert_eq!(event.discounted_price, Money::from_minor(8_000));
        assert_eq!(event.seat_quantity, 40);
    }

    #[test]
    fn event_row_rejects_unknown_category_and_negative_seats() {
        let mut row = event_row();
        row.category = "COOKING".to_string();
        assert_eq!(Event::try_from(row).unwrap_err().code, ErrorCode::DatabaseError);

        let mut row = event_row();
        row.seat_quantity = -1;
        assert!(Event::try_from(row).is_err());
    }

    #[test]
    fn joined_payment_absent_when_left_join_misses() {
        let row = JoinedPaymentRow {
            payment_id: None,
            payment_amount: None,
            payment_status: None,
            payment_method: None,
            payment_date: None,
            payment_created_at: None,
        };
        assert!(row.into_payment(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn joined_payment_present() {
        let registration_id = Uuid::new_v4();
        let row = JoinedPaymentRow {
            payment_id: Some(Uuid::new_v4()),
            payment_amount: Some(5_000),
            payment_status: Some("PENDING".to_string()),
            payment_method: Some("QRIS".to_string()),
            payment_date: None,
            payment_created_at: Some(Utc::now()),
        };
        let payment = row.into_payment(registration_id).unwrap().unwrap();
        assert_eq!(payment.registration_id.as_uuid(), &registration_id);
        assert_eq!(payment.method, PaymentMethod::Qris);
    }
}
