//! PostgreSQL implementation of EventRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{db_error, lock_event, EventRow, EVENT_COLUMNS};
use crate::domain::event::{Event, EventDetails, EventFilter};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, Percentage};
use crate::ports::{EventRepository, EventRevision};

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn event_not_found(id: &EventId) -> DomainError {
    DomainError::new(ErrorCode::EventNotFound, "Event not found").with_detail("event_id", id.to_string())
}

/// `seat_quantity` is an INTEGER column.
fn seat_column(event: &Event) -> Result<i32, DomainError> {
    i32::try_from(event.seat_quantity).map_err(|_| {
        DomainError::new(ErrorCode::ValidationFailed, "Seat quantity is too large")
            .with_detail("seat_quantity", event.seat_quantity.to_string())
    })
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: &Event) -> Result<(), DomainError> {
        let seats = seat_column(event)?;
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, category, price, discounted_price, is_free,
                date, time, location, seat_quantity, image_url, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.category.as_str())
        .bind(event.price.minor_units())
        .bind(event.discounted_price.minor_units())
        .bind(event.is_free)
        .bind(event.date.as_datetime())
        .bind(&event.time)
        .bind(&event.location)
        .bind(seats)
        .bind(&event.image_url)
        .bind(event.created_at.as_datetime())
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert event"))?;

        Ok(())
    }

    async fn revise(
        &self,
        id: &EventId,
        details: EventDetails,
        image_url: Option<String>,
    ) -> Result<EventRevision, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let mut event = lock_event(&mut tx, id).await?.ok_or_else(|| event_not_found(id))?;

        let first_discount: Option<i16> = sqlx::query_scalar(
            r#"
            SELECT percentage FROM discounts
            WHERE event_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("fetch first discount"))?;
        let first_discount = first_discount
            .map(|pct| {
                Percentage::try_new(i64::from(pct)).map_err(|_| {
                    DomainError::database(format!("Invalid percentage value: {}", pct))
                })
            })
            .transpose()?;

        if image_url.is_some() {
            event.image_url = image_url;
        }
        let discounts_cleared = event.revise(details, first_discount);
        let seats = seat_column(&event)?;

        sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                category = $4,
                price = $5,
                discounted_price = $6,
                is_free = $7,
                date = $8,
                time = $9,
                location = $10,
                seat_quantity = $11,
                image_url = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.category.as_str())
        .bind(event.price.minor_units())
        .bind(event.discounted_price.minor_units())
        .bind(event.is_free)
        .bind(event.date.as_datetime())
        .bind(&event.time)
        .bind(&event.location)
        .bind(seats)
        .bind(&event.image_url)
        .bind(event.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update event"))?;

        if discounts_cleared {
            sqlx::query("DELETE FROM discounts WHERE event_id = $1")
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(db_error("delete event discounts"))?;
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(EventRevision {
            event,
            discounts_cleared,
        })
    }

    async fn delete(&self, id: &EventId) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        // Children first; the schema has no ON DELETE CASCADE.
        sqlx::query(
            r#"
            DELETE FROM reviews
            WHERE registration_id IN (SELECT id FROM registrations WHERE event_id = $1)
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("delete event reviews"))?;

        sqlx::query(
            r#"
            DELETE FROM payments
            WHERE registration_id IN (SELECT id FROM registrations WHERE event_id = $1)
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("delete event payments"))?;

        for (sql, action) in [
            ("DELETE FROM registrations WHERE event_id = $1", "delete event registrations"),
            ("DELETE FROM discounts WHERE event_id = $1", "delete event discounts"),
        ] {
            sqlx::query(sql)
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(db_error(action))?;
        }

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete event"))?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(id));
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("fetch event"))?;

        row.map(Event::try_from).transpose()
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, DomainError> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM events
            WHERE ($1::text IS NULL OR title ILIKE $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR location ILIKE $3)
            ORDER BY date ASC
            "#,
            EVENT_COLUMNS
        ))
        .bind(EventFilter::like_pattern(filter.search.as_deref()))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(EventFilter::like_pattern(filter.location.as_deref()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list events"))?;

        rows.into_iter().map(Event::try_from).collect()
    }
}
