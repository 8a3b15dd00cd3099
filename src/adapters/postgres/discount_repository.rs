//! PostgreSQL implementation of DiscountRepository.
//!
//! Each write locks the event row, changes the discount and rewrites the
//! event's `discounted_price` before committing.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::rows::{db_error, lock_event, DiscountRow, DISCOUNT_COLUMNS};
use crate::domain::discount::Discount;
use crate::domain::event::Event;
use crate::domain::foundation::{DiscountId, DomainError, ErrorCode, EventId, Percentage};
use crate::ports::DiscountRepository;

pub struct PostgresDiscountRepository {
    pool: PgPool,
}

impl PostgresDiscountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn discount_not_found(id: &DiscountId) -> DomainError {
    DomainError::new(ErrorCode::DiscountNotFound, "Discount not found")
        .with_detail("discount_id", id.to_string())
}

/// Rewrites the locked event's discounted price; `None` clears it.
async fn reprice(
    tx: &mut Transaction<'_, Postgres>,
    mut event: Event,
    percentage: Option<Percentage>,
) -> Result<Event, DomainError> {
    match percentage {
        Some(pct) => event.apply_discount(pct),
        None => event.clear_discount(),
    }

    sqlx::query("UPDATE events SET discounted_price = $2, updated_at = $3 WHERE id = $1")
        .bind(event.id.as_uuid())
        .bind(event.discounted_price.minor_units())
        .bind(event.updated_at.as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(db_error("update discounted price"))?;

    Ok(event)
}

async fn event_id_of(
    tx: &mut Transaction<'_, Postgres>,
    id: &DiscountId,
) -> Result<EventId, DomainError> {
    let event_id: Option<uuid::Uuid> =
        sqlx::query_scalar("SELECT event_id FROM discounts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_error("fetch discount"))?;

    event_id
        .map(EventId::from_uuid)
        .ok_or_else(|| discount_not_found(id))
}

#[async_trait]
impl DiscountRepository for PostgresDiscountRepository {
    async fn apply(&self, discount: &Discount) -> Result<Event, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let event = lock_event(&mut tx, &discount.event_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::EventNotFound, "Event not found")
                .with_detail("event_id", discount.event_id.to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO discounts (id, event_id, percentage, start_date, end_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(discount.id.as_uuid())
        .bind(discount.event_id.as_uuid())
        .bind(i16::from(discount.percentage.value()))
        .bind(discount.window.start().as_datetime())
        .bind(discount.window.end().as_datetime())
        .bind(discount.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert discount"))?;

        let event = reprice(&mut tx, event, Some(discount.percentage)).await?;
        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(event)
    }

    async fn amend(&self, discount: &Discount) -> Result<Event, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let event_id = event_id_of(&mut tx, &discount.id).await?;
        let event = lock_event(&mut tx, &event_id)
            .await?
            .ok_or_else(|| discount_not_found(&discount.id))?;

        sqlx::query(
            r#"
            UPDATE discounts SET percentage = $2, start_date = $3, end_date = $4
            WHERE id = $1
            "#,
        )
        .bind(discount.id.as_uuid())
        .bind(i16::from(discount.percentage.value()))
        .bind(discount.window.start().as_datetime())
        .bind(discount.window.end().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update discount"))?;

        let event = reprice(&mut tx, event, Some(discount.percentage)).await?;
        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(event)
    }

    async fn remove(&self, id: &DiscountId) -> Result<Event, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let event_id = event_id_of(&mut tx, id).await?;
        let event = lock_event(&mut tx, &event_id)
            .await?
            .ok_or_else(|| discount_not_found(id))?;

        sqlx::query("DELETE FROM discounts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete discount"))?;

        let event = reprice(&mut tx, event, None).await?;
        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(event)
    }

    async fn find_by_id(&self, id: &DiscountId) -> Result<Option<Discount>, DomainError> {
        let row: Option<DiscountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM discounts WHERE id = $1",
            DISCOUNT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch discount"))?;

        row.map(Discount::try_from).transpose()
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Discount>, DomainError> {
        let rows: Vec<DiscountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM discounts WHERE event_id = $1 ORDER BY created_at ASC, id ASC",
            DISCOUNT_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list event discounts"))?;

        rows.into_iter().map(Discount::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Discount>, DomainError> {
        let rows: Vec<DiscountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM discounts ORDER BY created_at ASC, id ASC",
            DISCOUNT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list discounts"))?;

        rows.into_iter().map(Discount::try_from).collect()
    }
}
