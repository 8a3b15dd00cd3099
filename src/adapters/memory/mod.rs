//! In-memory adapters.
//!
//! `InMemoryStore` implements every repository port over one set of tables
//! guarded by a single mutex, so multi-table writes (seat claim, discount
//! repricing, delete cascade) are atomic the same way the PostgreSQL
//! transactions are. Used by tests and for running without a database.

mod repositories;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::account::User;
use crate::domain::discount::Discount;
use crate::domain::event::Event;
use crate::domain::foundation::EventId;
use crate::domain::registration::{Payment, Registration};
use crate::domain::review::Review;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    events: Vec<Event>,
    discounts: Vec<Discount>,
    registrations: Vec<Registration>,
    payments: Vec<Payment>,
    reviews: Vec<Review>,
}

/// Shared in-memory database. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats left on an event, if it exists.
    pub async fn seats_left(&self, event_id: &EventId) -> Option<u32> {
        let tables = self.tables.lock().await;
        tables
            .events
            .iter()
            .find(|e| &e.id == event_id)
            .map(|e| e.seat_quantity)
    }

    /// Number of stored registrations (useful for tests)
    pub async fn registration_count(&self) -> usize {
        self.tables.lock().await.registrations.len()
    }
}
