//! Event catalogue queries.

use std::sync::Arc;

use crate::domain::event::{Event, EventError, EventFilter};
use crate::domain::foundation::EventId;
use crate::ports::EventRepository;

#[derive(Debug, Clone)]
pub struct GetEventQuery {
    pub event_id: EventId,
}

pub struct GetEventHandler {
    events: Arc<dyn EventRepository>,
}

impl GetEventHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, query: GetEventQuery) -> Result<Event, EventError> {
        self.events
            .find_by_id(&query.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(query.event_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListEventsQuery {
    pub filter: EventFilter,
}

pub struct ListEventsHandler {
    events: Arc<dyn EventRepository>,
}

impl ListEventsHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, query: ListEventsQuery) -> Result<Vec<Event>, EventError> {
        Ok(self.events.list(&query.filter).await?)
    }
}
