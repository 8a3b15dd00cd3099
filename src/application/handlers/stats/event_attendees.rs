//! GetEventAttendeesHandler - Query handler for one event's attendee list.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, ErrorCode, EventId};
use crate::domain::registration::{Registration, RegistrationStatus};
use crate::ports::{EventRepository, RegistrationRepository};

#[derive(Debug, Clone)]
pub struct GetEventAttendeesQuery {
    pub event_id: EventId,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventAttendees {
    pub event_id: EventId,
    pub title: String,
    pub tickets_sold: u32,
    pub attended: usize,
    pub registrations: Vec<Registration>,
}

impl EventAttendees {
    fn tally(event: &Event, registrations: Vec<Registration>) -> Self {
        Self {
            event_id: event.id,
            title: event.title.clone(),
            tickets_sold: registrations.iter().map(|r| r.quantity.seats()).sum(),
            attended: registrations
                .iter()
                .filter(|r| r.status == RegistrationStatus::Attended)
                .count(),
            registrations,
        }
    }
}

pub struct GetEventAttendeesHandler {
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl GetEventAttendeesHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            registrations,
        }
    }

    pub async fn handle(&self, query: GetEventAttendeesQuery) -> Result<EventAttendees, DomainError> {
        let event = self
            .events
            .find_by_id(&query.event_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::EventNotFound, "Event not found")
                    .with_detail("event_id", query.event_id.to_string())
            })?;

        let registrations = self.registrations.list_for_event(&event.id).await?;
        Ok(EventAttendees::tally(&event, registrations))
    }
}
