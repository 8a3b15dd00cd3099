//! DeleteEventHandler - Command handler for removing an event and its dependents.

use std::sync::Arc;

use crate::domain::event::EventError;
use crate::domain::foundation::{ErrorCode, EventId};
use crate::ports::EventRepository;

#[derive(Debug, Clone)]
pub struct DeleteEventCommand {
    pub event_id: EventId,
}

/// Deletes the event with its reviews, payments, registrations and
/// discounts in one transaction.
pub struct DeleteEventHandler {
    events: Arc<dyn EventRepository>,
}

impl DeleteEventHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, cmd: DeleteEventCommand) -> Result<(), EventError> {
        self.events
            .delete(&cmd.event_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::EventNotFound => EventError::not_found(cmd.event_id),
                _ => e.into(),
            })?;

        tracing::info!(event_id = %cmd.event_id, "Event deleted");
        Ok(())
    }
}
