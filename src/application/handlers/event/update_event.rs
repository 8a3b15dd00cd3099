//! UpdateEventHandler - Command handler for revising an event.

use std::sync::Arc;

use crate::domain::event::{Event, EventError};
use crate::domain::foundation::{ErrorCode, EventId};
use crate::domain::validation::{validate_event, EventInput};
use crate::ports::{EventRepository, ImageStorage, ImageUpload};

#[derive(Debug, Clone)]
pub struct UpdateEventCommand {
    pub event_id: EventId,
    pub input: EventInput,
    /// Replaces the current poster when present.
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct UpdateEventResult {
    pub event: Event,
    /// True when the event became free and its discounts were removed.
    pub discounts_cleared: bool,
}

/// Handler for updating events.
///
/// A paid event keeps an explicitly submitted discounted price; otherwise
/// the price is recomputed from the event's first stored discount. An event
/// that becomes free loses its discounts in the same write. The repository
/// performs the read and the write under one lock, so a discount applied
/// concurrently is never overwritten.
pub struct UpdateEventHandler {
    events: Arc<dyn EventRepository>,
    images: Arc<dyn ImageStorage>,
}

impl UpdateEventHandler {
    pub fn new(events: Arc<dyn EventRepository>, images: Arc<dyn ImageStorage>) -> Self {
        Self { events, images }
    }

    pub async fn handle(&self, cmd: UpdateEventCommand) -> Result<UpdateEventResult, EventError> {
        let details = validate_event(&cmd.input)?;

        // Fail fast before uploading a poster for an event that is gone
        if self.events.find_by_id(&cmd.event_id).await?.is_none() {
            return Err(EventError::not_found(cmd.event_id));
        }

        let image_url = match cmd.image {
            Some(image) => Some(self.images.upload(image).await.map_err(|e| {
                tracing::warn!(event_id = %cmd.event_id, error = %e, "Event image upload failed");
                EventError::image_upload(e.message)
            })?),
            None => None,
        };

        let revision = self
            .events
            .revise(&cmd.event_id, details, image_url)
            .await
            .map_err(|e| match e.code {
                ErrorCode::EventNotFound => EventError::not_found(cmd.event_id),
                _ => e.into(),
            })?;

        tracing::info!(
            event_id = %revision.event.id,
            is_free = revision.event.is_free,
            discounts_cleared = revision.discounts_cleared,
            "Event updated"
        );
        Ok(UpdateEventResult {
            event: revision.event,
            discounts_cleared: revision.discounts_cleared,
        })
    }
}
