//! CreateEventHandler - Command handler for adding an event to the catalogue.

use std::sync::Arc;

use crate::domain::event::{Event, EventError};
use crate::domain::foundation::EventId;
use crate::domain::validation::{validate_event, EventInput};
use crate::ports::{EventRepository, ImageStorage, ImageUpload};

/// Command to create an event, optionally with a poster image.
#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub input: EventInput,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct CreateEventResult {
    pub event: Event,
}

/// Handler for creating events.
///
/// The image is uploaded before anything is persisted; a failed or timed
/// out upload aborts creation.
pub struct CreateEventHandler {
    events: Arc<dyn EventRepository>,
    images: Arc<dyn ImageStorage>,
}

impl CreateEventHandler {
    pub fn new(events: Arc<dyn EventRepository>, images: Arc<dyn ImageStorage>) -> Self {
        Self { events, images }
    }

    pub async fn handle(&self, cmd: CreateEventCommand) -> Result<CreateEventResult, EventError> {
        // 1. Validate input
        let details = validate_event(&cmd.input)?;

        // 2. Upload the poster, if any
        let image_url = match cmd.image {
            Some(image) => {
                let url = self.images.upload(image).await.map_err(|e| {
                    tracing::warn!(error = %e, "Event image upload failed");
                    EventError::image_upload(e.message)
                })?;
                Some(url)
            }
            None => None,
        };

        // 3. Build and persist
        let event = Event::create(EventId::new(), details, image_url);
        self.events.create(&event).await?;

        tracing::info!(event_id = %event.id, is_free = event.is_free, "Event created");
        Ok(CreateEventResult { event })
    }
}
