//! Registration aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    EventId, OwnedByUser, RegistrationId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::{Quantity, RegistrationStatus};

/// A user's claim on `quantity` seats of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub quantity: Quantity,
    pub status: RegistrationStatus,
    pub created_at: Timestamp,
}

impl Registration {
    pub fn new(id: RegistrationId, user_id: UserId, event_id: EventId, quantity: Quantity) -> Self {
        Self {
            id,
            user_id,
            event_id,
            quantity,
            status: RegistrationStatus::Registered,
            created_at: Timestamp::now(),
        }
    }

    /// Records attendance. Marking an attended registration again is a
    /// no-op.
    pub fn mark_attended(&mut self) -> Result<(), ValidationError> {
        if self.status == RegistrationStatus::Attended {
            return Ok(());
        }
        self.status = self.status.transition_to(RegistrationStatus::Attended)?;
        Ok(())
    }
}

impl OwnedByUser for Registration {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
