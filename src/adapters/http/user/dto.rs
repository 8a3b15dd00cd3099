//! Request and response bodies for attendee endpoints.
//!
//! A `user_id` in a body is optional. When present it must name the caller.

use serde::{Deserialize, Serialize};

use crate::application::handlers::RegisterForEventResult;
use crate::domain::foundation::{EventId, RegistrationId, UserId};
use crate::domain::pricing::Charge;
use crate::domain::registration::{Payment, Registration};
use crate::domain::validation::{PaymentInput, RegistrationInput, ReviewInput};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub event_id: EventId,
    #[serde(flatten)]
    pub input: RegistrationInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub registration_id: RegistrationId,
    #[serde(flatten)]
    pub input: PaymentInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub registration_id: RegistrationId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(flatten)]
    pub input: ReviewInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub registration: Registration,
    pub payment: Payment,
    pub charge: Charge,
    pub seats_left: u32,
}

impl From<RegisterForEventResult> for RegistrationResponse {
    fn from(result: RegisterForEventResult) -> Self {
        Self {
            registration: result.registration,
            payment: result.payment,
            charge: result.charge,
            seats_left: result.seats_left,
        }
    }
}
