//! Registration and payment status state machines.
//!
//! Both only move forward: REGISTERED → ATTENDED and PENDING → COMPLETED.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Registered,
    Attended,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "REGISTERED",
            RegistrationStatus::Attended => "ATTENDED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "REGISTERED" => Ok(RegistrationStatus::Registered),
            "ATTENDED" => Ok(RegistrationStatus::Attended),
            other => Err(ValidationError::invalid_format(
                "registration_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl StateMachine for RegistrationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (RegistrationStatus::Registered, RegistrationStatus::Attended)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RegistrationStatus::Registered => vec![RegistrationStatus::Attended],
            RegistrationStatus::Attended => vec![],
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "COMPLETED" => Ok(PaymentStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "payment_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (PaymentStatus::Pending, PaymentStatus::Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            PaymentStatus::Pending => vec![PaymentStatus::Completed],
            PaymentStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
