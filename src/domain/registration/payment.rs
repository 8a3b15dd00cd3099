//! Payment attached one-to-one to a registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    Money, PaymentId, RegistrationId, StateMachine, Timestamp, ValidationError,
};

use super::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    Qris,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT_CARD" => Ok(PaymentMethod::CreditCard),
            "QRIS" => Ok(PaymentMethod::Qris),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            _ => Err(ValidationError::invalid_format(
                "payment_method",
                "expected one of CREDIT_CARD, QRIS, BANK_TRANSFER",
            )),
        }
    }
}

/// # Invariants
///
/// - `amount` is fixed when the payment is created
/// - `payment_date` is set iff `status` is COMPLETED
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub registration_id: RegistrationId,
    pub amount: Money,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub payment_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Payment {
    /// New payment awaiting settlement. The method defaults to QRIS until
    /// the user picks one at settlement.
    pub fn pending(id: PaymentId, registration_id: RegistrationId, amount: Money) -> Self {
        Self {
            id,
            registration_id,
            amount,
            status: PaymentStatus::Pending,
            method: PaymentMethod::Qris,
            payment_date: None,
            created_at: Timestamp::now(),
        }
    }

    /// Marks the payment completed with the chosen method.
    ///
    /// Settling an already completed payment is accepted and overwrites the
    /// method and payment date; the status stays COMPLETED.
    pub fn settle(&mut self, method: PaymentMethod, at: Timestamp) {
        if self.status.can_transition_to(&PaymentStatus::Completed) {
            self.status = PaymentStatus::Completed;
        }
        self.method = method;
        self.payment_date = Some(at);
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        Payment::pending(PaymentId::new(), RegistrationId::new(), Money::from_minor(16_000))
    }

    #[test]
    fn pending_payment_defaults_to_qris() {
        let p = payment();
        assert_eq!(p.status, PaymentStatus::Pending);
        assert_eq!(p.method, PaymentMethod::Qris);
        assert!(p.payment_date.is_none());
    }

    #[test]
    fn settle_completes_and_records_method() {
        let mut p = payment();
        let at = Timestamp::now();
        p.settle(PaymentMethod::CreditCard, at);
        assert!(p.is_completed());
        assert_eq!(p.method, PaymentMethod::CreditCard);
        assert_eq!(p.payment_date, Some(at));
    }

    #[test]
    fn settling_twice_overwrites_method_and_date() {
        let mut p = payment();
        p.settle(PaymentMethod::CreditCard, Timestamp::now());
        let later = Timestamp::now().plus_seconds(60);
        p.settle(PaymentMethod::BankTransfer, later);
        assert!(p.is_completed());
        assert_eq!(p.method, PaymentMethod::BankTransfer);
        assert_eq!(p.payment_date, Some(later));
        assert_eq!(p.amount, Money::from_minor(16_000));
    }

    #[test]
    fn method_parses_wire_names() {
        assert_eq!("QRIS".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qris);
        assert!("PAYPAL".parse::<PaymentMethod>().is_err());
    }
}
