use serde::Deserialize;

use crate::domain::registration::{PaymentMethod, Quantity};

use super::ValidationReport;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub quantity: i64,
}

pub fn validate_registration(input: &RegistrationInput) -> Result<Quantity, ValidationReport> {
    Quantity::try_new(input.quantity)
        .map_err(|_| ValidationReport::single("quantity", "Quantity must be between 1 and 5"))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentInput {
    #[serde(default, alias = "payment_method")]
    pub method: String,
}

pub fn validate_payment(input: &PaymentInput) -> Result<PaymentMethod, ValidationReport> {
    input.method.trim().parse::<PaymentMethod>().map_err(ValidationReport::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_outside_one_to_five_rejected() {
        for q in [0, 6, -3] {
            let report = validate_registration(&RegistrationInput { quantity: q }).unwrap_err();
            assert!(report.has_error_for("quantity"));
        }
    }

    #[test]
    fn quantity_inside_range_accepted() {
        assert_eq!(
            validate_registration(&RegistrationInput { quantity: 3 }).unwrap().value(),
            3
        );
    }

    #[test]
    fn payment_method_must_be_known() {
        assert_eq!(
            validate_payment(&PaymentInput {
                method: "BANK_TRANSFER".to_string()
            })
            .unwrap(),
            PaymentMethod::BankTransfer
        );
        let report = validate_payment(&PaymentInput {
            method: "CASH".to_string(),
        })
        .unwrap_err();
        assert!(report.has_error_for("payment_method"));
    }
}
