//! Structured outcome of validating one request.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::{DomainError, ValidationError};

/// One failed check, addressed to a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field error found in a request, in the order they were checked.
///
/// Validators collect all failures rather than stopping at the first so a
/// client can fix its input in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report with a single error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.add(field, message);
        report
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Records the error, if any, and hands back the success value.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    pub fn push(&mut self, err: ValidationError) {
        let field = err.field().to_string();
        self.add(field, err.to_string());
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

impl From<ValidationError> for ValidationReport {
    fn from(err: ValidationError) -> Self {
        let mut report = Self::new();
        report.push(err);
        report
    }
}

impl From<ValidationReport> for DomainError {
    fn from(report: ValidationReport) -> Self {
        let mut err = DomainError::new(
            crate::domain::foundation::ErrorCode::ValidationFailed,
            "Validation failed",
        );
        for e in report.errors {
            err = err.with_detail(e.field, e.message);
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_ok() {
        assert!(ValidationReport::new().into_result().is_ok());
    }

    #[test]
    fn check_records_failures_and_passes_values() {
        let mut report = ValidationReport::new();
        assert_eq!(report.check(Ok::<_, ValidationError>(3)), Some(3));
        assert_eq!(
            report.check::<u8>(Err(ValidationError::empty_field("title"))),
            None
        );
        assert!(!report.is_ok());
        assert!(report.has_error_for("title"));
    }

    #[test]
    fn display_joins_all_errors() {
        let mut report = ValidationReport::single("a", "bad");
        report.add("b", "worse");
        assert_eq!(report.to_string(), "a: bad; b: worse");
    }

    #[test]
    fn serializes_as_list_of_field_errors() {
        let json = serde_json::to_value(ValidationReport::single("quantity", "too many")).unwrap();
        assert_eq!(json[0]["field"], "quantity");
        assert_eq!(json[0]["message"], "too many");
    }
}
