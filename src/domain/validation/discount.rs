use serde::Deserialize;

use crate::domain::foundation::{Percentage, Timestamp};

use super::{parse_date, ValidationReport};

/// Discount terms as submitted by an admin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountInput {
    #[serde(default, alias = "discount_percentage")]
    pub percentage: i64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Well-formed discount terms. The window ordering is checked separately
/// because an inverted window is its own error, not a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTerms {
    pub percentage: Percentage,
    pub start: Timestamp,
    pub end: Timestamp,
}

pub fn validate_discount(input: &DiscountInput) -> Result<DiscountTerms, ValidationReport> {
    let mut report = ValidationReport::new();
    let percentage = Percentage::try_new(input.percentage)
        .map_err(|_| report.add("percentage", "Discount percentage must be between 1 and 100"))
        .ok();
    let start = report.check(parse_date("start_date", &input.start_date));
    let end = report.check(parse_date("end_date", &input.end_date));

    match (percentage, start, end) {
        (Some(percentage), Some(start), Some(end)) => Ok(DiscountTerms {
            percentage,
            start,
            end,
        }),
        _ => Err(report),
    }
}
