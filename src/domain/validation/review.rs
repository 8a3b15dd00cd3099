use serde::Deserialize;

use crate::domain::foundation::Rating;
use crate::domain::review::ReviewComment;

use super::ValidationReport;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub rating: Rating,
    pub comment: ReviewComment,
}

pub fn validate_review(input: &ReviewInput) -> Result<ValidReview, ValidationReport> {
    let mut report = ValidationReport::new();
    let rating = Rating::try_new(input.rating)
        .map_err(|_| report.add("rating", "Rating must be between 1 and 5"))
        .ok();
    let comment = report.check(ReviewComment::try_new(input.comment.clone()));
    match (rating, comment) {
        (Some(rating), Some(comment)) => Ok(ValidReview { rating, comment }),
        _ => Err(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_review_passes() {
        let review = validate_review(&ReviewInput {
            rating: 5,
            comment: "Great show".to_string(),
        })
        .unwrap();
        assert_eq!(review.rating.value(), 5);
    }

    #[test]
    fn bad_rating_and_comment_both_reported() {
        let report = validate_review(&ReviewInput {
            rating: 9,
            comment: String::new(),
        })
        .unwrap_err();
        assert!(report.has_error_for("rating"));
        assert!(report.has_error_for("comment"));
    }

    #[test]
    fn overlong_comment_rejected() {
        let report = validate_review(&ReviewInput {
            rating: 3,
            comment: "x".repeat(257),
        })
        .unwrap_err();
        assert!(report.has_error_for("comment"));
    }
}
