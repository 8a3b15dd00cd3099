//! Review handlers.

mod list_reviews;
mod submit_review;

pub use list_reviews::ListReviewsHandler;
pub use submit_review::{SubmitReviewCommand, SubmitReviewHandler};
