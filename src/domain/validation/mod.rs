//! Validation layer.
//!
//! Each operation has a raw input type (what arrives over the wire) and a
//! validator that either produces the typed value the workflow needs or a
//! [`ValidationReport`] listing every failing field. Validators are pure
//! and run before any repository access.

mod account;
mod dates;
mod discount;
mod event;
mod registration;
mod report;
mod review;

pub use account::{validate_login, validate_sign_up, Credentials, LoginInput, SignUp, SignUpInput};
pub use dates::parse_date;
pub use discount::{validate_discount, DiscountInput, DiscountTerms};
pub use event::{validate_event, EventInput};
pub use registration::{validate_payment, validate_registration, PaymentInput, RegistrationInput};
pub use report::{FieldError, ValidationReport};
pub use review::{validate_review, ReviewInput, ValidReview};
