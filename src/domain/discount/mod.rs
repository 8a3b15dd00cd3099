//! Discount domain module.
//!
//! A discount is a percentage off one event's price, valid inside an
//! inclusive date window. The event keeps a denormalised `discounted_price`
//! that is rewritten whenever a discount is applied, amended or removed.

mod aggregate;
mod errors;

pub use aggregate::{Discount, DiscountWindow};
pub use errors::DiscountError;
