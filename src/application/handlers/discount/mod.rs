//! Discount handlers.
//!
//! Every command rewrites the owning event's discounted price in the same
//! repository transaction as the discount itself.

mod apply_discount;
mod delete_discount;
mod list_discounts;
mod update_discount;

pub use apply_discount::{ApplyDiscountCommand, ApplyDiscountHandler, ApplyDiscountResult};
pub use delete_discount::{DeleteDiscountCommand, DeleteDiscountHandler};
pub use list_discounts::ListDiscountsHandler;
pub use update_discount::{UpdateDiscountCommand, UpdateDiscountHandler, UpdateDiscountResult};
