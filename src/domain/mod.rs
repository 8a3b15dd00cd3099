//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, money, errors, auth vocabulary)
//! - `event` - Event catalogue aggregate
//! - `discount` - Time-bounded discounts
//! - `pricing` - Charge computation for a registration
//! - `registration` - Registration and payment lifecycle
//! - `review` - One review per registration and user
//! - `account` - Users, credentials and roles
//! - `validation` - Request validators producing structured reports

pub mod account;
pub mod discount;
pub mod event;
pub mod foundation;
pub mod pricing;
pub mod registration;
pub mod review;
pub mod validation;
