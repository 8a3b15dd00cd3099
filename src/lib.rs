//! Event Ticketing - Catalogue, registration and pricing backend
//!
//! Admins publish events and time-boxed discounts; attendees browse, claim
//! seats, settle payments, mark attendance and review what they attended.
//! Seat claims are atomic, prices are computed from the discounts active at
//! the moment of registration, and every workflow reports failures through
//! its own error enum.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
