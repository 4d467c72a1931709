//! Domain types shared across the student portal crates.
//!
//! This crate contains only pure types with no framework dependencies, so any
//! layer of a service may use them.

pub mod pagination;
pub mod user;
pub mod weekday;
