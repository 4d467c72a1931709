//! Service plumbing shared by portal services: configuration, health probes,
//! request ids, tracing setup and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
