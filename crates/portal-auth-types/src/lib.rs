//! Identity types shared across portal services.
//!
//! Provides the `IdentityHeaders` extractor for gateway-injected identity.

pub mod identity;
