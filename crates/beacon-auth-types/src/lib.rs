//! Access-gate types for the Beacon backend.
//!
//! Provides JWT claims, access-token validation, and (feature-gated)
//! token issuing. Every admission decision in the server goes through
//! [`token::validate_access_token`].

pub mod token;
