//! # Domain Layer
//!
//! Pure cryptographic logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod attestation;
pub mod config;
pub mod encoding;
pub mod entities;
pub mod errors;
pub mod owner_id;
pub mod payload;
pub mod trust_anchor;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;
