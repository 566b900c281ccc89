//! # Adapters Module
//!
//! Infrastructure adapters implementing the ports.

pub mod clock;
pub mod fields;
pub mod signer;
