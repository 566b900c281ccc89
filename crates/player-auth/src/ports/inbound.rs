//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the verifier.

use crate::domain::entities::{BatchVerificationResult, VerificationRequest, VerifiedPlayer};
use crate::domain::errors::AuthError;

/// Player identity verification API.
///
/// Implementations must be thread-safe (`Send + Sync`); every call is
/// independent and may run on any thread.
pub trait PlayerAuthApi: Send + Sync {
    /// Verify both stages of the trust chain.
    ///
    /// Returns the canonical hyphenated owner identifier on success and `None`
    /// on any failure. The failure cause is deliberately not exposed.
    fn verify(&self, request: &VerificationRequest) -> Option<String>;

    /// Verify and report why a request was rejected.
    ///
    /// For server-side diagnostics only; never forward the error to the
    /// client that sent the request.
    fn verify_detailed(&self, request: &VerificationRequest) -> Result<VerifiedPlayer, AuthError>;

    /// Verify many independent requests in parallel.
    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult;
}
