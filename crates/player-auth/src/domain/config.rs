//! Verifier configuration and validation
//!
//! # Example
//!
//! ```
//! use player_auth::domain::config::{ExpiryPolicy, VerifierConfig};
//!
//! let config = VerifierConfig::default()
//!     .with_expiry_policy(ExpiryPolicy::Enforce)
//!     .with_clock_skew_ms(5_000);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on tolerated clock skew (one day).
pub const MAX_CLOCK_SKEW_MS: u64 = 86_400_000;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Clock skew {skew_ms}ms exceeds maximum {max_ms}ms")]
    ClockSkewTooLarge { skew_ms: u64, max_ms: u64 },

    #[error("Unknown expiry policy: {0}")]
    UnknownExpiryPolicy(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// How the attested expiry timestamp is enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryPolicy {
    /// Reject keys whose expiry is not in the future.
    #[default]
    Enforce,
    /// Accept expired keys, matching the deployed counterpart whose expiry
    /// check always passes. Only for byte-for-byte parity with that service.
    Legacy,
}

impl FromStr for ExpiryPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(Self::Enforce),
            "legacy" => Ok(Self::Legacy),
            other => Err(ConfigError::UnknownExpiryPolicy(other.to_string())),
        }
    }
}

/// Verifier configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Expiry enforcement
    pub expiry_policy: ExpiryPolicy,
    /// Grace period added to the key expiry under `Enforce`
    pub clock_skew_ms: u64,
    /// Prefix of every wire field name
    pub message_prefix: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            expiry_policy: ExpiryPolicy::Enforce,
            clock_skew_ms: 0,
            message_prefix: String::new(),
        }
    }
}

impl VerifierConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PLAYER_AUTH_EXPIRY_POLICY`: `enforce` or `legacy` (default: enforce)
    /// - `PLAYER_AUTH_CLOCK_SKEW_MS`: grace period in millis (default: 0)
    /// - `PLAYER_AUTH_MESSAGE_PREFIX`: wire field prefix (default: empty)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Create configuration from any variable source, using the same names
    /// and rules as [`from_env`](Self::from_env).
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(policy) = lookup("PLAYER_AUTH_EXPIRY_POLICY") {
            config.expiry_policy = policy.parse()?;
        }

        if let Some(skew) = lookup("PLAYER_AUTH_CLOCK_SKEW_MS") {
            config.clock_skew_ms = skew.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PLAYER_AUTH_CLOCK_SKEW_MS",
                value: skew.clone(),
            })?;
        }

        if let Some(prefix) = lookup("PLAYER_AUTH_MESSAGE_PREFIX") {
            config.message_prefix = prefix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_skew_ms > MAX_CLOCK_SKEW_MS {
            return Err(ConfigError::ClockSkewTooLarge {
                skew_ms: self.clock_skew_ms,
                max_ms: MAX_CLOCK_SKEW_MS,
            });
        }
        Ok(())
    }

    /// Builder-style method to set the expiry policy
    pub fn with_expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry_policy = policy;
        self
    }

    /// Builder-style method to set the clock skew
    pub fn with_clock_skew_ms(mut self, skew_ms: u64) -> Self {
        self.clock_skew_ms = skew_ms;
        self
    }

    /// Builder-style method to set the wire field prefix
    pub fn with_message_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.message_prefix = prefix.into();
        self
    }
}
