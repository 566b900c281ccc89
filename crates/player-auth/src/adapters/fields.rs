//! # Wire Field Adapter
//!
//! Maps the flat string map a client publishes alongside a signed message
//! onto a [`VerificationRequest`].
//!
//! | Field | Content |
//! |-------|---------|
//! | `auth-uuid` | owner identifier, `"<msb>/<lsb>"` |
//! | `auth-randomlong` | client random value, decimal i64 text |
//! | `elo-auth-publickey` | player key, base64 DER |
//! | `elo-auth-instant` | player key expiry, decimal millis |
//! | `elo-auth-signaturebytes` | root attestation signature, base64 |
//! | `elo-auth-data` | payload signature, base64 |
//!
//! Every name may carry a deployment-specific prefix. Payload chunks are not
//! part of the map; the caller supplies them.
//!
//! `auth-uuid` and `auth-randomlong` are signed as text, so both are carried
//! through unchanged rather than parsed and re-rendered.

use crate::domain::entities::VerificationRequest;
use crate::domain::errors::AuthError;
use std::collections::HashMap;
use std::hash::BuildHasher;

pub const FIELD_OWNER_ID: &str = "auth-uuid";
pub const FIELD_RANDOM_VALUE: &str = "auth-randomlong";
pub const FIELD_PUBLIC_KEY: &str = "elo-auth-publickey";
pub const FIELD_EXPIRES_AT: &str = "elo-auth-instant";
pub const FIELD_KEY_SIGNATURE: &str = "elo-auth-signaturebytes";
pub const FIELD_PAYLOAD_SIGNATURE: &str = "elo-auth-data";

/// The authentication fields of one signed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFields {
    pub owner_id: String,
    pub random_value: String,
    pub public_key: String,
    pub expires_at: i64,
    pub key_signature: String,
    pub payload_signature: String,
}

impl AuthFields {
    /// Read the fields from a string map.
    pub fn from_map<S: BuildHasher>(
        prefix: &str,
        map: &HashMap<String, String, S>,
    ) -> Result<Self, AuthError> {
        let get = |name: &str| -> Result<String, AuthError> {
            let key = format!("{prefix}{name}");
            map.get(&key)
                .cloned()
                .ok_or(AuthError::MissingField(key))
        };

        Ok(Self {
            owner_id: get(FIELD_OWNER_ID)?,
            random_value: get(FIELD_RANDOM_VALUE)?,
            public_key: get(FIELD_PUBLIC_KEY)?,
            expires_at: parse_i64(FIELD_EXPIRES_AT, &get(FIELD_EXPIRES_AT)?)?,
            key_signature: get(FIELD_KEY_SIGNATURE)?,
            payload_signature: get(FIELD_PAYLOAD_SIGNATURE)?,
        })
    }

    /// Read the fields from a JSON object of strings.
    pub fn from_json(prefix: &str, json: &str) -> Result<Self, AuthError> {
        let map: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| AuthError::InvalidMessage(e.to_string()))?;
        Self::from_map(prefix, &map)
    }

    /// Write the fields back out as name/value pairs, in the order clients
    /// emit them.
    pub fn to_map(&self, prefix: &str) -> Vec<(String, String)> {
        [
            (FIELD_OWNER_ID, self.owner_id.clone()),
            (FIELD_RANDOM_VALUE, self.random_value.clone()),
            (FIELD_PUBLIC_KEY, self.public_key.clone()),
            (FIELD_EXPIRES_AT, self.expires_at.to_string()),
            (FIELD_KEY_SIGNATURE, self.key_signature.clone()),
            (FIELD_PAYLOAD_SIGNATURE, self.payload_signature.clone()),
        ]
        .into_iter()
        .map(|(name, value)| (format!("{prefix}{name}"), value))
        .collect()
    }

    /// Combine with the payload chunks into a verification request.
    ///
    /// The random value enters the signed stream as the received text.
    pub fn into_request(self, payload: Vec<Vec<u8>>) -> VerificationRequest {
        VerificationRequest {
            owner_id: self.owner_id,
            random_value: self.random_value.into_bytes(),
            payload_signature: self.payload_signature,
            expires_at: self.expires_at,
            public_key: self.public_key,
            key_signature: self.key_signature,
            payload,
        }
    }
}

fn parse_i64(field: &str, value: &str) -> Result<i64, AuthError> {
    value.trim().parse().map_err(|_| AuthError::InvalidInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}
