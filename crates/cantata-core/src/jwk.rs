//! JSON Web Key interchange format.
//!
//! Keys cross the boundary to the rest of the system (key storage,
//! backup import) as JWK objects. Only the subset of RFC 7517 the
//! historical payloads used is modeled: EC (`K-256`), OKP (`Ed25519`)
//! and symmetric `oct` keys.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// A JSON Web Key, as produced and consumed by the key codec.
///
/// Optional members are omitted from the serialized object entirely
/// when absent (never emitted as `null`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key type: `EC`, `OKP`, or `oct`.
    pub kty: String,

    /// Curve name for asymmetric keys (`K-256`, `Ed25519`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,

    /// X coordinate (EC) or public key bytes (OKP), base64url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Y coordinate (EC), base64url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    /// Private scalar or seed, base64url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    /// Symmetric key bytes (`oct`), base64url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,

    /// Algorithm hint, e.g. `A256GCM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    /// Whether the key is extractable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,

    /// Permitted operations. Required on import.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_ops: Vec<String>,
}

impl JsonWebKey {
    /// Check that `key_ops` is present and contains every required op.
    pub(crate) fn require_ops(&self, required: &'static [&'static str]) -> Result<(), KeyError> {
        if self.key_ops.is_empty() {
            return Err(KeyError::MissingUsage("key_ops"));
        }
        for op in required {
            if !self.key_ops.iter().any(|have| have == op) {
                return Err(KeyError::MissingUsage(op));
            }
        }
        Ok(())
    }

    /// Fetch a base64url member, failing with the member name if absent.
    pub(crate) fn require_bytes(
        member: &Option<String>,
        name: &'static str,
    ) -> Result<Vec<u8>, KeyError> {
        let value = member.as_deref().ok_or(KeyError::MissingParameter(name))?;
        decode_base64url(value)
    }
}

/// Base64url (no padding) encode, the JWK member encoding.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Base64url (no padding) decode.
pub fn decode_base64url(text: &str) -> Result<Vec<u8>, KeyError> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|e| KeyError::InvalidEncoding(e.to_string()))
}
