//! Wire format for generation -40, the oldest supported layout.
//!
//! ```text
//! 🎩3/4|ownersKeyEncrypted|iv|encrypted|signature:||
//! ```
//!
//! This generation predates public sharing and authorship metadata:
//! every payload is end-to-end, anonymous, and carries at most a
//! signature next to the ciphertext.

use cantata_core::{Encryption, Payload, Signature};

use crate::error::{DecodeError, EncodeError};
use crate::registry::Version;
use crate::sign::{self, SigningMode};
use crate::wire::{self, ABSENT_SENTINEL, FIELD_SEPARATOR};

pub(crate) const MARKER: &str = "🎩3/4";

const FIELD_COUNT: usize = 4;

pub(crate) fn decode(blob: &str) -> Result<Payload, DecodeError> {
    let body = wire::strip_frame(blob, MARKER)?;
    decode_body(body, Version::V40)
}

pub(crate) fn encode(payload: &Payload, mode: SigningMode<'_>) -> Result<String, EncodeError> {
    encode_body(payload, mode, MARKER, Version::V40)
}

/// Parse the four-field legacy body shared by generations -40 and -39.
pub(crate) fn decode_body(body: &str, version: Version) -> Result<Payload, DecodeError> {
    let fields: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DecodeError::MalformedField {
            field: "body",
            reason: format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
        });
    }

    let owners_key_encrypted = wire::decode_field(fields[0], "ownersKeyEncrypted")?;
    let iv = wire::decode_field(fields[1], "iv")?;
    let encrypted = wire::decode_field(fields[2], "encrypted")?;
    if encrypted.is_empty() {
        return Err(DecodeError::MalformedField {
            field: "encrypted",
            reason: "empty ciphertext".to_string(),
        });
    }

    let signature = match fields[3] {
        ABSENT_SENTINEL => None,
        "" => {
            return Err(DecodeError::MalformedField {
                field: "signature",
                reason: "empty field (absent is spelled `_` in this generation)".to_string(),
            })
        }
        field => Some(Signature::from_bytes(wire::decode_field(
            field,
            "signature",
        )?)),
    };

    Ok(Payload {
        version: version.value(),
        author: None,
        author_public_key: None,
        encryption: Encryption::EndToEnd {
            owners_key_encrypted,
            iv,
        },
        encrypted,
        signature,
    })
}

/// Encode the four-field legacy body shared by generations -40 and -39.
pub(crate) fn encode_body(
    payload: &Payload,
    mode: SigningMode<'_>,
    marker: &str,
    version: Version,
) -> Result<String, EncodeError> {
    if payload.encrypted.is_empty() {
        return Err(EncodeError::EmptyCiphertext);
    }

    let (owners_key_encrypted, iv) = match &payload.encryption {
        Encryption::EndToEnd {
            owners_key_encrypted,
            iv,
        } => (owners_key_encrypted, iv),
        Encryption::Public { .. } => {
            return Err(EncodeError::Unrepresentable {
                field: "encryption",
                version: version.value(),
                reason: "the public sharing flag exists only from generation -38",
            })
        }
    };
    if owners_key_encrypted.is_empty() {
        return Err(EncodeError::MissingField("ownersKeyEncrypted"));
    }
    if iv.is_empty() {
        return Err(EncodeError::MissingField("iv"));
    }

    let key_b64 = wire::encode_field(owners_key_encrypted);
    let iv_b64 = wire::encode_field(iv);
    let encrypted_b64 = wire::encode_field(&payload.encrypted);

    let preimage = format!("{key_b64}|{iv_b64}|{encrypted_b64}");
    let signature = sign::signature_field(&preimage, payload, mode)?;

    Ok(format!(
        "{marker}|{key_b64}|{iv_b64}|{encrypted_b64}|{signature}:||"
    ))
}
