//! Signing modes for payload encoding.

use cantata_core::{Payload, SecretKey};

use crate::error::{EncodeError, SignatureError};
use crate::wire;

/// Whether and how to sign a payload while encoding it.
///
/// The signature covers the canonical pre-image: the already-encoded
/// wire fields that precede the signature field, joined with `|`, as
/// UTF-8 bytes. Re-signing therefore commits to the exact bytes a peer
/// will see, not to an in-memory representation.
#[derive(Debug, Clone, Copy)]
pub enum SigningMode<'a> {
    /// Emit the payload unsigned: the signature slot carries the
    /// absent marker of the target version. Any signature already on
    /// the payload is dropped from the wire.
    NoSign,

    /// Compute a fresh signature over the canonical pre-image with the
    /// given key and embed it.
    Sign(&'a SecretKey),
}

/// Produce the signature wire field for the given mode.
pub(crate) fn signature_field(
    preimage: &str,
    payload: &Payload,
    mode: SigningMode<'_>,
) -> Result<String, EncodeError> {
    match mode {
        SigningMode::NoSign => Ok(wire::ABSENT_SENTINEL.to_string()),
        SigningMode::Sign(key) => {
            if let Some(author_key) = &payload.author_public_key {
                if *author_key != key.public_key() {
                    return Err(SignatureError::KeyMismatch.into());
                }
            }
            let signature = key.sign(preimage.as_bytes());
            Ok(wire::encode_field(signature.as_bytes()))
        }
    }
}
