//! Wire format for generation -39.
//!
//! ```text
//! 🎶2/4|keyEncrypted|iv|encrypted|signature:||
//! ```
//!
//! Identical field layout to generation -40 (the two differ only in the
//! key-derivation scheme of the surrounding cryptography, which is not
//! the codec's concern), but the generation is dispatched and tagged
//! independently so that a -39 blob never reports itself as -40.

use cantata_core::Payload;

use crate::error::{DecodeError, EncodeError};
use crate::registry::Version;
use crate::sign::SigningMode;
use crate::{version_40, wire};

pub(crate) const MARKER: &str = "🎶2/4";

pub(crate) fn decode(blob: &str) -> Result<Payload, DecodeError> {
    let body = wire::strip_frame(blob, MARKER)?;
    version_40::decode_body(body, Version::V39)
}

pub(crate) fn encode(payload: &Payload, mode: SigningMode<'_>) -> Result<String, EncodeError> {
    version_40::encode_body(payload, mode, MARKER, Version::V39)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantata_core::Encryption;

    #[test]
    fn test_roundtrip_keeps_version() {
        let payload = Payload {
            version: Version::V39.value(),
            author: None,
            author_public_key: None,
            encryption: Encryption::EndToEnd {
                owners_key_encrypted: vec![0x44; 48],
                iv: vec![0x55; 16],
            },
            encrypted: vec![0x66; 24],
            signature: None,
        };
        let blob = encode(&payload, SigningMode::NoSign).unwrap();
        assert!(blob.starts_with("🎶2/4|"));
        let decoded = decode(&blob).unwrap();
        assert_eq!(decoded.version, -39);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_rejects_minus_40_marker() {
        assert!(matches!(
            decode("🎩3/4|AA==|AA==|AA==|_:||"),
            Err(DecodeError::UnsupportedVersion(_))
        ));
    }
}
