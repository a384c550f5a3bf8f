//! Wire format for generation -38.
//!
//! Layout (seven fields between marker and trailer):
//!
//! ```text
//! 🎼4/4|keyEncrypted|iv|encrypted|signature|authorPublicKey|sharedFlag|author:||
//! ```
//!
//! `signature` uses the `_` sentinel when absent; `authorPublicKey`
//! (SEC1 compressed secp256k1) and `author` (base64 of
//! `network/user_id`) are empty fields when absent. `sharedFlag` is
//! `1` for publicly shared posts and `0` for end-to-end posts. This
//! parser reproduces the historical field handling exactly; it does
//! not normalize.

use cantata_core::{
    AesAlgorithm, Encryption, Payload, ProfileIdentifier, PublicKey, PublicKeyAlgorithm, Signature,
};

use crate::error::{DecodeError, EncodeError};
use crate::registry::Version;
use crate::sign::{self, SigningMode};
use crate::wire::{self, ABSENT_SENTINEL, FIELD_SEPARATOR};

pub(crate) const MARKER: &str = "🎼4/4";

const FIELD_COUNT: usize = 7;

pub(crate) fn decode(blob: &str) -> Result<Payload, DecodeError> {
    let body = wire::strip_frame(blob, MARKER)?;
    let fields: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DecodeError::MalformedField {
            field: "body",
            reason: format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
        });
    }

    let key_encrypted = wire::decode_field(fields[0], "keyEncrypted")?;
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

    let author_public_key = match fields[4] {
        "" => None,
        field => {
            let bytes = wire::decode_field(field, "authorPublicKey")?;
            // This generation predates the algorithm field: author keys
            // are always secp256k1 compressed points.
            Some(PublicKey::from_bytes(PublicKeyAlgorithm::Secp256k1, &bytes)?)
        }
    };

    let shared = match fields[5] {
        "1" => true,
        "0" => false,
        other => {
            return Err(DecodeError::MalformedField {
                field: "sharedFlag",
                reason: format!("expected `0` or `1`, got `{other}`"),
            })
        }
    };

    let author = match fields[6] {
        "" => None,
        field => {
            let raw = wire::decode_field(field, "author")?;
            let text = String::from_utf8(raw).map_err(|_| DecodeError::MalformedField {
                field: "author",
                reason: "identifier is not valid UTF-8".to_string(),
            })?;
            Some(
                ProfileIdentifier::from_text(&text).map_err(|e| DecodeError::MalformedField {
                    field: "author",
                    reason: e.to_string(),
                })?,
            )
        }
    };

    let encryption = if shared {
        Encryption::Public {
            algorithm: AesAlgorithm::A256Gcm,
            key_encrypted,
            iv,
        }
    } else {
        Encryption::EndToEnd {
            owners_key_encrypted: key_encrypted,
            iv,
        }
    };

    Ok(Payload {
        version: Version::V38.value(),
        author,
        author_public_key,
        encryption,
        encrypted,
        signature,
    })
}

pub(crate) fn encode(payload: &Payload, mode: SigningMode<'_>) -> Result<String, EncodeError> {
    if payload.encrypted.is_empty() {
        return Err(EncodeError::EmptyCiphertext);
    }

    let (key_encrypted, iv, shared_flag) = match &payload.encryption {
        Encryption::Public {
            algorithm: AesAlgorithm::A256Gcm,
            key_encrypted,
            iv,
        } => (key_encrypted, iv, "1"),
        Encryption::EndToEnd {
            owners_key_encrypted,
            iv,
        } => (owners_key_encrypted, iv, "0"),
    };
    if key_encrypted.is_empty() {
        return Err(EncodeError::MissingField("keyEncrypted"));
    }
    if iv.is_empty() {
        return Err(EncodeError::MissingField("iv"));
    }

    let author_public_key = match &payload.author_public_key {
        None => String::new(),
        Some(key) => {
            if key.algorithm() != PublicKeyAlgorithm::Secp256k1 {
                return Err(EncodeError::Unrepresentable {
                    field: "authorPublicKey",
                    version: Version::V38.value(),
                    reason: "this generation carries secp256k1 keys only",
                });
            }
            wire::encode_field(&key.to_bytes())
        }
    };

    let author = payload
        .author
        .as_ref()
        .map(|id| wire::encode_field(id.to_text().as_bytes()))
        .unwrap_or_default();

    let key_b64 = wire::encode_field(key_encrypted);
    let iv_b64 = wire::encode_field(iv);
    let encrypted_b64 = wire::encode_field(&payload.encrypted);

    let preimage = format!("{key_b64}|{iv_b64}|{encrypted_b64}");
    let signature = sign::signature_field(&preimage, payload, mode)?;

    Ok(format!(
        "{MARKER}|{key_b64}|{iv_b64}|{encrypted_b64}|{signature}|{author_public_key}|{shared_flag}|{author}:||"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public_payload() -> Payload {
        Payload {
            version: Version::V38.value(),
            author: Some(ProfileIdentifier::new("facebook.com", "test").unwrap()),
            author_public_key: None,
            encryption: Encryption::Public {
                algorithm: AesAlgorithm::A256Gcm,
                key_encrypted: vec![0x6a; 138],
                iv: vec![0x06; 16],
            },
            encrypted: vec![0x3a; 20],
            signature: None,
        }
    }

    #[test]
    fn test_roundtrip_public() {
        let payload = public_payload();
        let blob = encode(&payload, SigningMode::NoSign).unwrap();
        assert!(blob.starts_with("🎼4/4|"));
        assert!(blob.ends_with(":||"));
        let decoded = decode(&blob).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_roundtrip_end_to_end_anonymous() {
        let payload = Payload {
            author: None,
            encryption: Encryption::EndToEnd {
                owners_key_encrypted: vec![0xaa; 48],
                iv: vec![0xbb; 16],
            },
            ..public_payload()
        };
        let blob = encode(&payload, SigningMode::NoSign).unwrap();
        let decoded = decode(&blob).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_sentinel_signature_maps_to_none() {
        let blob = encode(&public_payload(), SigningMode::NoSign).unwrap();
        assert!(blob.contains("|_|"), "unsigned blob carries the sentinel");
        let decoded = decode(&blob).unwrap();
        assert_eq!(decoded.signature, None, "sentinel is absent, not empty");
    }

    #[test]
    fn test_missing_aes_key_rejected() {
        let payload = Payload {
            encryption: Encryption::Public {
                algorithm: AesAlgorithm::A256Gcm,
                key_encrypted: vec![],
                iv: vec![0x06; 16],
            },
            ..public_payload()
        };
        assert!(matches!(
            encode(&payload, SigningMode::NoSign),
            Err(EncodeError::MissingField("keyEncrypted"))
        ));
    }

    #[test]
    fn test_empty_ciphertext_rejected() {
        let payload = Payload {
            encrypted: vec![],
            ..public_payload()
        };
        assert!(matches!(
            encode(&payload, SigningMode::NoSign),
            Err(EncodeError::EmptyCiphertext)
        ));
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        assert!(matches!(
            decode("🎼4/4|AA==|AA==|AA==:||"),
            Err(DecodeError::MalformedField { field: "body", .. })
        ));
    }

    #[test]
    fn test_bad_shared_flag_rejected() {
        assert!(matches!(
            decode("🎼4/4|AA==|AA==|AA==|_||2|:||"),
            Err(DecodeError::MalformedField {
                field: "sharedFlag",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_author_key_rejected() {
        // 33 bytes of 0xff is not a curve point.
        let bad_key = wire::encode_field(&[0xff; 33]);
        let blob = format!("🎼4/4|AA==|AA==|AA==|_|{bad_key}|0|:||");
        assert!(matches!(decode(&blob), Err(DecodeError::KeyImport(_))));
    }

    #[test]
    fn test_foreign_marker_rejected() {
        assert!(matches!(
            decode("🎶2/4|AA==|AA==|AA==|_:||"),
            Err(DecodeError::UnsupportedVersion(_))
        ));
    }
}
