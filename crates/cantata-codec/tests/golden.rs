//! Golden wire vectors for cross-implementation verification.
//!
//! The captured blob in `cantata_testkit::vectors` was produced by the
//! original browser stack; decoding it must recover the recorded field
//! values exactly, and re-encoding the decoded payload must reproduce
//! the blob byte for byte (the -38 text encoding is deterministic).

use cantata_codec::{encode_payload, parse_payload, DecodeError, EncodeError, SigningMode, Version};
use cantata_core::{AesAlgorithm, Encryption, Payload, PublicKeyAlgorithm};
use cantata_testkit::vectors::{
    golden_v38_payload, GOLDEN_V38_AUTHOR, GOLDEN_V38_AUTHOR_PUBLIC_KEY_HEX, GOLDEN_V38_BLOB,
    GOLDEN_V38_ENCRYPTED_HEX, GOLDEN_V38_IV_HEX,
};

#[test]
fn test_golden_v38_decodes_to_recorded_fields() {
    let payload = parse_payload(GOLDEN_V38_BLOB).expect("captured blob decodes");

    assert_eq!(payload.version, -38);
    assert_eq!(hex::encode(&payload.encrypted), GOLDEN_V38_ENCRYPTED_HEX);
    assert_eq!(hex::encode(payload.encryption.iv()), GOLDEN_V38_IV_HEX);
    assert!(payload.encryption.is_public());
    assert_eq!(payload.encryption.key_encrypted().len(), 138);

    let author = payload.author.as_ref().expect("author present");
    assert_eq!(author.to_text(), GOLDEN_V38_AUTHOR);

    let key = payload
        .author_public_key
        .as_ref()
        .expect("author key present");
    assert_eq!(key.algorithm(), PublicKeyAlgorithm::Secp256k1);
    assert_eq!(hex::encode(key.to_bytes()), GOLDEN_V38_AUTHOR_PUBLIC_KEY_HEX);

    assert_eq!(payload.signature, None, "`_` sentinel means unsigned");

    assert_eq!(payload, golden_v38_payload());
}

#[test]
fn test_golden_v38_reencodes_byte_identical() {
    let payload = parse_payload(GOLDEN_V38_BLOB).expect("captured blob decodes");
    let blob = encode_payload(&payload, SigningMode::NoSign, Version::V38)
        .expect("decoded payload re-encodes");
    assert_eq!(blob, GOLDEN_V38_BLOB);
}

#[test]
fn test_unregistered_marker_is_rejected_whole() {
    // A plausible-looking but unregistered generation must not yield a
    // partially parsed payload.
    let blob = GOLDEN_V38_BLOB.replacen("🎼4/4", "🎻1/4", 1);
    match parse_payload(&blob) {
        Err(DecodeError::UnsupportedVersion(marker)) => assert_eq!(marker, "🎻1/4"),
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[test]
fn test_public_payload_without_key_does_not_encode() {
    let payload = Payload {
        encryption: Encryption::Public {
            algorithm: AesAlgorithm::A256Gcm,
            key_encrypted: vec![],
            iv: vec![0x06; 16],
        },
        ..golden_v38_payload()
    };
    assert!(matches!(
        encode_payload(&payload, SigningMode::NoSign, Version::V38),
        Err(EncodeError::MissingField("keyEncrypted"))
    ));
}

#[test]
fn test_public_payload_unrepresentable_before_v38() {
    let payload = Payload {
        version: Version::V40.value(),
        ..golden_v38_payload()
    };
    assert!(matches!(
        encode_payload(&payload, SigningMode::NoSign, Version::V40),
        Err(EncodeError::Unrepresentable {
            field: "encryption",
            ..
        })
    ));
}
