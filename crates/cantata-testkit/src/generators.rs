//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cantata_core::{
    AesAlgorithm, Encryption, Payload, ProfileIdentifier, PublicKey, PublicKeyAlgorithm, SecretKey,
};

/// Generate a random secp256k1 signing key.
pub fn secret_key() -> impl Strategy<Value = SecretKey> {
    any::<[u8; 32]>().prop_filter_map("seed must be a nonzero scalar", |seed| {
        SecretKey::from_bytes(PublicKeyAlgorithm::Secp256k1, &seed).ok()
    })
}

/// Generate a random secp256k1 public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    secret_key().prop_map(|key| key.public_key())
}

/// Generate a profile identifier.
///
/// User ids may contain `/`; only the first separator splits network
/// from user.
pub fn profile_identifier() -> impl Strategy<Value = ProfileIdentifier> {
    ("[a-z][a-z0-9.-]{0,15}", "[A-Za-z0-9_/]{1,24}").prop_map(|(network, user)| {
        ProfileIdentifier::new(&network, &user).expect("generated identifier is well formed")
    })
}

/// Generate byte strings in the given length range.
pub fn bytes(min: usize, max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), min..=max)
}

/// Generate a 16-byte AES-GCM initialization vector.
pub fn iv() -> impl Strategy<Value = Vec<u8>> {
    bytes(16, 16)
}

/// Generate an anonymous end-to-end payload for a legacy generation
/// (-40 or -39): no author, no signature.
pub fn legacy_payload(version: i32) -> impl Strategy<Value = Payload> {
    (bytes(16, 200), iv(), bytes(1, 200)).prop_map(move |(key, iv, encrypted)| Payload {
        version,
        author: None,
        author_public_key: None,
        encryption: Encryption::EndToEnd {
            owners_key_encrypted: key,
            iv,
        },
        encrypted,
        signature: None,
    })
}

/// Generate an unsigned -38 payload: shared or end-to-end, with
/// optional authorship metadata.
pub fn v38_payload() -> impl Strategy<Value = Payload> {
    (
        prop::option::of(profile_identifier()),
        prop::option::of(public_key()),
        any::<bool>(),
        bytes(16, 200),
        iv(),
        bytes(1, 200),
    )
        .prop_map(|(author, author_public_key, shared, key, iv, encrypted)| {
            let encryption = if shared {
                Encryption::Public {
                    algorithm: AesAlgorithm::A256Gcm,
                    key_encrypted: key,
                    iv,
                }
            } else {
                Encryption::EndToEnd {
                    owners_key_encrypted: key,
                    iv,
                }
            };
            Payload {
                version: -38,
                author,
                author_public_key,
                encryption,
                encrypted,
                signature: None,
            }
        })
}
