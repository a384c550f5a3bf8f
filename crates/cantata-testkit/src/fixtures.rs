//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use cantata_core::{
    AesAlgorithm, Encryption, Payload, ProfileIdentifier, PublicKey, PublicKeyAlgorithm, SecretKey,
};

/// A test fixture with an author identity: a signing key and a profile.
pub struct TestFixture {
    pub secret: SecretKey,
    pub author: ProfileIdentifier,
}

impl TestFixture {
    /// Create a fixture with a random secp256k1 key.
    pub fn new() -> Self {
        Self {
            secret: SecretKey::generate(PublicKeyAlgorithm::Secp256k1)
                .expect("secp256k1 generation is supported"),
            author: ProfileIdentifier::new("example.com", "alice").expect("valid identifier"),
        }
    }

    /// Create with a deterministic key from a seed scalar.
    ///
    /// The seed must be a valid secp256k1 scalar; low constant bytes
    /// (e.g. `[0x42; 32]`) always are.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            secret: SecretKey::from_bytes(PublicKeyAlgorithm::Secp256k1, &seed)
                .expect("seed is a valid scalar"),
            author: ProfileIdentifier::new("example.com", "alice").expect("valid identifier"),
        }
    }

    /// The fixture key's public half.
    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// A publicly-shared -38 payload authored by this fixture.
    pub fn make_public_payload(&self, encrypted: &[u8]) -> Payload {
        Payload {
            version: -38,
            author: Some(self.author.clone()),
            author_public_key: Some(self.public_key()),
            encryption: Encryption::Public {
                algorithm: AesAlgorithm::A256Gcm,
                key_encrypted: vec![0x6a; 138],
                iv: vec![0x06; 16],
            },
            encrypted: encrypted.to_vec(),
            signature: None,
        }
    }

    /// An anonymous end-to-end payload at the given wire version.
    pub fn make_end_to_end_payload(&self, version: i32, encrypted: &[u8]) -> Payload {
        Payload {
            version,
            author: None,
            author_public_key: None,
            encryption: Encryption::EndToEnd {
                owners_key_encrypted: vec![0x11; 48],
                iv: vec![0x22; 16],
            },
            encrypted: encrypted.to_vec(),
            signature: None,
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
