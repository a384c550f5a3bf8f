//! The key codec: typed key material with validated import/export.
//!
//! Keys enter the codec either as raw key-exchange encodings (SEC1
//! points, raw symmetric secrets) or as JWK objects, always together
//! with an algorithm tag. The tag determines the expected length and
//! validation rules. Exported keys re-import to an equal key.

use k256::ecdsa::signature::{DigestSigner, DigestVerifier};
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::KeyError;
use crate::jwk::{decode_base64url, encode_base64url, JsonWebKey};

/// SEC1 compressed point length for secp256k1.
pub const SEC1_COMPRESSED_LENGTH: usize = 33;

/// SEC1 uncompressed point length for secp256k1.
pub const SEC1_UNCOMPRESSED_LENGTH: usize = 65;

/// Ed25519 public key length.
pub const ED25519_KEY_LENGTH: usize = 32;

/// AES-256 key length.
pub const AES_256_KEY_LENGTH: usize = 32;

/// Asymmetric key algorithm tag.
///
/// Discriminant values are part of the interchange contract and must
/// not be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PublicKeyAlgorithm {
    Ed25519 = 0,
    Secp256k1 = 1,
    /// Declared for interchange completeness; import is not supported.
    Secp256r1 = 2,
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
            Self::Secp256r1 => "secp256r1",
        };
        write!(f, "{name}")
    }
}

/// Symmetric key algorithm tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AesAlgorithm {
    A256Gcm = 0,
}

impl fmt::Display for AesAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A256Gcm => write!(f, "A256GCM"),
        }
    }
}

/// A detached signature, as embedded in payloads.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}…, {} bytes)", hex_prefix(&self.0), self.0.len())
    }
}

/// A validated asymmetric public key plus its algorithm tag.
#[derive(Clone, PartialEq, Eq)]
pub enum PublicKey {
    Secp256k1(k256::PublicKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// The algorithm tag of this key.
    pub fn algorithm(&self) -> PublicKeyAlgorithm {
        match self {
            Self::Secp256k1(_) => PublicKeyAlgorithm::Secp256k1,
            Self::Ed25519(_) => PublicKeyAlgorithm::Ed25519,
        }
    }

    /// Import from a raw key-exchange encoding.
    ///
    /// secp256k1 accepts SEC1 compressed (33 bytes) or uncompressed
    /// (65 bytes) points; ed25519 takes the 32-byte compressed Edwards
    /// point. The point must be valid for the curve.
    pub fn from_bytes(algorithm: PublicKeyAlgorithm, bytes: &[u8]) -> Result<Self, KeyError> {
        match algorithm {
            PublicKeyAlgorithm::Secp256k1 => {
                if bytes.len() != SEC1_COMPRESSED_LENGTH && bytes.len() != SEC1_UNCOMPRESSED_LENGTH
                {
                    return Err(KeyError::WrongLength {
                        expected: SEC1_COMPRESSED_LENGTH,
                        got: bytes.len(),
                    });
                }
                let key =
                    k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPoint)?;
                Ok(Self::Secp256k1(key))
            }
            PublicKeyAlgorithm::Ed25519 => {
                let arr: [u8; ED25519_KEY_LENGTH] =
                    bytes.try_into().map_err(|_| KeyError::WrongLength {
                        expected: ED25519_KEY_LENGTH,
                        got: bytes.len(),
                    })?;
                let key = ed25519_dalek::VerifyingKey::from_bytes(&arr)
                    .map_err(|_| KeyError::InvalidPoint)?;
                Ok(Self::Ed25519(key))
            }
            PublicKeyAlgorithm::Secp256r1 => {
                Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()))
            }
        }
    }

    /// Export to the raw key-exchange encoding (compressed for EC).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(key) => key.to_encoded_point(true).as_bytes().to_vec(),
            Self::Ed25519(key) => key.to_bytes().to_vec(),
        }
    }

    /// Import from a JWK, checking the algorithm tag against the
    /// declared key type and curve.
    pub fn from_jwk(jwk: &JsonWebKey, algorithm: PublicKeyAlgorithm) -> Result<Self, KeyError> {
        jwk.require_ops(&[])?;
        match algorithm {
            PublicKeyAlgorithm::Secp256k1 => {
                expect_kty(jwk, "EC")?;
                expect_crv(jwk, "K-256")?;
                let x = field_element(&jwk.x, "x")?;
                let y = field_element(&jwk.y, "y")?;
                let point = k256::EncodedPoint::from_affine_coordinates(
                    k256::FieldBytes::from_slice(&x),
                    k256::FieldBytes::from_slice(&y),
                    false,
                );
                let key = Option::<k256::PublicKey>::from(k256::PublicKey::from_encoded_point(
                    &point,
                ))
                .ok_or(KeyError::InvalidPoint)?;
                Ok(Self::Secp256k1(key))
            }
            PublicKeyAlgorithm::Ed25519 => {
                expect_kty(jwk, "OKP")?;
                expect_crv(jwk, "Ed25519")?;
                let x = JsonWebKey::require_bytes(&jwk.x, "x")?;
                Self::from_bytes(PublicKeyAlgorithm::Ed25519, &x)
            }
            PublicKeyAlgorithm::Secp256r1 => {
                Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()))
            }
        }
    }

    /// Export to a JWK with the historical usage flags.
    pub fn to_jwk(&self) -> JsonWebKey {
        match self {
            Self::Secp256k1(key) => {
                let point = key.to_encoded_point(false);
                let x = point.x().expect("non-identity point has an x coordinate");
                let y = point.y().expect("non-identity point has a y coordinate");
                JsonWebKey {
                    kty: "EC".into(),
                    crv: Some("K-256".into()),
                    x: Some(encode_base64url(x)),
                    y: Some(encode_base64url(y)),
                    ext: Some(true),
                    key_ops: vec!["deriveKey".into(), "deriveBits".into()],
                    ..Default::default()
                }
            }
            Self::Ed25519(key) => JsonWebKey {
                kty: "OKP".into(),
                crv: Some("Ed25519".into()),
                x: Some(encode_base64url(&key.to_bytes())),
                ext: Some(true),
                key_ops: vec!["verify".into()],
                ..Default::default()
            },
        }
    }

    /// Verify a detached signature over a message.
    ///
    /// secp256k1 verifies ECDSA over SHA-256 in the 64-byte fixed
    /// encoding; ed25519 verifies a standard 64-byte signature.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), KeyError> {
        match self {
            Self::Secp256k1(key) => {
                let sig = k256::ecdsa::Signature::from_slice(signature.as_bytes())
                    .map_err(|_| KeyError::InvalidSignature)?;
                let verifier = k256::ecdsa::VerifyingKey::from(key);
                verifier
                    .verify_digest(Sha256::new_with_prefix(message), &sig)
                    .map_err(|_| KeyError::InvalidSignature)
            }
            Self::Ed25519(key) => {
                let arr: [u8; 64] = signature
                    .as_bytes()
                    .try_into()
                    .map_err(|_| KeyError::InvalidSignature)?;
                let sig = ed25519_dalek::Signature::from_bytes(&arr);
                ed25519_dalek::Verifier::verify(key, message, &sig)
                    .map_err(|_| KeyError::InvalidSignature)
            }
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PublicKey({}, {}…)",
            self.algorithm(),
            hex_prefix(&self.to_bytes())
        )
    }
}

/// A symmetric key plus its algorithm tag.
///
/// The codec never encrypts with it; it only moves the key through the
/// interchange formats.
#[derive(Clone, PartialEq, Eq)]
pub struct AesKey {
    algorithm: AesAlgorithm,
    bytes: [u8; AES_256_KEY_LENGTH],
}

impl AesKey {
    /// The algorithm tag of this key.
    pub fn algorithm(&self) -> AesAlgorithm {
        self.algorithm
    }

    /// The raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; AES_256_KEY_LENGTH] {
        &self.bytes
    }

    /// Generate a fresh random key.
    pub fn generate(algorithm: AesAlgorithm) -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; AES_256_KEY_LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { algorithm, bytes }
    }

    /// Import from raw secret bytes.
    pub fn from_bytes(algorithm: AesAlgorithm, bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; AES_256_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::WrongLength {
                expected: AES_256_KEY_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self { algorithm, bytes })
    }

    /// Import from a JWK.
    ///
    /// The JWK must be an `oct` key whose `alg` (if present) matches
    /// the requested algorithm, and must be usable for both `encrypt`
    /// and `decrypt`.
    pub fn from_jwk(jwk: &JsonWebKey, algorithm: AesAlgorithm) -> Result<Self, KeyError> {
        expect_kty(jwk, "oct")?;
        if let Some(alg) = jwk.alg.as_deref() {
            if alg != algorithm.to_string() {
                return Err(KeyError::UnsupportedAlgorithm(alg.to_string()));
            }
        }
        jwk.require_ops(&["encrypt", "decrypt"])?;
        let k = JsonWebKey::require_bytes(&jwk.k, "k")?;
        Self::from_bytes(algorithm, &k)
    }

    /// Export to a JWK.
    pub fn to_jwk(&self) -> JsonWebKey {
        JsonWebKey {
            kty: "oct".into(),
            k: Some(encode_base64url(&self.bytes)),
            alg: Some(self.algorithm.to_string()),
            ext: Some(true),
            key_ops: vec!["encrypt".into(), "decrypt".into()],
            ..Default::default()
        }
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret material stays out of logs.
        write!(f, "AesKey({}, {} bytes)", self.algorithm, self.bytes.len())
    }
}

/// A signing-capable private key.
#[derive(Clone)]
pub enum SecretKey {
    Secp256k1(k256::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

impl SecretKey {
    /// The algorithm tag of this key.
    pub fn algorithm(&self) -> PublicKeyAlgorithm {
        match self {
            Self::Secp256k1(_) => PublicKeyAlgorithm::Secp256k1,
            Self::Ed25519(_) => PublicKeyAlgorithm::Ed25519,
        }
    }

    /// Generate a fresh random key for the algorithm.
    pub fn generate(algorithm: PublicKeyAlgorithm) -> Result<Self, KeyError> {
        let mut rng = rand::thread_rng();
        match algorithm {
            PublicKeyAlgorithm::Secp256k1 => {
                Ok(Self::Secp256k1(k256::ecdsa::SigningKey::random(&mut rng)))
            }
            PublicKeyAlgorithm::Ed25519 => {
                Ok(Self::Ed25519(ed25519_dalek::SigningKey::generate(&mut rng)))
            }
            PublicKeyAlgorithm::Secp256r1 => {
                Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()))
            }
        }
    }

    /// Import from raw secret bytes (scalar for EC, seed for ed25519).
    pub fn from_bytes(algorithm: PublicKeyAlgorithm, bytes: &[u8]) -> Result<Self, KeyError> {
        match algorithm {
            PublicKeyAlgorithm::Secp256k1 => {
                if bytes.len() != 32 {
                    return Err(KeyError::WrongLength {
                        expected: 32,
                        got: bytes.len(),
                    });
                }
                let key = k256::ecdsa::SigningKey::from_slice(bytes)
                    .map_err(|_| KeyError::InvalidPoint)?;
                Ok(Self::Secp256k1(key))
            }
            PublicKeyAlgorithm::Ed25519 => {
                let arr: [u8; 32] = bytes.try_into().map_err(|_| KeyError::WrongLength {
                    expected: 32,
                    got: bytes.len(),
                })?;
                Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&arr)))
            }
            PublicKeyAlgorithm::Secp256r1 => {
                Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()))
            }
        }
    }

    /// Import from a JWK carrying a private member `d`.
    pub fn from_jwk(jwk: &JsonWebKey, algorithm: PublicKeyAlgorithm) -> Result<Self, KeyError> {
        match algorithm {
            PublicKeyAlgorithm::Secp256k1 => expect_kty(jwk, "EC")?,
            PublicKeyAlgorithm::Ed25519 => expect_kty(jwk, "OKP")?,
            PublicKeyAlgorithm::Secp256r1 => {
                return Err(KeyError::UnsupportedAlgorithm(algorithm.to_string()))
            }
        }
        let d = JsonWebKey::require_bytes(&jwk.d, "d")?;
        Self::from_bytes(algorithm, &d)
    }

    /// Export to a JWK including the private member.
    pub fn to_jwk(&self) -> JsonWebKey {
        let d = match self {
            Self::Secp256k1(key) => key.to_bytes().to_vec(),
            Self::Ed25519(key) => key.to_bytes().to_vec(),
        };
        let mut jwk = self.public_key().to_jwk();
        jwk.d = Some(encode_base64url(&d));
        if let Self::Ed25519(_) = self {
            jwk.key_ops = vec!["sign".into(), "verify".into()];
        }
        jwk
    }

    /// The corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Secp256k1(key) => PublicKey::Secp256k1(k256::PublicKey::from(key.verifying_key())),
            Self::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
        }
    }

    /// Sign a message.
    ///
    /// secp256k1 produces an ECDSA/SHA-256 signature in the 64-byte
    /// fixed encoding; ed25519 a standard 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        match self {
            Self::Secp256k1(key) => {
                let sig: k256::ecdsa::Signature =
                    key.sign_digest(Sha256::new_with_prefix(message));
                Signature(sig.to_bytes().to_vec())
            }
            Self::Ed25519(key) => {
                let sig = ed25519_dalek::Signer::sign(key, message);
                Signature(sig.to_bytes().to_vec())
            }
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", self.algorithm())
    }
}

fn expect_kty(jwk: &JsonWebKey, expected: &'static str) -> Result<(), KeyError> {
    if jwk.kty != expected {
        return Err(KeyError::WrongKeyType {
            expected,
            got: jwk.kty.clone(),
        });
    }
    Ok(())
}

fn expect_crv(jwk: &JsonWebKey, expected: &str) -> Result<(), KeyError> {
    match jwk.crv.as_deref() {
        Some(crv) if crv == expected => Ok(()),
        Some(crv) => Err(KeyError::UnsupportedAlgorithm(crv.to_string())),
        None => Err(KeyError::MissingParameter("crv")),
    }
}

fn field_element(member: &Option<String>, name: &'static str) -> Result<Vec<u8>, KeyError> {
    let bytes = JsonWebKey::require_bytes(member, name)?;
    if bytes.len() != 32 {
        return Err(KeyError::WrongLength {
            expected: 32,
            got: bytes.len(),
        });
    }
    Ok(bytes)
}

fn hex_prefix(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(8)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_author_jwk() -> JsonWebKey {
        // Author key from a captured -38 payload.
        JsonWebKey {
            kty: "EC".into(),
            crv: Some("K-256".into()),
            x: Some("r9tVYAq-h0m5REaTd6eMTWBSK7ZIQszwggoiU0ao5Yw".into()),
            y: Some("kx1ZdZAABlMcRqc_hLM6A3Vd--Vn7FBMRw3SREQN1j4".into()),
            ext: Some(true),
            key_ops: vec!["deriveKey".into(), "deriveBits".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_secp256k1_jwk_matches_compressed_point() {
        let key = PublicKey::from_jwk(&captured_author_jwk(), PublicKeyAlgorithm::Secp256k1)
            .expect("captured key imports");
        assert_eq!(
            hex::encode(key.to_bytes()),
            "02afdb55600abe8749b944469377a78c4d60522bb64842ccf0820a225346a8e58c"
        );
    }

    #[test]
    fn test_secp256k1_jwk_roundtrip() {
        let key = PublicKey::from_jwk(&captured_author_jwk(), PublicKeyAlgorithm::Secp256k1)
            .expect("captured key imports");
        let jwk = key.to_jwk();
        let recovered =
            PublicKey::from_jwk(&jwk, PublicKeyAlgorithm::Secp256k1).expect("exported key imports");
        assert_eq!(key, recovered);
        assert_eq!(jwk.x, captured_author_jwk().x);
        assert_eq!(jwk.y, captured_author_jwk().y);
    }

    #[test]
    fn test_secp256k1_raw_roundtrip() {
        let secret = SecretKey::generate(PublicKeyAlgorithm::Secp256k1).unwrap();
        let key = secret.public_key();
        let bytes = key.to_bytes();
        assert_eq!(bytes.len(), SEC1_COMPRESSED_LENGTH);
        let recovered = PublicKey::from_bytes(PublicKeyAlgorithm::Secp256k1, &bytes).unwrap();
        assert_eq!(key, recovered);
    }

    #[test]
    fn test_secp256k1_accepts_uncompressed() {
        let key = PublicKey::from_jwk(&captured_author_jwk(), PublicKeyAlgorithm::Secp256k1)
            .expect("captured key imports");
        let PublicKey::Secp256k1(inner) = &key else {
            panic!("wrong variant");
        };
        let uncompressed = inner.to_encoded_point(false);
        let recovered =
            PublicKey::from_bytes(PublicKeyAlgorithm::Secp256k1, uncompressed.as_bytes()).unwrap();
        assert_eq!(key, recovered);
    }

    #[test]
    fn test_ed25519_roundtrip() {
        let secret = SecretKey::generate(PublicKeyAlgorithm::Ed25519).unwrap();
        let key = secret.public_key();
        let recovered = PublicKey::from_bytes(PublicKeyAlgorithm::Ed25519, &key.to_bytes()).unwrap();
        assert_eq!(key, recovered);

        let jwk = key.to_jwk();
        assert_eq!(jwk.kty, "OKP");
        let from_jwk = PublicKey::from_jwk(&jwk, PublicKeyAlgorithm::Ed25519).unwrap();
        assert_eq!(key, from_jwk);
    }

    #[test]
    fn test_secret_key_jwk_roundtrip() {
        for algorithm in [PublicKeyAlgorithm::Secp256k1, PublicKeyAlgorithm::Ed25519] {
            let secret = SecretKey::generate(algorithm).unwrap();
            let jwk = secret.to_jwk();
            let recovered = SecretKey::from_jwk(&jwk, algorithm).unwrap();
            assert_eq!(secret.public_key(), recovered.public_key());
        }
    }

    #[test]
    fn test_sign_verify() {
        for algorithm in [PublicKeyAlgorithm::Secp256k1, PublicKeyAlgorithm::Ed25519] {
            let secret = SecretKey::generate(algorithm).unwrap();
            let signature = secret.sign(b"canonical pre-image");
            assert_eq!(signature.as_bytes().len(), 64);
            secret
                .public_key()
                .verify(b"canonical pre-image", &signature)
                .expect("fresh signature verifies");
            assert!(secret
                .public_key()
                .verify(b"tampered pre-image", &signature)
                .is_err());
        }
    }

    #[test]
    fn test_aes_jwk_roundtrip() {
        let jwk = JsonWebKey {
            kty: "oct".into(),
            k: Some("JrotLWI_e9OUOXzONFPthyMq-EyHdtp9vlAE9iAI9Gc".into()),
            alg: Some("A256GCM".into()),
            ext: Some(true),
            key_ops: vec!["encrypt".into(), "decrypt".into()],
            ..Default::default()
        };
        let key = AesKey::from_jwk(&jwk, AesAlgorithm::A256Gcm).expect("captured key imports");
        let exported = key.to_jwk();
        assert_eq!(exported.k, jwk.k);
        let recovered = AesKey::from_jwk(&exported, AesAlgorithm::A256Gcm).unwrap();
        assert_eq!(key, recovered);
    }

    #[test]
    fn test_aes_rejects_wrong_length() {
        assert!(matches!(
            AesKey::from_bytes(AesAlgorithm::A256Gcm, &[0u8; 16]),
            Err(KeyError::WrongLength {
                expected: 32,
                got: 16
            })
        ));
    }

    #[test]
    fn test_aes_rejects_missing_usage() {
        let jwk = JsonWebKey {
            kty: "oct".into(),
            k: Some("JrotLWI_e9OUOXzONFPthyMq-EyHdtp9vlAE9iAI9Gc".into()),
            key_ops: vec!["encrypt".into()],
            ..Default::default()
        };
        assert!(matches!(
            AesKey::from_jwk(&jwk, AesAlgorithm::A256Gcm),
            Err(KeyError::MissingUsage("decrypt"))
        ));
    }

    #[test]
    fn test_rejects_invalid_point() {
        // x/y that are not on secp256k1.
        let mut jwk = captured_author_jwk();
        jwk.y = Some(encode_base64url(&[0x01; 32]));
        assert!(matches!(
            PublicKey::from_jwk(&jwk, PublicKeyAlgorithm::Secp256k1),
            Err(KeyError::InvalidPoint)
        ));

        let garbage = [0xffu8; SEC1_COMPRESSED_LENGTH];
        assert!(matches!(
            PublicKey::from_bytes(PublicKeyAlgorithm::Secp256k1, &garbage),
            Err(KeyError::InvalidPoint)
        ));
    }

    #[test]
    fn test_rejects_unsupported_algorithm() {
        assert!(matches!(
            PublicKey::from_bytes(PublicKeyAlgorithm::Secp256r1, &[0u8; 33]),
            Err(KeyError::UnsupportedAlgorithm(_))
        ));
        assert!(SecretKey::generate(PublicKeyAlgorithm::Secp256r1).is_err());
    }

    #[test]
    fn test_rejects_wrong_key_type() {
        let jwk = JsonWebKey {
            kty: "RSA".into(),
            ..Default::default()
        };
        assert!(matches!(
            AesKey::from_jwk(&jwk, AesAlgorithm::A256Gcm),
            Err(KeyError::WrongKeyType { expected: "oct", .. })
        ));
    }
}
