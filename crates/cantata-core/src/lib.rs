//! # cantata-core
//!
//! Pure primitives for the cantata payload codec: the key codec, the
//! canonical payload model, and profile identifiers.
//!
//! This crate contains no I/O and no wire-format knowledge. It is pure
//! computation over cryptographic data structures; the versioned wire
//! formats live in `cantata-codec`.
//!
//! ## Key Types
//!
//! - [`Payload`] - The canonical decrypted message envelope
//! - [`PublicKey`] / [`AesKey`] / [`SecretKey`] - Validated key material
//! - [`JsonWebKey`] - The JWK interchange form keys cross boundaries in
//! - [`ProfileIdentifier`] - An immutable `(network, user_id)` pair

pub mod error;
pub mod jwk;
pub mod keys;
pub mod payload;
pub mod types;

pub use error::{IdentifierError, KeyError};
pub use jwk::JsonWebKey;
pub use keys::{
    AesAlgorithm, AesKey, PublicKey, PublicKeyAlgorithm, SecretKey, Signature,
    AES_256_KEY_LENGTH, SEC1_COMPRESSED_LENGTH,
};
pub use payload::{Encryption, Payload};
pub use types::ProfileIdentifier;
