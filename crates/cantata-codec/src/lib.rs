//! # cantata-codec
//!
//! Versioned wire codec for end-to-end encrypted social-network
//! payloads: a self-describing, backward-compatible text format that
//! can be embedded inside ordinary posts.
//!
//! A blob looks like `<marker>|<field>|…|<field>:||` with base64
//! fields; the leading marker names the protocol generation and routes
//! the blob to that generation's decoder. Three generations are
//! supported: -40 (`🎩3/4`), -39 (`🎶2/4`) and -38 (`🎼4/4`). Field
//! order and delimiters are a wire contract per generation and are
//! reproduced bit-for-bit, quirks included.
//!
//! ## Entry points
//!
//! - [`parse_payload`] - decode a blob of any supported generation
//! - [`encode_payload`] - encode a [`Payload`] for a target [`Version`]
//!
//! Both are pure functions; calls share no state and may run fully in
//! parallel.
//!
//! ```
//! use cantata_codec::{encode_payload, parse_payload, SigningMode, Version};
//! use cantata_core::{Encryption, Payload};
//!
//! let payload = Payload {
//!     version: Version::V38.value(),
//!     author: None,
//!     author_public_key: None,
//!     encryption: Encryption::EndToEnd {
//!         owners_key_encrypted: vec![0x11; 48],
//!         iv: vec![0x22; 16],
//!     },
//!     encrypted: b"ciphertext".to_vec(),
//!     signature: None,
//! };
//!
//! let blob = encode_payload(&payload, SigningMode::NoSign, Version::V38)?;
//! assert_eq!(parse_payload(&blob)?, payload);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod registry;
pub mod sign;
mod version_38;
mod version_39;
mod version_40;
mod wire;

pub use cantata_core::Payload;
pub use error::{DecodeError, EncodeError, SignatureError};
pub use registry::{encode_payload, parse_payload, Version};
pub use sign::SigningMode;
