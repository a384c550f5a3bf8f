//! The canonical decrypted message envelope.
//!
//! A [`Payload`] is the in-memory form of an end-to-end encrypted post:
//! authorship metadata, the parameters needed to decrypt the body, the
//! ciphertext itself, and an optional signature. It is constructed
//! transiently for a single encode or decode call and owns all of its
//! key material for that call's duration.

use crate::keys::{AesAlgorithm, PublicKey, Signature};
use crate::types::ProfileIdentifier;

/// How the post key travels with the payload.
///
/// The wrapped key bytes are opaque to the codec: wrapping and
/// unwrapping belong to the sharing layer. Key and iv are always
/// paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encryption {
    /// Publicly shared post: anyone holding the well-known sharing key
    /// can unwrap `key_encrypted` and decrypt.
    Public {
        /// Algorithm of the wrapped post key.
        algorithm: AesAlgorithm,
        /// The wrapped post key (ciphertext of the AES key).
        key_encrypted: Vec<u8>,
        /// Initialization vector for the post body.
        iv: Vec<u8>,
    },

    /// End-to-end encrypted post: the payload carries the author's own
    /// wrapped copy of the post key; per-recipient copies travel out
    /// of band in the supported generations.
    EndToEnd {
        /// The author's wrapped copy of the post key.
        owners_key_encrypted: Vec<u8>,
        /// Initialization vector for the post body.
        iv: Vec<u8>,
    },
}

impl Encryption {
    /// The initialization vector, whichever mode is active.
    pub fn iv(&self) -> &[u8] {
        match self {
            Self::Public { iv, .. } | Self::EndToEnd { iv, .. } => iv,
        }
    }

    /// The wrapped key bytes, whichever mode is active.
    pub fn key_encrypted(&self) -> &[u8] {
        match self {
            Self::Public { key_encrypted, .. } => key_encrypted,
            Self::EndToEnd {
                owners_key_encrypted,
                ..
            } => owners_key_encrypted,
        }
    }

    /// Whether this is the publicly shared mode.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public { .. })
    }
}

/// The canonical envelope for one encrypted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Protocol generation. Negative values denote legacy/experimental
    /// generations; the codec's registry defines the supported set.
    pub version: i32,

    /// The sending profile. Absent is valid (anonymous authorship).
    pub author: Option<ProfileIdentifier>,

    /// The author's key-exchange public key, used by recipients to
    /// derive shared secrets. Absent is valid.
    pub author_public_key: Option<PublicKey>,

    /// Post key transport parameters.
    pub encryption: Encryption,

    /// Ciphertext of the message body. Never empty when well-formed.
    pub encrypted: Vec<u8>,

    /// Detached signature over the canonical pre-image. Absent is
    /// valid (unsigned payload).
    pub signature: Option<Signature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_accessors() {
        let public = Encryption::Public {
            algorithm: AesAlgorithm::A256Gcm,
            key_encrypted: vec![1, 2, 3],
            iv: vec![4; 16],
        };
        assert!(public.is_public());
        assert_eq!(public.key_encrypted(), &[1, 2, 3]);
        assert_eq!(public.iv(), &[4; 16]);

        let e2e = Encryption::EndToEnd {
            owners_key_encrypted: vec![9],
            iv: vec![8; 16],
        };
        assert!(!e2e.is_public());
        assert_eq!(e2e.key_encrypted(), &[9]);
        assert_eq!(e2e.iv(), &[8; 16]);
    }
}
