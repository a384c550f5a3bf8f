//! Golden wire vectors captured from the legacy stack.
//!
//! These blobs were produced by the original browser implementation and
//! pin the codec to the historical byte layout. They must never be
//! regenerated; a codec change that breaks them breaks interchange.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cantata_core::{
    AesAlgorithm, Encryption, Payload, ProfileIdentifier, PublicKey, PublicKeyAlgorithm,
};

/// A publicly-shared generation -38 post captured in the wild.
///
/// Unsigned (the `_` sentinel), shared flag `1`, with authorship
/// metadata attached.
pub const GOLDEN_V38_BLOB: &str = "🎼4/4|avkwBKqMpCKznGclvChuuh2AEExV0J14xI/KANhwiKJfVyfm2ObWb432E3aAOa7ImRoCd7/JK1dDQWk4rt9NqajTEaajARMc9hJ9GmR8lorBNRNHlgj/h1KJYk5th7Nsr04PWO0nJUKiDH2CJwieSxW2YqxCI1ceYKUYcZOsVJEZOrJ/IB8WUmU0|BjPbfiSAXCvc/2nqKv2nzQ==|Og1u5pLG9GiWsZbxQwHAGtL6Jqo=|_|Aq/bVWAKvodJuURGk3enjE1gUiu2SELM8IIKIlNGqOWM|1|ZmFjZWJvb2suY29tLzEwMDAyNzU2MjI0OTU3NA==:||";

/// The wrapped AES key field of [`GOLDEN_V38_BLOB`], still base64.
/// 138 bytes once decoded; the codec treats it as opaque.
pub const GOLDEN_V38_KEY_ENCRYPTED_B64: &str = "avkwBKqMpCKznGclvChuuh2AEExV0J14xI/KANhwiKJfVyfm2ObWb432E3aAOa7ImRoCd7/JK1dDQWk4rt9NqajTEaajARMc9hJ9GmR8lorBNRNHlgj/h1KJYk5th7Nsr04PWO0nJUKiDH2CJwieSxW2YqxCI1ceYKUYcZOsVJEZOrJ/IB8WUmU0";

/// The AES-GCM initialization vector of the golden post.
pub const GOLDEN_V38_IV_HEX: &str = "0633db7e24805c2bdcff69ea2afda7cd";

/// The ciphertext of the golden post.
pub const GOLDEN_V38_ENCRYPTED_HEX: &str = "3a0d6ee692c6f46896b196f14301c01ad2fa26aa";

/// The author's SEC1 compressed secp256k1 public key.
pub const GOLDEN_V38_AUTHOR_PUBLIC_KEY_HEX: &str =
    "02afdb55600abe8749b944469377a78c4d60522bb64842ccf0820a225346a8e58c";

/// The author identifier, in `network/user_id` text form.
pub const GOLDEN_V38_AUTHOR: &str = "facebook.com/100027562249574";

/// The payload [`GOLDEN_V38_BLOB`] must decode to, field for field.
pub fn golden_v38_payload() -> Payload {
    let key_encrypted = STANDARD
        .decode(GOLDEN_V38_KEY_ENCRYPTED_B64)
        .expect("captured field is valid base64");
    let author_key_bytes =
        hex::decode(GOLDEN_V38_AUTHOR_PUBLIC_KEY_HEX).expect("captured hex is valid");

    Payload {
        version: -38,
        author: Some(
            ProfileIdentifier::from_text(GOLDEN_V38_AUTHOR)
                .expect("captured identifier is well formed"),
        ),
        author_public_key: Some(
            PublicKey::from_bytes(PublicKeyAlgorithm::Secp256k1, &author_key_bytes)
                .expect("captured point is on the curve"),
        ),
        encryption: Encryption::Public {
            algorithm: AesAlgorithm::A256Gcm,
            key_encrypted,
            iv: hex::decode(GOLDEN_V38_IV_HEX).expect("captured hex is valid"),
        },
        encrypted: hex::decode(GOLDEN_V38_ENCRYPTED_HEX).expect("captured hex is valid"),
        signature: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_payload_builds() {
        let payload = golden_v38_payload();
        assert_eq!(payload.version, -38);
        assert_eq!(payload.encrypted.len(), 20);
        assert_eq!(payload.encryption.iv().len(), 16);
        assert_eq!(payload.encryption.key_encrypted().len(), 138);
        assert!(payload.encryption.is_public());
    }
}
