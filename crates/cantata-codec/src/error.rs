//! Error types for the cantata codec.

use thiserror::Error;

use cantata_core::KeyError;

/// Errors that can occur while parsing a wire-format blob.
///
/// No partial payload ever accompanies one of these; a blob either
/// parses completely or not at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported payload version marker `{0}`")]
    UnsupportedVersion(String),

    #[error("malformed payload header: {0}")]
    MalformedHeader(&'static str),

    #[error("malformed field `{field}`: {reason}")]
    MalformedField {
        field: &'static str,
        reason: String,
    },

    #[error("embedded key rejected: {0}")]
    KeyImport(#[from] KeyError),
}

/// Errors that can occur while encoding a payload for a target version.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("missing required field `{0}` for the target version")]
    MissingField(&'static str),

    #[error("refusing to encode a payload with empty ciphertext")]
    EmptyCiphertext,

    #[error("payload version {payload} does not match target version {target}")]
    VersionMismatch { payload: i32, target: i32 },

    #[error("field `{field}` is not representable at version {version}: {reason}")]
    Unrepresentable {
        field: &'static str,
        version: i32,
        reason: &'static str,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Errors raised when signing was requested but cannot be honored.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signing key does not match the payload's author public key")]
    KeyMismatch,
}
