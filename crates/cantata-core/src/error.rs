//! Error types for the cantata core.

use thiserror::Error;

/// Errors produced by the key codec when importing, exporting, or
/// verifying key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("wrong key length: expected {expected}, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("key bytes do not describe a valid curve point")]
    InvalidPoint,

    #[error("missing JWK parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("missing required key usage `{0}`")]
    MissingUsage(&'static str),

    #[error("wrong JWK key type: expected `{expected}`, got `{got}`")]
    WrongKeyType { expected: &'static str, got: String },

    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),

    #[error("signature verification failed")]
    InvalidSignature,
}

/// Errors produced when constructing or parsing a profile identifier.
#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("network part must not be empty")]
    EmptyNetwork,

    #[error("user id part must not be empty")]
    EmptyUserId,

    #[error("network part must not contain `/`")]
    InvalidNetwork,
}
