//! Identifier types for the cantata payload codec.
//!
//! A [`ProfileIdentifier`] names a sending profile on a social platform.
//! The codec treats it as an immutable value; it never resolves or
//! validates the profile against the platform.

use std::fmt;

use crate::error::IdentifierError;

/// An immutable `(network, user_id)` pair identifying a profile,
/// e.g. `facebook.com/100027562249574`.
///
/// The canonical text form is `network/user_id`; [`ProfileIdentifier::from_text`]
/// and [`ProfileIdentifier::to_text`] round-trip it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProfileIdentifier {
    network: String,
    user_id: String,
}

impl ProfileIdentifier {
    /// Create a new profile identifier.
    ///
    /// The network must be non-empty and must not contain `/` (it would
    /// make the text form ambiguous). The user id must be non-empty.
    pub fn new(
        network: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let network = network.into();
        let user_id = user_id.into();
        if network.is_empty() {
            return Err(IdentifierError::EmptyNetwork);
        }
        if network.contains('/') {
            return Err(IdentifierError::InvalidNetwork);
        }
        if user_id.is_empty() {
            return Err(IdentifierError::EmptyUserId);
        }
        Ok(Self { network, user_id })
    }

    /// The platform part, e.g. `facebook.com`.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// The handle part, e.g. `100027562249574`.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Canonical text form: `network/user_id`.
    pub fn to_text(&self) -> String {
        format!("{}/{}", self.network, self.user_id)
    }

    /// Parse the canonical text form.
    pub fn from_text(text: &str) -> Result<Self, IdentifierError> {
        let (network, user_id) = text.split_once('/').ok_or(IdentifierError::EmptyUserId)?;
        Self::new(network, user_id)
    }
}

impl fmt::Display for ProfileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.user_id)
    }
}

impl fmt::Debug for ProfileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProfileIdentifier({}/{})", self.network, self.user_id)
    }
}
