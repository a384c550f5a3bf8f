//! The version dispatcher: single authority for the marker→codec table.
//!
//! Every supported protocol generation registers its marker and its
//! encoder/decoder pair here. Adding a generation means adding one
//! module and one table entry; existing entries are never touched.

use cantata_core::Payload;

use crate::error::{DecodeError, EncodeError};
use crate::sign::SigningMode;
use crate::wire::{self, FIELD_SEPARATOR};
use crate::{version_38, version_39, version_40};

/// A supported protocol generation.
///
/// Negative values denote the legacy/experimental generations this
/// codec grew up with; the numbering is part of the interchange
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// `🎩3/4` — oldest supported layout, end-to-end only.
    V40,
    /// `🎶2/4` — same layout as -40 under a new key-derivation scheme.
    V39,
    /// `🎼4/4` — adds authorship metadata and public sharing.
    V38,
}

impl Version {
    /// All supported generations, oldest first.
    pub const ALL: [Version; 3] = [Version::V40, Version::V39, Version::V38];

    /// The signed version number of this generation.
    pub const fn value(self) -> i32 {
        match self {
            Version::V40 => -40,
            Version::V39 => -39,
            Version::V38 => -38,
        }
    }

    /// The leading wire marker of this generation.
    pub const fn marker(self) -> &'static str {
        match self {
            Version::V40 => version_40::MARKER,
            Version::V39 => version_39::MARKER,
            Version::V38 => version_38::MARKER,
        }
    }

    /// Look up a generation by its signed version number.
    pub fn from_value(value: i32) -> Option<Version> {
        Version::ALL.into_iter().find(|v| v.value() == value)
    }
}

type DecodeFn = fn(&str) -> Result<Payload, DecodeError>;
type EncodeFn = fn(&Payload, SigningMode<'_>) -> Result<String, EncodeError>;

struct VersionEntry {
    version: Version,
    marker: &'static str,
    decode: DecodeFn,
    encode: EncodeFn,
}

/// The version table. Order matches [`Version::ALL`].
static REGISTRY: [VersionEntry; 3] = [
    VersionEntry {
        version: Version::V40,
        marker: version_40::MARKER,
        decode: version_40::decode,
        encode: version_40::encode,
    },
    VersionEntry {
        version: Version::V39,
        marker: version_39::MARKER,
        decode: version_39::decode,
        encode: version_39::encode,
    },
    VersionEntry {
        version: Version::V38,
        marker: version_38::MARKER,
        decode: version_38::decode,
        encode: version_38::encode,
    },
];

/// Parse a wire-format blob of any supported generation into the
/// canonical payload model.
///
/// The leading marker (the text before the first `|`) selects the
/// decoder. A blob with no separator at all is `MalformedHeader`; a
/// marker that names no registered generation is `UnsupportedVersion`.
pub fn parse_payload(blob: &str) -> Result<Payload, DecodeError> {
    let (marker, _) = blob
        .split_once(FIELD_SEPARATOR)
        .ok_or(DecodeError::MalformedHeader("missing field separator"))?;
    if marker.is_empty() {
        return Err(DecodeError::MalformedHeader("empty version marker"));
    }

    let entry = REGISTRY
        .iter()
        .find(|entry| entry.marker == marker)
        .ok_or_else(|| DecodeError::UnsupportedVersion(wire::leading_marker(blob)))?;

    tracing::debug!(version = entry.version.value(), "decoding payload blob");
    (entry.decode)(blob)
}

/// Encode a payload into the wire format of the target generation.
///
/// The payload's own `version` must already name the target; a payload
/// decoded at one generation has to be re-tagged deliberately before it
/// can be re-encoded at another.
pub fn encode_payload(
    payload: &Payload,
    mode: SigningMode<'_>,
    version: Version,
) -> Result<String, EncodeError> {
    if payload.version != version.value() {
        return Err(EncodeError::VersionMismatch {
            payload: payload.version,
            target: version.value(),
        });
    }

    let entry = REGISTRY
        .iter()
        .find(|entry| entry.version == version)
        .expect("every Version variant is registered");

    tracing::debug!(version = version.value(), "encoding payload blob");
    (entry.encode)(payload, mode)
}
