//! Shared wire-format helpers for the text generations.
//!
//! Every text generation is a `|`-joined field list framed by a leading
//! version marker and the `:||` trailer, with fields in padded standard
//! base64. Legacy generations mark an absent optional field with the
//! `_` sentinel rather than omitting it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::DecodeError;

/// Separator between wire fields (and after the version marker).
pub(crate) const FIELD_SEPARATOR: char = '|';

/// Fixed trailer closing every text-generation blob.
pub(crate) const TRAILER: &str = ":||";

/// Sentinel marking an absent optional field in legacy layouts.
pub(crate) const ABSENT_SENTINEL: &str = "_";

/// Encode a binary field for the wire.
pub(crate) fn encode_field(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 wire field, naming the field on failure.
pub(crate) fn decode_field(field: &str, name: &'static str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(field).map_err(|e| DecodeError::MalformedField {
        field: name,
        reason: e.to_string(),
    })
}

/// Strip a blob's version marker and trailer, returning the field body.
///
/// A foreign marker means the caller picked the wrong decoder, not that
/// the blob is malformed.
pub(crate) fn strip_frame<'a>(blob: &'a str, marker: &str) -> Result<&'a str, DecodeError> {
    let rest = blob
        .strip_prefix(marker)
        .and_then(|rest| rest.strip_prefix(FIELD_SEPARATOR))
        .ok_or_else(|| DecodeError::UnsupportedVersion(leading_marker(blob)))?;
    rest.strip_suffix(TRAILER)
        .ok_or(DecodeError::MalformedField {
            field: "trailer",
            reason: "missing `:||` terminator".to_string(),
        })
}

/// The text before the first field separator, for error reporting.
pub(crate) fn leading_marker(blob: &str) -> String {
    let head = blob.split(FIELD_SEPARATOR).next().unwrap_or_default();
    // Cap what we echo back; a marker is a handful of characters.
    head.chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_roundtrip() {
        let bytes = [0x06, 0x33, 0xdb, 0x7e];
        let field = encode_field(&bytes);
        assert_eq!(decode_field(&field, "iv").unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_bad_charset() {
        let err = decode_field("not base64!", "iv").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedField { field: "iv", .. }));
    }

    #[test]
    fn test_strip_frame() {
        let body = strip_frame("🎼4/4|a|b:||", "🎼4/4").unwrap();
        assert_eq!(body, "a|b");
    }

    #[test]
    fn test_strip_frame_foreign_marker() {
        let err = strip_frame("🎶2/4|a|b:||", "🎼4/4").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVersion(m) if m == "🎶2/4"));
    }

    #[test]
    fn test_strip_frame_missing_trailer() {
        let err = strip_frame("🎼4/4|a|b", "🎼4/4").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField { field: "trailer", .. }
        ));
    }
}
