//! Error types for EWKB decoding and encoding.

use thiserror::Error;

use crate::model::GeometryType;

/// Policy category of an error.
///
/// Callers that only care about *why* a buffer was refused can match on the
/// kind instead of the individual error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Fewer bytes remain than a field or sequence declares.
    TruncatedBuffer,
    /// A type code outside the supported set, or a top-level type mismatch.
    UnexpectedType,
    /// The bytes are present but do not form valid EWKB.
    MalformedEncoding,
    /// The scan adapter could not turn its input into a byte buffer.
    MalformedInput,
    /// A valid but unimplemented part of the format (bounding boxes, excessive nesting).
    Unsupported,
}

impl ErrorKind {
    /// Returns a short, stable name for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TruncatedBuffer => "truncated_buffer",
            ErrorKind::UnexpectedType => "unexpected_type",
            ErrorKind::MalformedEncoding => "malformed_encoding",
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::Unsupported => "unsupported",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === TruncatedBuffer ===
    #[error("truncated buffer while reading {context} at offset {position}: need {needed} bytes, {available} available")]
    TruncatedBuffer {
        context: &'static str,
        position: usize,
        needed: usize,
        available: usize,
    },

    // === UnexpectedType ===
    #[error("unknown geometry type code {code} at offset {position}")]
    UnknownGeometryType { code: u32, position: usize },

    #[error("unexpected geometry type: expected {expected}, found {found}")]
    UnexpectedType {
        expected: GeometryType,
        found: GeometryType,
    },

    // === MalformedEncoding ===
    #[error("invalid byte order marker 0x{marker:02x} at offset {position} (expected 0x00 or 0x01)")]
    InvalidByteOrder { marker: u8, position: usize },

    #[error("{trailing} trailing bytes after geometry ending at offset {consumed}")]
    TrailingBytes { consumed: usize, trailing: usize },

    // === MalformedInput ===
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    // === Unsupported ===
    #[error("bounding box flag set at offset {position}; EWKB bounding boxes are not supported")]
    BoundingBoxUnsupported { position: usize },

    #[error("geometry collections nested deeper than {max} levels")]
    NestingTooDeep { max: usize },
}

impl DecodeError {
    /// Returns the policy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::TruncatedBuffer { .. } => ErrorKind::TruncatedBuffer,
            DecodeError::UnknownGeometryType { .. } | DecodeError::UnexpectedType { .. } => {
                ErrorKind::UnexpectedType
            }
            DecodeError::InvalidByteOrder { .. } | DecodeError::TrailingBytes { .. } => {
                ErrorKind::MalformedEncoding
            }
            DecodeError::MalformedInput { .. } => ErrorKind::MalformedInput,
            DecodeError::BoundingBoxUnsupported { .. } | DecodeError::NestingTooDeep { .. } => {
                ErrorKind::Unsupported
            }
        }
    }

    /// Returns true if the buffer ended before the geometry did.
    pub fn is_truncated(&self) -> bool {
        self.kind() == ErrorKind::TruncatedBuffer
    }
}

impl From<hex::FromHexError> for DecodeError {
    fn from(err: hex::FromHexError) -> Self {
        DecodeError::MalformedInput {
            reason: err.to_string(),
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{geometry_type} header has the bounding box flag set; EWKB bounding boxes are not supported")]
    BoundingBoxUnsupported { geometry_type: GeometryType },

    #[error("geometry collections nested deeper than {max} levels")]
    NestingTooDeep { max: usize },
}

impl EncodeError {
    /// Returns the policy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::LengthExceedsLimit { .. } => ErrorKind::MalformedEncoding,
            EncodeError::BoundingBoxUnsupported { .. } | EncodeError::NestingTooDeep { .. } => {
                ErrorKind::Unsupported
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let truncated = DecodeError::TruncatedBuffer {
            context: "point",
            position: 5,
            needed: 16,
            available: 3,
        };
        assert_eq!(truncated.kind(), ErrorKind::TruncatedBuffer);
        assert!(truncated.is_truncated());

        let unknown = DecodeError::UnknownGeometryType { code: 99, position: 1 };
        assert_eq!(unknown.kind(), ErrorKind::UnexpectedType);
        assert!(!unknown.is_truncated());

        let mismatch = DecodeError::UnexpectedType {
            expected: GeometryType::LineString,
            found: GeometryType::Polygon,
        };
        assert_eq!(mismatch.kind(), ErrorKind::UnexpectedType);

        assert_eq!(
            DecodeError::BoundingBoxUnsupported { position: 1 }.kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            EncodeError::BoundingBoxUnsupported { geometry_type: GeometryType::Point }.kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn test_hex_error_is_malformed_input() {
        let err: DecodeError = hex::FromHexError::OddLength.into();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(ErrorKind::MalformedInput.as_str(), "malformed_input");
    }

    #[test]
    fn test_messages() {
        let err = DecodeError::UnexpectedType {
            expected: GeometryType::LineString,
            found: GeometryType::Polygon,
        };
        assert_eq!(
            err.to_string(),
            "unexpected geometry type: expected LINESTRING, found POLYGON"
        );

        let err = DecodeError::InvalidByteOrder { marker: 0x07, position: 0 };
        assert_eq!(
            err.to_string(),
            "invalid byte order marker 0x07 at offset 0 (expected 0x00 or 0x01)"
        );

        let err = EncodeError::NestingTooDeep { max: 64 };
        assert_eq!(err.to_string(), "geometry collections nested deeper than 64 levels");
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
