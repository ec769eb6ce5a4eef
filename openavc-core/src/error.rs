//! Error types for the OpenAVC decoder.
//!
//! Two layers are distinguished: [`DecoderError`] covers lifecycle and
//! configuration failures detected by the orchestration layer itself, while
//! [`DecodeStatus`] carries the bitstream-level outcome reported by the
//! decoding engine for one access unit.

use std::fmt;
use thiserror::Error;

/// Outcome of decoding one access unit, as reported by the decoding engine.
///
/// The orchestration layer treats these values as opaque except for the
/// resynchronization policy applied when a parameter set or IDR slice fails
/// to decode. The raw codes follow the legacy DECODING_STATE ABI so they can
/// cross a C boundary unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeStatus {
    /// Decoding succeeded.
    #[default]
    ErrorFree,
    /// More bitstream data is needed before a frame can be output.
    FramePending,
    /// A reference picture required by the current slice was lost.
    RefLost,
    /// Malformed or truncated bitstream data.
    BitstreamError,
    /// A dependency layer required for reconstruction was lost.
    DepLayerLost,
    /// No active SPS/PPS; parameter sets must be re-supplied.
    NoParamSets,
    /// A data error was detected and concealed.
    DataErrorConcealed,
    /// The engine failed to allocate working memory.
    OutOfMemory,
    /// The destination buffer is too small and must be expanded.
    DstBufNeedExpand,
}

impl DecodeStatus {
    /// True for every status other than [`DecodeStatus::ErrorFree`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::ErrorFree)
    }

    /// Raw numeric code, matching the legacy DECODING_STATE values.
    #[must_use]
    pub fn to_raw(&self) -> u32 {
        match self {
            Self::ErrorFree => 0x0000,
            Self::FramePending => 0x0001,
            Self::RefLost => 0x0002,
            Self::BitstreamError => 0x0004,
            Self::DepLayerLost => 0x0008,
            Self::NoParamSets => 0x0010,
            Self::DataErrorConcealed => 0x0020,
            Self::OutOfMemory => 0x4000,
            Self::DstBufNeedExpand => 0x8000,
        }
    }

    /// Create from a raw DECODING_STATE code.
    ///
    /// Returns `None` for codes outside the known set.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0000 => Some(Self::ErrorFree),
            0x0001 => Some(Self::FramePending),
            0x0002 => Some(Self::RefLost),
            0x0004 => Some(Self::BitstreamError),
            0x0008 => Some(Self::DepLayerLost),
            0x0010 => Some(Self::NoParamSets),
            0x0020 => Some(Self::DataErrorConcealed),
            0x4000 => Some(Self::OutOfMemory),
            0x8000 => Some(Self::DstBufNeedExpand),
            _ => None,
        }
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ErrorFree => "error free",
            Self::FramePending => "frame pending",
            Self::RefLost => "reference lost",
            Self::BitstreamError => "bitstream error",
            Self::DepLayerLost => "dependency layer lost",
            Self::NoParamSets => "no parameter sets",
            Self::DataErrorConcealed => "data error concealed",
            Self::OutOfMemory => "out of memory",
            Self::DstBufNeedExpand => "destination buffer needs expansion",
        };
        write!(f, "{} (0x{:04x})", name, self.to_raw())
    }
}

/// Main error type for decoder lifecycle, configuration, and decode calls.
#[derive(Error, Debug)]
pub enum DecoderError {
    /// Invalid or out-of-range argument.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation requires a successful `initialize` first.
    #[error("Decoder not initialized")]
    NotInitialized,

    /// `initialize` was called while a decoder context already exists.
    #[error("Decoder already initialized")]
    AlreadyInitialized,

    /// Decoder context allocation failed.
    #[error("Context allocation failed")]
    AllocationFailed,

    /// The engine reported a bitstream-level decode failure.
    #[error("Decode failed: {0}")]
    Decode(DecodeStatus),

    /// I/O error (diagnostic dump files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecoderError {
    /// Create an invalid parameter error.
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        DecoderError::InvalidParameter(msg.into())
    }

    /// The decode status carried by this error, if it is a decode failure.
    #[must_use]
    pub fn decode_status(&self) -> Option<DecodeStatus> {
        match self {
            DecoderError::Decode(status) => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using [`DecoderError`].
pub type Result<T> = std::result::Result<T, DecoderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_raw_roundtrip() {
        let all = [
            DecodeStatus::ErrorFree,
            DecodeStatus::FramePending,
            DecodeStatus::RefLost,
            DecodeStatus::BitstreamError,
            DecodeStatus::DepLayerLost,
            DecodeStatus::NoParamSets,
            DecodeStatus::DataErrorConcealed,
            DecodeStatus::OutOfMemory,
            DecodeStatus::DstBufNeedExpand,
        ];
        for status in all {
            assert_eq!(DecodeStatus::from_raw(status.to_raw()), Some(status));
        }
        assert_eq!(DecodeStatus::from_raw(0x40), None);
    }

    #[test]
    fn test_error_free_is_not_error() {
        assert!(!DecodeStatus::ErrorFree.is_error());
        assert!(DecodeStatus::BitstreamError.is_error());
    }

    #[test]
    fn test_error_display() {
        let err = DecoderError::invalid_param("bad option payload");
        assert_eq!(err.to_string(), "Invalid parameter: bad option payload");

        let err = DecoderError::Decode(DecodeStatus::NoParamSets);
        assert_eq!(err.to_string(), "Decode failed: no parameter sets (0x0010)");
    }

    #[test]
    fn test_decode_status_accessor() {
        let err = DecoderError::Decode(DecodeStatus::RefLost);
        assert_eq!(err.decode_status(), Some(DecodeStatus::RefLost));
        assert_eq!(DecoderError::NotInitialized.decode_status(), None);
    }
}
