//! Typed decoder options.
//!
//! Configuration requests are tagged variants carrying their payloads, so
//! every recognized option is dispatched by exhaustive matching and an
//! ill-typed payload is unrepresentable. Writable state goes through
//! [`DecoderOption`]; readable state is addressed by [`OptionQuery`] and
//! comes back as an [`OptionValue`].

use openavc_core::{BufferProperty, ColorFormat, DecodeMode};

use crate::nal::VclNalFeedback;

/// A writable decoder option with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderOption {
    /// Select the output pixel format; forwarded to the engine.
    OutputColorFormat(ColorFormat),
    /// Signal that no more input remains for the current stream.
    EndOfStream(bool),
    /// Select software or device-accelerated decoding. Also re-derives the
    /// output buffer property: host memory for software modes, device
    /// memory otherwise.
    DecodeMode(DecodeMode),
    /// Override the output buffer location. Only applies when the decode
    /// mode is not a software mode; software decoding always outputs to
    /// host memory.
    OutputBufferProperty(BufferProperty),
}

/// A readable decoder option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionQuery {
    /// Current output pixel format.
    OutputColorFormat,
    /// Current end-of-stream flag.
    EndOfStream,
    /// Requested decode mode.
    DecodeMode,
    /// Write-only; querying it is an invalid-parameter error.
    OutputBufferProperty,
    /// Whether the last access unit contained a VCL NAL.
    VclNalInAu,
    /// Temporal layer id of the last access unit, -1 when unknown.
    TemporalId,
    /// Device capability probe; currently a stub with no payload.
    DeviceInfo,
    /// Whether a reference picture was lost at temporal layer 0.
    ReferenceLost,
    /// idr_pic_id of the current IDR picture.
    #[cfg(feature = "long-term-ref")]
    IdrPicId,
    /// Current frame number.
    #[cfg(feature = "long-term-ref")]
    FrameNum,
    /// Whether the last access unit carried an LTR marking SEI.
    #[cfg(feature = "long-term-ref")]
    LtrMarkingFlag,
    /// Frame number marked as long-term reference in the last access unit.
    #[cfg(feature = "long-term-ref")]
    LtrMarkedFrameNum,
    /// Whether SPS/PPS must be re-acquired before further decoding.
    #[cfg(feature = "long-term-ref")]
    ParameterSetsLost,
}

/// Value returned by a [`get_option`](crate::AvcDecoder::get_option) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    /// A pixel format.
    ColorFormat(ColorFormat),
    /// A decode mode.
    DecodeMode(DecodeMode),
    /// A boolean flag.
    Bool(bool),
    /// An integer value.
    Int(i32),
    /// VCL NAL feedback.
    VclNal(VclNalFeedback),
    /// The query succeeded but carries no payload (stub options).
    None,
}

impl OptionValue {
    /// Extract a boolean payload.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract an integer payload.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a color format payload.
    #[must_use]
    pub fn as_color_format(&self) -> Option<ColorFormat> {
        match self {
            Self::ColorFormat(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a decode mode payload.
    #[must_use]
    pub fn as_decode_mode(&self) -> Option<DecodeMode> {
        match self {
            Self::DecodeMode(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(OptionValue::Bool(true).as_bool(), Some(true));
        assert_eq!(OptionValue::Int(-1).as_int(), Some(-1));
        assert_eq!(
            OptionValue::ColorFormat(ColorFormat::I420).as_color_format(),
            Some(ColorFormat::I420)
        );
        assert_eq!(OptionValue::None.as_bool(), None);
        assert_eq!(OptionValue::Bool(false).as_int(), None);
    }
}
