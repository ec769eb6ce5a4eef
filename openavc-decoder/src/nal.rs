//! NAL (Network Abstraction Layer) unit classification.
//!
//! The orchestration layer never parses slice payloads; it only needs to
//! classify the NAL header of the access unit that last went through the
//! engine, to decide whether a decode failure invalidates the parameter-set
//! state.

use openavc_core::{DecoderError, Result};

/// NAL unit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NalUnitType {
    /// Unspecified.
    Unspecified,
    /// Non-IDR coded slice.
    Slice,
    /// Slice data partition A.
    SliceDataA,
    /// Slice data partition B.
    SliceDataB,
    /// Slice data partition C.
    SliceDataC,
    /// IDR coded slice.
    IdrSlice,
    /// Supplemental enhancement information (SEI).
    Sei,
    /// Sequence parameter set (SPS).
    Sps,
    /// Picture parameter set (PPS).
    Pps,
    /// Access unit delimiter.
    Aud,
    /// End of sequence.
    EndOfSequence,
    /// End of stream.
    EndOfStream,
    /// Filler data.
    Filler,
    /// SPS extension.
    SpsExt,
    /// Prefix NAL unit (SVC).
    Prefix,
    /// Subset SPS (SVC).
    SubsetSps,
    /// Coded slice extension (SVC).
    SliceExt,
    /// Unknown/reserved type.
    Unknown(u8),
}

impl NalUnitType {
    /// Create from the raw 5-bit type value.
    #[must_use]
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Unspecified,
            1 => Self::Slice,
            2 => Self::SliceDataA,
            3 => Self::SliceDataB,
            4 => Self::SliceDataC,
            5 => Self::IdrSlice,
            6 => Self::Sei,
            7 => Self::Sps,
            8 => Self::Pps,
            9 => Self::Aud,
            10 => Self::EndOfSequence,
            11 => Self::EndOfStream,
            12 => Self::Filler,
            13 => Self::SpsExt,
            14 => Self::Prefix,
            15 => Self::SubsetSps,
            20 => Self::SliceExt,
            n => Self::Unknown(n),
        }
    }

    /// Get the raw type value.
    #[must_use]
    pub fn to_raw(&self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Slice => 1,
            Self::SliceDataA => 2,
            Self::SliceDataB => 3,
            Self::SliceDataC => 4,
            Self::IdrSlice => 5,
            Self::Sei => 6,
            Self::Sps => 7,
            Self::Pps => 8,
            Self::Aud => 9,
            Self::EndOfSequence => 10,
            Self::EndOfStream => 11,
            Self::Filler => 12,
            Self::SpsExt => 13,
            Self::Prefix => 14,
            Self::SubsetSps => 15,
            Self::SliceExt => 20,
            Self::Unknown(n) => *n,
        }
    }

    /// Check if this is a VCL (Video Coding Layer) NAL unit.
    #[must_use]
    pub fn is_vcl(&self) -> bool {
        matches!(
            self,
            Self::Slice
                | Self::SliceDataA
                | Self::SliceDataB
                | Self::SliceDataC
                | Self::IdrSlice
                | Self::SliceExt
        )
    }

    /// Check if this is a parameter-set NAL (SPS, PPS, or subset SPS).
    #[must_use]
    pub fn is_parameter_set(&self) -> bool {
        matches!(self, Self::Sps | Self::Pps | Self::SubsetSps)
    }

    /// Check if this is an IDR coded slice.
    #[must_use]
    pub fn is_idr(&self) -> bool {
        matches!(self, Self::IdrSlice)
    }
}

/// Parsed NAL unit header (the first byte after the start code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NalUnitHeader {
    /// nal_ref_idc: 0 means the picture is not used for reference.
    pub ref_idc: u8,
    /// NAL unit type.
    pub unit_type: NalUnitType,
}

impl NalUnitHeader {
    /// Parse the header byte. Fails if the forbidden_zero_bit is set.
    pub fn parse(byte: u8) -> Result<Self> {
        if byte & 0x80 != 0 {
            return Err(DecoderError::invalid_param(
                "forbidden_zero_bit set in NAL header",
            ));
        }
        Ok(Self {
            ref_idc: (byte >> 5) & 0x03,
            unit_type: NalUnitType::from_raw(byte & 0x1F),
        })
    }
}

impl Default for NalUnitHeader {
    fn default() -> Self {
        Self {
            ref_idc: 0,
            unit_type: NalUnitType::Unspecified,
        }
    }
}

/// Per-access-unit feedback on whether a VCL NAL was present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VclNalFeedback {
    /// Not yet determined for the current access unit.
    #[default]
    Unknown,
    /// The access unit carried no VCL NAL.
    NoVclNal,
    /// At least one VCL NAL was found.
    VclNalFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_raw_roundtrip() {
        for raw in 0..=31u8 {
            assert_eq!(NalUnitType::from_raw(raw).to_raw(), raw);
        }
    }

    #[test]
    fn test_parameter_set_classification() {
        assert!(NalUnitType::Sps.is_parameter_set());
        assert!(NalUnitType::Pps.is_parameter_set());
        assert!(NalUnitType::SubsetSps.is_parameter_set());
        assert!(!NalUnitType::IdrSlice.is_parameter_set());
        assert!(!NalUnitType::Sei.is_parameter_set());
    }

    #[test]
    fn test_vcl_classification() {
        assert!(NalUnitType::Slice.is_vcl());
        assert!(NalUnitType::IdrSlice.is_vcl());
        assert!(NalUnitType::SliceExt.is_vcl());
        assert!(!NalUnitType::Sps.is_vcl());
        assert!(!NalUnitType::Aud.is_vcl());
    }

    #[test]
    fn test_header_parse() {
        // ref_idc=3, type=5 (IDR)
        let header = NalUnitHeader::parse(0x65).unwrap();
        assert_eq!(header.ref_idc, 3);
        assert_eq!(header.unit_type, NalUnitType::IdrSlice);

        // forbidden bit set
        assert!(NalUnitHeader::parse(0xE5).is_err());
    }
}
