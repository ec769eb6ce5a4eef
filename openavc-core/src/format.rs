//! Decode mode, buffer location, and output color format definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output color format for decoded frames.
///
/// The raw identifiers follow the legacy video-format ABI so applications
/// configured against the C interface keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ColorFormat {
    /// Packed RGB 24bpp.
    Rgb,
    /// Packed RGBA 32bpp.
    Rgba,
    /// Packed BGR 24bpp.
    Bgr,
    /// Packed BGRA 32bpp.
    Bgra,
    /// Packed YUYV 4:2:2.
    Yuy2,
    /// Planar YUV 4:2:0 (Y, U, V order).
    I420,
    /// Planar YUV 4:2:0 (Y, V, U order).
    Yv12,
    /// Semi-planar YUV 4:2:0 (Y plane, interleaved UV).
    Nv12,
}

impl ColorFormat {
    /// Raw identifier matching the legacy ABI.
    #[must_use]
    pub fn to_raw(&self) -> u32 {
        match self {
            Self::Rgb => 1,
            Self::Rgba => 2,
            Self::Bgr => 5,
            Self::Bgra => 6,
            Self::Yuy2 => 20,
            Self::I420 => 23,
            Self::Yv12 => 24,
            Self::Nv12 => 26,
        }
    }

    /// Create from a raw legacy identifier.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Rgb),
            2 => Some(Self::Rgba),
            5 => Some(Self::Bgr),
            6 => Some(Self::Bgra),
            20 => Some(Self::Yuy2),
            23 => Some(Self::I420),
            24 => Some(Self::Yv12),
            26 => Some(Self::Nv12),
            _ => None,
        }
    }

    /// Number of image planes produced in this format.
    #[must_use]
    pub fn num_planes(&self) -> usize {
        match self {
            Self::I420 | Self::Yv12 => 3,
            Self::Nv12 => 2,
            Self::Rgb | Self::Rgba | Self::Bgr | Self::Bgra | Self::Yuy2 => 1,
        }
    }
}

impl Default for ColorFormat {
    fn default() -> Self {
        Self::I420
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rgb => "RGB24",
            Self::Rgba => "RGBA",
            Self::Bgr => "BGR24",
            Self::Bgra => "BGRA",
            Self::Yuy2 => "YUY2",
            Self::I420 => "I420",
            Self::Yv12 => "YV12",
            Self::Nv12 => "NV12",
        };
        f.write_str(name)
    }
}

/// Requested decode mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DecodeMode {
    /// Let the decoder pick software or accelerated decoding.
    #[default]
    Auto,
    /// Device-accelerated decoding.
    Gpu,
    /// Pure software decoding.
    Software,
    /// Accelerated decoding requested, switching down to software.
    SwitchToSoftware,
    /// Software decoding requested, switching up to the device path.
    SwitchToGpu,
}

impl DecodeMode {
    /// True when this mode decodes entirely on the CPU.
    ///
    /// Software mode pins the output buffer location to host memory.
    #[must_use]
    pub fn is_software(&self) -> bool {
        matches!(self, Self::Software | Self::SwitchToSoftware)
    }
}

/// Where decoded output buffers live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BufferProperty {
    /// Host (CPU-addressable) memory.
    #[default]
    Host,
    /// Device (GPU) memory.
    Device,
}

/// Bitstream variant being decoded.
///
/// Plain AVC without temporal scalability cannot recover from a lost frame
/// mid-GOP, so the error-escalation policy treats any decode failure on such
/// a stream as a key-frame loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VideoBitstreamType {
    /// Scalable (SVC) bitstream.
    #[default]
    Svc,
    /// Plain AVC bitstream, no temporal scalability.
    Avc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_format_raw_roundtrip() {
        let formats = [
            ColorFormat::Rgb,
            ColorFormat::Rgba,
            ColorFormat::Bgr,
            ColorFormat::Bgra,
            ColorFormat::Yuy2,
            ColorFormat::I420,
            ColorFormat::Yv12,
            ColorFormat::Nv12,
        ];
        for fmt in formats {
            assert_eq!(ColorFormat::from_raw(fmt.to_raw()), Some(fmt));
        }
        assert_eq!(ColorFormat::from_raw(99), None);
    }

    #[test]
    fn test_default_format_is_i420() {
        assert_eq!(ColorFormat::default(), ColorFormat::I420);
        assert_eq!(ColorFormat::default().num_planes(), 3);
    }

    #[test]
    fn test_software_mode_predicate() {
        assert!(DecodeMode::Software.is_software());
        assert!(DecodeMode::SwitchToSoftware.is_software());
        assert!(!DecodeMode::Gpu.is_software());
        assert!(!DecodeMode::Auto.is_software());
    }
}
