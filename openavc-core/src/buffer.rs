//! Output buffer descriptors for decoded frames.

use crate::format::{BufferProperty, DecodeMode};

/// Maximum number of image planes (luma plus two chroma).
pub const MAX_PLANES: usize = 3;

/// Per-call descriptor for one decoded frame.
///
/// The caller hands a descriptor to `decode_frame`; the engine populates the
/// plane buffers and geometry on success and leaves the planes empty
/// otherwise. Width, height, and strides may carry caller-supplied hints on
/// entry (the legacy call style does this) and always describe the decoded
/// frame on a successful return.
#[derive(Debug, Clone, Default)]
pub struct OutputDescriptor {
    /// Decoded frame width in pixels.
    pub width: u32,
    /// Decoded frame height in pixels.
    pub height: u32,
    /// Per-plane row strides in bytes.
    pub strides: [usize; MAX_PLANES],
    /// Decoded plane buffers, populated only on success.
    pub planes: [Option<Vec<u8>>; MAX_PLANES],
    /// Where the plane buffers live.
    pub buffer_property: BufferProperty,
    /// Effective decode mode used for this frame.
    pub decode_mode: DecodeMode,
}

impl OutputDescriptor {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the plane slots ahead of a decode call.
    ///
    /// Geometry fields are left alone: the legacy call style passes stride
    /// and dimension hints through them.
    pub fn clear_planes(&mut self) {
        for plane in &mut self.planes {
            *plane = None;
        }
    }

    /// True once the engine has populated at least the luma plane.
    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.planes[0].is_some()
    }
}

/// Geometry for the legacy stride/width/height decode call style.
///
/// Only two strides are carried: luma and shared chroma, as in the legacy
/// ABI. On a successful decode the fields are updated to the decoded frame's
/// actual geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemBufferGeometry {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Luma and chroma row strides in bytes.
    pub strides: [usize; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_planes_keeps_geometry() {
        let mut desc = OutputDescriptor {
            width: 640,
            height: 480,
            strides: [640, 320, 320],
            planes: [Some(vec![0; 16]), Some(vec![0; 8]), Some(vec![0; 8])],
            ..Default::default()
        };
        desc.clear_planes();
        assert!(!desc.has_frame());
        assert_eq!(desc.width, 640);
        assert_eq!(desc.strides, [640, 320, 320]);
    }

    #[test]
    fn test_default_descriptor_is_empty() {
        let desc = OutputDescriptor::new();
        assert!(!desc.has_frame());
        assert_eq!(desc.width, 0);
        assert_eq!(desc.buffer_property, BufferProperty::Host);
    }
}
