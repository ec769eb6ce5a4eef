//! The decoding engine contract.
//!
//! The engine is the collaborator that turns access-unit bytes into pixels:
//! entropy decoding, reconstruction, in-loop filtering, parameter-set
//! parsing, and reference-picture management all live behind this trait. The
//! orchestration layer drives it and interprets its outcome, nothing more.

use openavc_core::{ColorFormat, OutputDescriptor, Result, VideoBitstreamType};
use serde::{Deserialize, Serialize};

use crate::context::DecoderContext;

/// Initialization parameters forwarded to the engine.
///
/// The subset of the legacy decoding-parameter block that the orchestration
/// layer owns; engine-internal tuning stays behind `apply_config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderParameters {
    /// Output pixel format for decoded frames.
    pub output_color_format: ColorFormat,
    /// Bitstream variant; drives the error-escalation policy.
    pub video_type: VideoBitstreamType,
    /// Conceal bitstream errors instead of dropping the frame.
    pub error_concealment: bool,
    /// Decode only temporal layers up to this id, when set.
    pub target_temporal_layer: Option<u8>,
    /// CPU load hint in percent, 0 meaning unconstrained.
    pub cpu_load_hint: u32,
}

impl Default for DecoderParameters {
    fn default() -> Self {
        Self {
            output_color_format: ColorFormat::I420,
            video_type: VideoBitstreamType::Svc,
            error_concealment: true,
            target_temporal_layer: None,
            cpu_load_hint: 0,
        }
    }
}

impl DecoderParameters {
    /// Create parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output color format.
    #[must_use]
    pub fn with_color_format(mut self, format: ColorFormat) -> Self {
        self.output_color_format = format;
        self
    }

    /// Set the bitstream variant.
    #[must_use]
    pub fn with_video_type(mut self, video_type: VideoBitstreamType) -> Self {
        self.video_type = video_type;
        self
    }

    /// Enable or disable error concealment.
    #[must_use]
    pub fn with_error_concealment(mut self, enabled: bool) -> Self {
        self.error_concealment = enabled;
        self
    }

    /// Limit decoding to temporal layers up to `layer`.
    #[must_use]
    pub fn with_target_temporal_layer(mut self, layer: u8) -> Self {
        self.target_temporal_layer = Some(layer);
        self
    }
}

/// Contract implemented by the decoding engine.
///
/// Every call receives the [`DecoderContext`] by mutable reference; the
/// engine keeps no state of its own between calls that the context does not
/// carry. All calls run synchronously on the caller's thread.
pub trait DecodeEngine: Send {
    /// Prepare a freshly allocated context for use.
    fn init_context(&mut self, ctx: &mut DecoderContext) -> Result<()>;

    /// Release engine-internal resources held through the context.
    fn teardown(&mut self, ctx: &mut DecoderContext);

    /// Apply caller-supplied initialization parameters.
    fn apply_config(&mut self, ctx: &mut DecoderContext, params: &DecoderParameters) -> Result<()>;

    /// Select the output color format for subsequent frames.
    fn set_color_format(&mut self, ctx: &mut DecoderContext, format: ColorFormat) -> Result<()>;

    /// Decode one access unit.
    ///
    /// Mutates `ctx.status`, `ctx.last_nal_header`, and the feedback fields
    /// regardless of outcome; populates `out`'s planes and geometry only on
    /// success. The dispatch itself never fails: the outcome is read from
    /// `ctx.status` by the caller.
    fn decode_access_unit(
        &mut self,
        ctx: &mut DecoderContext,
        input: &[u8],
        out: &mut OutputDescriptor,
    );

    /// Invalidate cached SPS/PPS so the next access unit must re-supply them.
    fn reset_parameter_sets(&mut self, ctx: &mut DecoderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_builder() {
        let params = DecoderParameters::new()
            .with_color_format(ColorFormat::Nv12)
            .with_video_type(VideoBitstreamType::Avc)
            .with_error_concealment(false)
            .with_target_temporal_layer(1);

        assert_eq!(params.output_color_format, ColorFormat::Nv12);
        assert_eq!(params.video_type, VideoBitstreamType::Avc);
        assert!(!params.error_concealment);
        assert_eq!(params.target_temporal_layer, Some(1));
    }

    #[test]
    fn test_parameters_default() {
        let params = DecoderParameters::default();
        assert_eq!(params.output_color_format, ColorFormat::I420);
        assert_eq!(params.video_type, VideoBitstreamType::Svc);
        assert!(params.error_concealment);
        assert_eq!(params.cpu_load_hint, 0);
    }
}
