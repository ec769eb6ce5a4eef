//! Decoder context: the mutable state shared with the decoding engine.

use openavc_core::{
    BufferProperty, ColorFormat, DecodeMode, DecodeStatus, VideoBitstreamType,
};

use crate::nal::{NalUnitHeader, VclNalFeedback};

/// Mutable per-instance decoder state.
///
/// Exclusively owned by one [`AvcDecoder`](crate::AvcDecoder) and passed by
/// mutable reference into every engine call. Per-access-unit fields are reset
/// by [`reset_for_access_unit`](Self::reset_for_access_unit) before each
/// engine dispatch, so the context is never observed partially reset between
/// two decode calls.
#[derive(Debug, Clone)]
pub struct DecoderContext {
    /// Requested decode mode, set via configuration.
    pub mode: DecodeMode,
    /// Effective decode mode, maintained by the engine.
    pub active_mode: DecodeMode,
    /// Output buffer location, derived from `mode` unless overridden.
    pub output_buffer_property: BufferProperty,
    /// Selected output pixel format.
    pub output_color_format: ColorFormat,
    /// Bitstream variant, set from the initialization parameters.
    pub video_type: VideoBitstreamType,
    /// True exactly when the caller has signalled end of stream.
    pub end_of_stream: bool,
    /// Outcome of the last engine dispatch.
    pub status: DecodeStatus,
    /// Header of the most recently parsed NAL unit.
    pub last_nal_header: NalUnitHeader,
    /// Whether the current access unit contained a VCL NAL.
    pub vcl_nal_in_au: VclNalFeedback,
    /// Temporal layer id of the current access unit, -1 when unknown.
    pub temporal_id: i32,
    /// A reference picture was lost at temporal layer 0.
    pub reference_lost_at_t0: bool,
    /// SPS/PPS state was invalidated; they must be re-acquired.
    #[cfg(feature = "long-term-ref")]
    pub param_sets_lost: bool,
    /// The current access unit carries an LTR marking SEI.
    #[cfg(feature = "long-term-ref")]
    pub ltr_marking_in_au: bool,
    /// Frame number marked as long-term reference in the current AU.
    #[cfg(feature = "long-term-ref")]
    pub ltr_marked_frame_num: i32,
    /// Current frame number, -1 when unknown.
    #[cfg(feature = "long-term-ref")]
    pub frame_num: i32,
    /// idr_pic_id of the current IDR picture.
    #[cfg(feature = "long-term-ref")]
    pub idr_pic_id: u32,
}

impl Default for DecoderContext {
    fn default() -> Self {
        Self {
            mode: DecodeMode::Auto,
            active_mode: DecodeMode::Software,
            output_buffer_property: BufferProperty::Host,
            output_color_format: ColorFormat::I420,
            video_type: VideoBitstreamType::Svc,
            end_of_stream: false,
            status: DecodeStatus::ErrorFree,
            last_nal_header: NalUnitHeader::default(),
            vcl_nal_in_au: VclNalFeedback::Unknown,
            temporal_id: -1,
            reference_lost_at_t0: false,
            #[cfg(feature = "long-term-ref")]
            param_sets_lost: false,
            #[cfg(feature = "long-term-ref")]
            ltr_marking_in_au: false,
            #[cfg(feature = "long-term-ref")]
            ltr_marked_frame_num: 0,
            #[cfg(feature = "long-term-ref")]
            frame_num: -1,
            #[cfg(feature = "long-term-ref")]
            idr_pic_id: 0,
        }
    }
}

impl DecoderContext {
    /// Reset every per-access-unit field ahead of an engine dispatch.
    ///
    /// Sticky configuration (mode, color format, end-of-stream flag) and the
    /// lost-state flags set by a previous escalation survive the reset.
    pub fn reset_for_access_unit(&mut self) {
        self.status = DecodeStatus::ErrorFree;
        self.vcl_nal_in_au = VclNalFeedback::Unknown;
        self.temporal_id = -1;
        #[cfg(feature = "long-term-ref")]
        {
            self.reference_lost_at_t0 = false;
            self.ltr_marking_in_au = false;
            self.ltr_marked_frame_num = 0;
            self.frame_num = -1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nal::NalUnitType;

    #[test]
    fn test_default_context() {
        let ctx = DecoderContext::default();
        assert_eq!(ctx.mode, DecodeMode::Auto);
        assert_eq!(ctx.output_color_format, ColorFormat::I420);
        assert_eq!(ctx.status, DecodeStatus::ErrorFree);
        assert_eq!(ctx.temporal_id, -1);
        assert!(!ctx.end_of_stream);
    }

    #[test]
    fn test_reset_clears_per_call_fields() {
        let mut ctx = DecoderContext {
            status: DecodeStatus::BitstreamError,
            vcl_nal_in_au: VclNalFeedback::VclNalFound,
            temporal_id: 2,
            end_of_stream: true,
            output_color_format: ColorFormat::Rgba,
            ..Default::default()
        };
        ctx.last_nal_header.unit_type = NalUnitType::IdrSlice;
        ctx.reset_for_access_unit();

        assert_eq!(ctx.status, DecodeStatus::ErrorFree);
        assert_eq!(ctx.vcl_nal_in_au, VclNalFeedback::Unknown);
        assert_eq!(ctx.temporal_id, -1);
        // Sticky state survives.
        assert!(ctx.end_of_stream);
        assert_eq!(ctx.output_color_format, ColorFormat::Rgba);
        assert_eq!(ctx.last_nal_header.unit_type, NalUnitType::IdrSlice);
    }

    #[cfg(feature = "long-term-ref")]
    #[test]
    fn test_reset_clears_ltr_bookkeeping() {
        let mut ctx = DecoderContext {
            reference_lost_at_t0: true,
            ltr_marking_in_au: true,
            ltr_marked_frame_num: 7,
            frame_num: 12,
            param_sets_lost: true,
            ..Default::default()
        };
        ctx.reset_for_access_unit();

        assert!(!ctx.reference_lost_at_t0);
        assert!(!ctx.ltr_marking_in_au);
        assert_eq!(ctx.ltr_marked_frame_num, 0);
        assert_eq!(ctx.frame_num, -1);
        // The lost flag is cleared only by re-acquiring parameter sets, not
        // by the per-call reset.
        assert!(ctx.param_sets_lost);
    }
}
