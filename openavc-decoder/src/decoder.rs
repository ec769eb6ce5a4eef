//! Decoder facade: lifecycle, option dispatch, and the per-frame state
//! machine.

use std::path::PathBuf;

use openavc_core::{
    BufferProperty, DecoderError, OutputDescriptor, Result, SystemBufferGeometry,
    VideoBitstreamType,
};
use tracing::{debug, warn};

use crate::context::DecoderContext;
use crate::dump::BitstreamDump;
use crate::engine::{DecodeEngine, DecoderParameters};
use crate::options::{DecoderOption, OptionQuery, OptionValue};

/// Facade configuration.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Mirror raw input access units into dump files under this directory.
    pub bitstream_dump_dir: Option<PathBuf>,
}

impl DecoderConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the raw bitstream dump under `dir`.
    #[must_use]
    pub fn with_bitstream_dump(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bitstream_dump_dir = Some(dir.into());
        self
    }
}

/// The decoder orchestration layer.
///
/// Owns the [`DecoderContext`] for its lifetime, dispatches each access
/// unit into the decoding engine, interprets the engine's outcome, and
/// performs the resynchronization bookkeeping when decoding fails.
///
/// All operations are synchronous and run on the calling thread. One facade
/// serves one stream; concurrent calls require external serialization.
pub struct AvcDecoder<E: DecodeEngine> {
    engine: E,
    context: Option<Box<DecoderContext>>,
    config: DecoderConfig,
    dump: Option<BitstreamDump>,
}

impl<E: DecodeEngine> AvcDecoder<E> {
    /// Create an uninitialized decoder around `engine`.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, DecoderConfig::default())
    }

    /// Create an uninitialized decoder with an explicit configuration.
    pub fn with_config(engine: E, config: DecoderConfig) -> Self {
        Self {
            engine,
            context: None,
            config,
            dump: None,
        }
    }

    /// True once `initialize` has succeeded and `uninitialize` has not run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// Allocate the decoder context and hand it to the engine.
    ///
    /// Fails with [`DecoderError::AlreadyInitialized`] if a context already
    /// exists; call [`uninitialize`](Self::uninitialize) first to reuse the
    /// facade for a new stream. If the engine rejects the parameters, the
    /// half-built context is torn down before the error is surfaced and the
    /// decoder stays uninitialized.
    pub fn initialize(&mut self, params: &DecoderParameters) -> Result<()> {
        if self.context.is_some() {
            warn!("initialize called on an initialized decoder");
            return Err(DecoderError::AlreadyInitialized);
        }

        debug!(?params, "initializing decoder");
        let mut ctx = Box::new(DecoderContext::default());
        ctx.video_type = params.video_type;

        self.engine.init_context(&mut ctx)?;
        if let Err(e) = self.engine.apply_config(&mut ctx, params) {
            self.engine.teardown(&mut ctx);
            return Err(e);
        }
        ctx.output_color_format = params.output_color_format;
        self.context = Some(ctx);

        if let Some(dir) = &self.config.bitstream_dump_dir {
            match BitstreamDump::create(dir) {
                Ok(dump) => self.dump = Some(dump),
                Err(e) => warn!(error = %e, "could not create bitstream dump"),
            }
        }
        Ok(())
    }

    /// Tear down the engine state and release the context.
    ///
    /// Idempotent: calling it without a context is a no-op.
    pub fn uninitialize(&mut self) {
        if let Some(mut ctx) = self.context.take() {
            debug!("tearing down decoder context");
            self.engine.teardown(&mut ctx);
        }
        self.dump = None;
    }

    /// Apply a configuration option.
    pub fn set_option(&mut self, option: DecoderOption) -> Result<()> {
        let ctx = self
            .context
            .as_deref_mut()
            .ok_or(DecoderError::NotInitialized)?;

        match option {
            DecoderOption::OutputColorFormat(format) => {
                self.engine.set_color_format(ctx, format)?;
                ctx.output_color_format = format;
                Ok(())
            }
            DecoderOption::EndOfStream(eos) => {
                ctx.end_of_stream = eos;
                Ok(())
            }
            DecoderOption::DecodeMode(mode) => {
                ctx.mode = mode;
                // Software decoding writes to host memory; accelerated
                // decoding targets device memory except on macOS, where the
                // device path still hands back host buffers.
                ctx.output_buffer_property = if mode.is_software() || cfg!(target_os = "macos") {
                    BufferProperty::Host
                } else {
                    BufferProperty::Device
                };
                Ok(())
            }
            DecoderOption::OutputBufferProperty(property) => {
                if ctx.mode.is_software() {
                    return Err(DecoderError::invalid_param(
                        "output buffer property is fixed to host memory in software mode",
                    ));
                }
                ctx.output_buffer_property = property;
                Ok(())
            }
        }
    }

    /// Read a configuration or feedback option.
    pub fn get_option(&self, query: OptionQuery) -> Result<OptionValue> {
        let ctx = self.context.as_deref().ok_or(DecoderError::NotInitialized)?;

        match query {
            OptionQuery::OutputColorFormat => {
                Ok(OptionValue::ColorFormat(ctx.output_color_format))
            }
            OptionQuery::EndOfStream => Ok(OptionValue::Bool(ctx.end_of_stream)),
            OptionQuery::DecodeMode => Ok(OptionValue::DecodeMode(ctx.mode)),
            OptionQuery::OutputBufferProperty => Err(DecoderError::invalid_param(
                "output buffer property is write-only",
            )),
            OptionQuery::VclNalInAu => Ok(OptionValue::VclNal(ctx.vcl_nal_in_au)),
            OptionQuery::TemporalId => Ok(OptionValue::Int(ctx.temporal_id)),
            OptionQuery::DeviceInfo => Ok(OptionValue::None),
            OptionQuery::ReferenceLost => Ok(OptionValue::Bool(ctx.reference_lost_at_t0)),
            #[cfg(feature = "long-term-ref")]
            OptionQuery::IdrPicId => Ok(OptionValue::Int(ctx.idr_pic_id as i32)),
            #[cfg(feature = "long-term-ref")]
            OptionQuery::FrameNum => Ok(OptionValue::Int(ctx.frame_num)),
            #[cfg(feature = "long-term-ref")]
            OptionQuery::LtrMarkingFlag => Ok(OptionValue::Bool(ctx.ltr_marking_in_au)),
            #[cfg(feature = "long-term-ref")]
            OptionQuery::LtrMarkedFrameNum => Ok(OptionValue::Int(ctx.ltr_marked_frame_num)),
            #[cfg(feature = "long-term-ref")]
            OptionQuery::ParameterSetsLost => Ok(OptionValue::Bool(ctx.param_sets_lost)),
        }
    }

    /// Decode one access unit.
    ///
    /// An empty `input` is the end-of-stream marker: the final call of a
    /// stream may carry no bytes. On failure the engine's status is
    /// surfaced as [`DecoderError::Decode`]; if the failing NAL was a
    /// parameter set or an IDR slice, or the stream is plain AVC, the
    /// parameter-set state is invalidated first so subsequent calls know
    /// SPS/PPS must be re-acquired.
    pub fn decode_frame(&mut self, input: &[u8], out: &mut OutputDescriptor) -> Result<()> {
        let Self {
            engine,
            context,
            dump,
            ..
        } = self;
        let ctx = context.as_deref_mut().ok_or(DecoderError::NotInitialized)?;

        if input.is_empty() {
            ctx.end_of_stream = true;
        } else {
            if let Some(dump) = dump {
                dump.record(input);
            }
            ctx.end_of_stream = false;
        }

        ctx.reset_for_access_unit();
        out.clear_planes();
        out.buffer_property = ctx.output_buffer_property;

        engine.decode_access_unit(ctx, input, out);
        out.decode_mode = ctx.active_mode;

        if ctx.status.is_error() {
            let nal_type = ctx.last_nal_header.unit_type;
            if nal_type.is_parameter_set()
                || nal_type.is_idr()
                || ctx.video_type == VideoBitstreamType::Avc
            {
                // Losing a parameter set or an IDR invalidates everything
                // that predicts from it: flag the loss and force SPS/PPS
                // re-acquisition before any further decode can succeed.
                #[cfg(feature = "long-term-ref")]
                {
                    ctx.param_sets_lost = true;
                }
                #[cfg(not(feature = "long-term-ref"))]
                {
                    ctx.reference_lost_at_t0 = true;
                }
                engine.reset_parameter_sets(ctx);
            }
            warn!(status = %ctx.status, nal_type = ?nal_type, "decode failed");
            return Err(DecoderError::Decode(ctx.status));
        }

        Ok(())
    }

    /// Legacy decode entry point using stride/width/height geometry.
    ///
    /// Translates the stride-based call style into the canonical
    /// [`OutputDescriptor`] call, defaulting the buffer location to host
    /// memory. On success the caller's geometry is updated to the decoded
    /// frame's actual dimensions and the descriptor is returned.
    pub fn decode_frame_with_strides(
        &mut self,
        input: &[u8],
        geometry: &mut SystemBufferGeometry,
    ) -> Result<OutputDescriptor> {
        let mut out = OutputDescriptor {
            width: geometry.width,
            height: geometry.height,
            strides: [geometry.strides[0], geometry.strides[1], 0],
            buffer_property: BufferProperty::Host,
            ..Default::default()
        };

        self.decode_frame(input, &mut out)?;

        geometry.width = out.width;
        geometry.height = out.height;
        geometry.strides = [out.strides[0], out.strides[1]];
        Ok(out)
    }

    /// Legacy single-buffer decode entry point.
    ///
    /// Dead functionality kept for interface compatibility: it performs no
    /// decoding and unconditionally reports success, leaving `dst`
    /// untouched. Use [`decode_frame`](Self::decode_frame) instead.
    #[deprecated(note = "performs no decoding; use decode_frame")]
    pub fn decode_frame_ex(&mut self, _input: &[u8], _dst: &mut [u8]) -> Result<()> {
        Ok(())
    }

    /// Borrow the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: DecodeEngine> Drop for AvcDecoder<E> {
    fn drop(&mut self) {
        self.uninitialize();
    }
}
