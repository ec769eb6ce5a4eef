//! # OpenAVC Decoder
//!
//! The decoder orchestration layer: owns the decoder's lifecycle, dispatches
//! each access unit into the decoding engine, interprets the engine's
//! outcome, and drives the recovery bookkeeping when decoding fails.
//!
//! The actual bitstream-to-pixel work (entropy decoding, reconstruction,
//! parameter-set parsing, reference-picture management) lives behind the
//! [`DecodeEngine`] trait.
//!
//! ```no_run
//! # use openavc_decoder::{AvcDecoder, DecodeEngine, DecoderParameters};
//! # use openavc_core::OutputDescriptor;
//! # fn run(engine: impl DecodeEngine) -> openavc_core::Result<()> {
//! let mut decoder = AvcDecoder::new(engine);
//! decoder.initialize(&DecoderParameters::default())?;
//!
//! let mut out = OutputDescriptor::new();
//! decoder.decode_frame(&[0, 0, 0, 1, 0x65], &mut out)?;
//! if out.has_frame() {
//!     // consume out.planes
//! }
//!
//! // Zero-length input marks the end of the stream.
//! decoder.decode_frame(&[], &mut out)?;
//! decoder.uninitialize();
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod decoder;
pub mod dump;
pub mod engine;
pub mod nal;
pub mod options;

pub use context::DecoderContext;
pub use decoder::{AvcDecoder, DecoderConfig};
pub use engine::{DecodeEngine, DecoderParameters};
pub use nal::{NalUnitHeader, NalUnitType, VclNalFeedback};
pub use options::{DecoderOption, OptionQuery, OptionValue};
