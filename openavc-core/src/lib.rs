//! # OpenAVC Core
//!
//! Core types shared by the OpenAVC decoder components:
//! - Error handling and decode status codes
//! - Pixel/color format and decode mode definitions
//! - Output buffer descriptors

pub mod buffer;
pub mod error;
pub mod format;

pub use buffer::{OutputDescriptor, SystemBufferGeometry, MAX_PLANES};
pub use error::{DecodeStatus, DecoderError, Result};
pub use format::{BufferProperty, ColorFormat, DecodeMode, VideoBitstreamType};
