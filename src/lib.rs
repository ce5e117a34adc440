//! Tilemix is a server-side raster tile blender.
//!
//! An ordered stack of encoded PNG/JPEG layers (bottom first), each with an
//! optional canvas offset, is decoded, composited with premultiplied-alpha
//! "over", optionally recolored through HSL space, quantized, and re-encoded
//! into a single output buffer. The pipeline decodes as little as it can get
//! away with: layers hidden behind an opaque cover are never touched, and a
//! single opaque cover layer is echoed back without any codec work at all.
//!
//! The public API is job-oriented:
//!
//! - Build a [`Blender`] (a small worker pool)
//! - Submit layers plus [`BlendOptions`] via [`Blender::blend`]
//! - Consume the result through the returned [`BlendHandle`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod blend;
mod codec;
mod compose;
mod encode;
mod foundation;
mod job;
mod quant;
mod tint;

pub use crate::blend::{BlendHandle, BlendOutput, Blender};
pub use crate::codec::{SniffedFormat, sniff};
pub use crate::foundation::color::{argb_to_hex, hex_to_argb, hsl_to_rgb, rgb_to_hsl};
pub use crate::foundation::error::{TilemixError, TilemixResult};
pub use crate::job::{
    BlendOptions, Encoder, Format, LayerInput, MAX_MINIZ_COMPRESSION, MAX_ZLIB_COMPRESSION,
    QuantMode,
};
pub use crate::quant::palette::Palette;
pub use crate::tint::Tint;

/// Identification of the in-crate PNG writer and its deflate backends.
pub const PNG_BACKEND: &str = concat!("tilemix-png/", env!("CARGO_PKG_VERSION"), " (zlib, miniz)");

/// Identification of the JPEG codec backend.
pub const JPEG_BACKEND: &str = "image-jpeg";
