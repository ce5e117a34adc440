//! Job descriptors: layer inputs, the option surface, and its validation.
//!
//! Options deserialize from the external JSON shape (`format`, `quality`,
//! `matte`, `tint`, ...) with permissive string spellings, then validate into
//! the exact rules the pipeline relies on. Validation runs synchronously on
//! the caller's thread; everything it rejects is an argument error.

use std::sync::Arc;

use serde::Deserialize;
use smallvec::SmallVec;

use crate::foundation::color::hex_to_argb;
use crate::foundation::error::{TilemixError, TilemixResult};
use crate::quant::palette::Palette;
use crate::tint::Tint;

/// Highest zlib compression level of the default backend.
pub const MAX_ZLIB_COMPRESSION: i32 = 9;
/// Highest compression level of the miniz backend (uber compression).
pub const MAX_MINIZ_COMPRESSION: i32 = 10;

/// Output container format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics (the default).
    #[default]
    Png,
    /// Baseline JPEG.
    Jpeg,
}

impl<'de> Deserialize<'de> for Format {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            _ => Err(serde::de::Error::custom("Invalid output format.")),
        }
    }
}

/// Quantizer used for PNG8 output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuantMode {
    /// RGB octree (the default).
    #[default]
    Octree,
    /// RGBA hextree, used when the canvas retains transparency.
    Hextree,
}

impl<'de> Deserialize<'de> for QuantMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unrecognized spellings keep the default quantizer.
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "hextree" | "h" => Ok(Self::Hextree),
            _ => Ok(Self::Octree),
        }
    }
}

/// Deflate backend used by the PNG writer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoder {
    /// The zlib backend (the default), levels 1..=9.
    #[default]
    Default,
    /// The miniz backend, levels 1..=10.
    Miniz,
}

impl<'de> Deserialize<'de> for Encoder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Only "miniz" selects the alternate backend.
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "miniz" => Ok(Self::Miniz),
            _ => Ok(Self::Default),
        }
    }
}

impl Encoder {
    pub(crate) fn max_compression(self) -> i32 {
        match self {
            Self::Default => MAX_ZLIB_COMPRESSION,
            Self::Miniz => MAX_MINIZ_COMPRESSION,
        }
    }
}

/// One input layer: an encoded PNG or JPEG buffer, optionally placed.
#[derive(Clone, Debug)]
pub enum LayerInput {
    /// A bare buffer at the origin. A single bare buffer without `reencode`
    /// echoes straight through without being decoded.
    Buffer(Vec<u8>),
    /// A buffer with an explicit canvas offset; always takes the full
    /// decode path.
    Placed {
        /// Encoded image bytes.
        buffer: Vec<u8>,
        /// Horizontal canvas offset, may be negative.
        x: i32,
        /// Vertical canvas offset, may be negative.
        y: i32,
    },
}

impl From<Vec<u8>> for LayerInput {
    fn from(buffer: Vec<u8>) -> Self {
        Self::Buffer(buffer)
    }
}

impl LayerInput {
    pub(crate) fn into_parts(self) -> (Vec<u8>, i32, i32) {
        match self {
            Self::Buffer(buffer) => (buffer, 0, 0),
            Self::Placed { buffer, x, y } => (buffer, x, y),
        }
    }
}

/// Options accepted by [`crate::Blender::blend`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BlendOptions {
    /// Output container; PNG when unset.
    pub format: Format,
    /// JPEG: 0 picks 80, else 0..=100. PNG: 0 disables quantization,
    /// 2..=256 is the palette size; 1 is rejected.
    pub quality: i32,
    /// Force the full decode and encode path even for one-layer jobs.
    pub reencode: bool,
    /// Canvas width; 0 derives it from the first visible layer.
    pub width: i32,
    /// Canvas height; 0 derives it from the first visible layer.
    pub height: i32,
    /// Background matte as an ARGB word, parsed from `#RRGGBB[AA]`. A
    /// non-zero matte forces `reencode`.
    #[serde(deserialize_with = "de_matte")]
    pub matte: u32,
    /// Quantizer for PNG8 output.
    pub mode: QuantMode,
    /// Deflate backend for PNG output.
    pub encoder: Encoder,
    /// Compression level, capped per backend; 0 or below picks the backend
    /// default.
    pub compression: i32,
    /// Externally supplied palette; when valid it forces indexed PNG output.
    /// Shared read-only across jobs.
    #[serde(skip)]
    pub palette: Option<Arc<Palette>>,
    /// HSL recolor ranges; `None` skips the pass entirely.
    pub tint: Option<Tint>,
}

fn de_matte<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(hex_to_argb(&s))
}

impl BlendOptions {
    /// Validate and normalize the options in place.
    pub(crate) fn validate(&mut self) -> TilemixResult<()> {
        match self.format {
            Format::Jpeg => {
                if self.quality == 0 {
                    self.quality = 80;
                } else if self.quality < 0 || self.quality > 100 {
                    return Err(TilemixError::argument("JPEG quality is range 0-100."));
                }
            }
            Format::Png => {
                if self.quality == 1 || self.quality > 256 {
                    return Err(TilemixError::argument(
                        "PNG images must be quantized between 2 and 256 colors.",
                    ));
                }
            }
        }

        // Single-layer alpha PNGs only show their matte when reencoded.
        if self.matte != 0 && !self.reencode {
            self.reencode = true;
        }

        let max_compression = self.encoder.max_compression();
        if self.compression > max_compression {
            return Err(TilemixError::argument(format!(
                "Compression level must be between 1 and {max_compression}"
            )));
        }

        Ok(())
    }
}

/// A validated unit of work handed to the worker pool. Typical jobs carry a
/// handful of layers, so the stack lives inline.
pub(crate) struct BlendJob {
    pub(crate) layers: SmallVec<[JobLayer; 8]>,
    pub(crate) options: BlendOptions,
    pub(crate) warnings: Vec<String>,
}

pub(crate) struct JobLayer {
    pub(crate) buffer: Vec<u8>,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) decoded: Option<crate::compose::Surface>,
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
