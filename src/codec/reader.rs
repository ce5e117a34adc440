use std::io::Cursor;

use image::ImageDecoder;
use image::codecs::jpeg::JpegDecoder;
use image::codecs::png::PngDecoder;

use crate::codec::{SniffedFormat, sniff};
use crate::foundation::color::pack_argb;
use crate::foundation::error::{TilemixError, TilemixResult};

/// Decoder facade bound to one encoded buffer.
///
/// [`ImageReader::probe`] reads the container header only: dimensions and
/// whether the encoding may carry non-opaque pixels (for PNG that includes
/// palette images with a tRNS chunk; JPEG never does). [`ImageReader::decode`]
/// materializes the ARGB surface. Recoverable decode oddities are collected
/// as warnings rather than failing the layer.
#[derive(Debug)]
pub(crate) struct ImageReader<'a> {
    bytes: &'a [u8],
    format: SniffedFormat,
    width: u32,
    height: u32,
    alpha: bool,
    warnings: Vec<String>,
    surface: Option<Vec<u32>>,
}

impl<'a> ImageReader<'a> {
    /// Sniff the container and read its header without decoding pixels.
    pub(crate) fn probe(bytes: &'a [u8]) -> TilemixResult<Self> {
        let Some(format) = sniff(bytes) else {
            return Err(TilemixError::decode(
                "Unknown image format: expected a PNG or JPEG signature",
            ));
        };

        let (width, height, alpha) = match format {
            SniffedFormat::Png => {
                let decoder = PngDecoder::new(Cursor::new(bytes))
                    .map_err(|e| TilemixError::decode(e.to_string()))?;
                let (w, h) = decoder.dimensions();
                (w, h, decoder.color_type().has_alpha())
            }
            SniffedFormat::Jpeg => {
                let decoder = JpegDecoder::new(Cursor::new(bytes))
                    .map_err(|e| TilemixError::decode(e.to_string()))?;
                let (w, h) = decoder.dimensions();
                (w, h, false)
            }
        };

        if width == 0 || height == 0 {
            return Err(TilemixError::decode(format!(
                "Invalid image dimensions {width}x{height}"
            )));
        }

        Ok(Self {
            bytes,
            format,
            width,
            height,
            alpha,
            warnings: Vec::new(),
            surface: None,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    /// Whether the encoding may carry non-opaque pixels.
    pub(crate) fn alpha(&self) -> bool {
        self.alpha
    }

    pub(crate) fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Decode the pixel data into a row-major ARGB surface.
    pub(crate) fn decode(&mut self) -> TilemixResult<()> {
        let dynamic = match self.format {
            SniffedFormat::Png => {
                let decoder = PngDecoder::new(Cursor::new(self.bytes))
                    .map_err(|e| TilemixError::decode(e.to_string()))?;
                self.note_depth_reduction(decoder.color_type());
                image::DynamicImage::from_decoder(decoder)
                    .map_err(|e| TilemixError::decode(e.to_string()))?
            }
            SniffedFormat::Jpeg => {
                let decoder = JpegDecoder::new(Cursor::new(self.bytes))
                    .map_err(|e| TilemixError::decode(e.to_string()))?;
                image::DynamicImage::from_decoder(decoder)
                    .map_err(|e| TilemixError::decode(e.to_string()))?
            }
        };

        let rgba = dynamic.to_rgba8();
        let mut surface = Vec::with_capacity(rgba.len() / 4);
        for px in rgba.as_raw().chunks_exact(4) {
            surface.push(pack_argb(
                u32::from(px[3]),
                u32::from(px[0]),
                u32::from(px[1]),
                u32::from(px[2]),
            ));
        }
        self.surface = Some(surface);
        Ok(())
    }

    /// Take ownership of the decoded surface, if [`ImageReader::decode`] ran.
    pub(crate) fn take_surface(&mut self) -> Option<Vec<u32>> {
        self.surface.take()
    }

    fn note_depth_reduction(&mut self, color: image::ColorType) {
        use image::ColorType::{L16, La16, Rgb16, Rgba16};
        if matches!(color, L16 | La16 | Rgb16 | Rgba16) {
            self.warnings
                .push("16-bit channel depth reduced to 8-bit".to_owned());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/reader.rs"]
mod tests;
