//! JPEG writer over the `image` crate's baseline encoder. Alpha is discarded.

use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

use crate::compose::Surface;
use crate::foundation::error::{TilemixError, TilemixResult};

pub(crate) fn write_jpeg(out: &mut Vec<u8>, surface: &Surface, quality: u8) -> TilemixResult<()> {
    let mut rgb = Vec::with_capacity(surface.pixels.len() * 3);
    for &px in &surface.pixels {
        rgb.push((px & 0xff) as u8);
        rgb.push(((px >> 8) & 0xff) as u8);
        rgb.push(((px >> 16) & 0xff) as u8);
    }

    JpegEncoder::new_with_quality(out, quality)
        .encode(&rgb, surface.width, surface.height, ExtendedColorType::Rgb8)
        .map_err(|e| TilemixError::encode(e.to_string()))
}
