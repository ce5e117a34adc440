//! PNG writer with selectable deflate backends.
//!
//! Emits IHDR/PLTE/tRNS/IDAT/IEND with filter type 0 scanlines. The zlib
//! stream comes from `flate2` (default backend, levels 1..=9) or
//! `miniz_oxide` (levels 1..=10, 10 being uber compression). A level of 0 or
//! below picks the backend default.

use std::io::Write;

use crate::compose::Surface;
use crate::foundation::color::alpha_of;
use crate::foundation::error::{TilemixError, TilemixResult};
use crate::job::Encoder;

const BIT_DEPTH_8: u8 = 8;
const COLOR_RGB: u8 = 2;
const COLOR_INDEXED: u8 = 3;
const COLOR_RGBA: u8 = 6;

const DEFAULT_LEVEL: u32 = 6;

/// Write a true-color PNG, RGBA when `alpha` is set and RGB otherwise.
pub(crate) fn write_truecolor(
    out: &mut Vec<u8>,
    surface: &Surface,
    alpha: bool,
    compression: i32,
    encoder: Encoder,
) -> TilemixResult<()> {
    let bytes_per_pixel = if alpha { 4 } else { 3 };
    let width = surface.width as usize;
    let mut raw = Vec::with_capacity(surface.height as usize * (1 + width * bytes_per_pixel));
    for row in surface.pixels.chunks_exact(width) {
        raw.push(0); // filter: none
        for &px in row {
            raw.push((px & 0xff) as u8);
            raw.push(((px >> 8) & 0xff) as u8);
            raw.push(((px >> 16) & 0xff) as u8);
            if alpha {
                raw.push((px >> 24) as u8);
            }
        }
    }

    let color_type = if alpha { COLOR_RGBA } else { COLOR_RGB };
    write_png(out, surface.width, surface.height, color_type, None, &raw, compression, encoder)
}

/// Write an 8-bit indexed PNG from quantized indices and an ARGB palette.
///
/// A tRNS chunk is emitted only when some palette entry is non-opaque.
pub(crate) fn write_indexed(
    out: &mut Vec<u8>,
    width: u32,
    height: u32,
    palette: &[u32],
    indices: &[u8],
    compression: i32,
    encoder: Encoder,
) -> TilemixResult<()> {
    if palette.is_empty() || palette.len() > 256 {
        return Err(TilemixError::encode(format!(
            "Palette of {} entries cannot be written as PNG8",
            palette.len()
        )));
    }

    let width_usize = width as usize;
    let mut raw = Vec::with_capacity(height as usize * (1 + width_usize));
    for row in indices.chunks_exact(width_usize) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    write_png(out, width, height, COLOR_INDEXED, Some(palette), &raw, compression, encoder)
}

#[allow(clippy::too_many_arguments)]
fn write_png(
    out: &mut Vec<u8>,
    width: u32,
    height: u32,
    color_type: u8,
    palette: Option<&[u32]>,
    raw_scanlines: &[u8],
    compression: i32,
    encoder: Encoder,
) -> TilemixResult<()> {
    out.extend_from_slice(&super::PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[BIT_DEPTH_8, color_type, 0, 0, 0]);
    write_chunk(out, b"IHDR", &ihdr);

    if let Some(palette) = palette {
        let mut plte = Vec::with_capacity(palette.len() * 3);
        for &entry in palette {
            plte.push((entry & 0xff) as u8);
            plte.push(((entry >> 8) & 0xff) as u8);
            plte.push(((entry >> 16) & 0xff) as u8);
        }
        write_chunk(out, b"PLTE", &plte);

        if palette.iter().any(|&entry| alpha_of(entry) < 0xff) {
            let trns: Vec<u8> = palette.iter().map(|&entry| (entry >> 24) as u8).collect();
            write_chunk(out, b"tRNS", &trns);
        }
    }

    let idat = deflate(raw_scanlines, compression, encoder)?;
    write_chunk(out, b"IDAT", &idat);
    write_chunk(out, b"IEND", &[]);
    Ok(())
}

fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);

    let mut crc = flate2::Crc::new();
    crc.update(tag);
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}

fn deflate(raw: &[u8], compression: i32, encoder: Encoder) -> TilemixResult<Vec<u8>> {
    match encoder {
        Encoder::Default => {
            let level = if compression <= 0 {
                flate2::Compression::default()
            } else {
                flate2::Compression::new(compression as u32)
            };
            let mut z = flate2::write::ZlibEncoder::new(Vec::new(), level);
            z.write_all(raw)
                .map_err(|e| TilemixError::encode(format!("zlib deflate failed: {e}")))?;
            z.finish()
                .map_err(|e| TilemixError::encode(format!("zlib deflate failed: {e}")))
        }
        Encoder::Miniz => {
            let level = if compression <= 0 {
                DEFAULT_LEVEL as u8
            } else {
                compression as u8
            };
            Ok(miniz_oxide::deflate::compress_to_vec_zlib(raw, level))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/png.rs"]
mod tests;
