//! Encoder selection and quantization dispatch.

use crate::codec::{jpeg, png};
use crate::compose::Surface;
use crate::foundation::error::TilemixResult;
use crate::job::{BlendOptions, Format, QuantMode};
use crate::quant;

/// Encode the composited canvas per the job options.
///
/// `alpha` is the accumulated transparency flag from the decode walk: set
/// when the layer stack may let the background show through. It decides
/// RGBA-vs-RGB true-color output and whether the hextree quantizer is
/// eligible.
pub(crate) fn encode(canvas: &Surface, options: &BlendOptions, alpha: bool) -> TilemixResult<Vec<u8>> {
    let mut out = Vec::new();

    if options.format == Format::Jpeg {
        let quality = if options.quality == 0 { 80 } else { options.quality };
        tracing::debug!(quality, "encoding jpeg");
        jpeg::write_jpeg(&mut out, canvas, quality as u8)?;
        return Ok(out);
    }

    if let Some(palette) = options.palette.as_deref().filter(|p| p.is_valid()) {
        tracing::debug!(entries = palette.len(), "encoding png8 with supplied palette");
        let indices = quant::map_to_palette(canvas, palette.entries());
        png::write_indexed(
            &mut out,
            canvas.width,
            canvas.height,
            palette.entries(),
            &indices,
            options.compression,
            options.encoder,
        )?;
    } else if options.quality > 0 {
        let quantized = if alpha && options.mode == QuantMode::Hextree {
            tracing::debug!(colors = options.quality, "encoding png8 via hextree");
            quant::hextree::quantize(canvas, options.quality as u32)
        } else {
            tracing::debug!(colors = options.quality, "encoding png8 via octree");
            quant::octree::quantize(canvas, options.quality as u32)
        };
        png::write_indexed(
            &mut out,
            canvas.width,
            canvas.height,
            &quantized.palette,
            &quantized.indices,
            options.compression,
            options.encoder,
        )?;
    } else {
        tracing::debug!(alpha, "encoding true-color png");
        png::write_truecolor(&mut out, canvas, alpha, options.compression, options.encoder)?;
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/encode.rs"]
mod tests;
