//! The compositing engine: canvas allocation, viewport clipping, and the
//! premultiplied porter-duff "over" blend.

use crate::foundation::error::{TilemixError, TilemixResult};

/// A row-major 32-bit ARGB pixel surface.
#[derive(Clone, Debug)]
pub(crate) struct Surface {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixels: Vec<u32>,
}

impl Surface {
    /// Allocate a zeroed surface, reporting allocation failure instead of
    /// aborting.
    pub(crate) fn new(width: u32, height: u32) -> TilemixResult<Self> {
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| TilemixError::allocation("Memory allocation failed"))?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Write `argb` to every pixel. The matte is a 32-bit word, so this is a
    /// word fill, not a byte fill.
    pub(crate) fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }
}

/// Blend one source pixel over one target pixel.
///
/// Both words are ARGB. Fully transparent sources leave the target alone;
/// fully opaque sources (or fully transparent targets) replace it. The mixed
/// case runs the premultiplied "over" in integer arithmetic; intermediates
/// exceed 32 bits, so everything is widened to u64.
#[inline]
pub(crate) fn composite_pixel(target: u32, source: u32) -> u32 {
    if source <= 0x00FFFFFF {
        // Top pixel is fully transparent.
        target
    } else if source >= 0xFF000000 || target <= 0x00FFFFFF {
        // Top pixel is fully opaque or bottom pixel is fully transparent.
        source
    } else {
        let a1 = u64::from((source >> 24) & 0xff);
        let r1 = u64::from(source & 0xff);
        let g1 = u64::from((source >> 8) & 0xff);
        let b1 = u64::from((source >> 16) & 0xff);

        let a0 = u64::from((target >> 24) & 0xff);
        let r0 = u64::from(target & 0xff) * a0;
        let g0 = u64::from((target >> 8) & 0xff) * a0;
        let b0 = u64::from((target >> 16) & 0xff) * a0;

        // ((c1 << 8) - c0) * a1 + (c0 << 8), reordered so every term stays
        // non-negative (a1 < 256).
        let a0 = ((a1 + a0) << 8) - a0 * a1;
        let r0 = ((r1 << 8) * a1 + r0 * (256 - a1)) / a0;
        let g0 = ((g1 << 8) * a1 + g0 * (256 - a1)) / a0;
        let b0 = ((b1 << 8) * a1 + b0 * (256 - a1)) / a0;
        let a0 = a0 >> 8;
        ((a0 as u32) << 24) | ((b0 as u32) << 16) | ((g0 as u32) << 8) | (r0 as u32)
    }
}

/// Composite a layer placed at `(x, y)` onto the canvas, clipping to both
/// surfaces.
///
/// Offsets may be negative. Source and target rectangles always have
/// identical dimensions; layers entirely outside the canvas blit nothing.
pub(crate) fn composite(canvas: &mut Surface, layer: &Surface, x: i32, y: i32) {
    let image_width = layer.width as i32;
    let image_height = layer.height as i32;
    let canvas_width = canvas.width as i32;
    let canvas_height = canvas.height as i32;

    let source_x = (-x).max(0);
    let source_y = (-y).max(0);

    let width = image_width - source_x - (x + image_width - canvas_width).max(0);
    let height = image_height - source_y - (y + image_height - canvas_height).max(0);
    if width <= 0 || height <= 0 {
        return;
    }

    let target_x = x.max(0);
    let target_y = y.max(0);

    let mut source_pos = (source_y * image_width + source_x) as usize;
    let mut target_pos = (target_y * canvas_width + target_x) as usize;

    for _ in 0..height {
        for col in 0..width as usize {
            canvas.pixels[target_pos + col] =
                composite_pixel(canvas.pixels[target_pos + col], layer.pixels[source_pos + col]);
        }
        source_pos += image_width as usize;
        target_pos += canvas_width as usize;
    }
}

#[cfg(test)]
#[path = "../tests/unit/compose.rs"]
mod tests;
