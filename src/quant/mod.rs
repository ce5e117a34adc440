//! Palette reduction for PNG8 output.
//!
//! Two quantizers share the same contract: take an ARGB surface and a target
//! palette size, produce an indexed image plus its palette. The octree works
//! on RGB and reserves at most one fully-transparent slot; the hextree works
//! on all four channels and carries per-entry alpha.

pub(crate) mod hextree;
pub(crate) mod octree;
pub mod palette;

use std::collections::HashMap;

use crate::compose::Surface;

/// An indexed image paired with its ARGB palette.
pub(crate) struct QuantizedImage {
    pub(crate) palette: Vec<u32>,
    pub(crate) indices: Vec<u8>,
}

/// Map every canvas pixel to its nearest palette entry (RGBA distance).
pub(crate) fn map_to_palette(surface: &Surface, entries: &[u32]) -> Vec<u8> {
    let mut cache: HashMap<u32, u8> = HashMap::new();
    surface
        .pixels
        .iter()
        .map(|&px| {
            *cache
                .entry(px)
                .or_insert_with(|| nearest_entry(px, entries))
        })
        .collect()
}

fn nearest_entry(px: u32, entries: &[u32]) -> u8 {
    let a = i64::from((px >> 24) & 0xff);
    let b = i64::from((px >> 16) & 0xff);
    let g = i64::from((px >> 8) & 0xff);
    let r = i64::from(px & 0xff);

    let mut best = 0usize;
    let mut best_dist = i64::MAX;
    for (i, &entry) in entries.iter().enumerate() {
        let da = a - i64::from((entry >> 24) & 0xff);
        let db = b - i64::from((entry >> 16) & 0xff);
        let dg = g - i64::from((entry >> 8) & 0xff);
        let dr = r - i64::from(entry & 0xff);
        let dist = da * da + db * db + dg * dg + dr * dr;
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best as u8
}

#[cfg(test)]
#[path = "../../tests/unit/quant/mapping.rs"]
mod tests;
