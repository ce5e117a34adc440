//! Externally supplied palettes.
//!
//! Callers that render many tiles against one fixed palette construct a
//! [`Palette`] once and share it across jobs behind an `Arc`; jobs only read
//! it. A valid palette forces indexed PNG output.

use crate::foundation::error::{TilemixError, TilemixResult};

/// A fixed ARGB palette of up to 256 entries.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<u32>,
}

impl Palette {
    /// Parse a palette from 4-byte `r,g,b,a` entries.
    pub fn from_rgba(bytes: &[u8]) -> TilemixResult<Self> {
        if bytes.is_empty() || bytes.len() % 4 != 0 {
            return Err(TilemixError::argument("Invalid palette length"));
        }
        let entries = bytes
            .chunks_exact(4)
            .map(|e| pack(e[0], e[1], e[2], e[3]))
            .collect();
        Self::from_entries(entries)
    }

    /// Parse a palette from 3-byte `r,g,b` entries; alpha is opaque.
    pub fn from_rgb(bytes: &[u8]) -> TilemixResult<Self> {
        if bytes.is_empty() || bytes.len() % 3 != 0 {
            return Err(TilemixError::argument("Invalid palette length"));
        }
        let entries = bytes
            .chunks_exact(3)
            .map(|e| pack(e[0], e[1], e[2], 0xff))
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<u32>) -> TilemixResult<Self> {
        if entries.len() > 256 {
            return Err(TilemixError::argument(
                "Palette must hold at most 256 entries",
            ));
        }
        Ok(Self { entries })
    }

    /// Whether the palette can drive PNG8 output.
    pub fn is_valid(&self) -> bool {
        !self.entries.is_empty() && self.entries.len() <= 256
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The ARGB palette entries.
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }
}

fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r)
}

#[cfg(test)]
#[path = "../../tests/unit/quant/palette.rs"]
mod tests;
