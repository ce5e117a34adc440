//! Post-composite HSL recoloring.

use serde::Deserialize;

use crate::compose::Surface;
use crate::foundation::color::{hsl_to_rgb, rgb_to_hsl};

/// HSL remap ranges applied to the composited canvas.
///
/// Each field is a `[lo, hi]` mapping range for hue, saturation, lightness
/// and alpha. The ranges are accepted and retained for callers, but the
/// current transform only re-derives every pixel through HSL space and back
/// (with truncation); applying the ranges is a future contract, so their
/// values do not yet affect the output. Supplying any tint at all enables
/// the pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    /// Hue mapping range.
    pub h: [f64; 2],
    /// Saturation mapping range.
    pub s: [f64; 2],
    /// Lightness mapping range.
    pub l: [f64; 2],
    /// Alpha mapping range.
    pub a: [f64; 2],
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            h: [0.0, 1.0],
            s: [0.0, 1.0],
            l: [0.0, 1.0],
            a: [0.0, 1.0],
        }
    }
}

impl Tint {
    /// Run the recolor pass over every canvas pixel. Alpha is preserved.
    pub(crate) fn apply(&self, canvas: &mut Surface) {
        for px in &mut canvas.pixels {
            let rgba = *px;
            let r = (rgba & 0xff) as u8;
            let g = ((rgba >> 8) & 0xff) as u8;
            let b = ((rgba >> 16) & 0xff) as u8;
            let a = (rgba >> 24) & 0xff;
            let (h, s, l) = rgb_to_hsl(r, g, b);
            let (r, g, b) = hsl_to_rgb(h, s, l);
            *px = (a << 24) | (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r);
        }
    }
}

impl<'de> Deserialize<'de> for Tint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            h: Option<Vec<f64>>,
            s: Option<Vec<f64>>,
            l: Option<Vec<f64>>,
            a: Option<Vec<f64>>,
        }

        fn pair<E: serde::de::Error>(
            name: &str,
            value: Option<Vec<f64>>,
            default: [f64; 2],
        ) -> Result<[f64; 2], E> {
            match value {
                None => Ok(default),
                Some(v) if v.len() == 2 => Ok([v[0], v[1]]),
                Some(_) => Err(E::custom(format!("{name} array must be a pair of values"))),
            }
        }

        let repr = Repr::deserialize(deserializer)?;
        let default = Tint::default();
        Ok(Tint {
            h: pair("h", repr.h, default.h)?,
            s: pair("s", repr.s, default.s)?,
            l: pair("l", repr.l, default.l)?,
            a: pair("a", repr.a, default.a)?,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/tint.rs"]
mod tests;
