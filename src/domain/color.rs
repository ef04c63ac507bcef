//! Colors and weighted palettes.

use serde::{Deserialize, Serialize};

use crate::core::utils::random::roll_below;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as opaque ABGR (little-endian bytes `[R, G, B, A]`), ready for a
    /// canvas `ImageData` copy.
    #[inline]
    pub fn to_abgr(self) -> u32 {
        0xFF00_0000 | ((self.b as u32) << 16) | ((self.g as u32) << 8) | self.r as u32
    }

    /// Multiply every channel by `factor` (expected in `0.0..=1.0`).
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Serialized palette entry: `{ "rgb": [r, g, b], "weight": 80 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub rgb: [u8; 3],
    pub weight: u32,
}

/// Ordered colors with integer weights. Weights need not sum to anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    weights: Vec<u32>,
    total_weight: u32,
}

impl Palette {
    /// Pairs `colors` with `weights`; a missing weight counts as 1.
    pub fn new(colors: &[Rgb], weights: &[u32]) -> Self {
        let weights: Vec<u32> = (0..colors.len())
            .map(|i| weights.get(i).copied().unwrap_or(1))
            .collect();
        let total_weight = weights.iter().fold(0u32, |acc, w| acc.saturating_add(*w));
        Self {
            colors: colors.to_vec(),
            weights,
            total_weight,
        }
    }

    pub fn single(color: Rgb) -> Self {
        Self::new(&[color], &[1])
    }

    pub fn from_entries(entries: &[PaletteEntry]) -> Self {
        let colors: Vec<Rgb> = entries.iter().map(|e| Rgb::new(e.rgb[0], e.rgb[1], e.rgb[2])).collect();
        let weights: Vec<u32> = entries.iter().map(|e| e.weight).collect();
        Self::new(&colors, &weights)
    }

    pub fn entries(&self) -> Vec<PaletteEntry> {
        self.colors
            .iter()
            .zip(&self.weights)
            .map(|(c, w)| PaletteEntry { rgb: [c.r, c.g, c.b], weight: *w })
            .collect()
    }

    /// At least one color can be picked.
    pub fn is_usable(&self) -> bool {
        self.total_weight > 0
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Weighted pick. Single-color palettes do not consume randomness.
    pub fn sample(&self, rng: &mut u32) -> Rgb {
        match self.colors.len() {
            0 => Rgb::BLACK,
            1 => self.colors[0],
            _ if self.total_weight == 0 => self.colors[0],
            _ => {
                let mut roll = roll_below(rng, self.total_weight);
                for (color, weight) in self.colors.iter().zip(&self.weights) {
                    if roll < *weight {
                        return *color;
                    }
                    roll -= weight;
                }
                self.colors[self.colors.len() - 1]
            }
        }
    }
}
