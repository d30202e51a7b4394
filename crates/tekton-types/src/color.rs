// ABOUTME: Canonical color representations for the token system
// ABOUTME: OKLCH is the working space; RGB exists only for output formatting

use serde::{Deserialize, Serialize};

/// Valid chroma ceiling for OKLCH colors in this system.
pub const MAX_CHROMA: f64 = 0.4;

/// A color in the OKLCH cylindrical color space.
///
/// All derived colors are expressed in OKLCH before any conversion to RGB or
/// hex for output. Valid ranges are `l` in `[0, 1]`, `c` in `[0, 0.4]` and
/// `h` in `[0, 360)`. Conversion functions treat in-range input as a
/// precondition; generator functions clamp their outputs via [`OklchColor::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OklchColor {
    /// Perceptual lightness, 0.0 (black) to 1.0 (white).
    pub l: f64,
    /// Chroma, 0.0 (achromatic) to 0.4.
    pub c: f64,
    /// Hue angle in degrees, `[0, 360)`.
    pub h: f64,
}

impl OklchColor {
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Return a copy with every channel clamped into its valid range.
    ///
    /// Hue wraps rather than clamps, so `-20.0` becomes `340.0` and `360.0`
    /// becomes `0.0`.
    pub fn clamped(&self) -> Self {
        let mut h = self.h % 360.0;
        if h < 0.0 {
            h += 360.0;
        }
        Self {
            l: self.l.clamp(0.0, 1.0),
            c: self.c.clamp(0.0, MAX_CHROMA),
            h,
        }
    }

    /// Whether every channel is within its valid range.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.l)
            && (0.0..=MAX_CHROMA).contains(&self.c)
            && (0.0..360.0).contains(&self.h)
    }
}

/// An 8-bit-per-channel sRGB color, used for hex output and gamut tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
