// ABOUTME: OKLCH to sRGB conversion, gamut clipping, and hex formatting
// ABOUTME: Gamut clipping binary-searches chroma so lightness and hue never move

use tekton_types::{OklchColor, RgbColor};
use thiserror::Error;

/// Errors from parsing color text input. Conversion itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("malformed hex color: {0}")]
    MalformedHex(String),
}

/// Iteration count for the chroma binary search. Fixed rather than
/// tolerance-driven so worst-case cost is input-independent; 20 halvings of a
/// chroma interval of at most 0.4 give ~6 decimal digits of precision.
const GAMUT_SEARCH_ITERATIONS: u32 = 20;

/// Slack for floating-point noise at the gamut boundary.
const GAMUT_EPSILON: f64 = 1e-6;

// ============================================================================
// OKLCH -> linear sRGB (via OKLab and LMS)
// ============================================================================

fn oklch_to_linear_srgb(color: &OklchColor) -> (f64, f64, f64) {
    let h_rad = color.h.to_radians();
    let a = color.c * h_rad.cos();
    let b = color.c * h_rad.sin();

    let l_ = color.l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = color.l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = color.l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
    let g = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
    let b = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

    (r, g, b)
}

fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

pub(crate) fn channel_to_linear(channel: u8) -> f64 {
    srgb_to_linear(channel as f64 / 255.0)
}

// ============================================================================
// Gamut handling
// ============================================================================

/// Whether the color lies inside the sRGB gamut.
///
/// The achromatic extremes (pure black and pure white) are in gamut by
/// definition; everything else is tested in linear RGB space.
pub fn is_in_srgb_gamut(color: &OklchColor) -> bool {
    if color.c == 0.0 && (color.l == 0.0 || color.l == 1.0) {
        return true;
    }
    let (r, g, b) = oklch_to_linear_srgb(color);
    let lo = -GAMUT_EPSILON;
    let hi = 1.0 + GAMUT_EPSILON;
    r >= lo && r <= hi && g >= lo && g <= hi && b >= lo && b <= hi
}

/// Clip a color into the sRGB gamut by reducing chroma only.
///
/// Chroma reduction toward gray is the perceptually safest mapping: lightness
/// and hue are held constant, so `clip_to_srgb_gamut(c).l == c.l` and
/// `.h == c.h` always. In-gamut input is returned unchanged, which also makes
/// the operation idempotent.
///
/// Precondition: channels are within valid OKLCH ranges. Out-of-spec input
/// (e.g. `l > 1`) is the caller's responsibility.
pub fn clip_to_srgb_gamut(color: &OklchColor) -> OklchColor {
    if is_in_srgb_gamut(color) {
        return *color;
    }

    // Binary search for the maximal in-gamut chroma. Chroma zero is always
    // representable for l in [0, 1], so the lower bound stays valid.
    let mut lo = 0.0_f64;
    let mut hi = color.c;
    for _ in 0..GAMUT_SEARCH_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let candidate = OklchColor::new(color.l, mid, color.h);
        if is_in_srgb_gamut(&candidate) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    OklchColor::new(color.l, lo, color.h)
}

// ============================================================================
// Output conversion
// ============================================================================

/// Convert an OKLCH color to 8-bit sRGB, gamut-clipping first.
///
/// Precondition: channels are within valid OKLCH ranges; the engine does not
/// re-clamp inputs.
pub fn oklch_to_rgb(color: &OklchColor) -> RgbColor {
    let clipped = clip_to_srgb_gamut(color);
    let (r, g, b) = oklch_to_linear_srgb(&clipped);

    let encode = |v: f64| -> u8 {
        let gamma = linear_to_srgb(v.clamp(0.0, 1.0));
        (gamma * 255.0).round().clamp(0.0, 255.0) as u8
    };

    RgbColor::new(encode(r), encode(g), encode(b))
}

/// Format an RGB color as lowercase `#rrggbb`.
pub fn rgb_to_hex(color: &RgbColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Convert an OKLCH color straight to its hex representation.
pub fn oklch_to_hex(color: &OklchColor) -> String {
    rgb_to_hex(&oklch_to_rgb(color))
}

/// Parse a `#rrggbb` hex string into an RGB color.
pub fn parse_hex(input: &str) -> Result<RgbColor, ColorError> {
    let digits = input
        .strip_prefix('#')
        .ok_or_else(|| ColorError::MalformedHex(input.to_string()))?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::MalformedHex(input.to_string()));
    }
    let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    Ok(RgbColor::new(
        parse(0..2).map_err(|_| ColorError::MalformedHex(input.to_string()))?,
        parse(2..4).map_err(|_| ColorError::MalformedHex(input.to_string()))?,
        parse(4..6).map_err(|_| ColorError::MalformedHex(input.to_string()))?,
    ))
}
