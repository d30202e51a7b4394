// ABOUTME: WCAG 2.1 contrast math: relative luminance, ratios, AA/AAA checks
// ABOUTME: Works on gamut-clipped sRGB output so ratios match what ships to screens

use serde::{Deserialize, Serialize};
use tekton_types::{ColorScale, OklchColor, RgbColor, ScaleStep};

use crate::convert::{channel_to_linear, oklch_to_rgb};

/// WCAG 2.1 relative luminance of an 8-bit sRGB color.
pub fn relative_luminance(color: &RgbColor) -> f64 {
    let r = channel_to_linear(color.r);
    let g = channel_to_linear(color.g);
    let b = channel_to_linear(color.b);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio between two OKLCH colors, computed after sRGB conversion.
///
/// Range is 1.0 (identical) to 21.0 (black on white). Symmetric in its
/// arguments.
pub fn contrast_ratio(a: &OklchColor, b: &OklchColor) -> f64 {
    let la = relative_luminance(&oklch_to_rgb(a));
    let lb = relative_luminance(&oklch_to_rgb(b));
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WcagLevel {
    AA,
    AAA,
}

impl WcagLevel {
    /// Minimum contrast ratio for normal or large text at this level.
    pub fn min_ratio(&self, large_text: bool) -> f64 {
        match (self, large_text) {
            (WcagLevel::AA, false) => 4.5,
            (WcagLevel::AA, true) => 3.0,
            (WcagLevel::AAA, false) => 7.0,
            (WcagLevel::AAA, true) => 4.5,
        }
    }
}

/// Result of checking one foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    pub ratio: f64,
    pub required: f64,
    pub passes: bool,
}

/// Check a foreground/background pair against a WCAG level.
pub fn validate_color_pair(
    foreground: &OklchColor,
    background: &OklchColor,
    level: WcagLevel,
    large_text: bool,
) -> ContrastCheck {
    let ratio = contrast_ratio(foreground, background);
    let required = level.min_ratio(large_text);
    ContrastCheck {
        ratio,
        required,
        passes: ratio >= required,
    }
}

/// One text-on-background pairing checked inside a scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    pub foreground_step: ScaleStep,
    pub background_step: ScaleStep,
    pub check: ContrastCheck,
}

/// Step pairs that represent the usual text-on-background roles: dark text on
/// the light end of a scale and light text on the dark end.
const SCALE_PAIRINGS: [(ScaleStep, ScaleStep); 4] = [
    (ScaleStep::S900, ScaleStep::S50),
    (ScaleStep::S900, ScaleStep::S100),
    (ScaleStep::S50, ScaleStep::S900),
    (ScaleStep::S50, ScaleStep::S800),
];

/// Validate the conventional text/background pairings within one scale.
///
/// Missing steps are skipped rather than reported, so partial scales still
/// get reports for the pairs they can support.
pub fn validate_scale_contrast(scale: &ColorScale, level: WcagLevel) -> Vec<ContrastReport> {
    SCALE_PAIRINGS
        .iter()
        .filter_map(|&(fg_step, bg_step)| {
            let fg = scale.get(fg_step)?;
            let bg = scale.get(bg_step)?;
            Some(ContrastReport {
                foreground_step: fg_step,
                background_step: bg_step,
                check: validate_color_pair(fg, bg, level, false),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: OklchColor = OklchColor {
        l: 1.0,
        c: 0.0,
        h: 0.0,
    };
    const BLACK: OklchColor = OklchColor {
        l: 0.0,
        c: 0.0,
        h: 0.0,
    };

    #[test]
    fn luminance_of_extremes() {
        assert!((relative_luminance(&RgbColor::new(255, 255, 255)) - 1.0).abs() < 1e-9);
        assert_eq!(relative_luminance(&RgbColor::new(0, 0, 0)), 0.0);
    }

    #[test]
    fn black_on_white_is_twenty_one() {
        let ratio = contrast_ratio(&BLACK, &WHITE);
        assert!((ratio - 21.0).abs() < 0.01, "ratio was {ratio}");
    }

    #[test]
    fn ratio_is_symmetric() {
        let blue = OklchColor::new(0.62, 0.19, 259.0);
        assert_eq!(contrast_ratio(&blue, &WHITE), contrast_ratio(&WHITE, &blue));
    }

    #[test]
    fn identical_colors_have_unit_ratio() {
        let gray = OklchColor::new(0.5, 0.0, 0.0);
        assert!((contrast_ratio(&gray, &gray) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(WcagLevel::AA.min_ratio(false), 4.5);
        assert_eq!(WcagLevel::AA.min_ratio(true), 3.0);
        assert_eq!(WcagLevel::AAA.min_ratio(false), 7.0);
        assert_eq!(WcagLevel::AAA.min_ratio(true), 4.5);
    }

    #[test]
    fn black_on_white_passes_every_level() {
        for (level, large) in [
            (WcagLevel::AA, false),
            (WcagLevel::AA, true),
            (WcagLevel::AAA, false),
            (WcagLevel::AAA, true),
        ] {
            let check = validate_color_pair(&BLACK, &WHITE, level, large);
            assert!(check.passes);
        }
    }

    #[test]
    fn low_contrast_pair_fails_aa() {
        let a = OklchColor::new(0.6, 0.0, 0.0);
        let b = OklchColor::new(0.7, 0.0, 0.0);
        let check = validate_color_pair(&a, &b, WcagLevel::AA, false);
        assert!(!check.passes);
        assert!(check.ratio < check.required);
    }

    #[test]
    fn scale_validation_reports_standard_pairings() {
        let scale = crate::scale::generate_lightness_scale(&OklchColor::new(0.5, 0.1, 220.0));
        let reports = validate_scale_contrast(&scale, WcagLevel::AA);
        assert_eq!(reports.len(), 4);
        // Dark text on the lightest step should pass AA comfortably.
        let darkest_on_lightest = reports
            .iter()
            .find(|r| r.foreground_step == ScaleStep::S900 && r.background_step == ScaleStep::S50)
            .unwrap();
        assert!(darkest_on_lightest.check.passes);
    }

    #[test]
    fn partial_scale_skips_missing_pairings() {
        let mut scale = ColorScale::new();
        scale.insert(ScaleStep::S50, OklchColor::new(0.98, 0.01, 0.0));
        scale.insert(ScaleStep::S900, OklchColor::new(0.15, 0.01, 0.0));
        let reports = validate_scale_contrast(&scale, WcagLevel::AA);
        // Only the 900/50 and 50/900 pairings are satisfiable.
        assert_eq!(reports.len(), 2);
    }
}
