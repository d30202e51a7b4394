// ABOUTME: Light/dark neutral palette generation with optional hue tinting
// ABOUTME: Neutrals use absolute lightness curves, independent of any brand color

use serde::{Deserialize, Serialize};
use tekton_types::{ColorScale, OklchColor, ScaleStep};

/// Chroma used for pure (untinted) neutrals. Slightly above zero so subtle
/// gradients between neighboring steps survive 8-bit quantization.
const PURE_CHROMA: f64 = 0.002;

/// Default chroma for tinted/custom neutrals.
const DEFAULT_TINT_CHROMA: f64 = 0.012;

/// Lightness curve shared by both modes through step 800.
const COMMON_CURVE: [(ScaleStep, f64); 9] = [
    (ScaleStep::S50, 0.98),
    (ScaleStep::S100, 0.95),
    (ScaleStep::S200, 0.88),
    (ScaleStep::S300, 0.78),
    (ScaleStep::S400, 0.65),
    (ScaleStep::S500, 0.50),
    (ScaleStep::S600, 0.40),
    (ScaleStep::S700, 0.30),
    (ScaleStep::S800, 0.22),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeutralMode {
    Light,
    Dark,
}

/// How much of the brand hue leaks into the neutral scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeutralTinting {
    /// Visually pure gray: minimal chroma, hue forced to 0.
    #[default]
    Pure,
    /// Brand hue at a subtle default intensity.
    Tinted,
    /// Brand hue at a caller-chosen intensity.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeutralPaletteConfig {
    pub mode: NeutralMode,
    #[serde(default)]
    pub tinting: NeutralTinting,
    /// Hue applied in tinted/custom modes; ignored for pure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_hue: Option<f64>,
    /// Chroma applied in tinted/custom modes; ignored for pure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chroma_intensity: Option<f64>,
}

impl NeutralPaletteConfig {
    pub fn new(mode: NeutralMode) -> Self {
        Self {
            mode,
            tinting: NeutralTinting::Pure,
            primary_hue: None,
            chroma_intensity: None,
        }
    }
}

/// Generate an 11-step neutral scale for the given mode and tinting.
///
/// Dark mode shares the light-mode curve through step 800 and then drops
/// lower (900 at 0.10, 950 at 0.05), because dark-mode neutrals invert
/// semantic roles: step 900 becomes the darkest background rather than the
/// darkest foreground. The step keys themselves are identical in both modes
/// so downstream references like `neutral.900` stay mode-agnostic.
pub fn generate_neutral_palette(config: &NeutralPaletteConfig) -> ColorScale {
    let (chroma, hue) = match config.tinting {
        NeutralTinting::Pure => (PURE_CHROMA, 0.0),
        NeutralTinting::Tinted | NeutralTinting::Custom => (
            config.chroma_intensity.unwrap_or(DEFAULT_TINT_CHROMA),
            config.primary_hue.unwrap_or(0.0),
        ),
    };

    let (l900, l950) = match config.mode {
        NeutralMode::Light => (0.15, 0.10),
        NeutralMode::Dark => (0.10, 0.05),
    };

    let mut scale = ColorScale::new();
    for (step, lightness) in COMMON_CURVE {
        scale.insert(step, OklchColor::new(lightness, chroma, hue).clamped());
    }
    scale.insert(ScaleStep::S900, OklchColor::new(l900, chroma, hue).clamped());
    scale.insert(ScaleStep::S950, OklchColor::new(l950, chroma, hue).clamped());
    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_mode_curve_matches_expected_values() {
        let scale = generate_neutral_palette(&NeutralPaletteConfig::new(NeutralMode::Light));
        let expected = [
            (ScaleStep::S50, 0.98),
            (ScaleStep::S100, 0.95),
            (ScaleStep::S200, 0.88),
            (ScaleStep::S300, 0.78),
            (ScaleStep::S400, 0.65),
            (ScaleStep::S500, 0.50),
            (ScaleStep::S600, 0.40),
            (ScaleStep::S700, 0.30),
            (ScaleStep::S800, 0.22),
            (ScaleStep::S900, 0.15),
            (ScaleStep::S950, 0.10),
        ];
        for (step, lightness) in expected {
            assert_eq!(scale.get(step).unwrap().l, lightness);
        }
    }

    #[test]
    fn dark_mode_deepens_the_tail() {
        let scale = generate_neutral_palette(&NeutralPaletteConfig::new(NeutralMode::Dark));
        assert_eq!(scale.get(ScaleStep::S900).unwrap().l, 0.10);
        assert_eq!(scale.get(ScaleStep::S950).unwrap().l, 0.05);
        // Shared head of the curve
        assert_eq!(scale.get(ScaleStep::S50).unwrap().l, 0.98);
        assert_eq!(scale.get(ScaleStep::S800).unwrap().l, 0.22);
    }

    #[test]
    fn both_modes_expose_the_same_step_keys() {
        let light = generate_neutral_palette(&NeutralPaletteConfig::new(NeutralMode::Light));
        let dark = generate_neutral_palette(&NeutralPaletteConfig::new(NeutralMode::Dark));
        assert!(light.is_complete());
        assert!(dark.is_complete());
    }

    #[test]
    fn pure_mode_ignores_hue_and_chroma_inputs() {
        let config = NeutralPaletteConfig {
            mode: NeutralMode::Light,
            tinting: NeutralTinting::Pure,
            primary_hue: Some(220.0),
            chroma_intensity: Some(0.05),
        };
        let scale = generate_neutral_palette(&config);
        for step in ScaleStep::ALL {
            let color = scale.get(step).unwrap();
            assert!(color.c <= 0.005);
            assert_eq!(color.h, 0.0);
        }
    }

    #[test]
    fn tinted_mode_applies_hue_and_default_chroma() {
        let config = NeutralPaletteConfig {
            mode: NeutralMode::Light,
            tinting: NeutralTinting::Tinted,
            primary_hue: Some(220.0),
            chroma_intensity: None,
        };
        let scale = generate_neutral_palette(&config);
        for step in ScaleStep::ALL {
            let color = scale.get(step).unwrap();
            assert_eq!(color.h, 220.0);
            assert_eq!(color.c, 0.012);
        }
    }

    #[test]
    fn custom_mode_applies_supplied_intensity() {
        let config = NeutralPaletteConfig {
            mode: NeutralMode::Dark,
            tinting: NeutralTinting::Custom,
            primary_hue: Some(120.0),
            chroma_intensity: Some(0.02),
        };
        let scale = generate_neutral_palette(&config);
        for step in ScaleStep::ALL {
            let color = scale.get(step).unwrap();
            assert_eq!(color.h, 120.0);
            assert_eq!(color.c, 0.02);
        }
    }

    #[test]
    fn deterministic_for_equal_config() {
        let config = NeutralPaletteConfig::new(NeutralMode::Light);
        assert_eq!(
            generate_neutral_palette(&config),
            generate_neutral_palette(&config)
        );
    }
}
