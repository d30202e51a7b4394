// ABOUTME: Derives the 11-step lightness scale from one base OKLCH color
// ABOUTME: Light steps use fixed targets, dark steps scale relative to the base lightness

use std::collections::BTreeMap;
use tekton_types::{ColorScale, OklchColor, ScaleStep};

/// Fixed lightness targets for steps lighter than the 500 anchor.
const LIGHT_TARGETS: [(ScaleStep, f64); 5] = [
    (ScaleStep::S50, 0.98),
    (ScaleStep::S100, 0.95),
    (ScaleStep::S200, 0.88),
    (ScaleStep::S300, 0.78),
    (ScaleStep::S400, 0.65),
];

/// Per-step (factor, floor) pairs for steps darker than 500. The factor keeps
/// some brand-lightness influence on the dark end; the floor stops very dark
/// bases from collapsing to black.
const DARK_STEPS: [(ScaleStep, f64, f64); 5] = [
    (ScaleStep::S600, 0.85, 0.08),
    (ScaleStep::S700, 0.70, 0.06),
    (ScaleStep::S800, 0.55, 0.045),
    (ScaleStep::S900, 0.35, 0.03),
    (ScaleStep::S950, 0.18, 0.02),
];

/// Damp chroma at extreme lightness so near-white and near-black steps do not
/// oversaturate.
fn damped_chroma(base_chroma: f64, target_lightness: f64) -> f64 {
    if target_lightness > 0.9 {
        base_chroma * 0.5
    } else if target_lightness < 0.2 {
        base_chroma * 0.7
    } else {
        base_chroma
    }
}

fn step_color(base: &OklchColor, target_lightness: f64) -> OklchColor {
    OklchColor::new(
        target_lightness,
        damped_chroma(base.c, target_lightness),
        base.h,
    )
    .clamped()
}

/// Generate the full 11-step scale for one base color.
///
/// Step 500 is pinned to the base color; steps 50-400 use fixed absolute
/// lightness targets; steps 600-950 scale with the base lightness. Hue is
/// preserved across every step and all outputs are clamped into valid OKLCH
/// ranges.
pub fn generate_lightness_scale(base: &OklchColor) -> ColorScale {
    let mut scale = ColorScale::new();

    for (step, target) in LIGHT_TARGETS {
        scale.insert(step, step_color(base, target));
    }

    // The anchor is the base itself; damping only applies to derived steps.
    scale.insert(ScaleStep::S500, base.clamped());

    for (step, factor, floor) in DARK_STEPS {
        let target = (base.l * factor).max(floor);
        scale.insert(step, step_color(base, target));
    }

    scale
}

/// Generate scales for a whole palette (name -> base color).
pub fn generate_color_scales(
    palette: &BTreeMap<String, OklchColor>,
) -> BTreeMap<String, ColorScale> {
    palette
        .iter()
        .map(|(name, base)| (name.clone(), generate_lightness_scale(base)))
        .collect()
}
