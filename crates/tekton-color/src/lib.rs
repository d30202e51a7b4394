// ABOUTME: Color engine for the tekton toolkit: OKLCH math, scales, neutrals, WCAG
// ABOUTME: Pure numeric code; the only shared state is the theme generator's memo cache

pub mod convert;
pub mod neutral;
pub mod scale;
pub mod theme;
pub mod wcag;


pub use convert::{
    ColorError, clip_to_srgb_gamut, is_in_srgb_gamut, oklch_to_hex, oklch_to_rgb, parse_hex,
    rgb_to_hex,
};
pub use neutral::{NeutralMode, NeutralPaletteConfig, NeutralTinting, generate_neutral_palette};
pub use scale::{generate_color_scales, generate_lightness_scale};
pub use theme::{
    TokenDefinition, TokenGenerator, TokenGeneratorConfig, TokenOutputFormat, generate_token,
    token_id,
};
pub use wcag::{
    ContrastCheck, ContrastReport, WcagLevel, contrast_ratio, relative_luminance,
    validate_color_pair, validate_scale_contrast,
};
