// ABOUTME: Token generator: named scales with memoization, dark variants, exports
// ABOUTME: The cache is keyed by name plus the exact base color serialization

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tekton_logging::{debug, warn};
use tekton_types::{ColorScale, OklchColor};

use crate::convert::{clip_to_srgb_gamut, oklch_to_hex};
use crate::scale::generate_lightness_scale;
use crate::wcag::{WcagLevel, validate_scale_contrast};

/// A fully generated design token: the clipped base color plus its scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDefinition {
    pub id: String,
    pub name: String,
    pub value: OklchColor,
    pub scale: ColorScale,
    pub gamut_clipped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOutputFormat {
    Css,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenGeneratorConfig {
    pub generate_dark_mode: bool,
    pub validate_wcag: bool,
    pub wcag_level: WcagLevel,
}

impl Default for TokenGeneratorConfig {
    fn default() -> Self {
        Self {
            generate_dark_mode: false,
            validate_wcag: true,
            wcag_level: WcagLevel::AA,
        }
    }
}

/// Deterministic token id from the name and the rounded color channels.
///
/// Rounding to three decimals (whole degrees for hue) means colors that are
/// equal at display precision share an id.
pub fn token_id(name: &str, color: &OklchColor) -> String {
    let raw = format!("{}-{:.3}-{:.3}-{:.0}", name, color.l, color.c, color.h);
    raw.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Generate a single token: gamut-clip the base, derive the scale, assign id.
pub fn generate_token(name: &str, base: &OklchColor) -> TokenDefinition {
    let clipped = clip_to_srgb_gamut(base);
    let gamut_clipped = clipped.c != base.c;
    if gamut_clipped {
        debug!(
            token = name,
            original_chroma = base.c,
            clipped_chroma = clipped.c,
            "base color clipped to sRGB gamut"
        );
    }
    TokenDefinition {
        id: token_id(name, &clipped),
        name: name.to_string(),
        value: clipped,
        scale: generate_lightness_scale(&clipped),
        gamut_clipped,
    }
}

/// Generates and exports tokens for whole palettes, memoizing per base color.
pub struct TokenGenerator {
    config: TokenGeneratorConfig,
    cache: Mutex<HashMap<String, TokenDefinition>>,
}

impl TokenGenerator {
    pub fn new(config: TokenGeneratorConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache_key(name: &str, color: &OklchColor) -> String {
        format!("{}-{}-{}-{}", name, color.l, color.c, color.h)
    }

    /// Generate tokens for every palette entry, in name order. Dark variants
    /// follow their light token when dark-mode generation is enabled.
    pub fn generate_tokens(&self, palette: &BTreeMap<String, OklchColor>) -> Vec<TokenDefinition> {
        let mut tokens = Vec::with_capacity(palette.len());
        let mut cache = self.cache.lock();

        for (name, color) in palette {
            let key = Self::cache_key(name, color);
            let token = cache
                .entry(key.clone())
                .or_insert_with(|| generate_token(name, color))
                .clone();

            if self.config.validate_wcag {
                for report in validate_scale_contrast(&token.scale, self.config.wcag_level) {
                    if !report.check.passes {
                        warn!(
                            token = name,
                            foreground = report.foreground_step.as_str(),
                            background = report.background_step.as_str(),
                            ratio = report.check.ratio,
                            required = report.check.required,
                            "scale pairing fails contrast requirement"
                        );
                    }
                }
            }

            if self.config.generate_dark_mode {
                let dark = cache
                    .entry(format!("{key}-dark"))
                    .or_insert_with(|| dark_mode_variant(&token))
                    .clone();
                tokens.push(token);
                tokens.push(dark);
            } else {
                tokens.push(token);
            }
        }

        tokens
    }

    /// Export a palette in the requested format.
    pub fn export_tokens(
        &self,
        palette: &BTreeMap<String, OklchColor>,
        format: TokenOutputFormat,
    ) -> String {
        let tokens = self.generate_tokens(palette);
        match format {
            TokenOutputFormat::Css => export_css(&tokens),
            TokenOutputFormat::Json => export_json(&tokens),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

/// Derive the dark counterpart of a token by inverting lightness everywhere.
fn dark_mode_variant(token: &TokenDefinition) -> TokenDefinition {
    let invert = |c: &OklchColor| OklchColor::new(1.0 - c.l, c.c, c.h);
    let value = invert(&token.value);
    let scale: ColorScale = token
        .scale
        .iter()
        .map(|(step, color)| (step, invert(color)))
        .collect();
    TokenDefinition {
        id: format!("{}-dark", token.id),
        name: format!("{}-dark", token.name),
        value,
        scale,
        gamut_clipped: token.gamut_clipped,
    }
}

fn export_css(tokens: &[TokenDefinition]) -> String {
    let mut lines = vec![":root {".to_string()];
    for token in tokens {
        lines.push(format!("  --{}: {};", token.name, oklch_to_hex(&token.value)));
        for (step, color) in token.scale.iter() {
            lines.push(format!(
                "  --{}-{}: {};",
                token.name,
                step.as_str(),
                oklch_to_hex(color)
            ));
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn export_json(tokens: &[TokenDefinition]) -> String {
    let mut output = serde_json::Map::new();
    for token in tokens {
        let scale: serde_json::Map<String, serde_json::Value> = token
            .scale
            .iter()
            .map(|(step, color)| (step.as_str().to_string(), json!(oklch_to_hex(color))))
            .collect();
        output.insert(
            token.name.clone(),
            json!({
                "value": oklch_to_hex(&token.value),
                "oklch": token.value,
                "scale": scale,
            }),
        );
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(output))
        .unwrap_or_else(|_| "{}".to_string())
}
