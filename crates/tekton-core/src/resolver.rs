// ABOUTME: Total token resolution: layer walking, reference chasing, fallback chain
// ABOUTME: Never fails; the worst case is the mid-gray sentinel plus a warning

use std::collections::HashSet;

use serde_json::Value;
use smallvec::SmallVec;
use tekton_logging::warn;
use tekton_types::{TokenLayer, TokenReference};

use crate::tokens::ThemeTokens;

/// Sentinel returned when every fallback misses. Mid-gray renders legibly on
/// both light and dark backgrounds, keeping broken themes visibly debuggable
/// instead of crashing the pipeline.
pub const FALLBACK_GRAY: &str = "#737373";

/// The cardinal scale step used as the within-scale fallback.
const CARDINAL_STEP: &str = "500";

/// Layers to search, most specific first, for each reference layer.
fn search_order(layer: TokenLayer) -> &'static [&'static str] {
    match layer {
        TokenLayer::Atomic => &["atomic"],
        TokenLayer::Semantic => &["semantic", "atomic"],
        TokenLayer::Component => &["component", "semantic", "atomic"],
    }
}

fn navigate<'a>(mut value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    for segment in segments {
        value = value.get(segment)?;
    }
    Some(value)
}

/// Scalar leaf to string; objects and arrays are not resolvable values.
fn leaf_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One resolution attempt for an exact reference. `None` means not found or
/// a cycle; the caller decides which fallback applies.
fn try_resolve(tokens: &ThemeTokens, reference: &str, visited: &mut HashSet<String>) -> Option<String> {
    if !visited.insert(reference.to_string()) {
        warn!(reference, "circular token reference, using fallback");
        return None;
    }

    let parsed = TokenReference::new(reference);
    let layer = match parsed.layer() {
        Some(layer) => layer,
        // Direct value like "#3b82f6" or "12px": returned as-is.
        None => return Some(reference.to_string()),
    };
    // Token paths are short; six segments covers every builtin reference.
    let segments: SmallVec<[&str; 6]> = parsed.segments().skip(1).collect();

    for layer_name in search_order(layer) {
        let Some(value) = navigate(tokens.layer(layer_name), &segments) else {
            continue;
        };
        let Some(leaf) = leaf_to_string(value) else {
            continue;
        };
        // Leaf may itself be a reference into another layer.
        if TokenReference::new(&leaf).layer().is_some() {
            if let Some(resolved) = try_resolve(tokens, &leaf, visited) {
                return Some(resolved);
            }
            continue;
        }
        return Some(leaf);
    }

    None
}

/// Swap the final path segment for the cardinal `500` step.
fn cardinal_reference(reference: &str) -> Option<String> {
    let (head, last) = reference.rsplit_once('.')?;
    if last == CARDINAL_STEP {
        return None;
    }
    Some(format!("{head}.{CARDINAL_STEP}"))
}

/// Resolve a token reference to a final value.
///
/// Total by contract: a missing or cyclic reference degrades through the
/// fallback chain (exact path, cardinal `500` step, theme neutral, hardcoded
/// gray) rather than failing. Each degradation logs a warning with the
/// original reference.
pub fn resolve_token(tokens: &ThemeTokens, reference: &str) -> String {
    let mut visited = HashSet::new();
    if let Some(value) = try_resolve(tokens, reference, &mut visited) {
        return value;
    }

    if let Some(cardinal) = cardinal_reference(reference) {
        let mut visited = HashSet::new();
        if let Some(value) = try_resolve(tokens, &cardinal, &mut visited) {
            warn!(reference, fallback = %cardinal, "token missing, fell back to cardinal step");
            return value;
        }
    }

    let mut visited = HashSet::new();
    if let Some(value) = try_resolve(tokens, "atomic.color.neutral.500", &mut visited) {
        warn!(reference, "token missing, fell back to theme neutral");
        return value;
    }

    warn!(reference, "token missing, fell back to hardcoded gray");
    FALLBACK_GRAY.to_string()
}
