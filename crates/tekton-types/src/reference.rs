// ABOUTME: Token reference type and the CSS custom property naming contract
// ABOUTME: References are dot-delimited paths into the atomic/semantic/component tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every CSS custom property this toolkit emits.
///
/// The `--tekton-` form is a stable contract: downstream tooling validates
/// "no hardcoded values" by checking generated styles against it.
pub const CSS_VAR_PREFIX: &str = "--tekton-";

/// The three token layers, ordered most-specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenLayer {
    Component,
    Semantic,
    Atomic,
}

impl TokenLayer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Semantic => "semantic",
            Self::Atomic => "atomic",
        }
    }
}

/// A dot-delimited path identifying a location in the token tree,
/// e.g. `semantic.color.primary.500`.
///
/// A reference is not itself a value; it must be resolved. Construction never
/// fails so that malformed references flow into the resolver, which recovers
/// through its fallback chain instead of refusing input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenReference(String);

impl TokenReference {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The layer this reference targets, when it names one.
    ///
    /// A reference without a layer prefix is a direct value (e.g. `#3b82f6`)
    /// and resolves to itself.
    pub fn layer(&self) -> Option<TokenLayer> {
        match self.segments().next() {
            Some("component") => Some(TokenLayer::Component),
            Some("semantic") => Some(TokenLayer::Semantic),
            Some("atomic") => Some(TokenLayer::Atomic),
            _ => None,
        }
    }

    /// Syntactic validity: at least two non-empty segments, each consisting
    /// only of ASCII alphanumerics and hyphens.
    pub fn is_wellformed(&self) -> bool {
        let mut count = 0;
        for seg in self.segments() {
            if seg.is_empty() || !seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return false;
            }
            count += 1;
        }
        count >= 2
    }

    /// CSS custom property name for this reference: `--tekton-<path-with-dashes>`.
    pub fn css_var_name(&self) -> String {
        format!("{}{}", CSS_VAR_PREFIX, self.0.replace('.', "-"))
    }

    /// CSS `var()` expression for this reference.
    pub fn css_var(&self) -> String {
        format!("var({})", self.css_var_name())
    }
}

impl fmt::Display for TokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenReference {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Build a CSS `var()` expression from explicit path segments.
///
/// Explicit replacement for proxy-style dynamic accessors: the path is spelled
/// out at the call site, no dynamic dispatch involved.
pub fn token_var(path: &[&str]) -> String {
    TokenReference::new(path.join(".")).css_var()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_detection() {
        assert_eq!(
            TokenReference::new("atomic.color.blue.500").layer(),
            Some(TokenLayer::Atomic)
        );
        assert_eq!(
            TokenReference::new("semantic.color.primary").layer(),
            Some(TokenLayer::Semantic)
        );
        assert_eq!(
            TokenReference::new("component.button.primary.background").layer(),
            Some(TokenLayer::Component)
        );
        assert_eq!(TokenReference::new("#3b82f6").layer(), None);
    }

    #[test]
    fn wellformedness() {
        assert!(TokenReference::new("semantic.color.primary.500").is_wellformed());
        assert!(TokenReference::new("section.grid-3").is_wellformed());
        assert!(!TokenReference::new("plain").is_wellformed());
        assert!(!TokenReference::new("semantic..primary").is_wellformed());
        assert!(!TokenReference::new("semantic.color primary").is_wellformed());
        assert!(!TokenReference::new("${injected}").is_wellformed());
    }

    #[test]
    fn css_var_naming_contract() {
        let reference = TokenReference::new("semantic.color.primary.500");
        assert_eq!(
            reference.css_var_name(),
            "--tekton-semantic-color-primary-500"
        );
        assert_eq!(
            reference.css_var(),
            "var(--tekton-semantic-color-primary-500)"
        );
    }

    #[test]
    fn token_var_joins_segments() {
        assert_eq!(
            token_var(&["atomic", "spacing", "16"]),
            "var(--tekton-atomic-spacing-16)"
        );
    }
}
