// ABOUTME: Scale step keys and the 11-step color scale container
// ABOUTME: Step keys follow the Tailwind 50-950 convention; 500 anchors the base color

use crate::color::OklchColor;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// One of the 11 fixed scale steps.
///
/// Steps are ordered from lightest (`S50`) to darkest (`S950`). The key
/// namespace is identical in light and dark mode; only the visual meaning of
/// each step differs per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScaleStep {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl ScaleStep {
    /// All 11 steps, lightest first.
    pub const ALL: [ScaleStep; 11] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
        Self::S600,
        Self::S700,
        Self::S800,
        Self::S900,
        Self::S950,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::S50 => "50",
            Self::S100 => "100",
            Self::S200 => "200",
            Self::S300 => "300",
            Self::S400 => "400",
            Self::S500 => "500",
            Self::S600 => "600",
            Self::S700 => "700",
            Self::S800 => "800",
            Self::S900 => "900",
            Self::S950 => "950",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == key)
    }
}

impl Serialize for ScaleStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScaleStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key).ok_or_else(|| D::Error::custom(format!("invalid scale step: {key}")))
    }
}

/// A mapping from scale step to OKLCH color.
///
/// A scale is complete when all 11 steps are present. Generators always
/// produce complete scales; hand-authored scales are checked through
/// [`ColorScale::is_complete`] during theme validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorScale {
    steps: BTreeMap<ScaleStep, OklchColor>,
}

impl ColorScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, step: ScaleStep, color: OklchColor) {
        self.steps.insert(step, color);
    }

    pub fn get(&self, step: ScaleStep) -> Option<&OklchColor> {
        self.steps.get(&step)
    }

    /// Look up a step by its string key ("50" through "950").
    pub fn get_key(&self, key: &str) -> Option<&OklchColor> {
        ScaleStep::from_key(key).and_then(|s| self.get(s))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether all 11 steps are present.
    pub fn is_complete(&self) -> bool {
        self.steps.len() == ScaleStep::ALL.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScaleStep, &OklchColor)> {
        self.steps.iter().map(|(s, c)| (*s, c))
    }
}

impl FromIterator<(ScaleStep, OklchColor)> for ColorScale {
    fn from_iter<I: IntoIterator<Item = (ScaleStep, OklchColor)>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_keys_round_trip() {
        for step in ScaleStep::ALL {
            assert_eq!(ScaleStep::from_key(step.as_str()), Some(step));
        }
        assert_eq!(ScaleStep::from_key("550"), None);
        assert_eq!(ScaleStep::from_key(""), None);
    }

    #[test]
    fn steps_are_ordered_lightest_first() {
        assert!(ScaleStep::S50 < ScaleStep::S500);
        assert!(ScaleStep::S500 < ScaleStep::S950);
    }

    #[test]
    fn scale_completeness() {
        let mut scale = ColorScale::new();
        assert!(!scale.is_complete());
        for (i, step) in ScaleStep::ALL.into_iter().enumerate() {
            scale.insert(step, OklchColor::new(1.0 - i as f64 * 0.09, 0.1, 200.0));
        }
        assert!(scale.is_complete());
        assert_eq!(scale.len(), 11);
    }

    #[test]
    fn scale_serializes_with_string_keys() {
        let mut scale = ColorScale::new();
        scale.insert(ScaleStep::S500, OklchColor::new(0.5, 0.1, 200.0));
        let json = serde_json::to_value(&scale).unwrap();
        assert!(json.get("500").is_some());
    }
}
