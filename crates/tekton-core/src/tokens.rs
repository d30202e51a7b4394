// ABOUTME: Three-layer theme token tree and declarative schema validation
// ABOUTME: Token trees are plain JSON values; rules are data, not code

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tekton_color::{TokenDefinition, oklch_to_hex};

/// The three token layers of a theme, most general to most specific.
///
/// Each layer is an arbitrarily nested JSON object whose leaves are strings
/// (hex colors, dimensions, or references into another layer). The tree is
/// immutable after construction; the resolver only reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeTokens {
    #[serde(default)]
    pub atomic: Value,
    #[serde(default)]
    pub semantic: Value,
    #[serde(default)]
    pub component: Value,
}

impl ThemeTokens {
    pub fn new(atomic: Value, semantic: Value, component: Value) -> Self {
        Self {
            atomic,
            semantic,
            component,
        }
    }

    /// The layer tree for a layer name, or `Value::Null` for anything else.
    pub fn layer(&self, name: &str) -> &Value {
        match name {
            "atomic" => &self.atomic,
            "semantic" => &self.semantic,
            "component" => &self.component,
            _ => &Value::Null,
        }
    }

    /// Install generated color tokens under `atomic.color`, keyed by the
    /// sanitized token name with one hex entry per scale step plus `base`.
    pub fn set_atomic_colors(&mut self, tokens: &[TokenDefinition]) {
        if !self.atomic.is_object() {
            self.atomic = Value::Object(Map::new());
        }
        let Some(atomic) = self.atomic.as_object_mut() else {
            return;
        };
        let color = atomic
            .entry("color")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(color) = color.as_object_mut() else {
            return;
        };
        for token in tokens {
            let mut scale = Map::new();
            scale.insert("base".into(), Value::String(oklch_to_hex(&token.value)));
            for (step, value) in token.scale.iter() {
                scale.insert(step.as_str().to_string(), Value::String(oklch_to_hex(value)));
            }
            color.insert(sanitize_color_name(&token.name), Value::Object(scale));
        }
    }
}

/// Lowercased token name with every non-alphanumeric run collapsed to `-`,
/// matching the CSS custom property naming contract.
fn sanitize_color_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// A theme with identity attached, as produced by a theme loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeWithTokens {
    pub id: String,
    pub name: String,
    pub tokens: ThemeTokens,
}

// ============================================================================
// Declarative validation rules
// ============================================================================

/// One constraint on a JSON value, interpreted by [`validate_value`].
///
/// Rules are serializable data so token schemas can ship as JSON alongside
/// the themes they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum ValidationRule {
    /// Object must contain every listed scale step key.
    RequiredSteps { steps: Vec<String> },
    /// Number must lie within the inclusive range.
    NumberRange { min: f64, max: f64 },
    /// String must be one of the allowed values.
    EnumSet { allowed: Vec<String> },
    /// Object must contain every listed key.
    RequiredKeys { keys: Vec<String> },
}

/// A single validation failure with the JSON-path style location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Evaluate every rule against the value, collecting all failures.
///
/// Never short-circuits: callers get the complete picture in one pass.
pub fn validate_value(value: &Value, rules: &[ValidationRule], path: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for rule in rules {
        match rule {
            ValidationRule::RequiredSteps { steps } => match value.as_object() {
                Some(map) => {
                    for step in steps {
                        if !map.contains_key(step) {
                            issues.push(ValidationIssue::new(
                                path,
                                format!("missing required scale step '{step}'"),
                            ));
                        }
                    }
                }
                None => issues.push(ValidationIssue::new(
                    path,
                    "expected an object with scale steps",
                )),
            },
            ValidationRule::NumberRange { min, max } => match value.as_f64() {
                Some(n) if n >= *min && n <= *max => {}
                Some(n) => issues.push(ValidationIssue::new(
                    path,
                    format!("value {n} outside range [{min}, {max}]"),
                )),
                None => issues.push(ValidationIssue::new(path, "expected a number")),
            },
            ValidationRule::EnumSet { allowed } => match value.as_str() {
                Some(s) if allowed.iter().any(|a| a == s) => {}
                Some(s) => issues.push(ValidationIssue::new(
                    path,
                    format!("'{s}' not in allowed set [{}]", allowed.join(", ")),
                )),
                None => issues.push(ValidationIssue::new(path, "expected a string")),
            },
            ValidationRule::RequiredKeys { keys } => match value.as_object() {
                Some(map) => {
                    for key in keys {
                        if !map.contains_key(key) {
                            issues.push(ValidationIssue::new(
                                path,
                                format!("missing required key '{key}'"),
                            ));
                        }
                    }
                }
                None => issues.push(ValidationIssue::new(path, "expected an object")),
            },
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_steps_reports_each_missing_step() {
        let value = json!({ "50": "#fff", "500": "#888" });
        let rules = vec![ValidationRule::RequiredSteps {
            steps: vec!["50".into(), "500".into(), "950".into()],
        }];
        let issues = validate_value(&value, &rules, "atomic.color.blue");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "atomic.color.blue");
        assert!(issues[0].message.contains("950"));
    }

    #[test]
    fn number_range_accepts_bounds() {
        let rules = vec![ValidationRule::NumberRange { min: 0.0, max: 1.0 }];
        assert!(validate_value(&json!(0.0), &rules, "l").is_empty());
        assert!(validate_value(&json!(1.0), &rules, "l").is_empty());
        assert_eq!(validate_value(&json!(1.5), &rules, "l").len(), 1);
        assert_eq!(validate_value(&json!("x"), &rules, "l").len(), 1);
    }

    #[test]
    fn enum_set_rejects_unknown_values() {
        let rules = vec![ValidationRule::EnumSet {
            allowed: vec!["light".into(), "dark".into()],
        }];
        assert!(validate_value(&json!("light"), &rules, "mode").is_empty());
        let issues = validate_value(&json!("sepia"), &rules, "mode");
        assert!(issues[0].message.contains("sepia"));
    }

    #[test]
    fn multiple_rules_all_evaluated() {
        let rules = vec![
            ValidationRule::RequiredKeys {
                keys: vec!["color".into()],
            },
            ValidationRule::RequiredSteps {
                steps: vec!["500".into()],
            },
        ];
        let issues = validate_value(&json!({}), &rules, "atomic");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn rules_round_trip_as_tagged_json() {
        let rule = ValidationRule::NumberRange { min: 0.0, max: 0.4 };
        let raw = serde_json::to_value(&rule).unwrap();
        assert_eq!(raw["rule"], "numberRange");
        let back: ValidationRule = serde_json::from_value(raw).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn theme_tokens_layer_lookup() {
        let tokens = ThemeTokens::new(json!({"a": 1}), json!({}), json!({}));
        assert_eq!(tokens.layer("atomic")["a"], 1);
        assert!(tokens.layer("bogus").is_null());
    }

    #[test]
    fn generated_colors_land_under_atomic_color() {
        use tekton_color::generate_token;
        use tekton_types::OklchColor;

        let token = generate_token("Brand Blue", &OklchColor::new(0.55, 0.15, 250.0));
        let mut tokens = ThemeTokens::default();
        tokens.set_atomic_colors(std::slice::from_ref(&token));

        let scale = &tokens.atomic["color"]["brand-blue"];
        assert!(scale["base"].as_str().unwrap().starts_with('#'));
        assert!(scale["500"].is_string());
        assert!(scale["950"].is_string());
        // Existing atomic entries survive a second install.
        tokens.set_atomic_colors(&[generate_token("Accent", &OklchColor::new(0.6, 0.1, 30.0))]);
        assert!(tokens.atomic["color"]["brand-blue"]["500"].is_string());
        assert!(tokens.atomic["color"]["accent"]["500"].is_string());
    }
}
