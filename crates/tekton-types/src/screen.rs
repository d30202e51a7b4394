// ABOUTME: User-authored screen definition tree: shell, page, sections, components
// ABOUTME: Validated on input and immutable for the duration of one resolution pass

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Props bag for a component instance. Kept ordered so definition hashing is
/// deterministic.
pub type ComponentProps = BTreeMap<String, serde_json::Value>;

/// A child of a component: either a nested component or literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentChild {
    Text(String),
    Node(ComponentDefinition),
}

/// One component instance within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Component type, e.g. "Button". Checked against the schema registry
    /// during resolution.
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub props: ComponentProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentChild>>,
    /// Layout slot assignment for positioning within the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

/// Per-section responsive overrides keyed by breakpoint name.
pub type ResponsiveOverrides = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// A section pattern instance with its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDefinition {
    /// Section identifier, unique within the screen.
    pub id: String,
    /// Section pattern token id, e.g. `section.grid-4`.
    pub pattern: String,
    pub components: Vec<ComponentDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveOverrides>,
}

/// Optional authorship and versioning metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Complete declarative screen specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDefinition {
    /// Unique screen identifier (kebab-case).
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Shell token id, e.g. `shell.web.dashboard`.
    pub shell: String,
    /// Page layout token id, e.g. `page.dashboard`.
    pub page: String,
    /// Theme used for token resolution; defaults to "default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    pub sections: Vec<SectionDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ScreenMeta>,
}

impl ScreenDefinition {
    pub fn theme_id(&self) -> &str {
        self.theme_id.as_deref().unwrap_or("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_full_definition() {
        let raw = json!({
            "id": "dashboard-screen",
            "name": "Dashboard",
            "shell": "shell.web.dashboard",
            "page": "page.dashboard",
            "sections": [{
                "id": "stats",
                "pattern": "section.grid-4",
                "components": [
                    { "type": "Card", "props": { "title": "Stats" }, "children": ["42"] }
                ]
            }]
        });
        let screen: ScreenDefinition = serde_json::from_value(raw).unwrap();
        assert_eq!(screen.theme_id(), "default");
        assert_eq!(screen.sections.len(), 1);
        let component = &screen.sections[0].components[0];
        assert_eq!(component.component_type, "Card");
        assert_eq!(
            component.children.as_ref().unwrap()[0],
            ComponentChild::Text("42".into())
        );
    }

    #[test]
    fn nested_children_round_trip() {
        let definition = ComponentDefinition {
            component_type: "Card".into(),
            props: ComponentProps::new(),
            children: Some(vec![ComponentChild::Node(ComponentDefinition {
                component_type: "Text".into(),
                props: ComponentProps::new(),
                children: Some(vec![ComponentChild::Text("hello".into())]),
                slot: None,
            })]),
            slot: Some("body".into()),
        };
        let json = serde_json::to_string(&definition).unwrap();
        let back: ComponentDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, definition);
    }
}
