// ABOUTME: Component interface schemas: props, token bindings, accessibility
// ABOUTME: The registry is read-only; twenty builtin component types, no user extension

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Component classification: primitives render one element, composed
/// components orchestrate children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Primitive,
    Composed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDefinition {
    pub name: String,
    /// Declared value type, e.g. "string", "boolean", "number", "node".
    pub prop_type: String,
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Allowed values for enum-like props.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// WCAG 2.1 AA expectations for one component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A11yRequirements {
    pub role: String,
    pub wcag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aria_attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyboard: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

/// Token bindings map style properties to token references. Values may carry
/// `{prop}` template variables substituted from component props at resolution
/// time, e.g. `component.button.{variant}.background`.
pub type TokenBindings = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    #[serde(rename = "type")]
    pub component_type: String,
    pub category: ComponentCategory,
    pub description: String,
    pub props: Vec<PropDefinition>,
    pub token_bindings: TokenBindings,
    pub a11y: A11yRequirements,
}

impl ComponentSchema {
    pub fn prop(&self, name: &str) -> Option<&PropDefinition> {
        self.props.iter().find(|p| p.name == name)
    }
}

/// Read-only lookup of component schemas keyed by type name.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, ComponentSchema>,
}

impl SchemaRegistry {
    /// The registry covering all builtin component types.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn get(&self, component_type: &str) -> Option<&ComponentSchema> {
        self.schemas.get(component_type)
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.schemas.contains_key(component_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

static BUILTIN: Lazy<SchemaRegistry> = Lazy::new(|| SchemaRegistry {
    schemas: builtin_schemas()
        .into_iter()
        .map(|s| (s.component_type.clone(), s))
        .collect(),
});

// ============================================================================
// Schema construction helpers
// ============================================================================

fn prop(name: &str, prop_type: &str, description: &str) -> PropDefinition {
    PropDefinition {
        name: name.into(),
        prop_type: prop_type.into(),
        required: false,
        description: description.into(),
        default_value: None,
        options: None,
    }
}

impl PropDefinition {
    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    fn options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|s| s.to_string()).collect());
        self
    }
}

fn variant_prop(options: &[&str]) -> PropDefinition {
    prop("variant", "string", "Visual style variant")
        .default_value(json!(options[0]))
        .options(options)
}

fn size_prop() -> PropDefinition {
    prop("size", "string", "Component size")
        .default_value(json!("medium"))
        .options(&["small", "medium", "large"])
}

fn bindings(pairs: &[(&str, &str)]) -> TokenBindings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn a11y(role: &str, aria: &[&str], keyboard: &[&str]) -> A11yRequirements {
    A11yRequirements {
        role: role.into(),
        wcag: "2.1 AA".into(),
        aria_attributes: aria.iter().map(|s| s.to_string()).collect(),
        keyboard: keyboard.iter().map(|s| s.to_string()).collect(),
        focus: None,
    }
}

fn schema(
    component_type: &str,
    category: ComponentCategory,
    description: &str,
    props: Vec<PropDefinition>,
    token_bindings: TokenBindings,
    a11y: A11yRequirements,
) -> ComponentSchema {
    ComponentSchema {
        component_type: component_type.into(),
        category,
        description: description.into(),
        props,
        token_bindings,
        a11y,
    }
}

// ============================================================================
// Builtin schemas
// ============================================================================

fn builtin_schemas() -> Vec<ComponentSchema> {
    use ComponentCategory::{Composed, Primitive};

    vec![
        schema(
            "Button",
            Primitive,
            "Interactive button for user actions",
            vec![
                variant_prop(&["primary", "secondary", "outline", "ghost", "danger"]),
                size_prop(),
                prop("disabled", "boolean", "Disables interaction").default_value(json!(false)),
                prop("children", "node", "Button label content").required(),
            ],
            bindings(&[
                ("background", "component.button.{variant}.background"),
                ("foreground", "component.button.{variant}.foreground"),
                ("padding", "component.button.{size}.padding"),
                ("borderRadius", "semantic.radius.interactive"),
            ]),
            {
                let mut a = a11y("button", &["aria-disabled"], &["Enter", "Space"]);
                a.focus = Some("visible focus ring".into());
                a
            },
        ),
        schema(
            "Input",
            Primitive,
            "Single-line text input",
            vec![
                prop("type", "string", "Input type")
                    .default_value(json!("text"))
                    .options(&["text", "email", "password", "number", "search"]),
                size_prop(),
                prop("placeholder", "string", "Placeholder text"),
                prop("disabled", "boolean", "Disables input").default_value(json!(false)),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("background", "component.input.background"),
                ("border", "component.input.border"),
                ("foreground", "semantic.foreground.default"),
                ("padding", "component.input.{size}.padding"),
            ]),
            a11y("textbox", &["aria-label", "aria-invalid"], &["Tab"]),
        ),
        schema(
            "Text",
            Primitive,
            "Body text block",
            vec![
                variant_prop(&["body", "caption", "overline"]),
                prop("children", "node", "Text content").required(),
            ],
            bindings(&[
                ("foreground", "semantic.foreground.default"),
                ("fontSize", "atomic.typography.{variant}.size"),
            ]),
            a11y("paragraph", &[], &[]),
        ),
        schema(
            "Heading",
            Primitive,
            "Section heading",
            vec![
                prop("level", "number", "Heading level 1-6")
                    .default_value(json!(2))
                    .options(&["1", "2", "3", "4", "5", "6"]),
                prop("children", "node", "Heading content").required(),
            ],
            bindings(&[
                ("foreground", "semantic.foreground.emphasis"),
                ("fontSize", "atomic.typography.heading-{level}.size"),
            ]),
            a11y("heading", &["aria-level"], &[]),
        ),
        schema(
            "Checkbox",
            Primitive,
            "Binary choice control",
            vec![
                prop("checked", "boolean", "Checked state").default_value(json!(false)),
                prop("disabled", "boolean", "Disables interaction").default_value(json!(false)),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("background", "component.checkbox.background"),
                ("accent", "semantic.foreground.accent"),
                ("border", "semantic.border.default"),
            ]),
            a11y("checkbox", &["aria-checked"], &["Space"]),
        ),
        schema(
            "Radio",
            Primitive,
            "Single choice within a group",
            vec![
                prop("checked", "boolean", "Selected state").default_value(json!(false)),
                prop("name", "string", "Radio group name").required(),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("background", "component.radio.background"),
                ("accent", "semantic.foreground.accent"),
            ]),
            a11y("radio", &["aria-checked"], &["ArrowUp", "ArrowDown"]),
        ),
        schema(
            "Switch",
            Primitive,
            "On/off toggle",
            vec![
                prop("checked", "boolean", "On state").default_value(json!(false)),
                prop("disabled", "boolean", "Disables interaction").default_value(json!(false)),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("trackOn", "semantic.foreground.accent"),
                ("trackOff", "atomic.color.neutral.300"),
                ("thumb", "atomic.color.neutral.50"),
            ]),
            a11y("switch", &["aria-checked"], &["Space", "Enter"]),
        ),
        schema(
            "Slider",
            Primitive,
            "Value selection along a range",
            vec![
                prop("min", "number", "Minimum value").default_value(json!(0)),
                prop("max", "number", "Maximum value").default_value(json!(100)),
                prop("value", "number", "Current value").required(),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("track", "atomic.color.neutral.200"),
                ("fill", "semantic.foreground.accent"),
                ("thumb", "component.slider.thumb.background"),
            ]),
            a11y(
                "slider",
                &["aria-valuemin", "aria-valuemax", "aria-valuenow"],
                &["ArrowLeft", "ArrowRight"],
            ),
        ),
        schema(
            "Badge",
            Primitive,
            "Small status label",
            vec![
                variant_prop(&["neutral", "info", "success", "warning", "danger"]),
                prop("children", "node", "Badge content").required(),
            ],
            bindings(&[
                ("background", "component.badge.{variant}.background"),
                ("foreground", "component.badge.{variant}.foreground"),
            ]),
            a11y("status", &[], &[]),
        ),
        schema(
            "Avatar",
            Primitive,
            "User or entity image",
            vec![
                prop("src", "string", "Image source URL"),
                prop("alt", "string", "Alternative text").required(),
                size_prop(),
            ],
            bindings(&[
                ("background", "atomic.color.neutral.200"),
                ("size", "component.avatar.{size}.size"),
            ]),
            a11y("img", &["aria-label"], &[]),
        ),
        schema(
            "Card",
            Composed,
            "Grouped content container",
            vec![
                variant_prop(&["flat", "elevated", "outlined"]),
                prop("children", "node", "Card content").required(),
            ],
            bindings(&[
                ("background", "semantic.background.surface"),
                ("border", "semantic.border.default"),
                ("padding", "atomic.spacing.4"),
                ("borderRadius", "semantic.radius.container"),
            ]),
            a11y("group", &[], &[]),
        ),
        schema(
            "Modal",
            Composed,
            "Blocking overlay dialog",
            vec![
                prop("open", "boolean", "Visibility state").default_value(json!(false)),
                prop("title", "string", "Dialog title").required(),
                prop("children", "node", "Dialog content").required(),
            ],
            bindings(&[
                ("background", "semantic.background.elevated"),
                ("overlay", "semantic.background.overlay"),
                ("padding", "atomic.spacing.6"),
            ]),
            {
                let mut a = a11y("dialog", &["aria-modal", "aria-labelledby"], &["Escape"]);
                a.focus = Some("trap focus while open, restore on close".into());
                a
            },
        ),
        schema(
            "Tabs",
            Composed,
            "Switchable panels under a tab strip",
            vec![
                prop("tabs", "array", "Tab labels").required(),
                prop("active", "number", "Active tab index").default_value(json!(0)),
                prop("children", "node", "Panel content").required(),
            ],
            bindings(&[
                ("activeIndicator", "semantic.foreground.accent"),
                ("foreground", "semantic.foreground.default"),
                ("border", "semantic.border.default"),
            ]),
            a11y(
                "tablist",
                &["aria-selected", "aria-controls"],
                &["ArrowLeft", "ArrowRight", "Home", "End"],
            ),
        ),
        schema(
            "Table",
            Composed,
            "Tabular data display",
            vec![
                prop("columns", "array", "Column definitions").required(),
                prop("rows", "array", "Row data").required(),
                prop("striped", "boolean", "Alternate row shading").default_value(json!(false)),
            ],
            bindings(&[
                ("headerBackground", "semantic.background.elevated"),
                ("rowBorder", "semantic.border.subtle"),
                ("foreground", "semantic.foreground.default"),
            ]),
            a11y("table", &["aria-rowcount"], &[]),
        ),
        schema(
            "Link",
            Primitive,
            "Navigation hyperlink",
            vec![
                prop("href", "string", "Destination URL").required(),
                prop("external", "boolean", "Opens in a new context").default_value(json!(false)),
                prop("children", "node", "Link text").required(),
            ],
            bindings(&[
                ("foreground", "semantic.foreground.accent"),
                ("foregroundHover", "component.link.hover.foreground"),
            ]),
            a11y("link", &[], &["Enter"]),
        ),
        schema(
            "List",
            Composed,
            "Ordered or unordered item list",
            vec![
                prop("ordered", "boolean", "Numbered list").default_value(json!(false)),
                prop("items", "array", "List items").required(),
            ],
            bindings(&[
                ("foreground", "semantic.foreground.default"),
                ("gap", "atomic.spacing.2"),
            ]),
            a11y("list", &[], &[]),
        ),
        schema(
            "Image",
            Primitive,
            "Static image with required alt text",
            vec![
                prop("src", "string", "Image source URL").required(),
                prop("alt", "string", "Alternative text").required(),
                prop("fit", "string", "Object-fit behavior")
                    .default_value(json!("cover"))
                    .options(&["cover", "contain", "fill"]),
            ],
            bindings(&[("borderRadius", "semantic.radius.media")]),
            a11y("img", &[], &[]),
        ),
        schema(
            "Form",
            Composed,
            "Grouped input fields with submission",
            vec![
                prop("children", "node", "Form fields").required(),
                prop("label", "string", "Accessible form name").required(),
            ],
            bindings(&[
                ("gap", "atomic.spacing.4"),
                ("background", "semantic.background.surface"),
            ]),
            a11y("form", &["aria-label"], &["Enter"]),
        ),
        schema(
            "Dropdown",
            Composed,
            "Collapsible option selector",
            vec![
                prop("options", "array", "Selectable options").required(),
                prop("value", "string", "Selected value"),
                prop("placeholder", "string", "Prompt text").default_value(json!("Select…")),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("background", "component.input.background"),
                ("border", "component.input.border"),
                ("menuBackground", "semantic.background.elevated"),
            ]),
            a11y(
                "listbox",
                &["aria-expanded", "aria-activedescendant"],
                &["ArrowUp", "ArrowDown", "Enter", "Escape"],
            ),
        ),
        schema(
            "Progress",
            Primitive,
            "Task completion indicator",
            vec![
                prop("value", "number", "Completion 0-100").required(),
                prop("label", "string", "Accessible label").required(),
            ],
            bindings(&[
                ("track", "atomic.color.neutral.200"),
                ("fill", "semantic.foreground.accent"),
            ]),
            a11y(
                "progressbar",
                &["aria-valuemin", "aria-valuemax", "aria-valuenow"],
                &[],
            ),
        ),
    ]
}
