// ABOUTME: Output generators for resolved screens: CSS variables, Tailwind, CSS-in-JS, JSX
// ABOUTME: Pure templating over the resolved tree; no resolution logic lives here

use std::collections::BTreeSet;
use std::fmt::Write;

use serde_json::Value;

use crate::resolver::resolve_token;
use crate::screen::{ResolvedChild, ResolvedComponent, ResolvedScreen};
use crate::tokens::ThemeTokens;

/// HTML element a component type renders as.
fn html_element(component_type: &str) -> &'static str {
    match component_type {
        "Button" | "Switch" => "button",
        "Input" | "Checkbox" | "Radio" | "Slider" => "input",
        "Text" | "Badge" => "span",
        "Heading" => "h2",
        "Avatar" | "Image" => "img",
        "Table" => "table",
        "Link" => "a",
        "List" => "ul",
        "Form" => "form",
        "Dropdown" => "select",
        "Progress" => "progress",
        _ => "div",
    }
}

fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// CSS variables
// ============================================================================

/// `:root` block declaring every custom property the screen uses, with the
/// token reference as a placeholder value.
pub fn generate_css_variables(screen: &ResolvedScreen) -> String {
    let mut out = String::from(":root {\n");
    for (name, reference) in &screen.css_variables {
        let _ = writeln!(out, "  {name}: {reference};");
    }
    out.push_str("}\n");
    out
}

/// `:root` block with placeholder references substituted through the theme.
pub fn generate_themed_css_variables(screen: &ResolvedScreen, tokens: &ThemeTokens) -> String {
    let mut out = String::from(":root {\n");
    for (name, reference) in &screen.css_variables {
        let value = resolve_token(tokens, reference);
        let _ = writeln!(out, "  {name}: {value};");
    }
    out.push_str("}\n");
    out
}

// ============================================================================
// Tailwind
// ============================================================================

/// Tailwind utility prefix for a bound style property, or `None` when only
/// the arbitrary-property escape hatch fits.
fn tailwind_prefix(property: &str) -> Option<&'static str> {
    match property {
        "background" => Some("bg"),
        "foreground" | "color" => Some("text"),
        "padding" => Some("p"),
        "margin" => Some("m"),
        "gap" => Some("gap"),
        "border" | "borderColor" => Some("border"),
        "borderRadius" => Some("rounded"),
        "width" => Some("w"),
        "height" => Some("h"),
        "maxWidth" => Some("max-w"),
        "shadow" | "boxShadow" => Some("shadow"),
        _ => None,
    }
}

/// Arbitrary-value utility classes for one component's token bindings.
pub fn component_tailwind_classes(component: &ResolvedComponent) -> Vec<String> {
    component
        .token_bindings
        .iter()
        .map(|(property, expression)| match tailwind_prefix(property) {
            Some(prefix) => format!("{prefix}-[{expression}]"),
            None => format!("[{}:{expression}]", kebab_case(property)),
        })
        .collect()
}

/// Class list per section/component pair, one mapping per line.
pub fn generate_tailwind_classes(screen: &ResolvedScreen) -> String {
    let mut out = String::new();
    for section in &screen.sections {
        for component in &section.components {
            let classes = component_tailwind_classes(component);
            let _ = writeln!(
                out,
                "{}/{}: {}",
                section.id,
                component.component_type,
                classes.join(" ")
            );
        }
    }
    out
}

// ============================================================================
// CSS-in-JS
// ============================================================================

fn write_component_styles(out: &mut String, component: &ResolvedComponent, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(out, "{pad}{}: {{", camel_case(&component.component_type));
    for (property, expression) in &component.token_bindings {
        let _ = writeln!(out, "{pad}  {property}: '{expression}',");
    }
    let _ = writeln!(out, "{pad}}},");
}

/// Nested object literal keyed by section id, then camelCased component type.
/// Repeated component types within a section collapse to one entry.
pub fn generate_css_in_js(screen: &ResolvedScreen) -> String {
    let mut out = String::from("export const styles = {\n");
    for section in &screen.sections {
        let _ = writeln!(out, "  '{}': {{", section.id);
        let mut seen = BTreeSet::new();
        for component in &section.components {
            if seen.insert(component.component_type.clone()) {
                write_component_styles(&mut out, component, 2);
            }
        }
        out.push_str("  },\n");
    }
    out.push_str("};\n");
    out
}

// ============================================================================
// JSX
// ============================================================================

fn escape_jsx(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

fn prop_attribute(name: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(format!("{name}=\"{s}\"")),
        Value::Number(n) => Some(format!("{name}={{{n}}}")),
        Value::Bool(b) => Some(format!("{name}={{{b}}}")),
        _ => None,
    }
}

fn write_component_jsx(out: &mut String, component: &ResolvedComponent, depth: usize) {
    let pad = "  ".repeat(depth);
    let tag = html_element(&component.component_type);

    let mut attributes = Vec::new();
    if !component.schema.a11y.role.is_empty() {
        attributes.push(format!("role=\"{}\"", component.schema.a11y.role));
    }
    if let Some(slot) = &component.slot {
        attributes.push(format!("data-slot=\"{slot}\""));
    }
    for (name, value) in &component.props {
        if name == "children" {
            continue;
        }
        if let Some(attribute) = prop_attribute(name, value) {
            attributes.push(attribute);
        }
    }
    // data-token attributes expose the binding for inspection tooling.
    for (property, expression) in &component.token_bindings {
        attributes.push(format!(
            "data-token-{}=\"{expression}\"",
            kebab_case(property)
        ));
    }

    let attributes = if attributes.is_empty() {
        String::new()
    } else {
        format!(" {}", attributes.join(" "))
    };

    let children = component.children.as_deref().unwrap_or_default();
    if children.is_empty() {
        let _ = writeln!(out, "{pad}<{tag}{attributes} />");
        return;
    }

    let _ = writeln!(out, "{pad}<{tag}{attributes}>");
    for child in children {
        match child {
            ResolvedChild::Text(text) => {
                let _ = writeln!(out, "{pad}  {}", escape_jsx(text));
            }
            ResolvedChild::Node(node) => write_component_jsx(out, node, depth + 1),
        }
    }
    let _ = writeln!(out, "{pad}</{tag}>");
}

/// Indented screen markup: a wrapper div, one `<section>` per resolved
/// section, components as HTML elements carrying `data-token-*` attributes.
pub fn generate_jsx(screen: &ResolvedScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div className=\"{}\" data-theme=\"{}\">",
        screen.id, screen.theme_id
    );
    for section in &screen.sections {
        let _ = writeln!(out, "  <section id=\"{}\">", section.id);
        for component in &section.components {
            write_component_jsx(&mut out, component, 2);
        }
        out.push_str("  </section>\n");
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutCatalog, LayoutResolver};
    use crate::schema::SchemaRegistry;
    use crate::screen::ScreenResolver;
    use serde_json::json;
    use tekton_types::ScreenDefinition;

    fn sample_screen() -> ResolvedScreen {
        let resolver = ScreenResolver::new(
            SchemaRegistry::builtin(),
            LayoutResolver::new(LayoutCatalog::builtin()),
        );
        let definition: ScreenDefinition = serde_json::from_value(json!({
            "id": "checkout",
            "name": "Checkout",
            "shell": "shell.web.app",
            "page": "page.form",
            "sections": [{
                "id": "payment",
                "pattern": "section.stack",
                "components": [
                    {
                        "type": "Card",
                        "props": { "variant": "elevated" },
                        "children": [
                            { "type": "Heading", "props": { "level": 2 }, "children": ["Payment"] },
                            { "type": "Button", "props": { "variant": "primary" }, "children": ["Pay now"] }
                        ]
                    },
                    { "type": "Image", "props": { "src": "/badge.svg", "alt": "Secure checkout" } }
                ]
            }]
        }))
        .unwrap();
        resolver.resolve(&definition).unwrap()
    }

    #[test]
    fn css_variables_block_declares_every_screen_variable() {
        let screen = sample_screen();
        let css = generate_css_variables(&screen);
        assert!(css.starts_with(":root {\n"));
        assert!(css.trim_end().ends_with('}'));
        for (name, reference) in &screen.css_variables {
            assert!(css.contains(&format!("  {name}: {reference};")));
        }
    }

    #[test]
    fn themed_variables_substitute_token_values() {
        let screen = sample_screen();
        let tokens: ThemeTokens = serde_json::from_value(json!({
            "atomic": { "spacing": { "2": "8px", "4": "16px", "16": "64px" } },
            "semantic": {},
            "component": {}
        }))
        .unwrap();
        let css = generate_themed_css_variables(&screen, &tokens);
        assert!(css.contains("--tekton-atomic-spacing-2: 8px;"));
        // Unresolvable references fall back rather than leaking placeholders.
        assert!(!css.contains(": semantic."));
    }

    #[test]
    fn tailwind_classes_use_arbitrary_values() {
        let screen = sample_screen();
        let tailwind = generate_tailwind_classes(&screen);
        assert!(tailwind.contains("payment/Card:"));
        assert!(
            tailwind.contains("bg-[var(--tekton-semantic-background-surface)]"),
            "{tailwind}"
        );
        assert!(tailwind.contains("rounded-[var(--tekton-semantic-radius-container)]"));
    }

    #[test]
    fn unmapped_properties_become_arbitrary_property_classes() {
        let screen = sample_screen();
        let card = &screen.sections[0].components[0];
        // Card binds "border", mapped; synthesize an unmapped one via Progress
        // semantics instead: track/fill have no utility prefix.
        let classes = component_tailwind_classes(card);
        assert!(classes.iter().all(|c| !c.is_empty()));

        let definition: ScreenDefinition = serde_json::from_value(json!({
            "id": "status",
            "name": "Status",
            "shell": "shell.web.app",
            "page": "page.dashboard",
            "sections": [{
                "id": "jobs",
                "pattern": "section.stack",
                "components": [
                    { "type": "Progress", "props": { "value": 40, "label": "Sync" } }
                ]
            }]
        }))
        .unwrap();
        let resolver = ScreenResolver::new(
            SchemaRegistry::builtin(),
            LayoutResolver::new(LayoutCatalog::builtin()),
        );
        let progress = resolver.resolve(&definition).unwrap();
        let tailwind = generate_tailwind_classes(&progress);
        assert!(tailwind.contains("[track:var(--tekton-atomic-color-neutral-200)]"));
    }

    #[test]
    fn css_in_js_nests_sections_and_components() {
        let screen = sample_screen();
        let code = generate_css_in_js(&screen);
        assert!(code.starts_with("export const styles = {"));
        assert!(code.contains("'payment': {"));
        assert!(code.contains("card: {"));
        assert!(code.contains("image: {"));
        assert!(code.contains("background: 'var(--tekton-semantic-background-surface)',"));
    }

    #[test]
    fn jsx_renders_nested_markup_with_data_tokens() {
        let screen = sample_screen();
        let jsx = generate_jsx(&screen);
        assert!(jsx.contains("<div className=\"checkout\" data-theme=\"default\">"));
        assert!(jsx.contains("<section id=\"payment\">"));
        assert!(jsx.contains("role=\"group\""));
        assert!(jsx.contains(
            "data-token-background=\"var(--tekton-component-button-primary-background)\""
        ));
        assert!(jsx.contains("Pay now"));
        // Image has no children and self-closes with its props.
        assert!(jsx.contains("src=\"/badge.svg\""));
        assert!(jsx.contains("alt=\"Secure checkout\""));
        assert!(jsx.contains(" />"));
    }

    #[test]
    fn jsx_escapes_text_children() {
        let definition: ScreenDefinition = serde_json::from_value(json!({
            "id": "docs",
            "name": "Docs",
            "shell": "shell.web.app",
            "page": "page.detail",
            "sections": [{
                "id": "body",
                "pattern": "section.stack",
                "components": [
                    { "type": "Text", "props": {}, "children": ["a < b && b > c"] }
                ]
            }]
        }))
        .unwrap();
        let resolver = ScreenResolver::new(
            SchemaRegistry::builtin(),
            LayoutResolver::new(LayoutCatalog::builtin()),
        );
        let screen = resolver.resolve(&definition).unwrap();
        let jsx = generate_jsx(&screen);
        assert!(jsx.contains("a &lt; b &amp;&amp; b &gt; c"));
    }

    #[test]
    fn kebab_case_splits_camel_humps() {
        assert_eq!(kebab_case("borderRadius"), "border-radius");
        assert_eq!(kebab_case("background"), "background");
        assert_eq!(kebab_case("menuBackground"), "menu-background");
    }
}
