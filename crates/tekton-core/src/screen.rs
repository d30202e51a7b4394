// ABOUTME: Screen definition resolution: validate, resolve components, resolve layout, assemble
// ABOUTME: Per-node failures collect into the result; only a rejected definition is an Err

use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tekton_logging::{debug, warn};
use tekton_types::{
    ComponentChild, ComponentDefinition, ComponentProps, ScreenDefinition, ScreenMeta,
    SectionDefinition, TokenReference,
};
use thiserror::Error;

use crate::layout::{LayoutResolver, ResolvedLayout};
use crate::schema::{ComponentSchema, SchemaRegistry};
use crate::tokens::ValidationIssue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScreenError {
    #[error("invalid screen definition ({} issue(s))", .0.len())]
    InvalidDefinition(Vec<ValidationIssue>),
}

/// One recoverable problem encountered during resolution. Indices locate the
/// offending node within the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_index: Option<usize>,
    pub message: String,
}

impl ResolutionError {
    fn screen(message: impl Into<String>) -> Self {
        Self {
            section_index: None,
            component_index: None,
            message: message.into(),
        }
    }

    fn section(index: usize, message: impl Into<String>) -> Self {
        Self {
            section_index: Some(index),
            component_index: None,
            message: message.into(),
        }
    }

    fn component(section: usize, component: usize, message: impl Into<String>) -> Self {
        Self {
            section_index: Some(section),
            component_index: Some(component),
            message: message.into(),
        }
    }
}

/// A child of a resolved component: nested component or literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedChild {
    Text(String),
    Node(Box<ResolvedComponent>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedComponent {
    #[serde(rename = "type")]
    pub component_type: String,
    pub schema: ComponentSchema,
    /// Props exactly as authored.
    pub props: ComponentProps,
    /// Props with schema defaults applied.
    pub resolved_props: ComponentProps,
    /// Style property to CSS `var()` expression.
    pub token_bindings: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ResolvedChild>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSection {
    pub id: String,
    pub layout: ResolvedLayout,
    pub components: Vec<ResolvedComponent>,
    pub css_variables: BTreeMap<String, String>,
}

/// Type/slot skeleton of the screen, stripped of props and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTreeNode {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentTreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTree {
    pub section_id: String,
    pub components: Vec<ComponentTreeNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentTree {
    pub sections: Vec<SectionTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedScreen {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shell: ResolvedLayout,
    pub page: ResolvedLayout,
    pub sections: Vec<ResolvedSection>,
    pub css_variables: BTreeMap<String, String>,
    pub component_tree: ComponentTree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ScreenMeta>,
    pub theme_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ResolutionError>,
}

/// Summary counts for logging and quick assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenStats {
    pub sections: usize,
    pub components: usize,
    pub css_variables: usize,
    pub errors: usize,
}

fn count_component(component: &ResolvedComponent) -> usize {
    1 + component
        .children
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|child| match child {
            ResolvedChild::Node(node) => count_component(node),
            ResolvedChild::Text(_) => 0,
        })
        .sum::<usize>()
}

pub fn screen_stats(screen: &ResolvedScreen) -> ScreenStats {
    ScreenStats {
        sections: screen.sections.len(),
        components: screen
            .sections
            .iter()
            .flat_map(|s| s.components.iter())
            .map(count_component)
            .sum(),
        css_variables: screen.css_variables.len(),
        errors: screen.errors.len(),
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Cache of resolved screens keyed by (definition hash, theme id).
///
/// The hash covers the full serialized definition, so any edit invalidates
/// naturally; clear explicitly when the theme changes underneath a stable
/// definition.
#[derive(Debug, Clone, Default)]
pub struct ScreenCache {
    entries: Arc<Mutex<BTreeMap<(u64, String), ResolvedScreen>>>,
}

impl ScreenCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &(u64, String)) -> Option<ResolvedScreen> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: (u64, String), screen: ResolvedScreen) {
        self.entries.lock().insert(key, screen);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn definition_hash(definition: &ScreenDefinition) -> u64 {
    let mut hasher = DefaultHasher::new();
    // Canonical serialization: map keys in ComponentProps are ordered.
    match serde_json::to_string(definition) {
        Ok(canonical) => canonical.hash(&mut hasher),
        Err(_) => definition.id.hash(&mut hasher),
    }
    hasher.finish()
}

// ============================================================================
// Template substitution
// ============================================================================

/// Substitute `{prop}` template variables in a token binding from props.
fn substitute_template(binding: &str, props: &ComponentProps) -> Result<String, String> {
    let mut result = String::with_capacity(binding.len());
    let mut rest = binding;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(format!("unterminated template variable in '{binding}'"));
        };
        let name = &after[..close];
        let value = props
            .get(name)
            .ok_or_else(|| format!("template variable '{name}' not found in props"))?;
        match value {
            Value::String(s) => result.push_str(s),
            Value::Number(n) => result.push_str(&n.to_string()),
            _ => {
                return Err(format!(
                    "template variable '{name}' must be a string or number"
                ));
            }
        }
        rest = &after[close + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

// ============================================================================
// Phase 1: validation
// ============================================================================

fn component_satisfies_prop(definition: &ComponentDefinition, prop_name: &str) -> bool {
    if definition.props.contains_key(prop_name) {
        return true;
    }
    // The children field satisfies a required `children` prop.
    prop_name == "children"
        && definition
            .children
            .as_ref()
            .is_some_and(|children| !children.is_empty())
}

fn validate_component(
    definition: &ComponentDefinition,
    registry: &SchemaRegistry,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    // An unknown type is not a structural defect. Resolution records it as a
    // per-node error so sibling components still resolve; without a schema
    // there are no prop requirements to check here, and the node's subtree is
    // dropped during resolution anyway.
    let Some(schema) = registry.get(&definition.component_type) else {
        return;
    };

    for prop in &schema.props {
        if prop.required
            && prop.default_value.is_none()
            && !component_satisfies_prop(definition, &prop.name)
        {
            issues.push(ValidationIssue::new(
                path,
                format!(
                    "required prop '{}' missing for component '{}'",
                    prop.name, definition.component_type
                ),
            ));
        }
    }

    for child in definition.children.as_deref().unwrap_or_default() {
        if let ComponentChild::Node(node) = child {
            validate_component(node, registry, &format!("{path}.children"), issues);
        }
    }
}

/// Structural validation of a screen definition against the schema registry.
pub fn validate_screen_definition(
    definition: &ScreenDefinition,
    registry: &SchemaRegistry,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if definition.id.trim().is_empty() {
        issues.push(ValidationIssue::new("id", "screen id must be non-empty"));
    }
    if definition.name.trim().is_empty() {
        issues.push(ValidationIssue::new("name", "screen name must be non-empty"));
    }
    if definition.sections.is_empty() {
        issues.push(ValidationIssue::new(
            "sections",
            "screen must declare at least one section",
        ));
    }

    for (s, section) in definition.sections.iter().enumerate() {
        let base = format!("sections[{s}]");
        if section.id.trim().is_empty() {
            issues.push(ValidationIssue::new(&base, "section id must be non-empty"));
        }
        if !section.pattern.starts_with("section.") {
            issues.push(ValidationIssue::new(
                format!("{base}.pattern"),
                format!("'{}' is not a section pattern id", section.pattern),
            ));
        }
        for (c, component) in section.components.iter().enumerate() {
            validate_component(
                component,
                registry,
                &format!("{base}.components[{c}]"),
                &mut issues,
            );
        }
    }

    issues
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves screen definitions through four sequential phases: validate,
/// resolve components, resolve layout, assemble.
pub struct ScreenResolver {
    registry: SchemaRegistry,
    layouts: LayoutResolver,
    cache: ScreenCache,
}

impl ScreenResolver {
    pub fn new(registry: SchemaRegistry, layouts: LayoutResolver) -> Self {
        Self::with_cache(registry, layouts, ScreenCache::new())
    }

    pub fn with_cache(registry: SchemaRegistry, layouts: LayoutResolver, cache: ScreenCache) -> Self {
        Self {
            registry,
            layouts,
            cache,
        }
    }

    /// Drop cached screens and layouts. Call on theme change.
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.layouts.clear_cache();
    }

    /// Resolve a screen definition.
    ///
    /// Returns `Err` only when the definition itself fails structural
    /// validation. Problems inside individual sections or components are
    /// collected in [`ResolvedScreen::errors`] while their siblings resolve
    /// normally.
    pub fn resolve(&self, definition: &ScreenDefinition) -> Result<ResolvedScreen, ScreenError> {
        let theme_id = definition.theme_id().to_string();
        let key = (definition_hash(definition), theme_id.clone());
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        // Phase 1: whole-definition validation halts resolution.
        let issues = validate_screen_definition(definition, &self.registry);
        if !issues.is_empty() {
            return Err(ScreenError::InvalidDefinition(issues));
        }

        let mut errors = Vec::new();

        // Phase 3 runs per tier; shell and page failures degrade to an empty
        // layout so section resolution still proceeds.
        let shell = self.resolve_tier(&definition.shell, &mut errors);
        let page = self.resolve_tier(&definition.page, &mut errors);

        // Phases 2+3 per section: pattern layout, then the component list.
        let mut sections = Vec::with_capacity(definition.sections.len());
        for (s, section) in definition.sections.iter().enumerate() {
            match self.resolve_section(section, s, &mut errors) {
                Some(resolved) => sections.push(resolved),
                None => continue,
            }
        }

        // Phase 4: assemble.
        let mut css_variables = shell.css_variables.clone();
        css_variables.extend(page.css_variables.clone());
        for section in &sections {
            css_variables.extend(section.css_variables.clone());
        }

        let component_tree = build_component_tree(&sections);

        let screen = ResolvedScreen {
            id: definition.id.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            shell,
            page,
            sections,
            css_variables,
            component_tree,
            meta: definition.meta.clone(),
            theme_id,
            errors,
        };

        let stats = screen_stats(&screen);
        debug!(
            screen = %screen.id,
            sections = stats.sections,
            components = stats.components,
            errors = stats.errors,
            "resolved screen"
        );

        self.cache.set(key, screen.clone());
        Ok(screen)
    }

    fn resolve_tier(&self, layout_id: &str, errors: &mut Vec<ResolutionError>) -> ResolvedLayout {
        match self.layouts.resolve(layout_id) {
            Ok(layout) => layout,
            Err(err) => {
                warn!(layout_id, %err, "layout tier failed to resolve");
                errors.push(ResolutionError::screen(format!(
                    "layout '{layout_id}' failed to resolve: {err}"
                )));
                empty_layout()
            }
        }
    }

    fn resolve_section(
        &self,
        section: &SectionDefinition,
        section_index: usize,
        errors: &mut Vec<ResolutionError>,
    ) -> Option<ResolvedSection> {
        let mut layout = match self.layouts.resolve(&section.pattern) {
            Ok(layout) => layout,
            Err(err) => {
                errors.push(ResolutionError::section(
                    section_index,
                    format!(
                        "section '{}' pattern '{}' failed to resolve: {err}",
                        section.id, section.pattern
                    ),
                ));
                return None;
            }
        };

        if let Some(overrides) = &section.responsive {
            apply_responsive_overrides(&mut layout.responsive, overrides);
        }

        let mut css_variables = layout.css_variables.clone();
        let mut components = Vec::with_capacity(section.components.len());
        for (c, definition) in section.components.iter().enumerate() {
            match self.resolve_component(definition, section_index, c, &mut css_variables, errors) {
                Some(component) => components.push(component),
                None => continue,
            }
        }

        Some(ResolvedSection {
            id: section.id.clone(),
            layout,
            components,
            css_variables,
        })
    }

    fn resolve_component(
        &self,
        definition: &ComponentDefinition,
        section_index: usize,
        component_index: usize,
        css_variables: &mut BTreeMap<String, String>,
        errors: &mut Vec<ResolutionError>,
    ) -> Option<ResolvedComponent> {
        let Some(schema) = self.registry.get(&definition.component_type) else {
            errors.push(ResolutionError::component(
                section_index,
                component_index,
                format!("unknown component type '{}'", definition.component_type),
            ));
            return None;
        };

        // Merge schema defaults under authored props.
        let mut resolved_props = ComponentProps::new();
        for prop in &schema.props {
            if let Some(default) = &prop.default_value {
                resolved_props.insert(prop.name.clone(), default.clone());
            }
        }
        for (name, value) in &definition.props {
            resolved_props.insert(name.clone(), value.clone());
        }

        // Bindings: substitute templates, then convert to CSS var expressions.
        let mut token_bindings = BTreeMap::new();
        for (property, binding) in &schema.token_bindings {
            match substitute_template(binding, &resolved_props) {
                Ok(reference) => {
                    let reference = TokenReference::new(reference);
                    css_variables.insert(reference.css_var_name(), reference.as_str().to_string());
                    token_bindings.insert(property.clone(), reference.css_var());
                }
                Err(message) => {
                    errors.push(ResolutionError::component(
                        section_index,
                        component_index,
                        format!(
                            "binding '{property}' of '{}': {message}",
                            definition.component_type
                        ),
                    ));
                }
            }
        }

        // Children resolve recursively; failed children are dropped with
        // their own error entries.
        let children = definition.children.as_ref().map(|children| {
            children
                .iter()
                .filter_map(|child| match child {
                    ComponentChild::Text(text) => Some(ResolvedChild::Text(text.clone())),
                    ComponentChild::Node(node) => self
                        .resolve_component(node, section_index, component_index, css_variables, errors)
                        .map(|resolved| ResolvedChild::Node(Box::new(resolved))),
                })
                .collect::<Vec<_>>()
        });

        Some(ResolvedComponent {
            component_type: definition.component_type.clone(),
            schema: schema.clone(),
            props: definition.props.clone(),
            resolved_props,
            token_bindings,
            children,
            slot: definition.slot.clone(),
        })
    }
}

/// Merge per-breakpoint overrides from the definition into the section's
/// tier-erased responsive config. Object values merge key-wise; anything else
/// replaces wholesale. Unknown breakpoint names are ignored with a warning.
fn apply_responsive_overrides(
    responsive: &mut tekton_types::ResponsiveConfig<Value>,
    overrides: &tekton_types::ResponsiveOverrides,
) {
    for (breakpoint, values) in overrides {
        let slot = match breakpoint.as_str() {
            "default" => &mut responsive.default,
            "sm" => responsive.sm.get_or_insert(Value::Null),
            "md" => responsive.md.get_or_insert(Value::Null),
            "lg" => responsive.lg.get_or_insert(Value::Null),
            "xl" => responsive.xl.get_or_insert(Value::Null),
            "2xl" => responsive.xxl.get_or_insert(Value::Null),
            other => {
                warn!(breakpoint = other, "unknown breakpoint in responsive overrides");
                continue;
            }
        };
        match slot {
            Value::Object(existing) => {
                for (key, value) in values {
                    existing.insert(key.clone(), value.clone());
                }
            }
            _ => {
                *slot = Value::Object(values.clone().into_iter().collect());
            }
        }
    }
}

fn empty_layout() -> ResolvedLayout {
    ResolvedLayout {
        shell: None,
        page: None,
        sections: Vec::new(),
        responsive: Default::default(),
        css_variables: BTreeMap::new(),
    }
}

fn build_tree_node(component: &ResolvedComponent) -> ComponentTreeNode {
    ComponentTreeNode {
        component_type: component.component_type.clone(),
        slot: component.slot.clone(),
        children: component
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|child| match child {
                ResolvedChild::Node(node) => Some(build_tree_node(node)),
                ResolvedChild::Text(_) => None,
            })
            .collect(),
    }
}

fn build_component_tree(sections: &[ResolvedSection]) -> ComponentTree {
    ComponentTree {
        sections: sections
            .iter()
            .map(|section| SectionTree {
                section_id: section.id.clone(),
                components: section.components.iter().map(build_tree_node).collect(),
            })
            .collect(),
    }
}
