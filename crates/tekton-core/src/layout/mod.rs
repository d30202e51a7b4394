// ABOUTME: Layout catalog lookup, resolution, responsive merging, and caching
// ABOUTME: Resolution never mutates the catalog; caches are injected and clearable

pub mod catalog;
pub mod css;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tekton_logging::debug;
use tekton_types::layout::PageConfig;
use tekton_types::{
    MergeOverride, PageLayoutToken, ResponsiveConfig, SectionPatternToken, ShellToken,
    TokenReference,
};
use thiserror::Error;

pub use catalog::LayoutCatalog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown layout: {0}")]
    UnknownLayout(String),
    #[error("invalid layout id: {0} (must start with 'shell.', 'page.', or 'section.')")]
    InvalidLayoutId(String),
    #[error("generated CSS has unbalanced braces")]
    UnbalancedCss,
}

/// A layout id's tier, derived from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutTier {
    Shell,
    Page,
    Section,
}

fn parse_tier(layout_id: &str) -> Result<LayoutTier, LayoutError> {
    if layout_id.starts_with("shell.") {
        Ok(LayoutTier::Shell)
    } else if layout_id.starts_with("page.") {
        Ok(LayoutTier::Page)
    } else if layout_id.starts_with("section.") {
        Ok(LayoutTier::Section)
    } else {
        Err(LayoutError::InvalidLayoutId(layout_id.to_string()))
    }
}

/// Complete resolved layout: the tokens involved plus derived CSS variables.
///
/// `css_variables` maps each emitted custom property name to the token
/// reference it stands for; values are filled in by the token resolver at
/// generation time, keeping layouts theme-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<ShellToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageLayoutToken>,
    pub sections: Vec<SectionPatternToken>,
    /// Tier-erased responsive configuration of the primary token.
    pub responsive: ResponsiveConfig<Value>,
    pub css_variables: BTreeMap<String, String>,
}

/// Collect token references (strings with a recognized layer prefix) from any
/// serializable token, mapped to their CSS custom property names.
fn collect_css_variables<T: Serialize>(token: &T) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    if let Ok(value) = serde_json::to_value(token) {
        walk_refs(&value, &mut vars);
    }
    vars
}

fn walk_refs(value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::String(s) => {
            let reference = TokenReference::new(s.as_str());
            if reference.layer().is_some() && reference.is_wellformed() {
                out.insert(reference.css_var_name(), s.clone());
            }
        }
        Value::Object(map) => {
            for v in map.values() {
                walk_refs(v, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                walk_refs(v, out);
            }
        }
        _ => {}
    }
}

/// Re-encode a typed responsive config as a JSON-valued one so shells, pages,
/// and sections can share [`ResolvedLayout`].
fn erase_responsive<T: Serialize>(config: &ResponsiveConfig<T>) -> ResponsiveConfig<Value> {
    serde_json::to_value(config)
        .ok()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

/// Merge responsive overrides onto a base configuration, mobile-first.
///
/// The override wins field-by-field at each breakpoint; breakpoints absent
/// from the override inherit the base unchanged.
pub fn merge_responsive_config<T: MergeOverride + Clone>(
    base: &ResponsiveConfig<T>,
    overrides: Option<&ResponsiveConfig<T>>,
) -> ResponsiveConfig<T> {
    let Some(overrides) = overrides else {
        return base.clone();
    };

    let merge_slot = |b: &Option<T>, o: &Option<T>| -> Option<T> {
        match (b, o) {
            (Some(b), Some(o)) => {
                let mut merged = b.clone();
                merged.merge_from(o);
                Some(merged)
            }
            (None, Some(o)) => Some(o.clone()),
            (b, None) => b.clone(),
        }
    };

    let mut default = base.default.clone();
    default.merge_from(&overrides.default);

    ResponsiveConfig {
        default,
        sm: merge_slot(&base.sm, &overrides.sm),
        md: merge_slot(&base.md, &overrides.md),
        lg: merge_slot(&base.lg, &overrides.lg),
        xl: merge_slot(&base.xl, &overrides.xl),
        xxl: merge_slot(&base.xxl, &overrides.xxl),
    }
}

/// Shared, clearable cache of resolved layouts keyed by layout id.
///
/// Cloning shares the underlying map; resolvers created with the same cache
/// see each other's entries. Clear on catalog or theme change.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    entries: Arc<Mutex<HashMap<String, ResolvedLayout>>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ResolvedLayout> {
        self.entries.lock().get(key).cloned()
    }

    pub fn set(&self, key: String, layout: ResolvedLayout) {
        self.entries.lock().insert(key, layout);
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

/// Resolves layout ids against one catalog.
pub struct LayoutResolver {
    catalog: LayoutCatalog,
    cache: ResolutionCache,
}

impl LayoutResolver {
    pub fn new(catalog: LayoutCatalog) -> Self {
        Self::with_cache(catalog, ResolutionCache::new())
    }

    pub fn with_cache(catalog: LayoutCatalog, cache: ResolutionCache) -> Self {
        Self { catalog, cache }
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Resolve a shell, page, or section id to its full layout.
    pub fn resolve(&self, layout_id: &str) -> Result<ResolvedLayout, LayoutError> {
        if let Some(cached) = self.cache.get(layout_id) {
            return Ok(cached);
        }

        let resolved = match parse_tier(layout_id)? {
            LayoutTier::Shell => self.resolve_shell(layout_id)?,
            LayoutTier::Page => self.resolve_page(layout_id)?,
            LayoutTier::Section => self.resolve_section(layout_id)?,
        };

        debug!(layout_id, "resolved layout");
        self.cache.set(layout_id.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_shell(&self, layout_id: &str) -> Result<ResolvedLayout, LayoutError> {
        let shell = self
            .catalog
            .shell(layout_id)
            .ok_or_else(|| LayoutError::UnknownLayout(layout_id.to_string()))?;
        Ok(ResolvedLayout {
            css_variables: collect_css_variables(shell),
            responsive: erase_responsive(&shell.responsive),
            shell: Some(shell.clone()),
            page: None,
            sections: Vec::new(),
        })
    }

    fn resolve_page(&self, layout_id: &str) -> Result<ResolvedLayout, LayoutError> {
        let page = self
            .catalog
            .page(layout_id)
            .ok_or_else(|| LayoutError::UnknownLayout(layout_id.to_string()))?;

        let mut sections = Vec::with_capacity(page.sections.len());
        for slot in &page.sections {
            let section = self
                .catalog
                .section(&slot.pattern)
                .ok_or_else(|| LayoutError::UnknownLayout(slot.pattern.clone()))?;
            sections.push(section.clone());
        }

        let mut css_variables = collect_css_variables(page);
        for section in &sections {
            css_variables.append(&mut collect_css_variables(section));
        }

        Ok(ResolvedLayout {
            responsive: erase_responsive(&page.responsive),
            shell: None,
            page: Some(page.clone()),
            sections,
            css_variables,
        })
    }

    fn resolve_section(&self, layout_id: &str) -> Result<ResolvedLayout, LayoutError> {
        let section = self
            .catalog
            .section(layout_id)
            .ok_or_else(|| LayoutError::UnknownLayout(layout_id.to_string()))?;
        Ok(ResolvedLayout {
            css_variables: collect_css_variables(section),
            responsive: erase_responsive(&section.responsive),
            shell: None,
            page: None,
            sections: vec![section.clone()],
        })
    }

    /// Resolve and compose all three tiers of a screen's layout.
    ///
    /// Responsive overrides apply to the page tier; shell and section
    /// responsive configurations pass through untouched.
    pub fn resolve_screen_layout(
        &self,
        shell_id: &str,
        page_id: &str,
        section_ids: &[String],
        responsive_overrides: Option<&ResponsiveConfig<PageConfig>>,
    ) -> Result<ResolvedLayout, LayoutError> {
        let shell = self.resolve(shell_id)?;
        let page = self.resolve(page_id)?;

        let mut sections = page.sections.clone();
        for id in section_ids {
            let resolved = self.resolve(id)?;
            for section in resolved.sections {
                if !sections.iter().any(|s| s.id == section.id) {
                    sections.push(section);
                }
            }
        }

        let mut css_variables = shell.css_variables.clone();
        css_variables.extend(page.css_variables.clone());
        for section in &sections {
            css_variables.append(&mut collect_css_variables(section));
        }

        let base = match &page.page {
            Some(token) => token.responsive.clone(),
            None => ResponsiveConfig::uniform(PageConfig::new()),
        };
        let responsive = erase_responsive(&merge_responsive_config(&base, responsive_overrides));

        Ok(ResolvedLayout {
            shell: shell.shell,
            page: page.page,
            sections,
            responsive,
            css_variables,
        })
    }

    /// Drop every cached resolution. Call when the catalog or theme changes.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> LayoutResolver {
        LayoutResolver::new(LayoutCatalog::builtin())
    }

    #[test]
    fn invalid_id_is_rejected() {
        let err = resolver().resolve("bogus.web.app").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidLayoutId(_)));
    }

    #[test]
    fn unknown_shell_is_reported() {
        let err = resolver().resolve("shell.web.nonexistent").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownLayout("shell.web.nonexistent".into())
        );
    }

    #[test]
    fn shell_resolution_populates_shell_only() {
        let layout = resolver().resolve("shell.web.app").unwrap();
        assert!(layout.shell.is_some());
        assert!(layout.page.is_none());
        assert!(layout.sections.is_empty());
        assert!(!layout.css_variables.is_empty());
    }

    #[test]
    fn page_resolution_pulls_in_its_sections() {
        let layout = resolver().resolve("page.dashboard").unwrap();
        let page = layout.page.as_ref().unwrap();
        assert_eq!(layout.sections.len(), page.sections.len());
    }

    #[test]
    fn css_variables_carry_the_prefix_and_reference() {
        let layout = resolver().resolve("section.grid-3").unwrap();
        for (name, reference) in &layout.css_variables {
            assert!(name.starts_with("--tekton-"), "bad var name {name}");
            assert!(reference.contains('.'), "bad reference {reference}");
        }
    }

    #[test]
    fn cache_is_shared_and_clearable() {
        let cache = ResolutionCache::new();
        let resolver = LayoutResolver::with_cache(LayoutCatalog::builtin(), cache.clone());
        resolver.resolve("section.grid-2").unwrap();
        assert_eq!(cache.len(), 1);
        resolver.resolve("section.grid-2").unwrap();
        assert_eq!(cache.len(), 1);
        resolver.clear_cache();
        assert!(cache.is_empty());
    }

    #[test]
    fn screen_layout_composes_three_tiers() {
        let layout = resolver()
            .resolve_screen_layout(
                "shell.web.dashboard",
                "page.dashboard",
                &["section.hero".to_string()],
                None,
            )
            .unwrap();
        assert!(layout.shell.is_some());
        assert!(layout.page.is_some());
        assert!(layout.sections.iter().any(|s| s.id == "section.hero"));
        assert!(layout.sections.iter().any(|s| s.id == "section.grid-4"));
    }

    #[test]
    fn responsive_override_wins_per_breakpoint() {
        let mut base = ResponsiveConfig::uniform(PageConfig::new());
        let mut md = PageConfig::new();
        md.insert("columns".into(), json!(2));
        base.set(tekton_types::Breakpoint::Md, md);

        let mut overrides = ResponsiveConfig::uniform(PageConfig::new());
        let mut md_override = PageConfig::new();
        md_override.insert("columns".into(), json!(3));
        overrides.set(tekton_types::Breakpoint::Md, md_override);
        let mut lg = PageConfig::new();
        lg.insert("columns".into(), json!(4));
        overrides.set(tekton_types::Breakpoint::Lg, lg);

        let merged = merge_responsive_config(&base, Some(&overrides));
        assert_eq!(
            merged.get(tekton_types::Breakpoint::Md).unwrap()["columns"],
            json!(3)
        );
        assert_eq!(
            merged.get(tekton_types::Breakpoint::Lg).unwrap()["columns"],
            json!(4)
        );
    }

    #[test]
    fn unspecified_breakpoints_inherit() {
        let mut base = ResponsiveConfig::uniform(PageConfig::new());
        let mut xl = PageConfig::new();
        xl.insert("width".into(), json!("80rem"));
        base.set(tekton_types::Breakpoint::Xl, xl);

        let merged = merge_responsive_config(&base, Some(&ResponsiveConfig::uniform(PageConfig::new())));
        assert_eq!(
            merged.get(tekton_types::Breakpoint::Xl).unwrap()["width"],
            json!("80rem")
        );
    }
}
