// ABOUTME: Builtin shell, page, and section layout token presets
// ABOUTME: The catalog is a value; resolvers receive it rather than reaching for globals

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use tekton_types::layout::{PageConfig, ShellConfig};
use tekton_types::{
    PageLayoutToken, PagePurpose, ResponsiveConfig, SectionCss, SectionPatternToken, SectionSlot,
    SectionType, ShellPlatform, ShellRegion, ShellRegionPosition, ShellToken, TokenReference,
};

/// Registry of layout tokens for one design system.
///
/// Not user-extensible at this layer: the catalog is constructed whole and
/// injected into resolvers. Multiple catalogs can coexist (tests build small
/// ones).
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    shells: BTreeMap<String, ShellToken>,
    pages: BTreeMap<String, PageLayoutToken>,
    sections: BTreeMap<String, SectionPatternToken>,
}

impl LayoutCatalog {
    pub fn new(
        shells: Vec<ShellToken>,
        pages: Vec<PageLayoutToken>,
        sections: Vec<SectionPatternToken>,
    ) -> Self {
        Self {
            shells: shells.into_iter().map(|s| (s.id.clone(), s)).collect(),
            pages: pages.into_iter().map(|p| (p.id.clone(), p)).collect(),
            sections: sections.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// The builtin preset catalog.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn shell(&self, id: &str) -> Option<&ShellToken> {
        self.shells.get(id)
    }

    pub fn page(&self, id: &str) -> Option<&PageLayoutToken> {
        self.pages.get(id)
    }

    pub fn section(&self, id: &str) -> Option<&SectionPatternToken> {
        self.sections.get(id)
    }

    pub fn shells(&self) -> impl Iterator<Item = &ShellToken> {
        self.shells.values()
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageLayoutToken> {
        self.pages.values()
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionPatternToken> {
        self.sections.values()
    }
}

static BUILTIN: Lazy<LayoutCatalog> = Lazy::new(|| {
    LayoutCatalog::new(builtin_shells(), builtin_pages(), builtin_sections())
});

// ============================================================================
// Construction helpers
// ============================================================================

fn region(
    name: &str,
    position: ShellRegionPosition,
    size: &str,
    collapsible: bool,
) -> ShellRegion {
    ShellRegion {
        name: name.to_string(),
        position,
        size: TokenReference::new(size),
        collapsible,
        default_collapsed: false,
    }
}

fn bindings(pairs: &[(&str, &str)]) -> BTreeMap<String, TokenReference> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), TokenReference::new(*v)))
        .collect()
}

fn config(pairs: &[(&str, &str)]) -> BTreeMap<String, serde_json::Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect()
}

fn grid_css(columns: &str, gap: &str) -> SectionCss {
    SectionCss {
        display: Some("grid".into()),
        grid_template_columns: Some(columns.into()),
        gap: Some(TokenReference::new(gap)),
        ..Default::default()
    }
}

// ============================================================================
// Shells
// ============================================================================

fn builtin_shells() -> Vec<ShellToken> {
    vec![
        ShellToken {
            id: "shell.web.app".into(),
            description: "Standard web application frame with header, sidebar, and main area"
                .into(),
            platform: ShellPlatform::Web,
            regions: vec![
                region("header", ShellRegionPosition::Top, "atomic.spacing.16", false),
                region("sidebar", ShellRegionPosition::Left, "atomic.spacing.64", true),
                region("main", ShellRegionPosition::Center, "atomic.spacing.full", false),
                region("footer", ShellRegionPosition::Bottom, "atomic.spacing.12", false),
            ],
            responsive: ResponsiveConfig {
                default: config(&[
                    ("sidebarVisible", "false"),
                    ("headerHeight", "atomic.spacing.14"),
                ]),
                md: Some(config(&[
                    ("sidebarVisible", "true"),
                    ("headerHeight", "atomic.spacing.16"),
                ])),
                lg: Some(config(&[("sidebarWidth", "atomic.spacing.64")])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("headerBackground", "semantic.background.surface"),
                ("sidebarBackground", "semantic.background.elevated"),
                ("mainBackground", "semantic.background.page"),
                ("headerBorder", "semantic.border.default"),
            ]),
        },
        ShellToken {
            id: "shell.web.marketing".into(),
            description: "Marketing page frame with full-width hero and stacked content".into(),
            platform: ShellPlatform::Web,
            regions: vec![
                region("hero", ShellRegionPosition::Top, "atomic.spacing.full", false),
                region("features", ShellRegionPosition::Center, "atomic.spacing.full", false),
                region("footer", ShellRegionPosition::Bottom, "atomic.spacing.16", false),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("contentPadding", "atomic.spacing.4")]),
                md: Some(config(&[("contentPadding", "atomic.spacing.8")])),
                lg: Some(config(&[("contentPadding", "atomic.spacing.12")])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("heroBackground", "semantic.background.brand"),
                ("featuresBackground", "semantic.background.page"),
                ("footerBackground", "semantic.background.surface"),
            ]),
        },
        ShellToken {
            id: "shell.web.auth".into(),
            description: "Authentication frame with centered content card".into(),
            platform: ShellPlatform::Web,
            regions: vec![
                region("logo", ShellRegionPosition::Top, "atomic.spacing.12", false),
                region("main", ShellRegionPosition::Center, "atomic.spacing.96", false),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("contentPadding", "atomic.spacing.4")]),
                md: Some(config(&[
                    ("mainMaxWidth", "atomic.spacing.96"),
                    ("contentPadding", "atomic.spacing.8"),
                ])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("logoBackground", "semantic.background.page"),
                ("mainBackground", "semantic.background.surface"),
                ("mainBorder", "semantic.border.default"),
            ]),
        },
        ShellToken {
            id: "shell.web.dashboard".into(),
            description: "Dashboard frame with collapsible sidebar and dense grid content".into(),
            platform: ShellPlatform::Web,
            regions: vec![
                region("header", ShellRegionPosition::Top, "atomic.spacing.16", false),
                region("sidebar", ShellRegionPosition::Left, "atomic.spacing.64", true),
                region("main", ShellRegionPosition::Center, "atomic.spacing.full", false),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("sidebarVisible", "false")]),
                md: Some(config(&[("sidebarVisible", "true")])),
                lg: Some(config(&[("sidebarWidth", "atomic.spacing.64")])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("headerBackground", "semantic.background.surface"),
                ("sidebarBackground", "semantic.background.elevated"),
                ("mainBackground", "semantic.background.page"),
                ("gridGap", "semantic.spacing.default"),
            ]),
        },
    ]
}

// ============================================================================
// Pages
// ============================================================================

fn slot(name: &str, pattern: &str, required: bool, allowed: &[&str]) -> SectionSlot {
    SectionSlot {
        name: name.to_string(),
        pattern: pattern.to_string(),
        required,
        allowed_components: if allowed.is_empty() {
            None
        } else {
            Some(allowed.iter().map(|s| s.to_string()).collect())
        },
    }
}

fn builtin_pages() -> Vec<PageLayoutToken> {
    vec![
        PageLayoutToken {
            id: "page.dashboard".into(),
            description: "Data overview page with metrics, charts, and tables".into(),
            purpose: PagePurpose::Dashboard,
            sections: vec![
                slot("metrics", "section.grid-4", true, &["Card", "Progress", "Badge"]),
                slot("charts", "section.grid-2", false, &["Card", "Image"]),
                slot("tables", "section.stack", false, &["Table", "List"]),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("metricsColumns", "1")]),
                md: Some(config(&[("metricsColumns", "2")])),
                lg: Some(config(&[("metricsColumns", "4")])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("background", "semantic.background.page"),
                ("cardBackground", "semantic.background.surface"),
                ("sectionSpacing", "atomic.spacing.6"),
            ]),
        },
        PageLayoutToken {
            id: "page.settings".into(),
            description: "Configuration page with navigation and grouped form sections".into(),
            purpose: PagePurpose::Settings,
            sections: vec![
                slot("nav", "section.split", false, &["List", "Link"]),
                slot(
                    "content",
                    "section.stack",
                    true,
                    &["Form", "Input", "Switch", "Checkbox", "Heading", "Text"],
                ),
                slot("actions", "section.stack", true, &["Button"]),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("sidebarVisible", "false")]),
                md: Some(config(&[
                    ("sidebarVisible", "true"),
                    ("sidebarWidth", "atomic.spacing.64"),
                ])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("background", "semantic.background.page"),
                ("contentBackground", "semantic.background.surface"),
                ("sectionSpacing", "atomic.spacing.6"),
            ]),
        },
        PageLayoutToken {
            id: "page.detail".into(),
            description: "Single item page with hero, body content, and related items".into(),
            purpose: PagePurpose::Detail,
            sections: vec![
                slot("hero", "section.hero", true, &["Image", "Heading", "Text", "Badge", "Button"]),
                slot("content", "section.stack", true, &["Text", "Heading", "Image", "Card"]),
                slot("related", "section.grid-3", false, &["Card", "Image", "Heading", "Text"]),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("relatedColumns", "1")]),
                md: Some(config(&[("contentMaxWidth", "atomic.spacing.192")])),
                lg: Some(config(&[("contentMaxWidth", "atomic.spacing.224")])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("background", "semantic.background.page"),
                ("heroBackground", "semantic.background.elevated"),
                ("sectionSpacing", "atomic.spacing.8"),
            ]),
        },
        PageLayoutToken {
            id: "page.form".into(),
            description: "Task execution page with header, main form, and actions".into(),
            purpose: PagePurpose::Job,
            sections: vec![
                slot("header", "section.stack", true, &["Heading", "Text"]),
                slot(
                    "form",
                    "section.stack",
                    true,
                    &["Form", "Input", "Checkbox", "Radio", "Dropdown"],
                ),
                slot("actions", "section.stack", true, &["Button"]),
            ],
            responsive: ResponsiveConfig {
                default: config(&[("contentPadding", "atomic.spacing.4")]),
                md: Some(config(&[
                    ("formWidth", "atomic.spacing.128"),
                    ("contentPadding", "atomic.spacing.6"),
                ])),
                lg: Some(config(&[("formWidth", "atomic.spacing.160")])),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("background", "semantic.background.page"),
                ("formBackground", "semantic.background.surface"),
                ("formSpacing", "atomic.spacing.4"),
            ]),
        },
    ]
}

// ============================================================================
// Sections
// ============================================================================

fn builtin_sections() -> Vec<SectionPatternToken> {
    let mut sections = Vec::new();

    // Responsive grids collapse to one column on mobile and widen their gap
    // as the viewport grows.
    for (id, columns) in [
        ("section.grid-2", 2_u32),
        ("section.grid-3", 3),
        ("section.grid-4", 4),
    ] {
        let full = format!("repeat({columns}, 1fr)");
        let tablet = format!("repeat({}, 1fr)", columns.min(2));
        sections.push(SectionPatternToken {
            id: id.into(),
            section_type: SectionType::Grid,
            description: format!("{columns}-column grid with responsive breakpoints"),
            css: grid_css(&full, "atomic.spacing.4"),
            responsive: ResponsiveConfig {
                default: grid_css("repeat(1, 1fr)", "atomic.spacing.2"),
                md: Some(grid_css(&tablet, "atomic.spacing.3")),
                lg: Some(grid_css(&full, "atomic.spacing.4")),
                xxl: Some(grid_css(&full, "atomic.spacing.6")),
                ..Default::default()
            },
            token_bindings: bindings(&[
                ("gap", "atomic.spacing.4"),
                ("itemBackground", "semantic.background.surface"),
            ]),
        });
    }

    sections.push(SectionPatternToken {
        id: "section.stack".into(),
        section_type: SectionType::Stack,
        description: "Vertical flex stack with consistent gap".into(),
        css: SectionCss {
            display: Some("flex".into()),
            flex_direction: Some("column".into()),
            gap: Some(TokenReference::new("atomic.spacing.4")),
            ..Default::default()
        },
        responsive: ResponsiveConfig {
            default: SectionCss {
                gap: Some(TokenReference::new("atomic.spacing.2")),
                ..Default::default()
            },
            md: Some(SectionCss {
                gap: Some(TokenReference::new("atomic.spacing.4")),
                ..Default::default()
            }),
            ..Default::default()
        },
        token_bindings: bindings(&[("gap", "atomic.spacing.4")]),
    });

    sections.push(SectionPatternToken {
        id: "section.split".into(),
        section_type: SectionType::Split,
        description: "30/70 horizontal split for list-detail and nav-content layouts".into(),
        css: SectionCss {
            display: Some("grid".into()),
            grid_template_columns: Some("3fr 7fr".into()),
            gap: Some(TokenReference::new("atomic.spacing.6")),
            ..Default::default()
        },
        responsive: ResponsiveConfig {
            default: SectionCss {
                display: Some("grid".into()),
                grid_template_columns: Some("1fr".into()),
                gap: Some(TokenReference::new("atomic.spacing.4")),
                ..Default::default()
            },
            lg: Some(SectionCss {
                grid_template_columns: Some("3fr 7fr".into()),
                gap: Some(TokenReference::new("atomic.spacing.6")),
                ..Default::default()
            }),
            ..Default::default()
        },
        token_bindings: bindings(&[("gap", "atomic.spacing.6")]),
    });

    sections.push(SectionPatternToken {
        id: "section.hero".into(),
        section_type: SectionType::Flex,
        description: "Centered hero banner with generous padding".into(),
        css: SectionCss {
            display: Some("flex".into()),
            flex_direction: Some("column".into()),
            align_items: Some("center".into()),
            justify_content: Some("center".into()),
            padding: Some(TokenReference::new("atomic.spacing.16")),
            max_width: Some(TokenReference::new("atomic.spacing.320")),
            ..Default::default()
        },
        responsive: ResponsiveConfig {
            default: SectionCss {
                padding: Some(TokenReference::new("atomic.spacing.8")),
                ..Default::default()
            },
            lg: Some(SectionCss {
                padding: Some(TokenReference::new("atomic.spacing.16")),
                ..Default::default()
            }),
            ..Default::default()
        },
        token_bindings: bindings(&[("padding", "atomic.spacing.16")]),
    });

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_expected_entries() {
        let catalog = LayoutCatalog::builtin();
        for id in [
            "shell.web.app",
            "shell.web.marketing",
            "shell.web.auth",
            "shell.web.dashboard",
        ] {
            assert!(catalog.shell(id).is_some(), "missing {id}");
        }
        for id in ["page.dashboard", "page.settings", "page.detail", "page.form"] {
            assert!(catalog.page(id).is_some(), "missing {id}");
        }
        for id in [
            "section.grid-2",
            "section.grid-3",
            "section.grid-4",
            "section.stack",
            "section.split",
            "section.hero",
        ] {
            assert!(catalog.section(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn every_page_slot_references_a_known_section() {
        let catalog = LayoutCatalog::builtin();
        for page in catalog.pages() {
            for slot in &page.sections {
                assert!(
                    catalog.section(&slot.pattern).is_some(),
                    "page {} references unknown pattern {}",
                    page.id,
                    slot.pattern
                );
            }
        }
    }

    #[test]
    fn grid_sections_collapse_on_mobile() {
        let catalog = LayoutCatalog::builtin();
        for id in ["section.grid-2", "section.grid-3", "section.grid-4"] {
            let section = catalog.section(id).unwrap();
            assert_eq!(
                section.responsive.default.grid_template_columns.as_deref(),
                Some("repeat(1, 1fr)")
            );
        }
    }

    #[test]
    fn shell_ids_follow_the_platform_convention() {
        let catalog = LayoutCatalog::builtin();
        for shell in catalog.shells() {
            assert!(shell.id.starts_with("shell.web."));
            assert_eq!(shell.platform, ShellPlatform::Web);
        }
    }

    #[test]
    fn catalogs_are_independent_values() {
        let a = LayoutCatalog::builtin();
        let b = LayoutCatalog::new(Vec::new(), Vec::new(), Vec::new());
        assert!(a.shell("shell.web.app").is_some());
        assert!(b.shell("shell.web.app").is_none());
    }
}
