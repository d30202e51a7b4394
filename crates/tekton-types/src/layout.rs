// ABOUTME: Layout token data model: shell, page, section and responsive layers
// ABOUTME: Statically defined presets reference design tokens; nothing here resolves anything

use crate::reference::TokenReference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Viewport breakpoints following the Tailwind convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 5] = [Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];

    /// Minimum viewport width in pixels for this breakpoint.
    pub fn min_width(self) -> u32 {
        match self {
            Self::Sm => 640,
            Self::Md => 768,
            Self::Lg => 1024,
            Self::Xl => 1280,
            Self::Xxl => 1536,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
        }
    }
}

/// Container-query breakpoints. Narrower than viewport breakpoints since they
/// query the container, not the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerBreakpoint {
    Sm,
    Md,
    Lg,
    Xl,
}

impl ContainerBreakpoint {
    pub const ALL: [ContainerBreakpoint; 4] = [Self::Sm, Self::Md, Self::Lg, Self::Xl];

    /// Minimum container width in pixels.
    pub fn min_width(self) -> u32 {
        match self {
            Self::Sm => 320,
            Self::Md => 480,
            Self::Lg => 640,
            Self::Xl => 800,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

/// Overlay semantics for responsive overrides: fields present in the override
/// win, everything else inherits from the lower tier.
pub trait MergeOverride {
    fn merge_from(&mut self, overlay: &Self);
}

impl MergeOverride for BTreeMap<String, serde_json::Value> {
    fn merge_from(&mut self, overlay: &Self) {
        for (key, value) in overlay {
            self.insert(key.clone(), value.clone());
        }
    }
}

/// Mobile-first responsive configuration: a default plus optional per-breakpoint
/// overrides. Unspecified breakpoints inherit from the tier below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponsiveConfig<T> {
    pub default: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sm: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lg: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xl: Option<T>,
    #[serde(default, rename = "2xl", skip_serializing_if = "Option::is_none")]
    pub xxl: Option<T>,
}

impl<T> ResponsiveConfig<T> {
    pub fn uniform(default: T) -> Self {
        Self {
            default,
            sm: None,
            md: None,
            lg: None,
            xl: None,
            xxl: None,
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<&T> {
        match breakpoint {
            Breakpoint::Sm => self.sm.as_ref(),
            Breakpoint::Md => self.md.as_ref(),
            Breakpoint::Lg => self.lg.as_ref(),
            Breakpoint::Xl => self.xl.as_ref(),
            Breakpoint::Xxl => self.xxl.as_ref(),
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, value: T) {
        match breakpoint {
            Breakpoint::Sm => self.sm = Some(value),
            Breakpoint::Md => self.md = Some(value),
            Breakpoint::Lg => self.lg = Some(value),
            Breakpoint::Xl => self.xl = Some(value),
            Breakpoint::Xxl => self.xxl = Some(value),
        }
    }
}

/// Orientation overrides applied after breakpoint styles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationConfig<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landscape: Option<T>,
}

// ============================================================================
// Section pattern tokens (layout primitives)
// ============================================================================

/// Layout primitive classification for section patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Grid,
    Flex,
    Split,
    Stack,
    Container,
}

/// CSS properties defining a section's layout behavior.
///
/// Dimension-like fields hold token references so the emitted CSS stays
/// variable-based; structural fields (`display`, grid templates) are literal.
/// Every field is optional so the same type doubles as a per-breakpoint
/// override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCss {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<TokenReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<TokenReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<TokenReference>,
}

impl MergeOverride for SectionCss {
    fn merge_from(&mut self, overlay: &Self) {
        macro_rules! overlay_field {
            ($($field:ident),*) => {
                $(if overlay.$field.is_some() {
                    self.$field = overlay.$field.clone();
                })*
            };
        }
        overlay_field!(
            display,
            grid_template_columns,
            grid_template_rows,
            gap,
            flex_direction,
            align_items,
            justify_content,
            max_width,
            padding
        );
    }
}

/// Reusable layout primitive, e.g. `section.grid-3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatternToken {
    /// Identifier of the form `section.<pattern>`.
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub description: String,
    pub css: SectionCss,
    pub responsive: ResponsiveConfig<SectionCss>,
    #[serde(default)]
    pub token_bindings: BTreeMap<String, TokenReference>,
}

// ============================================================================
// Page layout tokens (screen purpose layouts)
// ============================================================================

/// Semantic classification of a page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePurpose {
    Job,
    Resource,
    Dashboard,
    Settings,
    Detail,
    Empty,
    Wizard,
    Onboarding,
}

/// Placeholder for a section pattern within a page layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSlot {
    /// Slot identifier, e.g. "header", "main".
    pub name: String,
    /// Section pattern id filling this slot.
    pub pattern: String,
    pub required: bool,
    /// Whitelist of component types allowed in this slot, if restricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_components: Option<Vec<String>>,
}

/// Page-level configuration bag used in responsive overrides.
pub type PageConfig = BTreeMap<String, serde_json::Value>;

/// Complete page layout definition, e.g. `page.dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayoutToken {
    /// Identifier of the form `page.<name>`.
    pub id: String,
    pub description: String,
    pub purpose: PagePurpose,
    pub sections: Vec<SectionSlot>,
    pub responsive: ResponsiveConfig<PageConfig>,
    #[serde(default)]
    pub token_bindings: BTreeMap<String, TokenReference>,
}

// ============================================================================
// Shell tokens (application frame)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellPlatform {
    Web,
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellRegionPosition {
    Top,
    Left,
    Right,
    Bottom,
    Center,
}

/// Persistent structural region within an application shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellRegion {
    pub name: String,
    pub position: ShellRegionPosition,
    /// Region size as a token reference, e.g. `atomic.spacing.16`.
    pub size: TokenReference,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub default_collapsed: bool,
}

/// Shell-level configuration bag used in responsive overrides.
pub type ShellConfig = BTreeMap<String, serde_json::Value>;

/// Application frame definition, e.g. `shell.web.app`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellToken {
    /// Identifier of the form `shell.<platform>.<name>`.
    pub id: String,
    pub description: String,
    pub platform: ShellPlatform,
    pub regions: Vec<ShellRegion>,
    pub responsive: ResponsiveConfig<ShellConfig>,
    #[serde(default)]
    pub token_bindings: BTreeMap<String, TokenReference>,
}

// ============================================================================
// Container queries
// ============================================================================

/// Container type for `@container` rules. `inline-size` queries width only and
/// is the recommended default; `size` also queries height at a higher cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerType {
    #[serde(rename = "inline-size")]
    InlineSize,
    #[serde(rename = "size")]
    Size,
}

impl ContainerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InlineSize => "inline-size",
            Self::Size => "size",
        }
    }
}

/// Styles applied at one container breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerBreakpointConfig {
    pub min_width: u32,
    /// CSS property/value pairs, declared identically in the `@container`
    /// block and the `@media` fallback.
    pub css: BTreeMap<String, String>,
}

/// Component-level container query configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerQueryConfig {
    /// Container name for the `@container` rule.
    pub name: String,
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    pub breakpoints: BTreeMap<ContainerBreakpoint, ContainerBreakpointConfig>,
}
