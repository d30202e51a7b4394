// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other tekton crates

pub mod color;
pub mod layout;
pub mod reference;
pub mod scale;
pub mod screen;

// Re-export commonly used types
pub use color::{OklchColor, RgbColor};
pub use layout::{
    Breakpoint, ContainerBreakpoint, ContainerBreakpointConfig, ContainerQueryConfig,
    ContainerType, MergeOverride, OrientationConfig, PageLayoutToken, PagePurpose,
    ResponsiveConfig, SectionCss, SectionPatternToken, SectionSlot, SectionType, ShellPlatform,
    ShellRegion, ShellRegionPosition, ShellToken,
};
pub use reference::{TokenLayer, TokenReference, token_var};
pub use scale::{ColorScale, ScaleStep};
pub use screen::{
    ComponentChild, ComponentDefinition, ComponentProps, ResponsiveOverrides, ScreenDefinition,
    ScreenMeta, SectionDefinition,
};
