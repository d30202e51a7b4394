// ABOUTME: Resolution layer of the tekton toolkit: tokens, layouts, schemas, screens, outputs
// ABOUTME: Everything here is synchronous; shared state is limited to the resolution caches

pub mod generate;
pub mod layout;
pub mod resolver;
pub mod schema;
pub mod screen;
pub mod tokens;

#[cfg(test)]
mod core_tests;

pub use generate::{
    generate_css_in_js, generate_css_variables, generate_jsx, generate_tailwind_classes,
    generate_themed_css_variables,
};
pub use layout::css::{
    CssOptions, LayoutToken, generate_container_fallback_css, generate_container_query_css,
    generate_layout_css, generate_orientation_css,
};
pub use layout::{
    LayoutCatalog, LayoutError, LayoutResolver, ResolutionCache, ResolvedLayout,
    merge_responsive_config,
};
pub use resolver::resolve_token;
pub use schema::{
    A11yRequirements, ComponentCategory, ComponentSchema, PropDefinition, SchemaRegistry,
};
pub use screen::{
    ComponentTree, ResolutionError, ResolvedComponent, ResolvedScreen, ResolvedSection,
    ScreenCache, ScreenError, ScreenResolver, ScreenStats, screen_stats,
    validate_screen_definition,
};
pub use tokens::{ThemeTokens, ThemeWithTokens, ValidationIssue, ValidationRule, validate_value};
