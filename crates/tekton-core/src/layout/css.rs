// ABOUTME: CSS emission for layout tokens: variables, classes, media queries
// ABOUTME: Container queries ship with @media fallbacks carrying identical declarations

use std::collections::BTreeMap;
use std::fmt::Write;

use tekton_types::{
    Breakpoint, ContainerQueryConfig, OrientationConfig, PageLayoutToken, SectionCss,
    SectionPatternToken, ShellRegionPosition, ShellToken,
};

use super::{LayoutError, collect_css_variables};

/// Any layout token the CSS generator accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutToken {
    Shell(ShellToken),
    Page(PageLayoutToken),
    Section(SectionPatternToken),
}

impl From<ShellToken> for LayoutToken {
    fn from(token: ShellToken) -> Self {
        Self::Shell(token)
    }
}

impl From<PageLayoutToken> for LayoutToken {
    fn from(token: PageLayoutToken) -> Self {
        Self::Page(token)
    }
}

impl From<SectionPatternToken> for LayoutToken {
    fn from(token: SectionPatternToken) -> Self {
        Self::Section(token)
    }
}

impl LayoutToken {
    fn id(&self) -> &str {
        match self {
            Self::Shell(t) => &t.id,
            Self::Page(t) => &t.id,
            Self::Section(t) => &t.id,
        }
    }

    /// Class name derived from the id: `section.grid-3` becomes `section-grid-3`.
    fn class_name(&self) -> String {
        self.id().replace('.', "-")
    }
}

#[derive(Debug, Clone)]
pub struct CssOptions {
    pub include_variables: bool,
    pub include_classes: bool,
    pub include_media_queries: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            include_variables: true,
            include_classes: true,
            include_media_queries: true,
        }
    }
}

/// Balanced-brace check on emitted CSS.
pub fn validate_css(css: &str) -> bool {
    let open = css.matches('{').count();
    let close = css.matches('}').count();
    open == close
}

/// Emit the declarations of a [`SectionCss`] at the given indent.
fn write_section_declarations(out: &mut String, css: &SectionCss, indent: &str) {
    if let Some(display) = &css.display {
        let _ = writeln!(out, "{indent}display: {display};");
    }
    if let Some(columns) = &css.grid_template_columns {
        let _ = writeln!(out, "{indent}grid-template-columns: {columns};");
    }
    if let Some(rows) = &css.grid_template_rows {
        let _ = writeln!(out, "{indent}grid-template-rows: {rows};");
    }
    if let Some(gap) = &css.gap {
        let _ = writeln!(out, "{indent}gap: {};", gap.css_var());
    }
    if let Some(direction) = &css.flex_direction {
        let _ = writeln!(out, "{indent}flex-direction: {direction};");
    }
    if let Some(align) = &css.align_items {
        let _ = writeln!(out, "{indent}align-items: {align};");
    }
    if let Some(justify) = &css.justify_content {
        let _ = writeln!(out, "{indent}justify-content: {justify};");
    }
    if let Some(max_width) = &css.max_width {
        let _ = writeln!(out, "{indent}max-width: {};", max_width.css_var());
    }
    if let Some(padding) = &css.padding {
        let _ = writeln!(out, "{indent}padding: {};", padding.css_var());
    }
}

fn generate_variables(tokens: &[LayoutToken]) -> String {
    let mut vars: BTreeMap<String, String> = BTreeMap::new();
    for token in tokens {
        let collected = match token {
            LayoutToken::Shell(t) => collect_css_variables(t),
            LayoutToken::Page(t) => collect_css_variables(t),
            LayoutToken::Section(t) => collect_css_variables(t),
        };
        vars.extend(collected);
    }

    if vars.is_empty() {
        return String::new();
    }

    let mut out = String::from(":root {\n");
    for (name, reference) in &vars {
        // The reference text is the placeholder value; the token resolver
        // substitutes final values when a theme is applied.
        let _ = writeln!(out, "  {name}: {reference};");
    }
    out.push_str("}\n");
    out
}

/// Shell classes are CSS grid frames; rows come from region positions
/// (top row, left/center/right middle row, bottom row).
fn generate_shell_class(out: &mut String, shell: &ShellToken) {
    let class = shell.id.replace('.', "-");
    let _ = writeln!(out, ".{class} {{");
    out.push_str("  display: grid;\n");

    let by_position = |position: ShellRegionPosition| -> Vec<&str> {
        shell
            .regions
            .iter()
            .filter(|r| r.position == position)
            .map(|r| r.name.as_str())
            .collect()
    };

    let mut rows: Vec<String> = Vec::new();
    let top = by_position(ShellRegionPosition::Top);
    if !top.is_empty() {
        rows.push(format!("\"{}\"", top.join(" ")));
    }
    let mut middle = by_position(ShellRegionPosition::Left);
    middle.extend(by_position(ShellRegionPosition::Center));
    middle.extend(by_position(ShellRegionPosition::Right));
    if !middle.is_empty() {
        rows.push(format!("\"{}\"", middle.join(" ")));
    }
    let bottom = by_position(ShellRegionPosition::Bottom);
    if !bottom.is_empty() {
        rows.push(format!("\"{}\"", bottom.join(" ")));
    }

    if !rows.is_empty() {
        out.push_str("  grid-template-areas:\n");
        for row in rows {
            let _ = writeln!(out, "    {row}");
        }
        out.push_str("  ;\n");
    }
    out.push_str("}\n\n");
}

fn generate_page_class(out: &mut String, page: &PageLayoutToken) {
    let class = page.id.replace('.', "-");
    let _ = writeln!(out, ".{class} {{");
    out.push_str("  display: flex;\n");
    out.push_str("  flex-direction: column;\n");
    if let Some(spacing) = page.token_bindings.get("sectionSpacing") {
        let _ = writeln!(out, "  gap: {};", spacing.css_var());
    }
    out.push_str("}\n\n");
}

fn generate_section_class(out: &mut String, section: &SectionPatternToken) {
    let class = section.id.replace('.', "-");
    let _ = writeln!(out, ".{class} {{");
    write_section_declarations(out, &section.css, "  ");
    out.push_str("}\n\n");
}

/// Per-breakpoint media queries. Only sections carry structured CSS overrides;
/// shell and page responsive bags configure behavior, not declarations.
fn generate_media_queries(tokens: &[LayoutToken]) -> String {
    let mut out = String::new();

    for breakpoint in Breakpoint::ALL {
        let mut body = String::new();
        for token in tokens {
            let LayoutToken::Section(section) = token else {
                continue;
            };
            let Some(overrides) = section.responsive.get(breakpoint) else {
                continue;
            };
            let mut declarations = String::new();
            write_section_declarations(&mut declarations, overrides, "    ");
            if declarations.is_empty() {
                continue;
            }
            let _ = writeln!(body, "  .{} {{", token.class_name());
            body.push_str(&declarations);
            body.push_str("  }\n\n");
        }

        if !body.is_empty() {
            let _ = writeln!(out, "@media (min-width: {}px) {{", breakpoint.min_width());
            out.push_str(&body);
            out.push_str("}\n\n");
        }
    }

    out
}

/// Generate the complete stylesheet for a set of layout tokens.
pub fn generate_layout_css(
    tokens: &[LayoutToken],
    options: &CssOptions,
) -> Result<String, LayoutError> {
    let mut css = String::new();

    if options.include_variables {
        let variables = generate_variables(tokens);
        if !variables.is_empty() {
            css.push_str(&variables);
            css.push('\n');
        }
    }

    if options.include_classes {
        for token in tokens {
            match token {
                LayoutToken::Shell(shell) => generate_shell_class(&mut css, shell),
                LayoutToken::Page(page) => generate_page_class(&mut css, page),
                LayoutToken::Section(section) => generate_section_class(&mut css, section),
            }
        }

        if options.include_media_queries {
            css.push_str(&generate_media_queries(tokens));
        }
    }

    if !validate_css(&css) {
        return Err(LayoutError::UnbalancedCss);
    }
    Ok(css)
}

// ============================================================================
// Container queries
// ============================================================================

fn container_declarations(css: &BTreeMap<String, String>, indent: &str) -> String {
    let mut out = String::new();
    for (property, value) in css {
        let _ = writeln!(out, "{indent}{property}: {value};");
    }
    out
}

/// Emit `@container` rules wrapped in an `@supports` guard.
///
/// The guard keeps the rules inert in engines without container-query
/// support; pair with [`generate_container_fallback_css`] for those engines.
pub fn generate_container_query_css(config: &ContainerQueryConfig) -> String {
    let mut out = String::new();
    let type_str = config.container_type.as_str();

    let _ = writeln!(out, "@supports (container-type: {type_str}) {{");
    let _ = writeln!(out, "  .{} {{", config.name);
    let _ = writeln!(out, "    container-type: {type_str};");
    let _ = writeln!(out, "    container-name: {};", config.name);
    out.push_str("  }\n\n");

    for breakpoint_config in config.breakpoints.values() {
        let _ = writeln!(
            out,
            "  @container {} (min-width: {}px) {{",
            config.name, breakpoint_config.min_width
        );
        let _ = writeln!(out, "    .{} {{", config.name);
        out.push_str(&container_declarations(&breakpoint_config.css, "      "));
        out.push_str("    }\n");
        out.push_str("  }\n\n");
    }

    out.push_str("}\n");
    out
}

/// `@media` fallback for engines without container queries.
///
/// Declarations at each breakpoint are byte-identical to the `@container`
/// versions so the two paths render the same.
pub fn generate_container_fallback_css(config: &ContainerQueryConfig) -> String {
    let mut out = String::new();

    for breakpoint_config in config.breakpoints.values() {
        let _ = writeln!(
            out,
            "@media (min-width: {}px) {{",
            breakpoint_config.min_width
        );
        let _ = writeln!(out, "  .{} {{", config.name);
        out.push_str(&container_declarations(&breakpoint_config.css, "    "));
        out.push_str("  }\n");
        out.push_str("}\n\n");
    }

    out
}

// ============================================================================
// Orientation
// ============================================================================

/// Orientation-specific overrides for one selector. Applied after breakpoint
/// styles in the cascade, so they win at equal specificity.
pub fn generate_orientation_css(
    selector: &str,
    config: &OrientationConfig<BTreeMap<String, String>>,
) -> String {
    let mut out = String::new();

    let mut emit = |orientation: &str, css: &BTreeMap<String, String>| {
        if css.is_empty() {
            return;
        }
        let _ = writeln!(out, "@media (orientation: {orientation}) {{");
        let _ = writeln!(out, "  {selector} {{");
        out.push_str(&container_declarations(css, "    "));
        out.push_str("  }\n");
        out.push_str("}\n\n");
    };

    if let Some(portrait) = &config.portrait {
        emit("portrait", portrait);
    }
    if let Some(landscape) = &config.landscape {
        emit("landscape", landscape);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutCatalog;
    use tekton_types::{ContainerBreakpoint, ContainerBreakpointConfig, ContainerType};

    fn all_builtin_tokens() -> Vec<LayoutToken> {
        let catalog = LayoutCatalog::builtin();
        let mut tokens: Vec<LayoutToken> = Vec::new();
        tokens.extend(catalog.shells().cloned().map(LayoutToken::from));
        tokens.extend(catalog.pages().cloned().map(LayoutToken::from));
        tokens.extend(catalog.sections().cloned().map(LayoutToken::from));
        tokens
    }

    fn card_query() -> ContainerQueryConfig {
        let mut breakpoints = BTreeMap::new();
        for bp in ContainerBreakpoint::ALL {
            let mut css = BTreeMap::new();
            css.insert("padding".to_string(), format!("{}rem", bp.min_width() / 320));
            breakpoints.insert(
                bp,
                ContainerBreakpointConfig {
                    min_width: bp.min_width(),
                    css,
                },
            );
        }
        ContainerQueryConfig {
            name: "card".into(),
            container_type: ContainerType::InlineSize,
            breakpoints,
        }
    }

    #[test]
    fn full_stylesheet_is_balanced_and_nonempty() {
        let css = generate_layout_css(&all_builtin_tokens(), &CssOptions::default()).unwrap();
        assert!(validate_css(&css));
        assert!(css.contains(":root {"));
        assert!(css.contains(".shell-web-app {"));
        assert!(css.contains(".page-dashboard {"));
        assert!(css.contains(".section-grid-3 {"));
        assert!(css.contains("@media (min-width: 768px)"));
    }

    #[test]
    fn shell_class_declares_grid_areas() {
        let catalog = LayoutCatalog::builtin();
        let shell = catalog.shell("shell.web.app").unwrap().clone();
        let css = generate_layout_css(&[shell.into()], &CssOptions::default()).unwrap();
        assert!(css.contains("display: grid;"));
        assert!(css.contains("grid-template-areas:"));
        assert!(css.contains("\"header\""));
        assert!(css.contains("\"sidebar main\""));
    }

    #[test]
    fn section_gap_uses_css_variables() {
        let catalog = LayoutCatalog::builtin();
        let section = catalog.section("section.grid-2").unwrap().clone();
        let css = generate_layout_css(&[section.into()], &CssOptions::default()).unwrap();
        assert!(css.contains("gap: var(--tekton-atomic-spacing-4);"));
    }

    #[test]
    fn options_suppress_blocks() {
        let options = CssOptions {
            include_variables: false,
            include_classes: true,
            include_media_queries: false,
        };
        let css = generate_layout_css(&all_builtin_tokens(), &options).unwrap();
        assert!(!css.contains(":root"));
        assert!(!css.contains("@media"));
        assert!(css.contains(".section-grid-3 {"));
    }

    #[test]
    fn container_query_has_supports_guard_and_all_breakpoints() {
        let css = generate_container_query_css(&card_query());
        assert!(css.starts_with("@supports (container-type: inline-size) {"));
        assert!(css.contains("container-name: card;"));
        for width in [320, 480, 640, 800] {
            assert!(css.contains(&format!("@container card (min-width: {width}px)")));
        }
        assert!(validate_css(&css));
    }

    #[test]
    fn fallback_declarations_match_container_declarations() {
        let config = card_query();
        let container = generate_container_query_css(&config);
        let fallback = generate_container_fallback_css(&config);
        assert!(validate_css(&fallback));

        // Every declaration line in the fallback appears in the container CSS
        // with the same property/value text.
        for line in fallback.lines() {
            let trimmed = line.trim();
            if trimmed.ends_with(';') {
                assert!(
                    container.contains(trimmed),
                    "declaration '{trimmed}' missing from container CSS"
                );
            }
        }
        for width in [320, 480, 640, 800] {
            assert!(fallback.contains(&format!("@media (min-width: {width}px)")));
        }
    }

    #[test]
    fn orientation_css_emits_requested_blocks_only() {
        let mut portrait = BTreeMap::new();
        portrait.insert("flex-direction".to_string(), "column".to_string());
        let config = OrientationConfig {
            portrait: Some(portrait),
            landscape: None,
        };
        let css = generate_orientation_css(".section-hero", &config);
        assert!(css.contains("@media (orientation: portrait)"));
        assert!(!css.contains("landscape"));
        assert!(validate_css(&css));
    }
}
