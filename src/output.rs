//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity leads with its identity (positional index and page key),
//! with file paths and derived facts on indented context lines. The same
//! page looks the same in `routes`, `check` and `render` output.
//!
//! # Output Format
//!
//! ## Routes
//!
//! ```text
//! Routes
//! 001 home → pages/home.html
//! 002 lifting-mammaire → pages/lifting-mammaire.html
//!     Category: sein (3/3)
//!     Label: Lifting mammaire
//!
//! 2 routes, 1 category
//! ```
//!
//! ## Check
//!
//! ```text
//! Missing fragments
//!     tarifs → pages/tarifs.html
//!
//! Orphan fragments
//!     pages/ancien.html
//!
//! FAILED: 12 routes, 1 missing, 1 orphan
//! ```
//!
//! ## Render
//!
//! ```text
//! lifting-mammaire → /lifting-mammaire
//!     State: loaded
//!     Title: Lifting mammaire | Cabinet
//!     Canonical: https://cabinet.example/lifting-mammaire
//!     Siblings: reduction-mammaire ← · → (none)
//!     Structured data: schema-page-breadcrumb, schema-page-content
//!     Content: 2048 bytes
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::check::CheckReport;
use crate::context::SiteContext;
use crate::preview::RenderSummary;
use crate::router::RouterState;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 route`, `2 routes`.
fn plural(count: usize, noun: &str) -> String {
    counted(count, noun, &format!("{noun}s"))
}

fn counted(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

fn state_label(state: &RouterState) -> String {
    match state {
        RouterState::Idle => "idle".to_string(),
        RouterState::Loading(page) => format!("loading {page}"),
        RouterState::Loaded(_) => "loaded".to_string(),
        RouterState::Failed { error, .. } => format!("failed: {error}"),
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Format the route table with each page's category position and label.
pub fn format_routes_output(context: &SiteContext) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];
    for (i, route) in context.routes.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            route.page,
            route.template_path
        ));
        if let Some(category) = context.categories.category_of(&route.page) {
            let members = context
                .categories
                .iter()
                .find(|c| c.name == category)
                .map(|c| c.pages.as_slice())
                .unwrap_or_default();
            let position = members.iter().position(|p| *p == route.page).unwrap_or(0) + 1;
            lines.push(format!(
                "{}Category: {} ({}/{})",
                indent(1),
                category,
                position,
                members.len()
            ));
            lines.push(format!(
                "{}Label: {}",
                indent(1),
                context.labels.label(&route.page)
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(context.routes.len(), "route"),
        counted(context.categories.iter().count(), "category", "categories")
    ));
    lines
}

pub fn print_routes_output(context: &SiteContext) {
    for line in format_routes_output(context) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.missing.is_empty() {
        lines.push("Missing fragments".to_string());
        for missing in &report.missing {
            lines.push(format!("{}{} → {}", indent(1), missing.page, missing.path));
        }
        lines.push(String::new());
    }

    if !report.orphans.is_empty() {
        lines.push("Orphan fragments".to_string());
        for orphan in &report.orphans {
            lines.push(format!("{}{}", indent(1), orphan.display()));
        }
        lines.push(String::new());
    }

    let verdict = if report.is_ok() { "OK" } else { "FAILED" };
    lines.push(format!(
        "{}: {}, {} missing, {}",
        verdict,
        plural(report.routes, "route"),
        report.missing.len(),
        plural(report.orphans.len(), "orphan")
    ));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

/// `path → page`, flagging keys the router would replace with `home`.
pub fn format_resolve_output(path: &str, page: &str, registered: bool) -> Vec<String> {
    let mut lines = vec![format!("{} → {}", path, page)];
    if !registered {
        lines.push(format!("{}not registered, the router shows home", indent(1)));
    }
    lines
}

pub fn print_resolve_output(path: &str, page: &str, registered: bool) {
    for line in format_resolve_output(path, page, registered) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_output(summary: &RenderSummary) -> Vec<String> {
    let shown = summary.page.as_deref().unwrap_or(&summary.requested);
    let mut lines = vec![format!("{} → {}", shown, summary.url)];
    if summary.page.as_deref().is_some_and(|p| p != summary.requested) {
        lines.push(format!("{}Requested: {}", indent(1), summary.requested));
    }
    lines.push(format!("{}State: {}", indent(1), state_label(&summary.state)));
    if !summary.loaded() {
        return lines;
    }

    lines.push(format!("{}Title: {}", indent(1), summary.title));
    if let Some(description) = &summary.description {
        lines.push(format!("{}Description: {}", indent(1), description));
    }
    if let Some(canonical) = &summary.canonical {
        lines.push(format!("{}Canonical: {}", indent(1), canonical));
    }
    if let Some(image) = summary.image.as_deref().filter(|i| !i.is_empty()) {
        lines.push(format!("{}Image: {}", indent(1), image));
    }
    if summary.prev.is_some() || summary.next.is_some() {
        lines.push(format!(
            "{}Siblings: {} ← · → {}",
            indent(1),
            summary.prev.as_deref().unwrap_or("(none)"),
            summary.next.as_deref().unwrap_or("(none)")
        ));
    }
    if !summary.structured_data.is_empty() {
        lines.push(format!(
            "{}Structured data: {}",
            indent(1),
            summary.structured_data.join(", ")
        ));
    }
    for (id, slides) in &summary.carousels {
        lines.push(format!(
            "{}Carousel: {} ({})",
            indent(1),
            id,
            plural(*slides, "slide")
        ));
    }
    for (name, keys) in &summary.tabs {
        lines.push(format!("{}Tabs: {} ({})", indent(1), name, keys.join(", ")));
    }
    lines.push(format!("{}Content: {} bytes", indent(1), summary.content_bytes));
    lines
}

pub fn print_render_output(summary: &RenderSummary) {
    for line in format_render_output(summary) {
        println!("{}", line);
    }
}
