//! Click interception for anchors.
//!
//! | Anchor | Action |
//! |--------|--------|
//! | `data-page="tarifs"` | navigate to `tarifs` |
//! | `href="/tarifs"`, `href="/tarifs.html"` (registered) | navigate to `tarifs` |
//! | `href="/"` | navigate to `home` |
//! | `href="#section"` | scroll to `#section` |
//! | `href="/unknown"`, `href="//cdn…"`, `href="https://…"`, `href="mailto:…"`, `href="#"` | browser default |

use crate::location::page_from_path;
use crate::routes::RouteTable;

/// The attributes of a clicked anchor the router looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct Link<'a> {
    pub href: Option<&'a str>,
    pub data_page: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    /// Prevent the default and route client-side.
    Navigate(String),
    /// Prevent the default and smooth-scroll to the element with this id.
    ScrollTo(String),
    /// Let the browser handle the click.
    PassThrough,
}

pub fn classify(link: &Link<'_>, routes: &RouteTable, base: &str) -> LinkAction {
    if let Some(page) = link.data_page.filter(|p| !p.is_empty()) {
        return LinkAction::Navigate(page.to_string());
    }
    let Some(href) = link.href else {
        return LinkAction::PassThrough;
    };
    if let Some(anchor) = href.strip_prefix('#') {
        return if anchor.is_empty() {
            LinkAction::PassThrough
        } else {
            LinkAction::ScrollTo(anchor.to_string())
        };
    }
    if !href.starts_with('/') || href.starts_with("//") {
        return LinkAction::PassThrough;
    }
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let page = page_from_path(path, base);
    if routes.contains(&page) {
        LinkAction::Navigate(page)
    } else {
        LinkAction::PassThrough
    }
}
