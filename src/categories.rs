//! Page categories and sibling (previous/next) navigation.
//!
//! Procedure pages are grouped into ordered categories:
//!
//! ```text
//! sein       protheses-mammaires → reduction-mammaire → lifting-mammaire → …
//! silhouette lipoaspiration → abdominoplastie → body-lift → …
//! visage     lifting-cervico-facial → blepharoplastie → oreilles-decollees
//! ```
//!
//! While a categorized page is displayed, the desktop side arrows and the
//! mobile button bar point at its neighbours in that order. The first page of
//! a category has no previous link and the last has no next link; pages
//! outside every category show no sibling navigation at all.

use crate::host::{Document, Side};
use maud::{Markup, PreEscaped, html};
use std::collections::BTreeMap;

/// Element id of the mobile sibling bar.
pub const MOBILE_NAV_ID: &str = "page-nav-mobile";

const CHEVRON_LEFT: &str = r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M15.41 7.41L14 6l-6 6 6 6 1.41-1.41L10.83 12z"/></svg>"#;
const CHEVRON_RIGHT: &str = r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M8.59 16.59L10 18l6-6-6-6-1.41 1.41L13.17 12z"/></svg>"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub pages: Vec<String>,
}

/// All categories. A page belongs to at most one (checked by config validation).
#[derive(Debug, Clone, Default)]
pub struct Categories {
    groups: Vec<Category>,
}

/// Neighbours of a page inside its category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Siblings<'a> {
    pub category: &'a str,
    pub prev: Option<&'a str>,
    pub next: Option<&'a str>,
}

impl Categories {
    pub fn new(groups: Vec<Category>) -> Self {
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.groups.iter()
    }

    /// Name of the category containing `page`.
    pub fn category_of(&self, page: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.pages.iter().any(|p| p == page))
            .map(|g| g.name.as_str())
    }

    /// Previous/next pages of `page`, or `None` when it is uncategorized.
    pub fn siblings(&self, page: &str) -> Option<Siblings<'_>> {
        self.groups.iter().find_map(|group| {
            let index = group.pages.iter().position(|p| p == page)?;
            Some(Siblings {
                category: &group.name,
                prev: index
                    .checked_sub(1)
                    .map(|i| group.pages[i].as_str()),
                next: group.pages.get(index + 1).map(String::as_str),
            })
        })
    }
}

impl From<BTreeMap<String, Vec<String>>> for Categories {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self::new(
            map.into_iter()
                .map(|(name, pages)| Category { name, pages })
                .collect(),
        )
    }
}

/// Human-readable page names for navigation buttons.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    labels: BTreeMap<String, String>,
}

impl Labels {
    pub fn new(labels: BTreeMap<String, String>) -> Self {
        Self { labels }
    }

    /// Label of `page`, or the page key itself.
    pub fn label<'a>(&'a self, page: &'a str) -> &'a str {
        self.labels.get(page).map_or(page, String::as_str)
    }
}

/// Mobile sibling bar appended under the page content.
///
/// Both buttons are always rendered so the layout stays stable; a missing
/// end carries the `--hidden` modifier and no `data-page`.
pub fn render_mobile_nav(siblings: &Siblings<'_>, labels: &Labels) -> Markup {
    html! {
        div.page-nav-mobile id=(MOBILE_NAV_ID) {
            button."page-nav-mobile__btn"."page-nav-mobile__btn--hidden"[siblings.prev.is_none()]
                type="button" data-page=[siblings.prev] {
                (PreEscaped(CHEVRON_LEFT))
                @if let Some(prev) = siblings.prev {
                    " " (labels.label(prev))
                }
            }
            button."page-nav-mobile__btn"."page-nav-mobile__btn--hidden"[siblings.next.is_none()]
                type="button" data-page=[siblings.next] {
                @if let Some(next) = siblings.next {
                    (labels.label(next)) " "
                }
                (PreEscaped(CHEVRON_RIGHT))
            }
        }
    }
}

/// Show or hide the sibling controls for `page`.
pub fn sync_sibling_nav(
    document: &mut dyn Document,
    categories: &Categories,
    labels: &Labels,
    page: &str,
) {
    let Some(siblings) = categories.siblings(page) else {
        document.hide_sibling_control(Side::Prev);
        document.hide_sibling_control(Side::Next);
        document.remove_mobile_nav();
        return;
    };

    for (side, target) in [(Side::Prev, siblings.prev), (Side::Next, siblings.next)] {
        match target {
            Some(target) => document.show_sibling_control(side, target, labels.label(target)),
            None => document.hide_sibling_control(side),
        }
    }
    document.remove_mobile_nav();
    document.set_mobile_nav(&render_mobile_nav(&siblings, labels).into_string());
}
