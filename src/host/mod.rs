//! Browser-facing seams of the router.
//!
//! The router never touches a real DOM. Everything it reads from or writes to
//! the page goes through four traits:
//!
//! | Trait | Stands in for |
//! |-------|---------------|
//! | [`Fetcher`] | `fetch()` of fragment files |
//! | [`Document`] | content container, `<head>` metadata, sibling nav, JSON-LD |
//! | [`BrowserLocation`] | `window.location` + `history.pushState/replaceState` |
//! | [`SessionStorage`] | `sessionStorage` |
//!
//! Two backends ship with the crate:
//!
//! - [`memory`]: in-process document, history and storage. Used by the test
//!   suite and by the `render` CLI command.
//! - [`fs`]: a [`Fetcher`] serving fragments from a site directory with
//!   HTTP-like status codes.

pub mod fs;
pub mod memory;

use std::future::Future;
use thiserror::Error;

/// Transport-level fetch failure (no HTTP response at all).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A completed HTTP exchange, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves fragment markup. The only suspension point of a page load.
pub trait Fetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<FetchResponse, FetchError>>;
}

/// Which attribute identifies a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaAttr {
    /// `<meta name="…">` (description, Twitter Card).
    Name,
    /// `<meta property="…">` (Open Graph).
    Property,
}

impl MetaAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// Previous/next sibling navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Prev,
    Next,
}

/// A carousel container found in the mounted content.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselMount {
    /// Value of the container's `data-carousel` attribute.
    pub id: String,
    pub slides: usize,
}

/// Which tab widget a [`TabMount`] was found for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabKind {
    /// `.tarifs-button[data-tarif]` buttons switching `[data-card]` price cards.
    Tarifs,
    /// `.articles-page__item[data-article]` entries switching article bodies.
    Articles,
}

impl TabKind {
    pub const ALL: [TabKind; 2] = [TabKind::Tarifs, TabKind::Articles];

    /// Class carried by each selector button.
    pub fn button_class(self) -> &'static str {
        match self {
            TabKind::Tarifs => "tarifs-button",
            TabKind::Articles => "articles-page__item",
        }
    }

    /// Attribute holding the key a button selects.
    pub fn key_attr(self) -> &'static str {
        match self {
            TabKind::Tarifs => "data-tarif",
            TabKind::Articles => "data-article",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabKind::Tarifs => "tarifs",
            TabKind::Articles => "articles",
        }
    }
}

/// A set of tab buttons found in the mounted content.
#[derive(Debug, Clone, PartialEq)]
pub struct TabMount {
    pub kind: TabKind,
    /// Button keys in document order, without duplicates.
    pub keys: Vec<String>,
}

/// The page the router renders into.
///
/// Implementations should treat absent optional elements (no canonical link,
/// no sibling controls) as no-ops rather than errors.
pub trait Document {
    fn has_content_container(&self) -> bool;
    fn content_html(&self) -> Option<String>;
    fn set_content_html(&mut self, html: &str);
    fn set_content_opacity(&mut self, opacity: f32);
    fn scroll_to_top(&mut self);

    fn set_title(&mut self, title: &str);
    fn set_meta(&mut self, attr: MetaAttr, key: &str, content: &str);
    fn set_canonical(&mut self, href: &str);
    /// `href` of the document's `<base>` element, if any.
    fn base_href(&self) -> Option<String>;

    fn show_sibling_control(&mut self, side: Side, target: &str, title: &str);
    fn hide_sibling_control(&mut self, side: Side);
    fn set_mobile_nav(&mut self, markup: &str);
    fn remove_mobile_nav(&mut self);

    /// Insert or replace a `<script type="application/ld+json" id="…">`.
    fn set_structured_data(&mut self, id: &str, json: &str);
    /// Remove every structured-data script whose id starts with `prefix`.
    fn clear_structured_data(&mut self, prefix: &str);

    fn carousels(&self) -> Vec<CarouselMount>;
    fn tab_groups(&self) -> Vec<TabMount>;
}

/// Current URL plus session history.
pub trait BrowserLocation {
    fn pathname(&self) -> String;
    fn hostname(&self) -> String;
    /// Scheme with trailing colon, as `location.protocol` reports it (`"https:"`).
    fn protocol(&self) -> String;
    fn origin(&self) -> String;
    /// Add a history entry for `page` at `url` without reloading.
    fn push_state(&mut self, page: &str, url: &str);
    /// Rewrite the current history entry's URL.
    fn replace_state(&mut self, url: &str);
}

/// Per-tab key/value storage that survives client-side navigation.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str) -> Option<String>;
}
