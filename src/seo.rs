//! SEO metadata table and document `<head>` synchronization.
//!
//! Each page key has a title, a description and optionally its own sharing
//! image. After every successful navigation the router writes them into:
//!
//! | Target | Source |
//! |--------|--------|
//! | `<title>` | `title` |
//! | `meta[name="description"]` | `description` |
//! | `link[rel="canonical"]` | `base_url` + page path |
//! | `meta[property="og:title\|og:description\|og:url\|og:image"]` | same, image falls back to `default_image` |
//! | `meta[name="twitter:title\|twitter:description\|twitter:image"]` | same |
//!
//! Pages with no entry borrow the `home` entry (title and description) but
//! keep their own canonical URL.

use crate::host::{Document, MetaAttr};
use crate::routes::HOME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeoEntry {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Site-wide SEO settings plus the per-page table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    /// Absolute site origin used for canonical and `og:url` (no trailing slash needed).
    pub base_url: String,
    /// Sharing image for pages without their own.
    pub default_image: String,
    pub site_name: String,
    pub locale: String,
    pub pages: BTreeMap<String, SeoEntry>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        let mut pages = BTreeMap::new();
        pages.insert(
            HOME.to_string(),
            SeoEntry {
                title: "My Practice".to_string(),
                description: "Welcome to the practice.".to_string(),
                image: None,
            },
        );
        Self {
            base_url: "https://example.com".to_string(),
            default_image: String::new(),
            site_name: "My Practice".to_string(),
            locale: "en_US".to_string(),
            pages,
        }
    }
}

impl SeoConfig {
    /// Entry for `page`, or the `home` entry when the page has none.
    pub fn entry(&self, page: &str) -> Option<&SeoEntry> {
        self.pages.get(page).or_else(|| self.pages.get(HOME))
    }

    /// Absolute canonical URL of `page`.
    pub fn canonical_url(&self, page: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if page == HOME {
            format!("{base}/")
        } else {
            format!("{base}/{page}")
        }
    }

    /// Resolved tag values for `page`. `None` only when neither the page nor
    /// `home` has an entry.
    pub fn meta_tags(&self, page: &str) -> Option<MetaTags> {
        let entry = self.entry(page)?;
        Some(MetaTags {
            title: entry.title.clone(),
            description: entry.description.clone(),
            canonical: self.canonical_url(page),
            image: entry
                .image
                .clone()
                .unwrap_or_else(|| self.default_image.clone()),
        })
    }
}

/// The values written into the document head for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub image: String,
}

impl MetaTags {
    /// `(attribute, key, content)` triples for every `<meta>` tag.
    pub fn meta_entries(&self) -> Vec<(MetaAttr, &'static str, &str)> {
        vec![
            (MetaAttr::Name, "description", self.description.as_str()),
            (MetaAttr::Property, "og:title", self.title.as_str()),
            (MetaAttr::Property, "og:description", self.description.as_str()),
            (MetaAttr::Property, "og:url", self.canonical.as_str()),
            (MetaAttr::Property, "og:image", self.image.as_str()),
            (MetaAttr::Name, "twitter:title", self.title.as_str()),
            (MetaAttr::Name, "twitter:description", self.description.as_str()),
            (MetaAttr::Name, "twitter:image", self.image.as_str()),
        ]
    }

    /// Write title, canonical and meta tags. Empty values leave the existing tag alone.
    pub fn apply(&self, document: &mut dyn Document) {
        document.set_title(&self.title);
        document.set_canonical(&self.canonical);
        for (attr, key, content) in self.meta_entries() {
            if !content.is_empty() {
                document.set_meta(attr, key, content);
            }
        }
    }
}
