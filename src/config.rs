//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! the base layer; the site's own `site.toml` is merged on top, key by key.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml               # Route table, SEO, categories (overrides stock defaults)
//! └── pages/                  # Fragments named by the route table
//!     ├── home.html
//!     └── tarifs.html
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! pages_dir = "pages"        # Fragment directory, relative to the site root
//!
//! [routes]                   # page key -> fragment path
//! home = "pages/home.html"
//! tarifs = "pages/tarifs.html"
//!
//! [seo]
//! base_url = "https://docteur.example"
//! default_image = "https://docteur.example/images/og-image.jpg"
//! site_name = "Cabinet"
//! locale = "fr_FR"
//!
//! [seo.pages.home]
//! title = "Accueil | Cabinet"
//! description = "Le cabinet."
//!
//! [categories]               # name -> ordered page keys
//! sein = ["protheses-mammaires", "reduction-mammaire"]
//!
//! [labels]                   # page key -> short label for sibling buttons
//! protheses-mammaires = "Prothèses mammaires"
//!
//! [schema]                   # structured data, see the schema module
//! home_label = "Accueil"
//!
//! [carousel]
//! autoplay_ms = 3000
//! ```
//!
//! Unknown keys are rejected to catch typos early. Everything a later stage
//! relies on (home route, home SEO entry, categories naming registered pages)
//! is checked by [`SiteConfig::validate`] before the config is used.

use crate::categories::{Categories, Labels};
use crate::context::SiteContext;
use crate::routes::{HOME, RouteError, RouteTable, RouteTableBuilder};
use crate::schema::SchemaConfig;
use crate::seo::SeoConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Name of the config file at the site root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Route table error: {0}")]
    Route(#[from] RouteError),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. A site file needs only the values it wants to
/// override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the page fragments, relative to the site root.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,
    /// Page key to fragment path.
    pub routes: BTreeMap<String, String>,
    /// Per-page titles, descriptions and sharing images.
    pub seo: SeoConfig,
    /// Category name to ordered page keys, for sibling navigation.
    pub categories: BTreeMap<String, Vec<String>>,
    /// Short page labels shown on sibling controls.
    pub labels: BTreeMap<String, String>,
    /// Breadcrumb hierarchy and procedure data.
    pub schema: SchemaConfig,
    pub carousel: CarouselConfig,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut routes = BTreeMap::new();
        routes.insert(HOME.to_string(), format!("{}/home.html", default_pages_dir()));
        Self {
            pages_dir: default_pages_dir(),
            routes,
            seo: SeoConfig::default(),
            categories: BTreeMap::new(),
            labels: BTreeMap::new(),
            schema: SchemaConfig::default(),
            carousel: CarouselConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate cross-references and value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let routes = self.route_table()?;

        let mut owner: BTreeMap<&str, &str> = BTreeMap::new();
        for (category, pages) in &self.categories {
            for page in pages {
                if !routes.contains(page) {
                    return Err(ConfigError::Validation(format!(
                        "categories.{category} lists unregistered page '{page}'"
                    )));
                }
                if let Some(previous) = owner.insert(page, category) {
                    return Err(ConfigError::Validation(format!(
                        "page '{page}' is in both categories.{previous} and categories.{category}"
                    )));
                }
            }
        }

        if !self.seo.pages.contains_key(HOME) {
            return Err(ConfigError::Validation(
                "seo.pages must have an entry for 'home'".into(),
            ));
        }
        match Url::parse(&self.seo.base_url) {
            Ok(url) if url.has_host() => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "seo.base_url must be an absolute URL, got '{}'",
                    self.seo.base_url
                )));
            }
        }
        if self.carousel.autoplay_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Register every route, in key order, into a frozen table.
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        let mut builder = RouteTableBuilder::new();
        for (page, template_path) in &self.routes {
            builder.register(page, template_path)?;
        }
        Ok(builder.build()?)
    }

    /// Build the runtime tables the router and its subscribers share.
    pub fn into_context(self) -> Result<SiteContext, ConfigError> {
        let routes = self.route_table()?;
        Ok(SiteContext {
            routes,
            seo: self.seo,
            categories: Categories::from(self.categories),
            labels: Labels::new(self.labels),
            schema: self.schema,
            carousel: self.carousel,
        })
    }
}

/// Carousel autoplay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds between automatic slide advances.
    pub autoplay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { autoplay_ms: 3000 }
    }
}

impl CarouselConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_ms)
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer the site file is merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `site.toml`.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory.
///
/// Merges site values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Site Configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory holding page fragments, relative to this file.
pages_dir = "pages"

# ---------------------------------------------------------------------------
# Routes: page key -> fragment path
# ---------------------------------------------------------------------------
# The URL /<key> (or /<key>.html) displays the fragment. "home" is required
# and is shown for / and for any unknown key.
[routes]
home = "pages/home.html"

# ---------------------------------------------------------------------------
# SEO
# ---------------------------------------------------------------------------
[seo]
# Absolute origin for canonical and og:url links.
base_url = "https://example.com"

# Sharing image for pages without their own.
default_image = ""

site_name = "My Practice"
locale = "en_US"

# One table per page key. Pages without an entry use the home entry.
[seo.pages.home]
title = "My Practice"
description = "Welcome to the practice."
# image = "https://example.com/images/home.jpg"

# ---------------------------------------------------------------------------
# Categories: name -> ordered page keys
# ---------------------------------------------------------------------------
# Pages in a category get previous/next sibling controls. A page may belong
# to at most one category.
[categories]
# sein = ["protheses-mammaires", "reduction-mammaire", "lifting-mammaire"]

# Short labels shown on sibling controls (defaults to the page key).
[labels]
# protheses-mammaires = "Prothèses mammaires"

# ---------------------------------------------------------------------------
# Structured data (JSON-LD)
# ---------------------------------------------------------------------------
[schema]
# Name of the first breadcrumb.
home_label = "Accueil"

# Breadcrumb position of a page:
# [schema.sections.lifting-mammaire]
# name = "Lifting mammaire"
# parent = "chirurgie-sein"
# parent_name = "Chirurgie du sein"

# MedicalProcedure data for a page:
# [schema.procedures.lifting-mammaire]
# name = "Lifting mammaire"
# alternate_names = ["Mastopexie"]
# description = "Intervention corrigeant la ptose mammaire."
# procedure_type = "Surgical"
# body_location = "Poitrine"

# ---------------------------------------------------------------------------
# Carousels
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic slide changes.
autoplay_ms = 3000
"##
}
