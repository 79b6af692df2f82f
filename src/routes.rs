//! Page registry: page key → fragment path.
//!
//! Routes are collected on a [`RouteTableBuilder`] and frozen into a
//! [`RouteTable`] before the router is constructed. The router takes the
//! table by value inside its [`SiteContext`](crate::context::SiteContext),
//! so there is no way to register a route after navigation has started.
//!
//! ```text
//! home                → pages/home.html
//! tarifs              → pages/tarifs.html
//! lifting-mammaire    → pages/lifting-mammaire.html
//! ```
//!
//! The `home` route is mandatory: every unknown page key falls back to it.

use thiserror::Error;

/// Page key of the landing page. Unknown routes resolve here.
pub const HOME: &str = "home";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Route already registered: {0}")]
    Duplicate(String),
    #[error("Invalid page key {0:?}: keys must be non-empty and contain no '/'")]
    InvalidKey(String),
    #[error("Route {0:?} has an empty template path")]
    EmptyTemplate(String),
    #[error("No '{HOME}' route registered")]
    MissingHome,
}

/// One registered page.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub page: String,
    pub template_path: String,
}

/// Mutable registration phase of the route table.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `page` as served by the fragment at `template_path`.
    ///
    /// Each key maps to exactly one fragment; registering a key twice is an
    /// error rather than a silent overwrite.
    pub fn register(
        &mut self,
        page: impl Into<String>,
        template_path: impl Into<String>,
    ) -> Result<&mut Self, RouteError> {
        let page = page.into();
        let template_path = template_path.into();
        if page.is_empty() || page.contains('/') {
            return Err(RouteError::InvalidKey(page));
        }
        if template_path.is_empty() {
            return Err(RouteError::EmptyTemplate(page));
        }
        if self.routes.iter().any(|r| r.page == page) {
            return Err(RouteError::Duplicate(page));
        }
        self.routes.push(Route {
            page,
            template_path,
        });
        Ok(self)
    }

    /// Freeze the registry. Fails if no `home` route was registered.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        if !self.routes.iter().any(|r| r.page == HOME) {
            return Err(RouteError::MissingHome);
        }
        Ok(RouteTable {
            routes: self.routes,
        })
    }
}

/// Immutable page registry, in registration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Fragment path registered for `page`.
    pub fn template_path(&self, page: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|r| r.page == page)
            .map(|r| r.template_path.as_str())
    }

    pub fn contains(&self, page: &str) -> bool {
        self.template_path(page).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.page.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
