//! The application-wide tables, built once from `site.toml`.
//!
//! Components receive the context (usually as an `Rc<SiteContext>`) instead
//! of looking tables up through globals.

use crate::categories::{Categories, Labels};
use crate::config::CarouselConfig;
use crate::routes::RouteTable;
use crate::schema::SchemaConfig;
use crate::seo::SeoConfig;

#[derive(Debug, Clone)]
pub struct SiteContext {
    pub routes: RouteTable,
    pub seo: SeoConfig,
    pub categories: Categories,
    pub labels: Labels,
    pub schema: SchemaConfig,
    pub carousel: CarouselConfig,
}

impl SiteContext {
    /// Context with only a route table; every other table empty or default.
    pub fn with_routes(routes: RouteTable) -> Self {
        Self {
            routes,
            seo: SeoConfig::default(),
            categories: Categories::default(),
            labels: Labels::default(),
            schema: SchemaConfig::default(),
            carousel: CarouselConfig::default(),
        }
    }
}
