//! JSON-LD structured data for the displayed page.
//!
//! Two scripts are kept in the document head and replaced on every page
//! mount:
//!
//! | Script id | Content |
//! |-----------|---------|
//! | `schema-page-breadcrumb` | `BreadcrumbList`: home → section parent → page |
//! | `schema-page-content` | `MedicalProcedure`, only for pages with a procedure entry |
//!
//! ## Configuration
//!
//! ```toml
//! [schema]
//! home_label = "Accueil"
//!
//! [schema.sections.lifting-mammaire]
//! name = "Lifting mammaire"
//! parent = "chirurgie-sein"
//! parent_name = "Chirurgie du sein"
//!
//! [schema.procedures.lifting-mammaire]
//! name = "Lifting mammaire"
//! alternate_names = ["Mastopexie"]
//! description = "Intervention corrigeant la ptose mammaire."
//! body_location = "Poitrine"
//! ```
//!
//! A page without a section entry gets a breadcrumb with only the home crumb.

use crate::events::PageMounted;
use crate::host::Document;
use crate::routes::HOME;
use crate::seo::SeoConfig;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Id prefix shared by every per-page structured-data script.
pub const PAGE_SCHEMA_PREFIX: &str = "schema-page-";
pub const BREADCRUMB_ID: &str = "schema-page-breadcrumb";
pub const CONTENT_ID: &str = "schema-page-content";

/// Where a page sits in the site hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// Crumb label for the page itself.
    pub name: String,
    /// Page key of the parent section, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
}

/// `MedicalProcedure` data for a procedure page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Procedure {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_names: Vec<String>,
    pub description: String,
    #[serde(default = "default_procedure_type")]
    pub procedure_type: String,
    pub body_location: String,
}

fn default_procedure_type() -> String {
    "Surgical".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Label of the root crumb.
    pub home_label: String,
    pub sections: BTreeMap<String, Section>,
    pub procedures: BTreeMap<String, Procedure>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            home_label: "Accueil".to_string(),
            sections: BTreeMap::new(),
            procedures: BTreeMap::new(),
        }
    }
}

/// One breadcrumb with an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub name: String,
    pub url: String,
}

impl SchemaConfig {
    /// Crumb trail for `page`, root first.
    pub fn breadcrumbs(&self, page: &str, seo: &SeoConfig) -> Vec<Crumb> {
        let mut crumbs = vec![Crumb {
            name: self.home_label.clone(),
            url: seo.canonical_url(HOME),
        }];
        if page == HOME {
            return crumbs;
        }
        let Some(section) = self.sections.get(page) else {
            return crumbs;
        };
        if let Some(parent) = &section.parent {
            crumbs.push(Crumb {
                name: section.parent_name.clone().unwrap_or_else(|| parent.clone()),
                url: seo.canonical_url(parent),
            });
        }
        crumbs.push(Crumb {
            name: section.name.clone(),
            url: seo.canonical_url(page),
        });
        crumbs
    }

    pub fn breadcrumb_schema(&self, page: &str, seo: &SeoConfig) -> Value {
        let items: Vec<Value> = self
            .breadcrumbs(page, seo)
            .into_iter()
            .enumerate()
            .map(|(index, crumb)| {
                json!({
                    "@type": "ListItem",
                    "position": index + 1,
                    "name": crumb.name,
                    "item": crumb.url,
                })
            })
            .collect();
        json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": items,
        })
    }

    /// `MedicalProcedure` object for `page`, if it describes a procedure.
    pub fn procedure_schema(&self, page: &str, seo: &SeoConfig) -> Option<Value> {
        let procedure = self.procedures.get(page)?;
        let mut schema = json!({
            "@context": "https://schema.org",
            "@type": "MedicalProcedure",
            "name": procedure.name,
            "description": procedure.description,
            "procedureType": procedure.procedure_type,
            "bodyLocation": procedure.body_location,
            "performedBy": {
                "@id": format!("{}/#organization", seo.base_url.trim_end_matches('/')),
            },
        });
        if !procedure.alternate_names.is_empty() {
            schema["alternateName"] = json!(procedure.alternate_names);
        }
        Some(schema)
    }
}

/// Rewrites the page structured data after each mount.
#[derive(Debug, Clone)]
pub struct SchemaInjector {
    schema: SchemaConfig,
    seo: SeoConfig,
}

impl SchemaInjector {
    pub fn new(schema: SchemaConfig, seo: SeoConfig) -> Self {
        Self { schema, seo }
    }

    pub fn inject(&self, page: &str, document: &mut dyn Document) {
        document.clear_structured_data(PAGE_SCHEMA_PREFIX);
        let breadcrumb = self.schema.breadcrumb_schema(page, &self.seo);
        document.set_structured_data(BREADCRUMB_ID, &breadcrumb.to_string());
        if let Some(procedure) = self.schema.procedure_schema(page, &self.seo) {
            document.set_structured_data(CONTENT_ID, &procedure.to_string());
        }
        debug!("structured data updated for {page}");
    }

    /// Page-mounted callback for [`Router::subscribe`](crate::router::Router::subscribe).
    pub fn subscriber(self: Rc<Self>) -> impl FnMut(&PageMounted, &mut dyn Document) + 'static {
        move |event: &PageMounted, document: &mut dyn Document| self.inject(&event.page, document)
    }
}
