//! Shared fixtures for unit tests.
//!
//! A small site with the shape of the real one: a home page, two standalone
//! pages, three procedure pages in one category, and SEO entries for some
//! (not all) of them.
//!
//! ```rust
//! let (mut router, mut session) = router_at("https://cabinet.example/");
//! let fetcher = sample_fetcher();
//! boot(&mut router, &mut session, &fetcher);
//! block_on(router.navigate_and_load("tarifs", &fetcher));
//! ```

use crate::categories::{Categories, Labels};
use crate::config::CarouselConfig;
use crate::context::SiteContext;
use crate::host::memory::{MemoryDocument, MemoryFetcher, MemoryLocation, MemorySession};
use crate::router::{LoadOutcome, Router};
use crate::routes::RouteTableBuilder;
use crate::schema::{Procedure, SchemaConfig, Section};
use crate::seo::{SeoConfig, SeoEntry};
use std::collections::BTreeMap;
use std::rc::Rc;

pub use futures::executor::block_on;

pub type MemoryRouter = Router<MemoryDocument, MemoryLocation>;

pub const PAGES: &[&str] = &[
    "home",
    "tarifs",
    "articles",
    "protheses-mammaires",
    "reduction-mammaire",
    "lifting-mammaire",
];

pub const BREAST: &[&str] = &["protheses-mammaires", "reduction-mammaire", "lifting-mammaire"];

/// Fragment path registered for `page`.
pub fn template(page: &str) -> String {
    format!("pages/{page}.html")
}

/// Markup served for `page` by [`sample_fetcher`].
pub fn fragment(page: &str) -> String {
    format!("<section class=\"container\"><h1>{page}</h1></section>")
}

fn seo_entry(title: &str, description: &str) -> SeoEntry {
    SeoEntry {
        title: title.to_string(),
        description: description.to_string(),
        image: None,
    }
}

pub fn sample_context() -> SiteContext {
    let mut builder = RouteTableBuilder::new();
    for page in PAGES {
        builder.register(*page, template(page)).unwrap();
    }

    let mut seo_pages = BTreeMap::new();
    seo_pages.insert("home".to_string(), seo_entry("Accueil | Cabinet", "Le cabinet"));
    seo_pages.insert("tarifs".to_string(), seo_entry("Tarifs | Cabinet", "Nos tarifs"));
    seo_pages.insert(
        "lifting-mammaire".to_string(),
        SeoEntry {
            image: Some("https://cabinet.example/lifting.jpg".to_string()),
            ..seo_entry("Lifting mammaire | Cabinet", "Lifting mammaire")
        },
    );

    let mut categories = BTreeMap::new();
    categories.insert(
        "sein".to_string(),
        BREAST.iter().map(|p| p.to_string()).collect(),
    );

    let mut labels = BTreeMap::new();
    labels.insert("protheses-mammaires".to_string(), "Prothèses mammaires".to_string());
    labels.insert("reduction-mammaire".to_string(), "Réduction mammaire".to_string());
    labels.insert("lifting-mammaire".to_string(), "Lifting mammaire".to_string());

    let mut schema = SchemaConfig::default();
    schema.sections.insert(
        "tarifs".to_string(),
        Section {
            name: "Tarifs".to_string(),
            parent: None,
            parent_name: None,
        },
    );
    for page in BREAST {
        schema.sections.insert(
            page.to_string(),
            Section {
                name: labels[*page].clone(),
                parent: Some("chirurgie-sein".to_string()),
                parent_name: Some("Chirurgie du sein".to_string()),
            },
        );
    }
    schema.procedures.insert(
        "lifting-mammaire".to_string(),
        Procedure {
            name: "Lifting mammaire".to_string(),
            alternate_names: vec!["Mastopexie".to_string()],
            description: "Correction de la ptose.".to_string(),
            procedure_type: "Surgical".to_string(),
            body_location: "Poitrine".to_string(),
        },
    );

    SiteContext {
        routes: builder.build().unwrap(),
        seo: SeoConfig {
            base_url: "https://cabinet.example".to_string(),
            default_image: "https://cabinet.example/default.jpg".to_string(),
            site_name: "Cabinet".to_string(),
            locale: "fr_FR".to_string(),
            pages: seo_pages,
        },
        categories: Categories::from(categories),
        labels: Labels::new(labels),
        schema,
        carousel: CarouselConfig::default(),
    }
}

/// Fetcher serving [`fragment`] for every sample page at its template path.
pub fn sample_fetcher() -> MemoryFetcher {
    PAGES.iter().fold(MemoryFetcher::new(), |fetcher, page| {
        fetcher.with_page(&template(page), &fragment(page))
    })
}

/// Router over the sample context, starting at absolute URL `url`.
pub fn router_at(url: &str) -> (MemoryRouter, MemorySession) {
    router_with(sample_context(), MemoryDocument::new(), url)
}

pub fn router_with(
    context: SiteContext,
    document: MemoryDocument,
    url: &str,
) -> (MemoryRouter, MemorySession) {
    let mut session = MemorySession::default();
    let location = MemoryLocation::new(url).unwrap();
    let router = Router::new(Rc::new(context), document, location, &mut session);
    (router, session)
}

/// Run `init` and complete the initial load, if any.
pub fn boot(
    router: &mut MemoryRouter,
    session: &mut MemorySession,
    fetcher: &MemoryFetcher,
) -> Option<LoadOutcome> {
    let ticket = router.init(session)?;
    Some(block_on(router.load(ticket, fetcher)))
}
