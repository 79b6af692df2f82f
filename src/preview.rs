//! Headless page render.
//!
//! Runs the full router against an in-memory document and the site
//! directory, with the same subscribers a browser host installs, and
//! captures what the visitor would end up with.
//!
//! ```text
//! site/ ──DirFetcher──▶ Router ──▶ MemoryDocument ──▶ RenderSummary
//!                         │
//!                         ├─ SchemaInjector   (JSON-LD)
//!                         ├─ CarouselDeck     (carousel rescan)
//!                         ├─ TabDeck          (tarifs/articles tabs)
//!                         └─ NavMenu          (collapse on navigation)
//! ```

use crate::context::SiteContext;
use crate::host::fs::DirFetcher;
use crate::host::memory::{MemoryDocument, MemoryLocation, MemorySession};
use crate::host::{BrowserLocation, MetaAttr, SessionStorage, Side};
use crate::location::{BASE_PATH_KEY, page_url};
use crate::router::{LoadOutcome, Router, RouterState};
use crate::schema::SchemaInjector;
use crate::widgets::{CarouselDeck, NavMenu, TabDeck};
use futures::executor::block_on;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Host origin the preview pretends to be served from.
pub const PREVIEW_ORIGIN: &str = "http://localhost";

/// What the document looks like after rendering one page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub requested: String,
    /// Page actually displayed (`home` for unknown keys), if any.
    pub page: Option<String>,
    pub url: String,
    pub state: RouterState,
    pub title: String,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub image: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub structured_data: Vec<String>,
    /// `data-carousel` id and slide count of each carousel found.
    pub carousels: Vec<(String, usize)>,
    /// Tab widget name and key of each tab group found.
    pub tabs: Vec<(String, Vec<String>)>,
    pub content_bytes: usize,
}

impl RenderSummary {
    pub fn loaded(&self) -> bool {
        matches!(self.state, RouterState::Loaded(_))
    }
}

/// Render `page` from the fragments under `root`, served under `base`.
pub fn render_page(
    root: &Path,
    context: SiteContext,
    page: &str,
    base: &str,
) -> Result<RenderSummary, url::ParseError> {
    let context = Rc::new(context);
    let mut session = MemorySession::default();
    session.set(BASE_PATH_KEY, base);
    let location = MemoryLocation::new(&format!("{PREVIEW_ORIGIN}{}", page_url(page, base)))?;

    let mut router = Router::new(
        Rc::clone(&context),
        MemoryDocument::new(),
        location,
        &mut session,
    );
    let injector = Rc::new(SchemaInjector::new(
        context.schema.clone(),
        context.seo.clone(),
    ));
    router.subscribe(injector.subscriber());
    let deck = Rc::new(RefCell::new(CarouselDeck::new(context.carousel.delay())));
    router.subscribe(CarouselDeck::subscriber(Rc::clone(&deck)));
    let tabs = Rc::new(RefCell::new(TabDeck::new()));
    router.subscribe(TabDeck::subscriber(Rc::clone(&tabs)));
    router.subscribe(NavMenu::subscriber(Rc::new(RefCell::new(NavMenu::default()))));

    let fetcher = DirFetcher::new(root, base);
    let outcome = router
        .init(&mut session)
        .map(|ticket| block_on(router.load(ticket, &fetcher)));

    let document = router.document();
    let carousels = document_carousels(&deck.borrow());
    let tabs = document_tabs(&tabs.borrow());
    Ok(RenderSummary {
        requested: page.to_string(),
        page: match outcome {
            Some(LoadOutcome::Loaded { page }) => Some(page),
            _ => router.current_page().map(str::to_string),
        },
        url: router.location().pathname(),
        state: router.state().clone(),
        title: document.title().to_string(),
        description: document.meta(MetaAttr::Name, "description").map(str::to_string),
        canonical: document.canonical().map(str::to_string),
        image: document.meta(MetaAttr::Property, "og:image").map(str::to_string),
        prev: document.sibling(Side::Prev).map(|s| s.target.clone()),
        next: document.sibling(Side::Next).map(|s| s.target.clone()),
        structured_data: document
            .structured_data_ids()
            .into_iter()
            .map(str::to_string)
            .collect(),
        carousels,
        tabs,
        content_bytes: document.content().map_or(0, str::len),
    })
}

fn document_carousels(deck: &CarouselDeck) -> Vec<(String, usize)> {
    deck.iter()
        .map(|(id, carousel)| (id.to_string(), carousel.len()))
        .collect()
}

fn document_tabs(deck: &TabDeck) -> Vec<(String, Vec<String>)> {
    deck.iter()
        .map(|(kind, group)| {
            (
                kind.as_str().to_string(),
                group.keys().map(str::to_string).collect(),
            )
        })
        .collect()
}
