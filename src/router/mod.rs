//! Client-side page router.
//!
//! The router turns a URL into displayed content. A navigation runs the same
//! sequence whether it comes from a link click, a sibling button, the back
//! button or the initial page load:
//!
//! ```text
//! page key ─▶ begin_load ─────────▶ host fetches ticket.fetch_url ─▶ complete_load
//!             │ unknown → home                                       │ stale ticket → discard
//!             │ current → skip                                       │ 2xx → insert, notify,
//!             │ file:// → error                                      │       sync metadata + siblings
//!             └ opacity 0.5, issue ticket                            └ else → error panel
//! ```
//!
//! ## Why the load is split in two
//!
//! A browser host keeps the router in an `Rc<RefCell<_>>` and awaits the
//! fetch in a spawned task. Holding the router borrowed across that await
//! would block every other event handler, so the router hands out a
//! [`LoadTicket`] and forgets about the request until the host brings the
//! result back. Each ticket carries an increasing id; only the latest one is
//! accepted, so when navigations overlap the last one requested is the one
//! displayed, whatever order the responses arrive in.
//!
//! Hosts without that constraint (tests, the CLI) use the async
//! [`Router::load`] and [`Router::navigate_and_load`] helpers.
//!
//! ## State
//!
//! `current_page` is only committed after a successful insert. A failed
//! load leaves it untouched, so navigating to the same page again retries.
//! While the error panel is displayed nothing counts as already shown, so
//! the panel's home link and the back button always fetch.

mod links;
mod panel;
mod state;

pub use links::{Link, LinkAction, classify};
pub use panel::render_error_panel;
pub use state::{LoadError, LoadOutcome, LoadTicket, RouterState};

use crate::categories::sync_sibling_nav;
use crate::context::SiteContext;
use crate::events::{PageEvents, PageMounted};
use crate::host::{BrowserLocation, Document, FetchError, FetchResponse, Fetcher, SessionStorage};
use crate::location::{
    REDIRECT_PATH_KEY, cached_base_path, detect_base_path, fragment_url, home_url, is_home_url,
    page_from_path, page_url,
};
use crate::routes::HOME;
use log::{debug, error, info, warn};
use std::rc::Rc;

/// Opacity of the content container while a fragment is in flight.
const LOADING_OPACITY: f32 = 0.5;

#[derive(Debug)]
struct PendingLoad {
    id: u64,
    page: String,
}

pub struct Router<D, L> {
    context: Rc<SiteContext>,
    document: D,
    location: L,
    base_path: String,
    current_page: Option<String>,
    state: RouterState,
    pending: Option<PendingLoad>,
    last_ticket: u64,
    showing_panel: bool,
    events: PageEvents,
}

impl<D: Document, L: BrowserLocation> Router<D, L> {
    /// Build a router over a frozen route table. The base path is detected
    /// (or read back from `session`) here, once.
    pub fn new(
        context: Rc<SiteContext>,
        document: D,
        location: L,
        session: &mut impl SessionStorage,
    ) -> Self {
        let base_path = cached_base_path(session, || {
            detect_base_path(
                &location.hostname(),
                &location.pathname(),
                &location.origin(),
                document.base_href().as_deref(),
            )
        });
        info!("router initialized with base path {base_path:?}");
        Self {
            context,
            document,
            location,
            base_path,
            current_page: None,
            state: RouterState::Idle,
            pending: None,
            last_ticket: 0,
            showing_panel: false,
            events: PageEvents::default(),
        }
    }

    /// Recover from a 404-fallback redirect, then load the page the URL names.
    pub fn init(&mut self, session: &mut impl SessionStorage) -> Option<LoadTicket> {
        if let Some(redirect) = session.remove(REDIRECT_PATH_KEY) {
            let clean_url = format!("{}{}", self.base_path, redirect);
            info!("restoring redirected path {clean_url}");
            self.location.replace_state(&clean_url);
        }
        self.handle_route()
    }

    /// Register a page-mounted callback.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&PageMounted, &mut dyn Document) + 'static,
    ) {
        self.events.subscribe(subscriber);
    }

    /// Page key the current URL names, before any registry check.
    pub fn resolve_from_location(&self) -> String {
        page_from_path(&self.location.pathname(), &self.base_path)
    }

    /// Load whatever the URL currently names. This is the back/forward handler.
    pub fn handle_route(&mut self) -> Option<LoadTicket> {
        let page = self.resolve_from_location();
        debug!("route for {:?} resolved to {page:?}", self.location.pathname());
        self.begin_load(&page)
    }

    /// Push a history entry for `page` and start loading it.
    pub fn navigate(&mut self, page: &str) -> Option<LoadTicket> {
        let url = page_url(page, &self.base_path);
        info!("navigating to {page} ({url})");
        if self.location.pathname() != url {
            self.location.push_state(page, &url);
        }
        self.begin_load(page)
    }

    /// First half of a page load. Returns `None` when there is nothing to fetch:
    /// the page is already displayed or already loading, or the load failed
    /// before any request could be made.
    pub fn begin_load(&mut self, requested: &str) -> Option<LoadTicket> {
        let page = if self.context.routes.contains(requested) {
            requested.to_string()
        } else {
            if !is_home_url(&self.location.pathname(), &self.base_path) {
                warn!("unknown route {requested:?}, redirecting to home");
                self.location.replace_state(&home_url(&self.base_path));
            }
            HOME.to_string()
        };

        if !self.showing_panel && self.current_page.as_deref() == Some(page.as_str()) {
            if let Some(superseded) = self.pending.take() {
                debug!("staying on {page}, dropping pending load of {}", superseded.page);
                self.document.set_content_opacity(1.0);
                self.state = RouterState::Loaded(page);
            }
            return None;
        }
        if self.pending.as_ref().is_some_and(|p| p.page == page) {
            debug!("{page} is already loading");
            return None;
        }

        let template_path = self
            .context
            .routes
            .template_path(&page)
            .unwrap_or_default()
            .to_string();

        if !self.document.has_content_container() {
            self.pending = None;
            self.fail(&page, &template_path, LoadError::MissingContainer);
            return None;
        }

        self.state = RouterState::Loading(page.clone());
        self.document.set_content_opacity(LOADING_OPACITY);

        if self.location.protocol() == "file:" {
            warn!("page opened from file://, fragments cannot be fetched");
            self.pending = None;
            self.fail(&page, &template_path, LoadError::NotServed);
            return None;
        }

        self.last_ticket += 1;
        let id = self.last_ticket;
        self.pending = Some(PendingLoad {
            id,
            page: page.clone(),
        });
        let fetch_url = fragment_url(&template_path, &self.base_path);
        info!("loading {page} from {fetch_url}");
        Some(LoadTicket {
            id,
            page,
            template_path,
            fetch_url,
        })
    }

    /// Second half of a page load: apply the fetch result for `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<FetchResponse, FetchError>,
    ) -> LoadOutcome {
        if self.pending.as_ref().map(|p| p.id) != Some(ticket.id) {
            debug!("discarding stale load of {} (ticket {})", ticket.page, ticket.id);
            return LoadOutcome::Stale { page: ticket.page };
        }
        self.pending = None;

        let error = match result {
            Ok(response) if response.is_success() => {
                self.mount(&ticket, &response.body);
                return LoadOutcome::Loaded { page: ticket.page };
            }
            Ok(response) => LoadError::Http {
                status: response.status,
                status_text: response.status_text,
                path: ticket.template_path.clone(),
            },
            Err(e) => LoadError::Transport(e),
        };
        self.fail(&ticket.page, &ticket.template_path, error.clone());
        LoadOutcome::Failed {
            page: ticket.page,
            error,
        }
    }

    /// Fetch and complete `ticket`.
    pub async fn load<F: Fetcher>(&mut self, ticket: LoadTicket, fetcher: &F) -> LoadOutcome {
        let result = fetcher.fetch(&ticket.fetch_url).await;
        self.complete_load(ticket, result)
    }

    /// [`navigate`](Self::navigate) and, if a fetch is needed, [`load`](Self::load).
    pub async fn navigate_and_load<F: Fetcher>(
        &mut self,
        page: &str,
        fetcher: &F,
    ) -> Option<LoadOutcome> {
        let ticket = self.navigate(page)?;
        Some(self.load(ticket, fetcher).await)
    }

    /// Decide what a click on `link` should do.
    pub fn intercept_link(&self, link: &Link<'_>) -> LinkAction {
        classify(link, &self.context.routes, &self.base_path)
    }

    fn mount(&mut self, ticket: &LoadTicket, html: &str) {
        self.document.set_content_html(html);
        self.document.set_content_opacity(1.0);
        self.document.scroll_to_top();
        self.current_page = Some(ticket.page.clone());
        self.showing_panel = false;
        self.state = RouterState::Loaded(ticket.page.clone());
        info!("page {} loaded", ticket.page);

        let event = PageMounted {
            page: ticket.page.clone(),
            template_path: ticket.template_path.clone(),
        };
        self.events.emit(&event, &mut self.document);

        match self.context.seo.meta_tags(&ticket.page) {
            Some(tags) => tags.apply(&mut self.document),
            None => warn!("no SEO entry for {} and no home fallback", ticket.page),
        }
        sync_sibling_nav(
            &mut self.document,
            &self.context.categories,
            &self.context.labels,
            &ticket.page,
        );
    }

    fn fail(&mut self, page: &str, template_path: &str, error: LoadError) {
        error!("failed to load page {page:?} from {template_path:?}: {error}");
        debug!(
            "registered routes: {:?}",
            self.context.routes.keys().collect::<Vec<_>>()
        );
        if self.document.has_content_container() {
            let panel = render_error_panel(page, template_path, &error, &home_url(&self.base_path));
            self.document.set_content_html(&panel.into_string());
            self.document.set_content_opacity(1.0);
            self.document.remove_mobile_nav();
            self.showing_panel = true;
        }
        self.state = RouterState::Failed {
            page: page.to_string(),
            error,
        };
    }

    pub fn current_page(&self) -> Option<&str> {
        self.current_page.as_deref()
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn context(&self) -> &Rc<SiteContext> {
        &self.context
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }
}
