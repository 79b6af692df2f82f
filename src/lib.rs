//! # Vitrine
//!
//! The client-side half of a small medical-practice website, plus the tooling
//! to check and preview it. The site is one HTML shell; every page is an HTML
//! fragment fetched and swapped into the shell's content container, with the
//! `<head>` metadata, sibling navigation and structured data kept in sync.
//!
//! # Architecture: Router Over Host Traits
//!
//! ```text
//!                 site.toml
//!                     │ config::load_config
//!                     ▼
//!               SiteContext ─────────────────────────┐
//!     (routes, seo, categories, labels, schema)      │
//!                     │                              │
//!                     ▼                              ▼
//! URL ──▶ Router ──ticket──▶ Fetcher ──▶ Router ──▶ Document
//!           │                                │        ▲
//!           └── BrowserLocation, Session     └─ PageMounted ─▶ SchemaInjector,
//!                                                              CarouselDeck, TabDeck,
//!                                                              NavMenu
//! ```
//!
//! The router never touches a browser API directly. It talks to four host
//! traits ([`host::Document`], [`host::BrowserLocation`],
//! [`host::SessionStorage`], [`host::Fetcher`]). A browser binding implements
//! them over the DOM; [`host::memory`] and [`host::fs`] implement them in
//! process, which is what the tests and the `vitrine` CLI use.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`router`] | Navigation, page load sequence, stale-result discard, error panel, link interception |
//! | [`routes`] | Page key → fragment path registry, frozen before the router starts |
//! | [`location`] | Base path detection, URL ↔ page key mapping, session keys |
//! | [`seo`] | Per-page title/description/image table and `<head>` sync |
//! | [`categories`] | Ordered page groups and previous/next sibling navigation |
//! | [`schema`] | JSON-LD breadcrumb and medical procedure data |
//! | [`widgets`] | Carousel, tab group and mobile menu state machines |
//! | [`events`] | Page-mounted notifications for widgets living in page content |
//! | [`context`] | The application-wide tables, shared by the router and subscribers |
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation |
//! | [`host`] | Host traits and the in-memory and filesystem backends |
//! | [`check`] | Route table vs fragment files consistency report |
//! | [`preview`] | Headless render of one page through the full router |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Split Page Loads
//!
//! A page load is two synchronous calls around one await: [`router::Router::begin_load`]
//! issues a ticket and [`router::Router::complete_load`] applies the fetch
//! result. The router is never borrowed while the fetch is in flight, and
//! only the most recent ticket can complete. Overlapping navigations
//! therefore always settle on the last one requested.
//!
//! ## Frozen Tables
//!
//! Routes, SEO entries and categories are built once from `site.toml` and
//! passed in as a [`context::SiteContext`]. Nothing registers routes or edits
//! metadata after the router starts.
//!
//! ## Maud For Generated Markup
//!
//! The error panel and the mobile sibling bar are rendered with
//! [Maud](https://maud.lambda.xyz/), so page keys and error messages are
//! escaped by construction.

pub mod categories;
pub mod check;
pub mod config;
pub mod context;
pub mod events;
pub mod host;
pub mod location;
pub mod output;
pub mod preview;
pub mod router;
pub mod routes;
pub mod schema;
pub mod seo;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;
