//! Router state, load tickets and load errors.

use crate::host::FetchError;
use thiserror::Error;

/// Why a page could not be displayed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("HTTP error {status}: {status_text} - file: {path}")]
    Http {
        status: u16,
        status_text: String,
        path: String,
    },
    #[error("Network error: {0}")]
    Transport(#[from] FetchError),
    #[error(
        "The site must be served over HTTP, not opened from file://. \
         Start a local server such as \"python -m http.server\" or \"npx serve\"."
    )]
    NotServed,
    #[error("The page has no content container")]
    MissingContainer,
}

/// Where the router is in its load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterState {
    /// Nothing loaded yet.
    Idle,
    Loading(String),
    Loaded(String),
    Failed { page: String, error: LoadError },
}

/// One issued page load, handed to the host to fetch `fetch_url`.
///
/// Only the most recently issued ticket can complete; results for older
/// tickets are discarded.
#[derive(Debug, PartialEq)]
pub struct LoadTicket {
    pub(super) id: u64,
    pub page: String,
    pub template_path: String,
    pub fetch_url: String,
}

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Result of completing a ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded { page: String },
    Failed { page: String, error: LoadError },
    /// A newer navigation superseded this load; nothing was changed.
    Stale { page: String },
}

impl LoadOutcome {
    pub fn page(&self) -> &str {
        match self {
            LoadOutcome::Loaded { page }
            | LoadOutcome::Failed { page, .. }
            | LoadOutcome::Stale { page } => page,
        }
    }
}
