//! Page-mounted notifications.
//!
//! Widgets that live inside page content (carousels, tab groups, structured
//! data) need to re-initialise whenever the router swaps the content. They
//! register a callback here; the router calls every callback, in
//! subscription order, right after a fragment has been inserted.

use crate::host::Document;
use std::fmt;

/// Emitted after a fragment has been inserted into the content container.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMounted {
    pub page: String,
    pub template_path: String,
}

type Subscriber = Box<dyn FnMut(&PageMounted, &mut dyn Document)>;

#[derive(Default)]
pub struct PageEvents {
    subscribers: Vec<Subscriber>,
}

impl PageEvents {
    pub fn subscribe(&mut self, subscriber: impl FnMut(&PageMounted, &mut dyn Document) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn emit(&mut self, event: &PageMounted, document: &mut dyn Document) {
        for subscriber in &mut self.subscribers {
            subscriber(event, &mut *document);
        }
    }
}

impl fmt::Debug for PageEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEvents")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
