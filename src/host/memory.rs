//! In-process host backend.
//!
//! A DOM-less stand-in for the browser: the document is a handful of fields,
//! history is a vector of entries with a cursor, and session storage is a map.
//! Writes are counted so tests can assert that a guarded navigation left the
//! page untouched.

use super::{
    BrowserLocation, CarouselMount, Document, FetchError, FetchResponse, Fetcher, MetaAttr,
    SessionStorage, Side, TabKind, TabMount,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::{Future, ready};
use url::Url;

/// Target and tooltip of a visible sibling control.
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingControl {
    pub target: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    content: Option<String>,
    content_writes: usize,
    opacity: f32,
    scrolls: usize,
    title: String,
    meta: BTreeMap<(MetaAttr, String), String>,
    canonical: Option<String>,
    base_href: Option<String>,
    prev: Option<SiblingControl>,
    next: Option<SiblingControl>,
    mobile_nav: Option<String>,
    structured_data: BTreeMap<String, String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document with a content container and a canonical link.
    pub fn new() -> Self {
        Self {
            content: Some(String::new()),
            content_writes: 0,
            opacity: 1.0,
            scrolls: 0,
            title: String::new(),
            meta: BTreeMap::new(),
            canonical: Some(String::new()),
            base_href: None,
            prev: None,
            next: None,
            mobile_nav: None,
            structured_data: BTreeMap::new(),
        }
    }

    /// Document whose markup lacks the content container element.
    pub fn without_container() -> Self {
        Self {
            content: None,
            ..Self::new()
        }
    }

    pub fn with_base_href(mut self, href: impl Into<String>) -> Self {
        self.base_href = Some(href.into());
        self
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of `set_content_html` calls so far.
    pub fn content_writes(&self) -> usize {
        self.content_writes
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meta(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.meta.get(&(attr, key.to_string())).map(String::as_str)
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn sibling(&self, side: Side) -> Option<&SiblingControl> {
        match side {
            Side::Prev => self.prev.as_ref(),
            Side::Next => self.next.as_ref(),
        }
    }

    pub fn mobile_nav(&self) -> Option<&str> {
        self.mobile_nav.as_deref()
    }

    pub fn structured_data(&self, id: &str) -> Option<&str> {
        self.structured_data.get(id).map(String::as_str)
    }

    pub fn structured_data_ids(&self) -> Vec<&str> {
        self.structured_data.keys().map(String::as_str).collect()
    }
}

impl Document for MemoryDocument {
    fn has_content_container(&self) -> bool {
        self.content.is_some()
    }

    fn content_html(&self) -> Option<String> {
        self.content.clone()
    }

    fn set_content_html(&mut self, html: &str) {
        if let Some(content) = self.content.as_mut() {
            *content = html.to_string();
            self.content_writes += 1;
        }
    }

    fn set_content_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_meta(&mut self, attr: MetaAttr, key: &str, content: &str) {
        self.meta
            .insert((attr, key.to_string()), content.to_string());
    }

    fn set_canonical(&mut self, href: &str) {
        if let Some(canonical) = self.canonical.as_mut() {
            *canonical = href.to_string();
        }
    }

    fn base_href(&self) -> Option<String> {
        self.base_href.clone()
    }

    fn show_sibling_control(&mut self, side: Side, target: &str, title: &str) {
        let control = Some(SiblingControl {
            target: target.to_string(),
            title: title.to_string(),
        });
        match side {
            Side::Prev => self.prev = control,
            Side::Next => self.next = control,
        }
    }

    fn hide_sibling_control(&mut self, side: Side) {
        match side {
            Side::Prev => self.prev = None,
            Side::Next => self.next = None,
        }
    }

    fn set_mobile_nav(&mut self, markup: &str) {
        self.mobile_nav = Some(markup.to_string());
    }

    fn remove_mobile_nav(&mut self) {
        self.mobile_nav = None;
    }

    fn set_structured_data(&mut self, id: &str, json: &str) {
        self.structured_data
            .insert(id.to_string(), json.to_string());
    }

    fn clear_structured_data(&mut self, prefix: &str) {
        self.structured_data.retain(|id, _| !id.starts_with(prefix));
    }

    fn carousels(&self) -> Vec<CarouselMount> {
        self.content
            .as_deref()
            .map(scan_carousels)
            .unwrap_or_default()
    }

    fn tab_groups(&self) -> Vec<TabMount> {
        self.content
            .as_deref()
            .map(scan_tab_groups)
            .unwrap_or_default()
    }
}

/// Find `.carousel-container` elements and count the slides inside each.
///
/// A textual scan, good enough for fragments authored like the site's own:
/// each container's slides run until the next container starts.
fn scan_carousels(html: &str) -> Vec<CarouselMount> {
    const CONTAINER: &str = "carousel-container";
    let mut mounts = Vec::new();
    let mut from = 0;
    while let Some(pos) = html[from..].find(CONTAINER) {
        let at = from + pos;
        let tag_start = html[..at].rfind('<').unwrap_or(0);
        let tag_end = html[at..].find('>').map_or(html.len(), |i| at + i);
        let id = attr_value(&html[tag_start..tag_end], "data-carousel").unwrap_or_default();
        let body_end = html[tag_end..]
            .find(CONTAINER)
            .map_or(html.len(), |i| tag_end + i);
        let body = &html[tag_end..body_end];
        let slides =
            body.matches("carousel-slide\"").count() + body.matches("carousel-slide ").count();
        mounts.push(CarouselMount {
            id: id.to_string(),
            slides,
        });
        from = tag_end;
    }
    mounts
}

/// Collect the keys of every tab button, one group per [`TabKind`] present.
fn scan_tab_groups(html: &str) -> Vec<TabMount> {
    TabKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let mut keys: Vec<String> = Vec::new();
            for tag in start_tags(html) {
                let is_button = attr_value(tag, "class").is_some_and(|class| {
                    class.split_whitespace().any(|c| c == kind.button_class())
                });
                if !is_button {
                    continue;
                }
                if let Some(key) = attr_value(tag, kind.key_attr()) {
                    if !keys.iter().any(|k| k == key) {
                        keys.push(key.to_string());
                    }
                }
            }
            (!keys.is_empty()).then_some(TabMount { kind, keys })
        })
        .collect()
}

/// Inner text of each start tag, `<` and `>` excluded.
fn start_tags(html: &str) -> impl Iterator<Item = &str> {
    html.split('<')
        .skip(1)
        .filter(|rest| !rest.starts_with('/'))
        .filter_map(|rest| rest.find('>').map(|end| &rest[..end]))
}

fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

/// One session history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Page key recorded by `push_state`; `None` for the initial entry and replacements.
    pub page: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct MemoryLocation {
    protocol: String,
    hostname: String,
    origin: String,
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl MemoryLocation {
    /// Start a history at the absolute URL `start`.
    pub fn new(start: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(start)?;
        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }
        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            origin: url.origin().ascii_serialization(),
            entries: vec![HistoryEntry {
                page: None,
                url: path,
            }],
            index: 0,
        })
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    /// Step back one entry, as the browser's back button does. Returns false at the start.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl BrowserLocation for MemoryLocation {
    fn pathname(&self) -> String {
        let url = &self.current().url;
        let end = url.find(['?', '#']).unwrap_or(url.len());
        url[..end].to_string()
    }

    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn protocol(&self) -> String {
        self.protocol.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn push_state(&mut self, page: &str, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            page: Some(page.to_string()),
            url: url.to_string(),
        });
        self.index = self.entries.len() - 1;
    }

    fn replace_state(&mut self, url: &str) {
        self.entries[self.index] = HistoryEntry {
            page: None,
            url: url.to_string(),
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: BTreeMap<String, String>,
}

impl SessionStorage for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

/// Fetcher answering from a fixed table. Unknown paths answer 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: BTreeMap<String, Result<FetchResponse, FetchError>>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: &str, body: &str) -> Self {
        self.responses
            .insert(path.to_string(), Ok(FetchResponse::ok(body)));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16, status_text: &str) -> Self {
        self.responses.insert(
            path.to_string(),
            Ok(FetchResponse::with_status(status, status_text)),
        );
        self
    }

    pub fn with_failure(mut self, path: &str, message: &str) -> Self {
        self.responses
            .insert(path.to_string(), Err(FetchError::new(message)));
        self
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<FetchResponse, FetchError>> {
        self.requests.borrow_mut().push(path.to_string());
        let response = self
            .responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| Ok(FetchResponse::with_status(404, "Not Found")));
        ready(response)
    }
}
