//! Interactive widgets that live in page content or the header.
//!
//! These are state machines only; the host maps clicks, hover and timers onto
//! them and reads the resulting state back into the DOM.
//!
//! | Widget | Driven by | State read back |
//! |--------|-----------|-----------------|
//! | [`Carousel`] | prev/next buttons, hover/focus, a timer | `translateX` of the track |
//! | [`TabGroup`] | `.tarifs-button[data-tarif]` clicks | visible `[data-card]` |
//! | [`NavMenu`] | `.nav__toggle`, nav links, dropdown parents | `.active` classes, dropdown display |
//!
//! Widgets inside page content are rebuilt after every navigation by a deck
//! subscribed to the router: [`CarouselDeck`] for carousels, [`TabDeck`] for
//! the tarifs and articles tab groups. The header menu lives outside the
//! content and is only collapsed on navigation.

use crate::events::PageMounted;
use crate::host::{CarouselMount, Document, TabKind, TabMount};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ============================================================================
// Carousel
// ============================================================================

/// Index cycler for a before/after image carousel.
///
/// Autoplay advances one slide per full `delay` of [`tick`](Self::tick)ed
/// time while playing. Any manual move restarts the delay.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    slides: usize,
    index: usize,
    delay: Duration,
    playing: bool,
    elapsed: Duration,
}

impl Carousel {
    /// A carousel over `slides` slides, playing from the first one.
    pub fn new(slides: usize, delay: Duration) -> Self {
        Self {
            slides,
            index: 0,
            delay,
            playing: slides > 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.slides
    }

    pub fn is_empty(&self) -> bool {
        self.slides == 0
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.slides;
        self.restart_clock();
    }

    pub fn prev(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + self.slides - 1) % self.slides;
        self.restart_clock();
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.slides {
            self.index = index;
            self.restart_clock();
        }
    }

    /// Stop autoplay (pointer enters or focus moves inside).
    pub fn pause(&mut self) {
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    /// Resume autoplay with a fresh delay.
    pub fn play(&mut self) {
        if self.is_empty() {
            return;
        }
        self.playing = true;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the autoplay clock. Returns how many slides were advanced.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        if !self.playing || self.is_empty() || self.delay.is_zero() {
            return 0;
        }
        self.elapsed += elapsed;
        let mut advanced = 0;
        while self.elapsed >= self.delay {
            self.elapsed -= self.delay;
            self.index = (self.index + 1) % self.slides;
            advanced += 1;
        }
        advanced
    }

    /// Horizontal offset of the track, in percent of one slide.
    pub fn translate_percent(&self) -> i64 {
        -(self.index as i64) * 100
    }

    /// CSS `transform` value for the track.
    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.translate_percent())
    }

    fn restart_clock(&mut self) {
        if self.playing {
            self.elapsed = Duration::ZERO;
        }
    }
}

/// The carousels of the currently mounted page, keyed by `data-carousel`.
#[derive(Debug, Default)]
pub struct CarouselDeck {
    delay: Duration,
    carousels: Vec<(String, Carousel)>,
}

impl CarouselDeck {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            carousels: Vec::new(),
        }
    }

    /// Replace every carousel with fresh ones for `mounts`. Containers
    /// without slides are skipped.
    pub fn rebuild(&mut self, mounts: &[CarouselMount]) {
        self.carousels = mounts
            .iter()
            .filter(|mount| mount.slides > 0)
            .map(|mount| (mount.id.clone(), Carousel::new(mount.slides, self.delay)))
            .collect();
        debug!("{} carousel(s) mounted", self.carousels.len());
    }

    pub fn get(&self, id: &str) -> Option<&Carousel> {
        self.carousels.iter().find(|(key, _)| key == id).map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Carousel> {
        self.carousels
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Carousel)> {
        self.carousels.iter().map(|(id, c)| (id.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Advance every carousel's autoplay clock.
    pub fn tick(&mut self, elapsed: Duration) {
        for (_, carousel) in &mut self.carousels {
            carousel.tick(elapsed);
        }
    }

    /// Page-mounted callback rescanning the new content.
    pub fn subscriber(
        deck: Rc<RefCell<Self>>,
    ) -> impl FnMut(&PageMounted, &mut dyn Document) + 'static {
        move |_: &PageMounted, document: &mut dyn Document| {
            deck.borrow_mut().rebuild(&document.carousels());
        }
    }
}

// ============================================================================
// Tabs
// ============================================================================

/// Exclusive selection among keyed panels (price cards, article lists).
#[derive(Debug, Clone, PartialEq)]
pub struct TabGroup {
    keys: Vec<String>,
    active: Option<usize>,
}

impl TabGroup {
    /// First key starts selected.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let active = if keys.is_empty() { None } else { Some(0) };
        Self { keys, active }
    }

    /// Select `key`. Returns false (and changes nothing) for unknown keys.
    pub fn select(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.keys[i].as_str())
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.active() == Some(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// The tab groups of the currently mounted page, one per [`TabKind`].
#[derive(Debug, Default)]
pub struct TabDeck {
    groups: Vec<(TabKind, TabGroup)>,
}

impl TabDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every group with a fresh one for `mounts`, first key selected.
    pub fn rebuild(&mut self, mounts: &[TabMount]) {
        self.groups = mounts
            .iter()
            .map(|mount| (mount.kind, TabGroup::new(mount.keys.iter().cloned())))
            .collect();
        debug!("{} tab group(s) mounted", self.groups.len());
    }

    pub fn get(&self, kind: TabKind) -> Option<&TabGroup> {
        self.groups.iter().find(|(k, _)| *k == kind).map(|(_, g)| g)
    }

    pub fn get_mut(&mut self, kind: TabKind) -> Option<&mut TabGroup> {
        self.groups
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, g)| g)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TabKind, &TabGroup)> {
        self.groups.iter().map(|(kind, group)| (*kind, group))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Page-mounted callback rescanning the new content.
    pub fn subscriber(
        deck: Rc<RefCell<Self>>,
    ) -> impl FnMut(&PageMounted, &mut dyn Document) + 'static {
        move |_: &PageMounted, document: &mut dyn Document| {
            deck.borrow_mut().rebuild(&document.tab_groups());
        }
    }
}

// ============================================================================
// Navigation menu
// ============================================================================

/// Mobile header menu: the list toggle plus exclusive dropdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavMenu {
    open: bool,
    dropdown: Option<String>,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Dropdown currently expanded, if any.
    pub fn open_dropdown(&self) -> Option<&str> {
        self.dropdown.as_deref()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A navigation link was followed: collapse everything.
    pub fn link_clicked(&mut self) {
        self.open = false;
        self.dropdown = None;
    }

    /// Expand `name`, collapsing any other; a second tap collapses it.
    pub fn toggle_dropdown(&mut self, name: &str) {
        if self.dropdown.as_deref() == Some(name) {
            self.dropdown = None;
        } else {
            self.dropdown = Some(name.to_string());
        }
    }

    /// A click landed outside every dropdown item.
    pub fn click_outside(&mut self) {
        self.dropdown = None;
    }

    /// Page-mounted callback: a completed navigation leaves the menu collapsed.
    pub fn subscriber(
        menu: Rc<RefCell<Self>>,
    ) -> impl FnMut(&PageMounted, &mut dyn Document) + 'static {
        move |_: &PageMounted, _: &mut dyn Document| {
            menu.borrow_mut().link_clicked();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryDocument;

    const DELAY: Duration = Duration::from_millis(3000);

    // =========================================================================
    // Carousel
    // =========================================================================

    #[test]
    fn next_and_prev_wrap() {
        let mut c = Carousel::new(3, DELAY);
        c.prev();
        assert_eq!(c.index(), 2);
        c.next();
        assert_eq!(c.index(), 0);
        c.next();
        c.next();
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn go_to_ignores_out_of_range() {
        let mut c = Carousel::new(3, DELAY);
        c.go_to(1);
        assert_eq!(c.index(), 1);
        c.go_to(3);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn autoplay_advances_once_per_delay() {
        let mut c = Carousel::new(4, DELAY);
        assert_eq!(c.tick(Duration::from_millis(2999)), 0);
        assert_eq!(c.tick(Duration::from_millis(1)), 1);
        assert_eq!(c.index(), 1);
        assert_eq!(c.tick(Duration::from_millis(6500)), 2);
        assert_eq!(c.index(), 3);
        assert_eq!(c.tick(Duration::from_millis(2500)), 1);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn manual_move_restarts_delay() {
        let mut c = Carousel::new(3, DELAY);
        c.tick(Duration::from_millis(2000));
        c.next();
        assert_eq!(c.tick(Duration::from_millis(2000)), 0);
        assert_eq!(c.index(), 1);
        assert_eq!(c.tick(Duration::from_millis(1000)), 1);
    }

    #[test]
    fn paused_carousel_does_not_advance() {
        let mut c = Carousel::new(3, DELAY);
        c.pause();
        assert_eq!(c.tick(Duration::from_secs(30)), 0);
        c.play();
        assert_eq!(c.tick(DELAY), 1);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = Carousel::new(0, DELAY);
        c.next();
        c.prev();
        c.go_to(0);
        c.play();
        assert!(!c.is_playing());
        assert_eq!(c.tick(Duration::from_secs(10)), 0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn transform_follows_index() {
        let mut c = Carousel::new(3, DELAY);
        assert_eq!(c.transform(), "translateX(0%)");
        c.go_to(2);
        assert_eq!(c.translate_percent(), -200);
        assert_eq!(c.transform(), "translateX(-200%)");
    }

    // =========================================================================
    // CarouselDeck
    // =========================================================================

    const TWO_CAROUSELS: &str = r#"
<div class="carousel-container" data-carousel="seins">
  <div class="carousel-track">
    <div class="carousel-slide"><img src="a.jpg"></div>
    <div class="carousel-slide"><img src="b.jpg"></div>
  </div>
</div>
<div class="carousel-container" data-carousel="visage">
  <div class="carousel-track">
    <div class="carousel-slide"><img src="c.jpg"></div>
    <div class="carousel-slide"><img src="d.jpg"></div>
    <div class="carousel-slide"><img src="e.jpg"></div>
  </div>
</div>"#;

    #[test]
    fn deck_rebuilds_on_mount() {
        let deck = Rc::new(RefCell::new(CarouselDeck::new(DELAY)));
        let mut subscriber = CarouselDeck::subscriber(Rc::clone(&deck));
        let mut doc = MemoryDocument::new();
        doc.set_content_html(TWO_CAROUSELS);
        let event = PageMounted {
            page: "avant-apres".into(),
            template_path: "pages/avant-apres.html".into(),
        };
        subscriber(&event, &mut doc);

        let deck = deck.borrow();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get("seins").unwrap().len(), 2);
        assert_eq!(deck.get("visage").unwrap().len(), 3);
    }

    #[test]
    fn deck_is_emptied_by_page_without_carousels() {
        let mut deck = CarouselDeck::new(DELAY);
        deck.rebuild(&[CarouselMount {
            id: "seins".into(),
            slides: 2,
        }]);
        deck.get_mut("seins").unwrap().next();
        deck.rebuild(&[]);
        assert!(deck.is_empty());
    }

    #[test]
    fn deck_ticks_every_carousel() {
        let mut deck = CarouselDeck::new(DELAY);
        deck.rebuild(&[
            CarouselMount {
                id: "a".into(),
                slides: 2,
            },
            CarouselMount {
                id: "empty".into(),
                slides: 0,
            },
            CarouselMount {
                id: "b".into(),
                slides: 3,
            },
        ]);
        assert_eq!(deck.len(), 2);
        deck.tick(DELAY);
        assert_eq!(deck.get("a").unwrap().index(), 1);
        assert_eq!(deck.get("b").unwrap().index(), 1);
    }

    // =========================================================================
    // Tabs and menu
    // =========================================================================

    #[test]
    fn tab_selection_is_exclusive() {
        let mut tabs = TabGroup::new(["consultation", "chirurgie", "injections"]);
        assert_eq!(tabs.active(), Some("consultation"));
        assert!(tabs.select("chirurgie"));
        assert!(tabs.is_visible("chirurgie"));
        assert!(!tabs.is_visible("consultation"));
    }

    #[test]
    fn unknown_tab_is_ignored() {
        let mut tabs = TabGroup::new(["a", "b"]);
        tabs.select("b");
        assert!(!tabs.select("zzz"));
        assert_eq!(tabs.active(), Some("b"));
        assert_eq!(TabGroup::new(Vec::<String>::new()).active(), None);
    }

    #[test]
    fn tab_deck_rebuilds_on_mount() {
        let deck = Rc::new(RefCell::new(TabDeck::new()));
        let mut subscriber = TabDeck::subscriber(Rc::clone(&deck));
        let mut doc = MemoryDocument::new();
        doc.set_content_html(
            r#"<button class="tarifs-button" data-tarif="consultation"></button>
<button class="tarifs-button" data-tarif="sein"></button>"#,
        );
        let event = PageMounted {
            page: "tarifs".into(),
            template_path: "pages/tarifs.html".into(),
        };
        subscriber(&event, &mut doc);
        {
            let mut deck = deck.borrow_mut();
            let tarifs = deck.get_mut(TabKind::Tarifs).unwrap();
            assert_eq!(tarifs.keys().collect::<Vec<_>>(), vec!["consultation", "sein"]);
            assert!(tarifs.select("sein"));
            assert!(deck.get(TabKind::Articles).is_none());
        }

        doc.set_content_html("<p>accueil</p>");
        subscriber(&event, &mut doc);
        assert!(deck.borrow().is_empty());
    }

    #[test]
    fn remounted_tabs_start_on_first_key() {
        let mut deck = TabDeck::new();
        let mounts = [TabMount {
            kind: TabKind::Articles,
            keys: vec!["a".into(), "b".into()],
        }];
        deck.rebuild(&mounts);
        deck.get_mut(TabKind::Articles).unwrap().select("b");
        deck.rebuild(&mounts);
        assert_eq!(deck.get(TabKind::Articles).unwrap().active(), Some("a"));
        assert_eq!(deck.iter().count(), 1);
    }

    #[test]
    fn menu_closes_on_link_click() {
        let mut menu = NavMenu::default();
        menu.toggle();
        menu.toggle_dropdown("chirurgie-sein");
        assert!(menu.is_open());
        menu.link_clicked();
        assert!(!menu.is_open());
        assert_eq!(menu.open_dropdown(), None);
    }

    #[test]
    fn dropdowns_are_exclusive() {
        let mut menu = NavMenu::default();
        menu.toggle_dropdown("sein");
        menu.toggle_dropdown("visage");
        assert_eq!(menu.open_dropdown(), Some("visage"));
        menu.toggle_dropdown("visage");
        assert_eq!(menu.open_dropdown(), None);
        menu.toggle_dropdown("sein");
        menu.click_outside();
        assert_eq!(menu.open_dropdown(), None);
    }

    #[test]
    fn menu_collapses_when_a_page_mounts() {
        let menu = Rc::new(RefCell::new(NavMenu::default()));
        menu.borrow_mut().toggle();
        menu.borrow_mut().toggle_dropdown("visage");
        let mut subscriber = NavMenu::subscriber(Rc::clone(&menu));
        subscriber(
            &PageMounted {
                page: "home".into(),
                template_path: "pages/home.html".into(),
            },
            &mut MemoryDocument::new(),
        );
        assert_eq!(*menu.borrow(), NavMenu::default());
    }
}
