use super::*;
use crate::platform::memory::{MemoryColorScheme, MemoryStorage};
use crate::platform::memory_dom::{MemoryDom, NodeId};

struct Page {
    dom: MemoryDom,
    button: NodeId,
    root: NodeId,
    storage: MemoryStorage,
    scheme: MemoryColorScheme,
}

impl Page {
    fn new(prefers_dark: bool) -> Self {
        Self::with_scheme(MemoryColorScheme::new(prefers_dark))
    }

    fn with_scheme(scheme: MemoryColorScheme) -> Self {
        let dom = MemoryDom::new();
        let button = dom.element(dom.body(), "button", Some("theme-toggle"), &[]);
        let root = dom.document_element().expect("root");
        Self { dom, button, root, storage: MemoryStorage::new(), scheme }
    }

    fn init(&self) -> Option<Rc<ThemeToggle<MemoryDom, MemoryStorage>>> {
        ThemeToggle::init(&self.dom, self.storage.clone(), &self.scheme, &ThemeConfig::default(), None, None)
    }

    fn theme_attr(&self) -> Option<String> {
        self.dom.attribute(&self.root, "data-theme")
    }

    fn assert_shows(&self, theme: &str, glyph: &str, label: &str) {
        assert_eq!(self.theme_attr().as_deref(), Some(theme));
        assert_eq!(self.dom.text(&self.button).as_deref(), Some(glyph));
        assert_eq!(self.dom.attribute(&self.button, "aria-label").as_deref(), Some(label));
    }
}

// =============================================================
// Initial theme
// =============================================================

#[test]
fn init_defaults_to_light_without_preference() {
    let page = Page::new(false);
    page.init().expect("toggle");
    page.assert_shows("light", "☾", "Switch to dark mode");
    assert_eq!(page.storage.item("theme"), None);
}

#[test]
fn init_follows_dark_system_preference() {
    let page = Page::new(true);
    page.init().expect("toggle");
    page.assert_shows("dark", "☀", "Switch to light mode");
}

#[test]
fn init_stored_preference_beats_system() {
    let page = Page::new(true);
    page.storage.insert("theme", "light");
    page.init().expect("toggle");
    page.assert_shows("light", "☾", "Switch to dark mode");
}

#[test]
fn init_unrecognized_stored_value_falls_back_to_system() {
    let page = Page::new(true);
    page.storage.insert("theme", "sepia");
    page.init().expect("toggle");
    assert_eq!(page.theme_attr().as_deref(), Some("dark"));
}

#[test]
fn init_with_failing_storage_follows_system() {
    let page = Page::new(true);
    page.storage.insert("theme", "light");
    page.storage.set_failing(true);
    page.init().expect("toggle");
    assert_eq!(page.theme_attr().as_deref(), Some("dark"));
}

#[test]
fn init_without_media_support_is_light() {
    let page = Page::with_scheme(MemoryColorScheme::unsupported());
    let toggle = page.init().expect("toggle");
    page.assert_shows("light", "☾", "Switch to dark mode");

    toggle.toggle();
    assert_eq!(page.theme_attr().as_deref(), Some("dark"));
}

#[test]
fn init_without_button_is_noop() {
    let dom = MemoryDom::new();
    let storage = MemoryStorage::new();
    let scheme = MemoryColorScheme::new(true);

    let toggle = ThemeToggle::init(&dom, storage, &scheme, &ThemeConfig::default(), None, None);

    assert!(toggle.is_none());
    assert_eq!(dom.listener_count(), 0);
    assert_eq!(scheme.watcher_count(), 0);
    let root = dom.document_element().expect("root");
    assert_eq!(dom.attribute(&root, "data-theme"), None);
}

#[test]
fn init_accepts_injected_button_and_root() {
    let page = Page::new(false);
    let other_button = page.dom.element(page.dom.body(), "button", None, &[]);
    let other_root = page.dom.element(page.dom.body(), "main", None, &[]);

    ThemeToggle::init(
        &page.dom,
        page.storage.clone(),
        &page.scheme,
        &ThemeConfig::default(),
        Some(other_button),
        Some(other_root),
    )
    .expect("toggle");

    assert_eq!(page.dom.attribute(&other_root, "data-theme").as_deref(), Some("light"));
    assert_eq!(page.dom.text(&other_button).as_deref(), Some("☾"));
    assert_eq!(page.theme_attr(), None);
}

// =============================================================
// Clicking
// =============================================================

#[test]
fn click_switches_to_dark_and_persists() {
    let page = Page::new(false);
    page.init().expect("toggle");

    page.dom.click(page.button);
    page.assert_shows("dark", "☀", "Switch to light mode");
    assert_eq!(page.storage.item("theme").as_deref(), Some("dark"));

    page.dom.click(page.button);
    page.assert_shows("light", "☾", "Switch to dark mode");
    assert_eq!(page.storage.item("theme").as_deref(), Some("light"));
}

#[test]
fn click_reads_current_theme_from_root() {
    let page = Page::new(false);
    let toggle = page.init().expect("toggle");
    page.dom.set_attribute(&page.root, "data-theme", "dark");

    assert_eq!(toggle.current(), Theme::Dark);
    page.dom.click(page.button);
    assert_eq!(page.theme_attr().as_deref(), Some("light"));
}

#[test]
fn click_with_missing_or_bogus_attribute_treats_it_as_light() {
    let page = Page::new(false);
    let toggle = page.init().expect("toggle");

    page.dom.remove_attribute(&page.root, "data-theme");
    assert_eq!(toggle.toggle(), Theme::Dark);

    page.dom.set_attribute(&page.root, "data-theme", "neon");
    assert_eq!(toggle.toggle(), Theme::Dark);
}

#[test]
fn click_with_failing_storage_still_switches() {
    let page = Page::new(false);
    page.init().expect("toggle");
    page.storage.set_failing(true);

    page.dom.click(page.button);
    assert_eq!(page.theme_attr().as_deref(), Some("dark"));
    assert_eq!(page.storage.item("theme"), None);
}

// =============================================================
// System preference tracking
// =============================================================

#[test]
fn system_change_applies_without_stored_preference() {
    let page = Page::new(false);
    page.init().expect("toggle");

    page.scheme.set_prefers_dark(true);
    page.assert_shows("dark", "☀", "Switch to light mode");

    page.scheme.set_prefers_dark(false);
    page.assert_shows("light", "☾", "Switch to dark mode");
    assert_eq!(page.storage.item("theme"), None);
}

#[test]
fn system_change_ignored_with_stored_preference() {
    let page = Page::new(false);
    page.storage.insert("theme", "light");
    page.init().expect("toggle");

    page.scheme.set_prefers_dark(true);
    assert_eq!(page.theme_attr().as_deref(), Some("light"));
}

#[test]
fn system_change_ignored_after_user_click() {
    let page = Page::new(false);
    page.init().expect("toggle");

    page.dom.click(page.button);
    page.scheme.set_prefers_dark(false);
    assert_eq!(page.theme_attr().as_deref(), Some("dark"));
}

#[test]
fn system_change_applies_when_stored_value_is_unrecognized() {
    let page = Page::new(false);
    page.storage.insert("theme", "sepia");
    page.init().expect("toggle");

    page.scheme.set_prefers_dark(true);
    assert_eq!(page.theme_attr().as_deref(), Some("dark"));
}

#[test]
fn missing_change_events_do_not_block_init() {
    let page = Page::with_scheme(MemoryColorScheme::without_change_events(true));
    page.init().expect("toggle");

    page.assert_shows("dark", "☀", "Switch to light mode");
    assert_eq!(page.scheme.watcher_count(), 0);

    page.dom.click(page.button);
    assert_eq!(page.theme_attr().as_deref(), Some("light"));
}
