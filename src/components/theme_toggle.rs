//! Light/dark theme switcher.
//!
//! The current theme lives in the root element's theme attribute. The toggle
//! button's text and `aria-label` always describe the *next* theme. A click
//! is an explicit user override and is persisted; system color-scheme
//! changes are followed only while no override is stored.

#[cfg(test)]
#[path = "theme_toggle_test.rs"]
mod theme_toggle_test;

use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::platform::{ColorScheme, Dom, DomEvent, EventKind, Storage};
use crate::state::theme::{self, Theme};
use crate::util::theme_store::ThemeStore;

pub struct ThemeToggle<D: Dom, S: Storage> {
    dom: D,
    toggle: D::Node,
    root: D::Node,
    attribute: String,
    store: ThemeStore<S>,
}

impl<D: Dom, S: Storage> ThemeToggle<D, S> {
    /// Resolve and apply the initial theme, then wire the click and system
    /// listeners.
    ///
    /// `toggle` defaults to the configured id and `root` to the document
    /// element. If either is missing nothing is applied or attached.
    pub fn init<M: ColorScheme>(
        dom: &D,
        storage: S,
        color_scheme: &M,
        config: &ThemeConfig,
        toggle: Option<D::Node>,
        root: Option<D::Node>,
    ) -> Option<Rc<Self>> {
        let toggle = toggle.or_else(|| dom.element_by_id(&config.toggle_id));
        let root = root.or_else(|| dom.document_element());
        let (Some(toggle), Some(root)) = (toggle, root) else {
            log::debug!("theme toggle: button or root missing, skipping");
            return None;
        };

        let this = Rc::new(Self {
            dom: dom.clone(),
            toggle,
            root,
            attribute: config.attribute.clone(),
            store: ThemeStore::new(storage, config.storage_key.clone()),
        });

        let stored = this.store.load();
        let system = if stored.is_some() { None } else { system_prefers_dark(color_scheme) };
        this.apply(theme::resolve(stored, system));

        let on_click = Rc::clone(&this);
        dom.listen(&this.toggle, EventKind::Click, Rc::new(move |_: &DomEvent<D::Node>| {
            on_click.toggle();
        }));

        let on_change = Rc::clone(&this);
        if let Err(e) = color_scheme.watch(Rc::new(move |dark| on_change.follow_system(dark))) {
            log::debug!("theme toggle: not tracking system changes: {e}");
        }

        Some(this)
    }

    /// Theme currently applied to the root. Absent or unrecognized reads as
    /// light.
    pub fn current(&self) -> Theme {
        self.dom
            .attribute(&self.root, &self.attribute)
            .map_or(Theme::Light, |value| value.parse().unwrap_or_default())
    }

    /// Switch to the opposite theme and persist it as the user's choice.
    pub fn toggle(&self) -> Theme {
        let next = self.current().opposite();
        self.apply(next);
        self.store.save(next);
        next
    }

    /// React to a system color-scheme change. Ignored while a user override
    /// is stored.
    pub fn follow_system(&self, prefers_dark: bool) {
        if self.store.load().is_some() {
            log::debug!("theme toggle: user preference set, ignoring system change");
            return;
        }
        self.apply(Theme::from_prefers_dark(prefers_dark));
    }

    fn apply(&self, theme: Theme) {
        self.dom.set_attribute(&self.root, &self.attribute, theme.as_str());
        self.dom.set_text(&self.toggle, theme.glyph());
        self.dom.set_attribute(&self.toggle, "aria-label", theme.toggle_label());
    }
}

fn system_prefers_dark<M: ColorScheme>(color_scheme: &M) -> Option<bool> {
    match color_scheme.prefers_dark() {
        Ok(dark) => Some(dark),
        Err(e) => {
            log::debug!("theme toggle: system preference unavailable: {e}");
            None
        }
    }
}
