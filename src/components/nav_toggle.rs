//! Mobile navigation toggle.
//!
//! A trigger button shows and hides the navigation list. The list's `active`
//! class, its `hidden` attribute, and the trigger's `aria-expanded` are always
//! written together from one [`NavState`]. Escape anywhere in the document
//! closes an open list and hands focus back to the trigger.

#[cfg(test)]
#[path = "nav_toggle_test.rs"]
mod nav_toggle_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::NavConfig;
use crate::platform::{Dom, DomEvent, EventKind};
use crate::state::nav::NavState;

pub struct NavToggle<D: Dom> {
    dom: D,
    trigger: D::Node,
    list: D::Node,
    active_class: String,
    state: Cell<NavState>,
}

impl<D: Dom> NavToggle<D> {
    /// Wire the toggle. `trigger` and `list` default to the configured
    /// lookups; if either cannot be found nothing is attached.
    pub fn init(dom: &D, config: &NavConfig, trigger: Option<D::Node>, list: Option<D::Node>) -> Option<Rc<Self>> {
        let trigger = trigger.or_else(|| dom.element_by_id(&config.toggle_id));
        let list = list.or_else(|| dom.query(&config.list_selector));
        let (Some(trigger), Some(list)) = (trigger, list) else {
            log::debug!("nav toggle: trigger or list missing, skipping");
            return None;
        };

        let list_id = dom.id(&list).unwrap_or_else(|| {
            dom.set_id(&list, &config.list_default_id);
            config.list_default_id.clone()
        });
        dom.set_attribute(&trigger, "aria-controls", &list_id);

        let nav = Rc::new(Self {
            dom: dom.clone(),
            trigger,
            list,
            active_class: config.active_class.clone(),
            state: Cell::new(NavState::Collapsed),
        });
        nav.apply(NavState::Collapsed);

        let on_click = Rc::clone(&nav);
        dom.listen(&nav.trigger, EventKind::Click, Rc::new(move |_: &DomEvent<D::Node>| on_click.toggle()));

        let on_key = Rc::clone(&nav);
        dom.listen_document(
            EventKind::KeyDown,
            Rc::new(move |event: &DomEvent<D::Node>| {
                if event.key.as_deref() == Some("Escape") {
                    on_key.dismiss();
                }
            }),
        );

        Some(nav)
    }

    pub fn state(&self) -> NavState {
        self.state.get()
    }

    /// Flip between collapsed and expanded.
    pub fn toggle(&self) {
        self.apply(self.state.get().toggled());
    }

    /// Close an expanded list and return focus to the trigger. Does nothing
    /// while collapsed.
    pub fn dismiss(&self) {
        if self.state.get().is_expanded() {
            self.apply(NavState::Collapsed);
            self.dom.focus(&self.trigger);
        }
    }

    fn apply(&self, state: NavState) {
        self.state.set(state);
        if state.is_expanded() {
            self.dom.add_class(&self.list, &self.active_class);
        } else {
            self.dom.remove_class(&self.list, &self.active_class);
        }
        self.dom.set_attribute(&self.trigger, "aria-expanded", state.aria_expanded());
        self.dom.set_hidden(&self.list, !state.is_expanded());
    }
}
