//! Flash-message toasts: click to close, auto-dismiss, pause on hover/focus.
//!
//! A single delegated click listener on the container handles every close
//! button, including toasts inserted later. Toasts present at startup each
//! get a staggered countdown, tracked in an explicit [`ToastEntry`] list.
//! Hover or focus cancels the countdown; it restarts from the full delay
//! once the pointer has left and focus has moved out. Toasts removed by
//! other code are dropped from the list the next time it is consulted.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::ToastConfig;
use crate::platform::{Dom, DomEvent, EventKind, Timers};
use crate::state::toast::{DismissPolicy, Hold, ToastEntry};

pub struct ToastManager<D: Dom, T: Timers> {
    dom: D,
    timers: T,
    container: D::Node,
    item_selector: String,
    close_selector: String,
    policy: DismissPolicy,
    toasts: RefCell<Vec<ToastEntry<D::Node, T::Handle>>>,
    this: Weak<Self>,
}

impl<D: Dom, T: Timers> ToastManager<D, T> {
    /// Attach to `container` (default: the configured id) and start every
    /// toast's countdown. Returns `None` if there is no container.
    pub fn init(dom: &D, timers: T, config: &ToastConfig, container: Option<D::Node>) -> Option<Rc<Self>> {
        let Some(container) = container.or_else(|| dom.element_by_id(&config.container_id)) else {
            log::debug!("toasts: no container, skipping");
            return None;
        };

        let elements = dom.query_all(&container, &config.item_selector);
        let manager = Rc::new_cyclic(|this| Self {
            dom: dom.clone(),
            timers,
            container,
            item_selector: config.item_selector.clone(),
            close_selector: config.close_selector.clone(),
            policy: config.dismiss_policy(),
            toasts: RefCell::new(
                elements.iter().enumerate().map(|(index, el)| ToastEntry::new(el.clone(), index)).collect(),
            ),
            this: this.clone(),
        });

        let on_click = Rc::clone(&manager);
        dom.listen(&manager.container, EventKind::Click, Rc::new(move |event: &DomEvent<D::Node>| {
            if let Some(target) = &event.target {
                on_click.handle_click(target);
            }
        }));

        for element in &elements {
            for (kind, hold) in [(EventKind::MouseEnter, Hold::Pointer), (EventKind::FocusIn, Hold::Focus)] {
                let pause = Rc::clone(&manager);
                let toast = element.clone();
                dom.listen(element, kind, Rc::new(move |_: &DomEvent<D::Node>| pause.pause(&toast, hold)));
            }
            for (kind, hold) in [(EventKind::MouseLeave, Hold::Pointer), (EventKind::FocusOut, Hold::Focus)] {
                let resume = Rc::clone(&manager);
                let toast = element.clone();
                dom.listen(element, kind, Rc::new(move |_: &DomEvent<D::Node>| resume.resume(&toast, hold)));
            }
            manager.start_timer(element);
        }

        Some(manager)
    }

    /// Number of toasts still tracked (present and not yet dismissed).
    pub fn len(&self) -> usize {
        self.prune_detached();
        self.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.prune_detached();
        self.toasts.borrow().is_empty()
    }

    /// Whether `element` has a pending auto-dismiss.
    pub fn is_counting_down(&self, element: &D::Node) -> bool {
        self.toasts.borrow().iter().any(|t| &t.element == element && t.is_counting_down())
    }

    /// Delegated click: close the toast owning the clicked close control.
    fn handle_click(&self, target: &D::Node) {
        let Some(close) = self.dom.closest(target, &self.close_selector) else {
            return;
        };
        if let Some(toast) = self.dom.closest(&close, &self.item_selector) {
            self.dismiss(&toast);
        }
    }

    /// Remove `element` now and cancel its countdown. Safe to call again.
    pub fn dismiss(&self, element: &D::Node) {
        self.forget(element);
        if self.dom.is_attached(element) {
            self.dom.remove(element);
        }
    }

    /// Cancel the countdown while `hold` keeps the user on the toast.
    pub fn pause(&self, element: &D::Node, hold: Hold) {
        let timer = {
            let mut toasts = self.toasts.borrow_mut();
            let Some(entry) = toasts.iter_mut().find(|t| &t.element == element) else {
                return;
            };
            entry.set_held(hold, true);
            entry.timer.take()
        };
        if let Some(handle) = timer {
            self.timers.clear_timeout(handle);
        }
    }

    /// Release `hold`; restart the full staggered countdown if nothing else
    /// holds the toast. A toast already gone from the page is dropped.
    pub fn resume(&self, element: &D::Node, hold: Hold) {
        let held = {
            let mut toasts = self.toasts.borrow_mut();
            let Some(entry) = toasts.iter_mut().find(|t| &t.element == element) else {
                return;
            };
            entry.set_held(hold, false);
            entry.is_held()
        };
        if !self.dom.is_attached(element) {
            self.forget(element);
        } else if !held {
            self.start_timer(element);
        }
    }

    /// Drop the record for `element` and cancel its countdown.
    fn forget(&self, element: &D::Node) {
        let timer = {
            let mut toasts = self.toasts.borrow_mut();
            let position = toasts.iter().position(|t| &t.element == element);
            position.and_then(|i| toasts.remove(i).timer)
        };
        if let Some(handle) = timer {
            self.timers.clear_timeout(handle);
        }
    }

    fn prune_detached(&self) {
        let detached: Vec<D::Node> = self
            .toasts
            .borrow()
            .iter()
            .filter(|t| !self.dom.is_attached(&t.element))
            .map(|t| t.element.clone())
            .collect();
        for element in &detached {
            self.forget(element);
        }
    }

    fn start_timer(&self, element: &D::Node) {
        if let Some(previous) = self.take_timer(element) {
            self.timers.clear_timeout(previous);
        }
        let Some(index) = self.toasts.borrow().iter().find(|t| &t.element == element).map(|t| t.index) else {
            return;
        };

        let manager = Weak::clone(&self.this);
        let target = element.clone();
        let handle = self.timers.set_timeout(
            self.policy.delay_for(index),
            Box::new(move || {
                if let Some(manager) = manager.upgrade() {
                    manager.expire(&target);
                }
            }),
        );

        let orphan = {
            let mut toasts = self.toasts.borrow_mut();
            if let Some(entry) = toasts.iter_mut().find(|t| &t.element == element) {
                entry.timer = Some(handle);
                None
            } else {
                Some(handle)
            }
        };
        if let Some(handle) = orphan {
            self.timers.clear_timeout(handle);
        }
    }

    fn expire(&self, element: &D::Node) {
        let fired = {
            let mut toasts = self.toasts.borrow_mut();
            let position = toasts.iter().position(|t| &t.element == element);
            position.map(|i| toasts.remove(i))
        };
        // The handle belongs to the timer that just fired; dropping it is enough.
        drop(fired);
        if self.dom.is_attached(element) {
            self.dom.remove(element);
        }
    }

    fn take_timer(&self, element: &D::Node) -> Option<T::Handle> {
        self.toasts.borrow_mut().iter_mut().find(|t| &t.element == element).and_then(|t| t.timer.take())
    }
}
