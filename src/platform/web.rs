//! Browser implementations of the platform traits, backed by `web-sys`.
//!
//! Failed DOM writes are logged and dropped. Listener closures are leaked
//! with `forget()`: they live as long as the page, like the elements they
//! are attached to.

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, MediaQueryList,
    MediaQueryListEvent,
};

use super::{ColorScheme, Dom, DomEvent, EventKind, Listener, Storage, Timers};
use crate::error::{MediaError, StorageError};

// ── DOM ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// The current window's document, if running in a browser.
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn add_listener(target: &EventTarget, kind: EventKind, listener: Listener<Element>) {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            listener(&to_dom_event(kind, &event));
        }) as Box<dyn FnMut(Event)>);
        if let Err(e) = target.add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref()) {
            log::warn!("addEventListener({}) failed: {e:?}", kind.name());
            return;
        }
        closure.forget();
    }
}

fn to_dom_event(kind: EventKind, event: &Event) -> DomEvent<Element> {
    DomEvent {
        kind,
        target: event.target().and_then(|t| t.dyn_ref::<Element>().cloned()),
        key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("querySelector({selector}) failed: {e:?}");
                None
            }
        }
    }

    fn query_all(&self, scope: &Element, selector: &str) -> Vec<Element> {
        match scope.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_ref::<Element>().cloned())
                .collect(),
            Err(e) => {
                log::warn!("querySelectorAll({selector}) failed: {e:?}");
                Vec::new()
            }
        }
    }

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("setAttribute({name}) failed: {e:?}");
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        if let Err(e) = node.remove_attribute(name) {
            log::warn!("removeAttribute({name}) failed: {e:?}");
        }
    }

    fn id(&self, node: &Element) -> Option<String> {
        let id = node.id();
        if id.is_empty() { None } else { Some(id) }
    }

    fn set_id(&self, node: &Element, id: &str) {
        node.set_id(id);
    }

    fn text(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            log::warn!("classList.add({class}) failed: {e:?}");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            log::warn!("classList.remove({class}) failed: {e:?}");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        match node.closest(selector) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("closest({selector}) failed: {e:?}");
                None
            }
        }
    }

    fn is_attached(&self, node: &Element) -> bool {
        node.parent_node().is_some()
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(e) = el.focus() {
                log::warn!("focus failed: {e:?}");
            }
        }
    }

    fn listen(&self, node: &Element, kind: EventKind, listener: Listener<Element>) {
        Self::add_listener(node, kind, listener);
    }

    fn listen_document(&self, kind: EventKind, listener: Listener<Element>) {
        Self::add_listener(&self.document, kind, listener);
    }

    fn when_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.document.ready_state() != "loading" {
            callback();
            return;
        }
        let closure = Closure::once(move |_: Event| callback());
        if let Err(e) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
        {
            log::warn!("DOMContentLoaded listener failed: {e:?}");
            return;
        }
        closure.forget();
    }
}

// ── Storage ─────────────────────────────────────────────────────

/// `window.localStorage`, resolved on every access since it can throw.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable),
            Err(e) => Err(StorageError::Access(format!("{e:?}"))),
        }
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(|e| StorageError::Access(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Access(format!("{e:?}")))
    }
}

// ── Color scheme ────────────────────────────────────────────────

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// `window.matchMedia(query)`; `None` inside when the API is missing.
#[derive(Clone)]
pub struct WebColorScheme {
    list: Option<MediaQueryList>,
}

impl WebColorScheme {
    pub fn new(query: &str) -> Self {
        let list = match web_sys::window().map(|w| w.match_media(query)) {
            Some(Ok(list)) => list,
            Some(Err(e)) => {
                log::debug!("matchMedia({query}) failed: {e:?}");
                None
            }
            None => None,
        };
        Self { list }
    }
}

impl ColorScheme for WebColorScheme {
    fn prefers_dark(&self) -> Result<bool, MediaError> {
        self.list.as_ref().map(MediaQueryList::matches).ok_or(MediaError::Unsupported)
    }

    /// Subscribe via `change` events, falling back to the legacy
    /// `addListener` on engines where `MediaQueryList` is not an
    /// `EventTarget`.
    fn watch(&self, listener: Rc<dyn Fn(bool)>) -> Result<(), MediaError> {
        let Some(list) = self.list.clone() else {
            return Err(MediaError::Unsupported);
        };
        // The closure holds the list so it is not collected while watched.
        let held = list.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let matches =
                event.dyn_ref::<MediaQueryListEvent>().map_or_else(|| held.matches(), MediaQueryListEvent::matches);
            listener(matches);
        }) as Box<dyn FnMut(Event)>);

        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let registered = match list.add_event_listener_with_callback("change", callback) {
            Ok(()) => Ok(()),
            Err(modern) => {
                log::debug!("MediaQueryList change event unavailable ({modern:?}), trying addListener");
                list.add_listener_with_opt_callback(Some(callback))
                    .map_err(|legacy| MediaError::Query(format!("{legacy:?}")))
            }
        };
        if registered.is_ok() {
            closure.forget();
        }
        registered
    }
}

// ── Timers ──────────────────────────────────────────────────────

/// `setTimeout` through `gloo-timers`; dropping the handle clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebTimers;

impl Timers for WebTimers {
    type Handle = Timeout;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback)
    }

    fn clear_timeout(&self, handle: Timeout) {
        drop(handle);
    }
}
