//! Boundary between the components and the page they run in.
//!
//! DESIGN
//! ======
//! Components are generic over four narrow traits. The browser implements
//! them with `web-sys` (see [`web`], `hydrate` feature only); tests use the
//! in-memory versions in [`memory`] and [`memory_dom`]. Everything is
//! single-threaded, so handles are `Rc` based and nothing is `Send`.

pub mod memory;
pub mod memory_dom;
#[cfg(feature = "hydrate")]
pub mod web;

use std::rc::Rc;
use std::time::Duration;

use crate::error::{MediaError, StorageError};

/// DOM events the components react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    MouseEnter,
    MouseLeave,
    FocusIn,
    FocusOut,
}

impl EventKind {
    /// Browser event type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
        }
    }

    /// Whether the event propagates from the target up to the document.
    #[must_use]
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::MouseEnter | Self::MouseLeave)
    }
}

/// An event as seen by a listener.
#[derive(Debug, Clone)]
pub struct DomEvent<N> {
    pub kind: EventKind,
    /// Element the event originated on, if it was an element.
    pub target: Option<N>,
    /// Key name for keyboard events (e.g. `"Escape"`).
    pub key: Option<String>,
}

pub type Listener<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// Element lookup, mutation, and event subscription.
///
/// Mutations are fire-and-forget: a failed write is logged by the
/// implementation and otherwise ignored.
pub trait Dom: Clone + 'static {
    type Node: Clone + PartialEq + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// First attached element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// Descendants of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn document_element(&self) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Element id, with an empty id reported as `None`.
    fn id(&self, node: &Self::Node) -> Option<String> {
        self.attribute(node, "id").filter(|id| !id.is_empty())
    }
    fn set_id(&self, node: &Self::Node, id: &str) {
        self.set_attribute(node, "id", id);
    }

    fn text(&self, node: &Self::Node) -> Option<String>;
    fn set_text(&self, node: &Self::Node, text: &str);

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_hidden(&self, node: &Self::Node, hidden: bool) {
        if hidden {
            self.set_attribute(node, "hidden", "");
        } else {
            self.remove_attribute(node, "hidden");
        }
    }

    /// `node` itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// Whether `node` still has a parent.
    fn is_attached(&self, node: &Self::Node) -> bool;
    fn remove(&self, node: &Self::Node);
    fn focus(&self, node: &Self::Node);

    fn listen(&self, node: &Self::Node, kind: EventKind, listener: Listener<Self::Node>);
    fn listen_document(&self, kind: EventKind, listener: Listener<Self::Node>);

    /// Run `callback` once the document has been parsed; immediately if it
    /// already has.
    fn when_ready(&self, callback: Box<dyn FnOnce()>);
}

/// Persistent string key-value store (`localStorage` in the browser).
pub trait Storage: 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// System "prefers dark color scheme" signal.
pub trait ColorScheme: 'static {
    fn prefers_dark(&self) -> Result<bool, MediaError>;
    /// Call `listener` with the new value whenever the signal changes.
    fn watch(&self, listener: Rc<dyn Fn(bool)>) -> Result<(), MediaError>;
}

/// One-shot cancellable timers.
pub trait Timers: Clone + 'static {
    type Handle: 'static;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
    fn clear_timeout(&self, handle: Self::Handle);
}

/// Everything the components need from the environment.
#[derive(Clone)]
pub struct Platform<D, S, M, T> {
    pub dom: D,
    pub storage: S,
    pub color_scheme: M,
    pub timers: T,
}
