//! In-memory DOM used by native tests and non-browser hosts.
//!
//! Supports just enough of the document model for the components: a node
//! tree, attributes, classes, text, simple selectors (`#id`, `.class`,
//! `tag`), focus, bubbling event dispatch, and a ready flag.

#[cfg(test)]
#[path = "memory_dom_test.rs"]
mod memory_dom_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Dom, DomEvent, EventKind, Listener};

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The `<html>` element.
const ROOT: NodeId = NodeId(0);
/// The `<body>` element.
const BODY: NodeId = NodeId(1);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
}

impl NodeData {
    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attributes.get("id").is_some_and(|v| v == id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenTarget {
    Node(NodeId),
    Document,
}

struct Registration {
    target: ListenTarget,
    kind: EventKind,
    listener: Listener<NodeId>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<NodeData>,
    registrations: Vec<Registration>,
    focused: Option<NodeId>,
    ready: bool,
    on_ready: Vec<Box<dyn FnOnce()>>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0)
    }

    fn push(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData { tag: tag.to_owned(), ..NodeData::default() });
        id
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
    }

    fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            out.push(node);
            current = self.node(node).and_then(|n| n.parent);
        }
        out
    }

    /// Descendants of `id` in document (pre-)order, excluding `id`.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).map(|n| n.children.iter().rev().copied().collect()).unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(n) = self.node(next) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        self.node(id).is_some_and(|n| n.matches(selector))
    }

    /// Listeners an event reaches, in delivery order.
    fn route(&self, event: &DomEvent<NodeId>) -> Vec<Listener<NodeId>> {
        let mut path: Vec<ListenTarget> = match event.target {
            Some(target) if event.kind.bubbles() => {
                self.ancestors_inclusive(target).into_iter().map(ListenTarget::Node).collect()
            }
            Some(target) => vec![ListenTarget::Node(target)],
            None => Vec::new(),
        };
        if event.kind.bubbles() || event.target.is_none() {
            path.push(ListenTarget::Document);
        }

        path.iter()
            .flat_map(|hop| {
                self.registrations
                    .iter()
                    .filter(move |r| r.target == *hop && r.kind == event.kind)
                    .map(|r| Rc::clone(&r.listener))
            })
            .collect()
    }
}

/// A shared, cloneable in-memory document.
///
/// Starts with `<html>` (the document element) containing an empty `<body>`,
/// and in the "loading" state until [`MemoryDom::fire_ready`] is called.
#[derive(Clone)]
pub struct MemoryDom {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Tree::default();
        let root = tree.push("html");
        let body = tree.push("body");
        if let Some(n) = tree.node_mut(body) {
            n.parent = Some(root);
        }
        if let Some(n) = tree.node_mut(root) {
            n.children.push(body);
        }
        Self { tree: Rc::new(RefCell::new(tree)) }
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().push(tag)
    }

    /// Move `child` under `parent`, after any existing children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(child);
        if tree.node(parent).is_none() {
            return;
        }
        if let Some(c) = tree.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = tree.node_mut(parent) {
            p.children.push(child);
        }
    }

    /// Create an element with an optional id and classes and append it to
    /// `parent`.
    pub fn element(&self, parent: NodeId, tag: &str, id: Option<&str>, classes: &[&str]) -> NodeId {
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_id(&node, id);
        }
        for class in classes {
            self.add_class(&node, class);
        }
        self.append_child(parent, node);
        node
    }

    /// Dispatch a non-keyboard event at `target`.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) {
        self.dispatch_event(&DomEvent { kind, target: Some(target), key: None });
    }

    pub fn click(&self, target: NodeId) {
        self.dispatch(target, EventKind::Click);
    }

    /// Dispatch a `keydown` at `target`, or at the document when `None`.
    pub fn key_down(&self, target: Option<NodeId>, key: &str) {
        self.dispatch_event(&DomEvent { kind: EventKind::KeyDown, target, key: Some(key.to_owned()) });
    }

    fn dispatch_event(&self, event: &DomEvent<NodeId>) {
        let listeners = self.tree.borrow().route(event);
        for listener in listeners {
            listener(event);
        }
    }

    /// Mark the document parsed and run queued ready callbacks.
    pub fn fire_ready(&self) {
        let callbacks = {
            let mut tree = self.tree.borrow_mut();
            tree.ready = true;
            std::mem::take(&mut tree.on_ready)
        };
        for callback in callbacks {
            callback();
        }
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.tree.borrow().focused
    }

    /// Number of registered listeners, document-level included.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().registrations.len()
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().node(node).map(|n| n.children.clone()).unwrap_or_default()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&format!("#{id}"))
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        std::iter::once(ROOT)
            .chain(tree.descendants(ROOT))
            .find(|n| tree.matches(*n, selector))
    }

    fn query_all(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(*scope).into_iter().filter(|n| tree.matches(*n, selector)).collect()
    }

    fn document_element(&self) -> Option<NodeId> {
        Some(ROOT)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().node(*node).and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(n) = self.tree.borrow_mut().node_mut(*node) {
            n.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        if let Some(n) = self.tree.borrow_mut().node_mut(*node) {
            n.attributes.remove(name);
        }
    }

    fn text(&self, node: &NodeId) -> Option<String> {
        self.tree.borrow().node(*node).map(|n| n.text.clone())
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        if let Some(n) = self.tree.borrow_mut().node_mut(*node) {
            text.clone_into(&mut n.text);
        }
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if let Some(n) = self.tree.borrow_mut().node_mut(*node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        if let Some(n) = self.tree.borrow_mut().node_mut(*node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().node(*node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.ancestors_inclusive(*node).into_iter().find(|n| tree.matches(*n, selector))
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        *node == ROOT || self.tree.borrow().node(*node).is_some_and(|n| n.parent.is_some())
    }

    fn remove(&self, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(*node);
        if tree.focused == Some(*node) {
            tree.focused = None;
        }
    }

    fn focus(&self, node: &NodeId) {
        self.tree.borrow_mut().focused = Some(*node);
    }

    fn listen(&self, node: &NodeId, kind: EventKind, listener: Listener<NodeId>) {
        self.tree.borrow_mut().registrations.push(Registration {
            target: ListenTarget::Node(*node),
            kind,
            listener,
        });
    }

    fn listen_document(&self, kind: EventKind, listener: Listener<NodeId>) {
        self.tree.borrow_mut().registrations.push(Registration {
            target: ListenTarget::Document,
            kind,
            listener,
        });
    }

    fn when_ready(&self, callback: Box<dyn FnOnce()>) {
        let mut tree = self.tree.borrow_mut();
        if tree.ready {
            drop(tree);
            callback();
        } else {
            tree.on_ready.push(callback);
        }
    }
}
