use std::cell::RefCell;

use super::*;

fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &str) -> Listener<NodeId> {
    let log = Rc::clone(log);
    let label = label.to_owned();
    Rc::new(move |_event: &DomEvent<NodeId>| log.borrow_mut().push(label.clone()))
}

// =============================================================
// Tree and selectors
// =============================================================

#[test]
fn new_dom_has_html_and_body() {
    let dom = MemoryDom::new();
    assert_eq!(dom.document_element(), Some(ROOT));
    assert_eq!(dom.query("body"), Some(dom.body()));
    assert!(dom.is_attached(&ROOT));
    assert!(dom.is_attached(&dom.body()));
}

#[test]
fn query_matches_id_class_and_tag() {
    let dom = MemoryDom::new();
    let button = dom.element(dom.body(), "button", Some("nav-toggle"), &[]);
    let list = dom.element(dom.body(), "ul", None, &["nav__list"]);

    assert_eq!(dom.element_by_id("nav-toggle"), Some(button));
    assert_eq!(dom.query(".nav__list"), Some(list));
    assert_eq!(dom.query("ul"), Some(list));
    assert_eq!(dom.query(".missing"), None);
}

#[test]
fn query_skips_detached_elements() {
    let dom = MemoryDom::new();
    let detached = dom.create_element("div");
    dom.set_id(&detached, "floating");
    assert_eq!(dom.element_by_id("floating"), None);
    assert!(!dom.is_attached(&detached));
}

#[test]
fn query_all_returns_descendants_in_document_order() {
    let dom = MemoryDom::new();
    let container = dom.element(dom.body(), "div", Some("flash-messages"), &[]);
    let first = dom.element(container, "div", None, &["toast"]);
    let wrapper = dom.element(container, "div", None, &[]);
    let nested = dom.element(wrapper, "div", None, &["toast"]);
    let last = dom.element(container, "div", None, &["toast"]);
    dom.element(dom.body(), "div", None, &["toast"]);

    assert_eq!(dom.query_all(&container, ".toast"), vec![first, nested, last]);
}

#[test]
fn closest_includes_self_then_ancestors() {
    let dom = MemoryDom::new();
    let toast = dom.element(dom.body(), "div", None, &["toast"]);
    let close = dom.element(toast, "button", None, &["toast__close"]);
    let icon = dom.element(close, "span", None, &[]);

    assert_eq!(dom.closest(&icon, ".toast__close"), Some(close));
    assert_eq!(dom.closest(&close, ".toast__close"), Some(close));
    assert_eq!(dom.closest(&icon, ".toast"), Some(toast));
    assert_eq!(dom.closest(&toast, ".toast__close"), None);
}

// =============================================================
// Mutation
// =============================================================

#[test]
fn attributes_set_and_remove() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "button", None, &[]);
    dom.set_attribute(&node, "aria-expanded", "false");
    assert_eq!(dom.attribute(&node, "aria-expanded").as_deref(), Some("false"));
    dom.remove_attribute(&node, "aria-expanded");
    assert_eq!(dom.attribute(&node, "aria-expanded"), None);
}

#[test]
fn empty_id_reads_as_none() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "ul", None, &[]);
    assert_eq!(dom.id(&node), None);
    dom.set_id(&node, "");
    assert_eq!(dom.id(&node), None);
    dom.set_id(&node, "menu");
    assert_eq!(dom.id(&node).as_deref(), Some("menu"));
}

#[test]
fn classes_are_deduplicated() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "ul", None, &[]);
    dom.add_class(&node, "active");
    dom.add_class(&node, "active");
    assert!(dom.has_class(&node, "active"));
    dom.remove_class(&node, "active");
    assert!(!dom.has_class(&node, "active"));
}

#[test]
fn hidden_maps_to_attribute() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "ul", None, &[]);
    dom.set_hidden(&node, true);
    assert_eq!(dom.attribute(&node, "hidden").as_deref(), Some(""));
    dom.set_hidden(&node, false);
    assert_eq!(dom.attribute(&node, "hidden"), None);
}

#[test]
fn remove_detaches_from_parent() {
    let dom = MemoryDom::new();
    let container = dom.element(dom.body(), "div", None, &[]);
    let a = dom.element(container, "div", None, &[]);
    let b = dom.element(container, "div", None, &[]);

    dom.remove(&a);
    assert!(!dom.is_attached(&a));
    assert_eq!(dom.children(container), vec![b]);

    dom.remove(&a);
    assert_eq!(dom.children(container), vec![b]);
}

#[test]
fn focus_is_tracked_and_cleared_on_remove() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "button", None, &[]);
    dom.focus(&node);
    assert_eq!(dom.focused(), Some(node));
    dom.remove(&node);
    assert_eq!(dom.focused(), None);
}

// =============================================================
// Events
// =============================================================

#[test]
fn click_bubbles_to_ancestors_then_document() {
    let dom = MemoryDom::new();
    let outer = dom.element(dom.body(), "div", None, &[]);
    let inner = dom.element(outer, "button", None, &[]);
    let log = Rc::new(RefCell::new(Vec::new()));

    dom.listen_document(EventKind::Click, recorder(&log, "document"));
    dom.listen(&outer, EventKind::Click, recorder(&log, "outer"));
    dom.listen(&inner, EventKind::Click, recorder(&log, "inner"));

    dom.click(inner);
    assert_eq!(*log.borrow(), vec!["inner", "outer", "document"]);
}

#[test]
fn mouseenter_does_not_bubble() {
    let dom = MemoryDom::new();
    let outer = dom.element(dom.body(), "div", None, &[]);
    let inner = dom.element(outer, "div", None, &[]);
    let log = Rc::new(RefCell::new(Vec::new()));

    dom.listen(&outer, EventKind::MouseEnter, recorder(&log, "outer"));
    dom.listen(&inner, EventKind::MouseEnter, recorder(&log, "inner"));

    dom.dispatch(inner, EventKind::MouseEnter);
    assert_eq!(*log.borrow(), vec!["inner"]);
}

#[test]
fn listeners_only_see_their_event_kind() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "div", None, &[]);
    let log = Rc::new(RefCell::new(Vec::new()));
    dom.listen(&node, EventKind::FocusIn, recorder(&log, "focusin"));

    dom.click(node);
    assert!(log.borrow().is_empty());
    dom.dispatch(node, EventKind::FocusIn);
    assert_eq!(*log.borrow(), vec!["focusin"]);
}

#[test]
fn key_down_without_target_reaches_document() {
    let dom = MemoryDom::new();
    let keys = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&keys);
    dom.listen_document(
        EventKind::KeyDown,
        Rc::new(move |event: &DomEvent<NodeId>| {
            sink.borrow_mut().push(event.key.clone().unwrap_or_default());
        }),
    );

    dom.key_down(None, "Escape");
    assert_eq!(*keys.borrow(), vec!["Escape"]);
}

#[test]
fn listener_may_mutate_the_dom() {
    let dom = MemoryDom::new();
    let node = dom.element(dom.body(), "div", None, &[]);
    let handle = dom.clone();
    dom.listen(&node, EventKind::Click, Rc::new(move |event: &DomEvent<NodeId>| {
        if let Some(target) = event.target {
            handle.remove(&target);
        }
    }));

    dom.click(node);
    assert!(!dom.is_attached(&node));
}

// =============================================================
// Ready signal
// =============================================================

#[test]
fn when_ready_defers_until_fire_ready() {
    let dom = MemoryDom::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    dom.when_ready(Box::new(move || sink.borrow_mut().push("ready")));

    assert!(log.borrow().is_empty());
    dom.fire_ready();
    assert_eq!(*log.borrow(), vec!["ready"]);
}

#[test]
fn when_ready_runs_immediately_after_ready() {
    let dom = MemoryDom::new();
    dom.fire_ready();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    dom.when_ready(Box::new(move || sink.borrow_mut().push("now")));
    assert_eq!(*log.borrow(), vec!["now"]);
}
