//! In-memory document used natively and in tests.
//!
//! DESIGN
//! ======
//! A small retained tree of nodes behind `Rc<RefCell<_>>`. Markup assigned via
//! `set_inner_html` is kept as opaque text: it renders back byte-for-byte but
//! is not parsed into child nodes, so selectors only see elements created with
//! [`MemoryDom::create_element`] and attached with `append_child`.
//!
//! Events bubble from the target through its ancestors and, when the target
//! is attached to the document, on to document-level listeners. Handlers are
//! cloned out of the registry before they run, so they may freely mutate the
//! tree or register more listeners.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::selector::{Selector, SelectorSubject};
use super::{
    ClipboardError, Dom, Element, Event, EventKind, FaultHandler, FileMeta, Handler, PageFault,
    RevealHandler, ViewportOptions,
};
use crate::util::html::{escape_html, strip_tags};

struct Node {
    id: u64,
    tag: String,
    attributes: Vec<(String, String)>,
    html: String,
    children: Vec<MemoryElement>,
    parent: Weak<RefCell<Node>>,
    value: Option<String>,
    valid: bool,
    files: Vec<FileMeta>,
    style: Vec<(String, String)>,
    scroll_height: i32,
    focused: bool,
}

/// Element handle into a [`MemoryDom`] tree.
#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("id", &node.id)
            .field("tag", &node.tag)
            .finish_non_exhaustive()
    }
}

impl MemoryElement {
    fn new(id: u64, tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let is_control = matches!(tag.as_str(), "input" | "textarea" | "select");
        Self(Rc::new(RefCell::new(Node {
            id,
            tag,
            attributes: Vec::new(),
            html: String::new(),
            children: Vec::new(),
            parent: Weak::new(),
            value: is_control.then(String::new),
            valid: true,
            files: Vec::new(),
            style: Vec::new(),
            scroll_height: 0,
            focused: false,
        })))
    }

    /// Stable node identity within its document.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.borrow().id
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = Some(value.to_owned());
    }

    /// Mark the element as passing or failing constraint validation.
    pub fn set_valid(&self, valid: bool) {
        self.0.borrow_mut().valid = valid;
    }

    pub fn set_files(&self, files: Vec<FileMeta>) {
        self.0.borrow_mut().files = files;
    }

    pub fn set_scroll_height(&self, height: i32) {
        self.0.borrow_mut().scroll_height = height;
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.0
            .borrow()
            .style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.0.borrow().focused
    }

    #[must_use]
    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.borrow().children.clone()
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        self.attribute("class").unwrap_or_default()
    }

    /// Serialized markup of this element including its own tag.
    #[must_use]
    pub fn outer_html(&self) -> String {
        let (tag, attrs) = {
            let node = self.0.borrow();
            (node.tag.clone(), node.attributes.clone())
        };
        let mut out = format!("<{tag}");
        for (name, value) in attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape_html(&value)));
        }
        out.push('>');
        out.push_str(&self.inner_html());
        out.push_str(&format!("</{tag}>"));
        out
    }

    fn descendants(&self, out: &mut Vec<MemoryElement>) {
        for child in self.children() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn select_all(&self, selector: &str) -> Vec<MemoryElement> {
        let Some(selector) = parse_logged(selector) else {
            return Vec::new();
        };
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.retain(|el| selector.matches(el));
        all
    }

    fn set_parent(&self, parent: Weak<RefCell<Node>>) {
        self.0.borrow_mut().parent = parent;
    }
}

fn parse_logged(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::warn!("ignoring selector {selector:?}: {err}");
            None
        }
    }
}

impl SelectorSubject for MemoryElement {
    fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attribute(name)
    }

    fn is_invalid(&self) -> bool {
        !self.0.borrow().valid
    }
}

impl Element for MemoryElement {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if let Some(slot) = node.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_owned();
        } else {
            node.attributes.push((name.to_owned(), value.to_owned()));
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.retain(|(k, _)| k != name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let current = self.class_name();
        let next = if current.trim().is_empty() {
            class.to_owned()
        } else {
            format!("{} {class}", current.trim_end())
        };
        self.set_attribute("class", &next);
    }

    fn remove_class(&self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let next = self
            .class_name()
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("class", &next);
    }

    fn set_class_name(&self, class_name: &str) {
        self.set_attribute("class", class_name);
    }

    fn inner_html(&self) -> String {
        let (mut html, children) = {
            let node = self.0.borrow();
            (node.html.clone(), node.children.clone())
        };
        for child in children {
            html.push_str(&child.outer_html());
        }
        html
    }

    fn set_inner_html(&self, html: &str) {
        let detached = {
            let mut node = self.0.borrow_mut();
            node.html = html.to_owned();
            std::mem::take(&mut node.children)
        };
        for child in detached {
            child.set_parent(Weak::new());
        }
    }

    fn text_content(&self) -> String {
        strip_tags(&self.inner_html())
    }

    fn set_text_content(&self, text: &str) {
        self.set_inner_html(&escape_html(text));
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if let Some(slot) = node.style.iter_mut().find(|(k, _)| k == property) {
            slot.1 = value.to_owned();
        } else {
            node.style.push((property.to_owned(), value.to_owned()));
        }
    }

    fn scroll_height(&self) -> i32 {
        self.0.borrow().scroll_height
    }

    fn focus(&self) {
        self.0.borrow_mut().focused = true;
    }

    fn scroll_into_view(&self) {
        self.set_attribute("data-scrolled-into-view", "true");
    }

    fn check_validity(&self) -> bool {
        let mut all = vec![self.clone()];
        self.descendants(&mut all);
        all.iter().all(|el| el.0.borrow().valid)
    }

    fn files(&self) -> Vec<FileMeta> {
        self.0.borrow().files.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(MemoryElement)
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        let selector = parse_logged(selector)?;
        let mut current = Some(self.clone());
        while let Some(el) = current {
            if selector.matches(&el) {
                return Some(el);
            }
            current = el.parent();
        }
        None
    }

    fn matches(&self, selector: &str) -> bool {
        parse_logged(selector).is_some_and(|s| s.matches(self))
    }

    fn query_selector(&self, selector: &str) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        self.select_all(selector)
    }

    fn append_child(&self, child: &Self) {
        if self.same_node(child) {
            log::warn!("refusing to append an element to itself");
            return;
        }
        child.remove();
        child.set_parent(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    fn remove(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .0
            .borrow_mut()
            .children
            .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        self.set_parent(Weak::new());
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Event delivered by [`MemoryDom`].
pub struct MemoryEvent {
    kind: EventKind,
    target: MemoryElement,
    files: Vec<FileMeta>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl MemoryEvent {
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl Event for MemoryEvent {
    type Element = MemoryElement;

    fn kind(&self) -> Option<EventKind> {
        Some(self.kind)
    }

    fn target(&self) -> Option<MemoryElement> {
        Some(self.target.clone())
    }

    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    fn dropped_files(&self) -> Vec<FileMeta> {
        self.files.clone()
    }
}

type Listener = (EventKind, Handler<MemoryEvent>);

struct Observer {
    targets: Vec<MemoryElement>,
    handler: RevealHandler<MemoryElement>,
}

struct DomState {
    root: MemoryElement,
    body: MemoryElement,
    next_id: Cell<u64>,
    location: RefCell<String>,
    listeners: RefCell<HashMap<u64, Vec<Listener>>>,
    document_listeners: RefCell<Vec<Listener>>,
    fault_handlers: RefCell<Vec<FaultHandler>>,
    observers: RefCell<Vec<Observer>>,
    viewport_options: RefCell<Option<ViewportOptions>>,
    clipboard: RefCell<Option<String>>,
    clipboard_fails: Cell<bool>,
}

/// A self-contained document with an `<html>` root and a `<body>`.
#[derive(Clone)]
pub struct MemoryDom {
    state: Rc<DomState>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let root = MemoryElement::new(0, "html");
        let body = MemoryElement::new(1, "body");
        root.append_child(&body);
        Self {
            state: Rc::new(DomState {
                root,
                body,
                next_id: Cell::new(2),
                location: RefCell::new("/".to_owned()),
                listeners: RefCell::new(HashMap::new()),
                document_listeners: RefCell::new(Vec::new()),
                fault_handlers: RefCell::new(Vec::new()),
                observers: RefCell::new(Vec::new()),
                viewport_options: RefCell::new(None),
                clipboard: RefCell::new(None),
                clipboard_fails: Cell::new(false),
            }),
        }
    }

    pub fn set_location_path(&self, path: &str) {
        *self.state.location.borrow_mut() = path.to_owned();
    }

    /// Text most recently written to the clipboard.
    #[must_use]
    pub fn clipboard_text(&self) -> Option<String> {
        self.state.clipboard.borrow().clone()
    }

    /// Make subsequent clipboard writes fail.
    pub fn set_clipboard_failure(&self, fail: bool) {
        self.state.clipboard_fails.set(fail);
    }

    /// Options passed to the most recent `observe_viewport` call.
    #[must_use]
    pub fn viewport_options(&self) -> Option<ViewportOptions> {
        self.state.viewport_options.borrow().clone()
    }

    /// Listeners registered so far, on elements and on the document.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let on_elements: usize = self.state.listeners.borrow().values().map(Vec::len).sum();
        on_elements + self.state.document_listeners.borrow().len()
    }

    /// Fire a click at `target`.
    pub fn click(&self, target: &MemoryElement) -> MemoryEvent {
        self.fire(target, EventKind::Click)
    }

    pub fn fire(&self, target: &MemoryElement, kind: EventKind) -> MemoryEvent {
        self.fire_with_files(target, kind, Vec::new())
    }

    pub fn fire_with_files(
        &self,
        target: &MemoryElement,
        kind: EventKind,
        files: Vec<FileMeta>,
    ) -> MemoryEvent {
        let event = MemoryEvent {
            kind,
            target: target.clone(),
            files,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        };
        self.deliver(&event);
        event
    }

    /// Report a fault to every registered fault handler.
    pub fn raise_fault(&self, fault: &PageFault) {
        let handlers = self.state.fault_handlers.borrow().clone();
        for handler in handlers {
            handler(fault);
        }
    }

    /// Simulate `target` scrolling into the viewport.
    pub fn reveal(&self, target: &MemoryElement) {
        let handlers: Vec<RevealHandler<MemoryElement>> = self
            .state
            .observers
            .borrow()
            .iter()
            .filter(|o| o.targets.iter().any(|t| t.same_node(target)))
            .map(|o| Rc::clone(&o.handler))
            .collect();
        for handler in handlers {
            handler(target);
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        id
    }

    fn handlers_for(listeners: &[Listener], kind: EventKind) -> Vec<Handler<MemoryEvent>> {
        listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| Rc::clone(h))
            .collect()
    }

    fn deliver(&self, event: &MemoryEvent) {
        let mut current = Some(event.target.clone());
        let mut top = event.target.clone();
        while let Some(node) = current {
            let handlers = self
                .state
                .listeners
                .borrow()
                .get(&node.id())
                .map(|l| Self::handlers_for(l, event.kind))
                .unwrap_or_default();
            for handler in handlers {
                handler(event);
            }
            if event.propagation_stopped() {
                return;
            }
            current = node.parent();
            top = node;
        }
        if !top.same_node(&self.state.root) {
            return;
        }
        let handlers = Self::handlers_for(&self.state.document_listeners.borrow(), event.kind);
        for handler in handlers {
            handler(event);
        }
    }
}

impl Dom for MemoryDom {
    type Element = MemoryElement;
    type Event = MemoryEvent;

    fn body(&self) -> MemoryElement {
        self.state.body.clone()
    }

    fn root(&self) -> MemoryElement {
        self.state.root.clone()
    }

    fn create_element(&self, tag: &str) -> MemoryElement {
        MemoryElement::new(self.next_id(), tag)
    }

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        self.state.root.query_selector(selector)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.state.root.query_selector_all(selector)
    }

    fn location_path(&self) -> String {
        self.state.location.borrow().clone()
    }

    fn listen(&self, target: &MemoryElement, kind: EventKind, handler: Handler<MemoryEvent>) {
        self.state
            .listeners
            .borrow_mut()
            .entry(target.id())
            .or_default()
            .push((kind, handler));
    }

    fn listen_document(&self, kind: EventKind, handler: Handler<MemoryEvent>) {
        self.state.document_listeners.borrow_mut().push((kind, handler));
    }

    fn listen_faults(&self, handler: FaultHandler) {
        self.state.fault_handlers.borrow_mut().push(handler);
    }

    fn observe_viewport(
        &self,
        targets: &[MemoryElement],
        options: &ViewportOptions,
        handler: RevealHandler<MemoryElement>,
    ) {
        *self.state.viewport_options.borrow_mut() = Some(options.clone());
        self.state.observers.borrow_mut().push(Observer { targets: targets.to_vec(), handler });
    }

    fn dispatch(&self, target: &MemoryElement, kind: EventKind) {
        self.fire(target, kind);
    }

    fn assign_dropped_files(&self, event: &MemoryEvent, input: &MemoryElement) -> usize {
        let files = event.dropped_files();
        let count = files.len();
        input.set_files(files);
        count
    }

    fn write_clipboard(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let result = if self.state.clipboard_fails.get() {
            Err(ClipboardError::Rejected("write denied".to_owned()))
        } else {
            *self.state.clipboard.borrow_mut() = Some(text.to_owned());
            Ok(())
        };
        futures::future::ready(result).boxed_local()
    }
}
