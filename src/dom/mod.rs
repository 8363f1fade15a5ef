//! Document abstraction the UI layer is written against.
//!
//! SYSTEM CONTEXT
//! ==============
//! Widgets never touch `web_sys` directly. They talk to a [`Dom`] backend and
//! its [`Element`]/[`Event`] types, so the same wiring runs against the real
//! browser (`web::WebDom`, hydrate only) and against [`memory::MemoryDom`] in
//! native tests.
//!
//! DESIGN
//! ======
//! Element handles are cheap clones of a shared node. Listener registration is
//! explicit subscription against the backend; handlers are `Rc<dyn Fn>`
//! because everything runs on a single thread.

pub mod memory;
pub mod selector;

use std::rc::Rc;

use futures::future::LocalBoxFuture;

pub use selector::{Selector, SelectorError};

/// DOM events the wiring layer subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
}

impl EventKind {
    /// Event type name as used by `addEventListener`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
            Self::Submit => "submit",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
        }
    }
}

/// Name and size of a selected or dropped file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

/// Last-resort faults reported by the page's global handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageFault {
    /// Uncaught error (`window` `error` event).
    Error { message: String },
    /// Promise rejection nobody handled.
    UnhandledRejection { reason: String },
}

/// Viewport-reveal observation settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportOptions {
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

pub type Handler<E> = Rc<dyn Fn(&E)>;
pub type FaultHandler = Rc<dyn Fn(&PageFault)>;
pub type RevealHandler<E> = Rc<dyn Fn(&E)>;

/// A handle to one element in the document.
pub trait Element: Clone + 'static {
    /// Lowercase tag name.
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Replace the whole class list.
    fn set_class_name(&self, class_name: &str);

    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
    fn text_content(&self) -> String;
    fn set_text_content(&self, text: &str);

    /// Current value of a form control, `None` for other elements.
    fn value(&self) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);
    fn scroll_height(&self) -> i32;
    fn focus(&self);
    /// Smooth-scroll so the element's top edge is visible.
    fn scroll_into_view(&self);
    /// Constraint validation; elements without constraints are valid.
    fn check_validity(&self) -> bool;
    /// Files currently selected in a file input.
    fn files(&self) -> Vec<FileMeta>;

    fn parent(&self) -> Option<Self>;
    fn closest(&self, selector: &str) -> Option<Self>;
    fn matches(&self, selector: &str) -> bool;
    fn query_selector(&self, selector: &str) -> Option<Self>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;
    fn append_child(&self, child: &Self);
    /// Detach from the parent. No-op for detached elements.
    fn remove(&self);
    fn same_node(&self, other: &Self) -> bool;
}

/// A dispatched event as seen by handlers.
pub trait Event {
    type Element: Element;

    fn kind(&self) -> Option<EventKind>;
    fn target(&self) -> Option<Self::Element>;
    fn prevent_default(&self);
    fn stop_propagation(&self);
    /// Files carried by a drop event.
    fn dropped_files(&self) -> Vec<FileMeta>;
}

/// Document backend: element lookup, subscriptions, clipboard.
pub trait Dom: Clone + 'static {
    type Element: Element;
    type Event: Event<Element = Self::Element>;

    fn body(&self) -> Self::Element;
    /// The `<html>` element.
    fn root(&self) -> Self::Element;
    fn create_element(&self, tag: &str) -> Self::Element;
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;
    /// Path component of the current location.
    fn location_path(&self) -> String;

    fn listen(&self, target: &Self::Element, kind: EventKind, handler: Handler<Self::Event>);
    /// Listen at document level; receives bubbled events from every element.
    fn listen_document(&self, kind: EventKind, handler: Handler<Self::Event>);
    fn listen_faults(&self, handler: FaultHandler);
    /// Call `handler` with each target the first time it enters the viewport
    /// (and again on later entries).
    fn observe_viewport(
        &self,
        targets: &[Self::Element],
        options: &ViewportOptions,
        handler: RevealHandler<Self::Element>,
    );

    /// Fire a synthetic bubbling event at `target`.
    fn dispatch(&self, target: &Self::Element, kind: EventKind);
    /// Move the files of a drop event into a file input; returns how many.
    fn assign_dropped_files(&self, event: &Self::Event, input: &Self::Element) -> usize;
    fn write_clipboard(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>>;
}
