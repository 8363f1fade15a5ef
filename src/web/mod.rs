//! Browser backends built on `web-sys`.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`WebDom`] implements the [`Dom`] contract over the live document so the
//! wiring layer runs unchanged in the page. [`exports`] exposes the helpers
//! to page scripts, [`tooltips`] attaches framework tooltips, and
//! [`clipboard`] implements the write with its legacy fallback.
//!
//! DESIGN
//! ======
//! Listener closures are leaked with `Closure::forget`: subscriptions live as
//! long as the page, exactly like inline `addEventListener` calls.
//!
//! ERROR HANDLING
//! ==============
//! JS exceptions from DOM calls are logged with `log::warn!` and the call
//! degrades to a no-op (or an empty result), mirroring how the page script
//! behaved when an element was missing.

pub mod clipboard;
mod element;
pub mod exports;
pub mod tooltips;

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    EventInit, EventTarget, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

pub use element::{WebElement, WebEvent};

use crate::dom::{
    ClipboardError, Dom, EventKind, FaultHandler, Handler, PageFault, RevealHandler,
    ViewportOptions,
};

/// Readable form of a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

#[derive(Clone)]
pub struct WebDom {
    window: web_sys::Window,
    document: web_sys::Document,
    root: web_sys::Element,
    /// Detached element handed out if `createElement` ever throws.
    placeholder: web_sys::Element,
}

impl WebDom {
    /// The current window's document, or `None` outside a browser page.
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let root = document.document_element()?;
        let placeholder = match document.create_element("div") {
            Ok(el) => el,
            Err(err) => {
                log::error!("document cannot create elements: {}", describe(&err));
                return None;
            }
        };
        Some(Self { window, document, root, placeholder })
    }

    #[must_use]
    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

fn add_listener(target: &EventTarget, kind: EventKind, handler: Handler<WebEvent>) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        handler(&WebEvent::new(event, Some(kind)));
    }) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(err) =
        target.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
    {
        log::warn!("addEventListener({}) failed: {}", kind.as_str(), describe(&err));
    }
    closure.forget();
}

impl Dom for WebDom {
    type Element = WebElement;
    type Event = WebEvent;

    fn body(&self) -> WebElement {
        match self.document.body() {
            Some(body) => WebElement::new(body.into()),
            None => WebElement::new(self.root.clone()),
        }
    }

    fn root(&self) -> WebElement {
        WebElement::new(self.root.clone())
    }

    fn create_element(&self, tag: &str) -> WebElement {
        match self.document.create_element(tag) {
            Ok(el) => WebElement::new(el),
            Err(err) => {
                log::error!("createElement({tag}) failed: {}", describe(&err));
                WebElement::new(self.placeholder.clone())
            }
        }
    }

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(WebElement::new),
            Err(err) => {
                log::warn!("querySelector({selector:?}) failed: {}", describe(&err));
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<WebElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => element::elements(&list),
            Err(err) => {
                log::warn!("querySelectorAll({selector:?}) failed: {}", describe(&err));
                Vec::new()
            }
        }
    }

    fn location_path(&self) -> String {
        self.window.location().pathname().unwrap_or_else(|err| {
            log::warn!("location.pathname unavailable: {}", describe(&err));
            "/".to_owned()
        })
    }

    fn listen(&self, target: &WebElement, kind: EventKind, handler: Handler<WebEvent>) {
        add_listener(target.raw().as_ref(), kind, handler);
    }

    fn listen_document(&self, kind: EventKind, handler: Handler<WebEvent>) {
        add_listener(self.document.as_ref(), kind, handler);
    }

    fn listen_faults(&self, handler: FaultHandler) {
        let on_error = {
            let handler = Rc::clone(&handler);
            Closure::wrap(Box::new(move |event: web_sys::ErrorEvent| {
                handler(&PageFault::Error { message: event.message() });
            }) as Box<dyn FnMut(web_sys::ErrorEvent)>)
        };
        let on_rejection = Closure::wrap(Box::new(move |event: web_sys::PromiseRejectionEvent| {
            handler(&PageFault::UnhandledRejection { reason: describe(&event.reason()) });
        }) as Box<dyn FnMut(web_sys::PromiseRejectionEvent)>);

        let target: &EventTarget = self.window.as_ref();
        for (name, callback) in [
            ("error", on_error.as_ref().unchecked_ref::<js_sys::Function>()),
            (
                "unhandledrejection",
                on_rejection.as_ref().unchecked_ref::<js_sys::Function>(),
            ),
        ] {
            if let Err(err) = target.add_event_listener_with_callback(name, callback) {
                log::warn!("addEventListener({name}) failed: {}", describe(&err));
            }
        }
        on_error.forget();
        on_rejection.forget();
    }

    fn observe_viewport(
        &self,
        targets: &[WebElement],
        options: &ViewportOptions,
        handler: RevealHandler<WebElement>,
    ) {
        let on_entries = {
            let handler = Rc::clone(&handler);
            Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                for entry in entries.iter() {
                    let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        handler(&WebElement::new(entry.target()));
                    }
                }
            }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        match IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for target in targets {
                    observer.observe(target.raw());
                }
                on_entries.forget();
            }
            Err(err) => {
                // No observer support: reveal everything up front.
                log::warn!("IntersectionObserver unavailable: {}", describe(&err));
                for target in targets {
                    handler(target);
                }
            }
        }
    }

    fn dispatch(&self, target: &WebElement, kind: EventKind) {
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = match web_sys::Event::new_with_event_init_dict(kind.as_str(), &init) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("cannot create {} event: {}", kind.as_str(), describe(&err));
                return;
            }
        };
        if let Err(err) = target.raw().dispatch_event(&event) {
            log::warn!("dispatchEvent({}) failed: {}", kind.as_str(), describe(&err));
        }
    }

    fn assign_dropped_files(&self, event: &WebEvent, input: &WebElement) -> usize {
        let Some(files) = event.drop_files() else {
            return 0;
        };
        let Some(input) = input.raw().dyn_ref::<HtmlInputElement>() else {
            return 0;
        };
        input.set_files(Some(&files));
        usize::try_from(files.length()).unwrap_or(usize::MAX)
    }

    fn write_clipboard(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        clipboard::write_text(self.window.clone(), self.document.clone(), text.to_owned())
    }
}
