//! `web_sys` element and event handles.

use wasm_bindgen::JsCast;
use web_sys::{
    DragEvent, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, NodeList, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::describe;
use crate::dom::{Element, Event, EventKind, FileMeta};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    #[must_use]
    pub fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    #[must_use]
    pub fn raw(&self) -> &web_sys::Element {
        &self.0
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl From<web_sys::Element> for WebElement {
    fn from(element: web_sys::Element) -> Self {
        Self(element)
    }
}

impl Element for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            log::warn!("setAttribute({name}) failed: {}", describe(&err));
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = self.0.remove_attribute(name) {
            log::warn!("removeAttribute({name}) failed: {}", describe(&err));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            log::warn!("classList.add({class}) failed: {}", describe(&err));
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            log::warn!("classList.remove({class}) failed: {}", describe(&err));
        }
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            return Some(area.value());
        }
        self.0.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else {
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            log::warn!("style {property} rejected: {}", describe(&err));
        }
    }

    fn scroll_height(&self) -> i32 {
        self.0.scroll_height()
    }

    fn focus(&self) {
        if let Some(html) = self.html() {
            if let Err(err) = html.focus() {
                log::warn!("focus failed: {}", describe(&err));
            }
        }
    }

    fn scroll_into_view(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn check_validity(&self) -> bool {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            return form.check_validity();
        }
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            return input.check_validity();
        }
        if let Some(area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            return area.check_validity();
        }
        if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            return select.check_validity();
        }
        true
    }

    fn files(&self) -> Vec<FileMeta> {
        self.0
            .dyn_ref::<HtmlInputElement>()
            .and_then(HtmlInputElement::files)
            .map(|list| file_metas(&list))
            .unwrap_or_default()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        match self.0.closest(selector) {
            Ok(found) => found.map(Self),
            Err(err) => {
                log::warn!("closest({selector:?}) failed: {}", describe(&err));
                None
            }
        }
    }

    fn matches(&self, selector: &str) -> bool {
        self.0.matches(selector).unwrap_or_else(|err| {
            log::warn!("matches({selector:?}) failed: {}", describe(&err));
            false
        })
    }

    fn query_selector(&self, selector: &str) -> Option<Self> {
        match self.0.query_selector(selector) {
            Ok(found) => found.map(Self),
            Err(err) => {
                log::warn!("querySelector({selector:?}) failed: {}", describe(&err));
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                log::warn!("querySelectorAll({selector:?}) failed: {}", describe(&err));
                Vec::new()
            }
        }
    }

    fn append_child(&self, child: &Self) {
        if let Err(err) = self.0.append_child(&child.0) {
            log::warn!("appendChild failed: {}", describe(&err));
        }
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn same_node(&self, other: &Self) -> bool {
        self.0.is_same_node(Some(&other.0))
    }
}

/// Element nodes of a `NodeList`, in document order.
pub(crate) fn elements(list: &NodeList) -> Vec<WebElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<web_sys::Element>().cloned())
        .map(WebElement)
        .collect()
}

fn file_metas(list: &web_sys::FileList) -> Vec<FileMeta> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| FileMeta::new(file.name(), file_size(file.size())))
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn file_size(bytes: f64) -> u64 {
    if bytes.is_finite() && bytes > 0.0 { bytes as u64 } else { 0 }
}

pub struct WebEvent {
    raw: web_sys::Event,
    kind: Option<EventKind>,
}

impl WebEvent {
    pub(crate) fn new(raw: web_sys::Event, kind: Option<EventKind>) -> Self {
        Self { raw, kind }
    }

    #[must_use]
    pub fn raw(&self) -> &web_sys::Event {
        &self.raw
    }

    pub(crate) fn drop_files(&self) -> Option<web_sys::FileList> {
        self.raw
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .and_then(|transfer| transfer.files())
    }
}

impl Event for WebEvent {
    type Element = WebElement;

    fn kind(&self) -> Option<EventKind> {
        self.kind
    }

    fn target(&self) -> Option<WebElement> {
        let target = self.raw.target()?;
        target.dyn_ref::<web_sys::Element>().cloned().map(WebElement)
    }

    fn prevent_default(&self) {
        self.raw.prevent_default();
    }

    fn stop_propagation(&self) {
        self.raw.stop_propagation();
    }

    fn dropped_files(&self) -> Vec<FileMeta> {
        self.drop_files().map(|list| file_metas(&list)).unwrap_or_default()
    }
}
