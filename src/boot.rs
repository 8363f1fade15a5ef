//! wasm entry point.
//!
//! Installs the console logger and panic hook, builds the page context from
//! the browser backends, and wires the page once the document has parsed.
//! The context is kept in a thread-local so the JS exports can reach it.
//!
//! The context is built as soon as the module loads, so a
//! `<script id="ui-config">` block must come before the loader script to
//! take effect.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::config::UiConfig;
use crate::dom::{Dom, Element};
use crate::schedule::browser::BrowserScheduler;
use crate::storage::browser::BrowserStore;
use crate::ui::PageContext;
use crate::web::{WebDom, describe, tooltips};
use crate::wiring;

pub type WebContext = PageContext<WebDom, BrowserScheduler, BrowserStore>;

const CONFIG_BLOCK: &str = "#ui-config";

thread_local! {
    static PAGE: RefCell<Option<Rc<WebContext>>> = const { RefCell::new(None) };
}

/// Run `f` against the live page context, if boot has built one.
pub(crate) fn with_page<R>(f: impl FnOnce(&Rc<WebContext>) -> R) -> Option<R> {
    let page = PAGE.with(|slot| slot.borrow().clone());
    match page {
        Some(page) => Some(f(&page)),
        None => {
            log::warn!("UI layer not started; call ignored");
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        log::warn!("console logger already installed: {err}");
    }

    let Some(dom) = WebDom::new() else {
        log::error!("no document available; UI layer not started");
        return;
    };
    let config = read_config(&dom);
    let page =
        PageContext::new(dom.clone(), BrowserScheduler::new(), BrowserStore::local(), config);
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));

    if dom.document().ready_state() == "loading" {
        let ready_dom = dom.clone();
        let on_ready = Closure::once(move |_: web_sys::Event| wire(&page, &ready_dom));
        if let Err(err) = dom
            .document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            log::error!("cannot wait for DOMContentLoaded: {}", describe(&err));
        }
        on_ready.forget();
    } else {
        wire(&page, &dom);
    }
}

fn wire(page: &Rc<WebContext>, dom: &WebDom) {
    let tooltips = tooltips::init(dom);
    wiring::init_page(page);
    log::info!("UI layer ready ({tooltips} tooltips)");
}

fn read_config(dom: &WebDom) -> UiConfig {
    let Some(block) = dom.query_selector(CONFIG_BLOCK) else {
        return UiConfig::default();
    };
    match UiConfig::from_json(&block.text_content()) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; using defaults");
            UiConfig::default()
        }
    }
}
