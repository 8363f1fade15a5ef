//! Framework tooltips for `[data-bs-toggle="tooltip"]` elements.
//!
//! The tooltip widget belongs to the CSS framework's own script
//! (`window.bootstrap.Tooltip`). When that script is not on the page this is
//! a no-op.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use super::{WebDom, describe};
use crate::dom::Dom;

/// Attach a tooltip to each trigger; returns how many were attached.
pub fn init(dom: &WebDom) -> usize {
    let Some(constructor) = tooltip_constructor(dom.window()) else {
        log::debug!("tooltip script not loaded; skipping tooltips");
        return 0;
    };
    let mut attached = 0;
    for trigger in dom.query_selector_all(r#"[data-bs-toggle="tooltip"]"#) {
        match Reflect::construct(&constructor, &Array::of1(trigger.raw())) {
            Ok(_) => attached += 1,
            Err(err) => log::warn!("tooltip init failed: {}", describe(&err)),
        }
    }
    attached
}

fn tooltip_constructor(window: &web_sys::Window) -> Option<Function> {
    let framework = Reflect::get(window, &JsValue::from_str("bootstrap"))
        .and_then(|framework| Reflect::get(&framework, &JsValue::from_str("Tooltip")));
    match framework {
        Ok(value) => value.dyn_ref::<Function>().cloned(),
        Err(_) => None,
    }
}
