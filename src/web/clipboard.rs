//! Clipboard writes: the async Clipboard API first, then the legacy
//! `execCommand("copy")` on a temporary textarea for browsers (or insecure
//! origins) that lack it.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use super::describe;
use crate::dom::ClipboardError;

pub(crate) fn write_text(
    window: web_sys::Window,
    document: web_sys::Document,
    text: String,
) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
    async move {
        match navigator_write(&window, &text).await {
            Ok(()) => Ok(()),
            Err(err) => {
                log::debug!("clipboard API failed ({err}); falling back to execCommand");
                exec_command_copy(&document, &text)
            }
        }
    }
    .boxed_local()
}

async fn navigator_write(window: &web_sys::Window, text: &str) -> Result<(), ClipboardError> {
    // `navigator.clipboard` is undefined on insecure origins, so probe it
    // instead of trusting the binding's signature.
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|err| ClipboardError::Rejected(describe(&err)))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(ClipboardError::Unavailable);
    }
    let clipboard = clipboard
        .dyn_into::<web_sys::Clipboard>()
        .map_err(|_| ClipboardError::Unavailable)?;
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|err| ClipboardError::Rejected(describe(&err)))
}

fn exec_command_copy(document: &web_sys::Document, text: &str) -> Result<(), ClipboardError> {
    let html = document
        .dyn_ref::<HtmlDocument>()
        .ok_or(ClipboardError::Unavailable)?;
    let body = document.body().ok_or(ClipboardError::Unavailable)?;
    let area = document
        .create_element("textarea")
        .map_err(|err| ClipboardError::Rejected(describe(&err)))?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| ClipboardError::Unavailable)?;
    area.set_value(text);
    body.append_child(&area)
        .map_err(|err| ClipboardError::Rejected(describe(&err)))?;
    if let Err(err) = area.focus() {
        log::debug!("fallback textarea focus failed: {}", describe(&err));
    }
    area.select();
    let copied = html.exec_command("copy");
    area.remove();
    match copied {
        Ok(true) => Ok(()),
        Ok(false) => Err(ClipboardError::Rejected(
            "execCommand(\"copy\") returned false".to_owned(),
        )),
        Err(err) => Err(ClipboardError::Rejected(describe(&err))),
    }
}
