//! Helpers exported to page scripts.
//!
//! Names and argument order follow what existing page scripts call
//! (`showNotification(message, type, duration)`, `makeRequest(url, options)`,
//! ...). JSON values cross the boundary as `JSON.stringify`/`JSON.parse`
//! text so they pass through the same serde paths as the Rust callers.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use js_sys::{Array, Function};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;

use super::{WebDom, WebElement, describe};
use crate::boot::with_page;
use crate::dom::{Dom, Element};
use crate::net::gloo_transport::GlooTransport;
use crate::net::{Credentials, Method, RequestClient, RequestOptions};
use crate::schedule::browser::BrowserScheduler;
use crate::ui::loading::{self, DEFAULT_LOADING_LABEL, LoadingToken};
use crate::ui::Severity;
use crate::util::format::format_file_size;
use crate::util::rate_limit::{debounce, throttle};
use crate::util::validate::{validate_email, validate_url};

// Collects a call's arguments into one array so a Rust closure can take them.
#[wasm_bindgen(inline_js = r"
export function variadic(f) {
    return function (...args) { f(args); };
}
")]
extern "C" {
    fn variadic(f: &JsValue) -> Function;
}

thread_local! {
    static LOADING: RefCell<Vec<LoadingToken<WebElement>>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(
    message: &str,
    severity: Option<String>,
    duration_ms: Option<f64>,
) -> Option<web_sys::Element> {
    let severity = match severity.as_deref() {
        None => Severity::default(),
        Some(name) => name.parse().unwrap_or_else(|err| {
            log::warn!("{err}; showing as info");
            Severity::default()
        }),
    };
    with_page(|page| {
        let duration = duration_ms.map_or_else(|| page.notifications.default_duration(), millis);
        page.notifications
            .notify(message, severity, duration)
            .element()
            .raw()
            .clone()
    })
}

/// Options object accepted by `makeRequest`, a subset of `RequestInit`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FetchOptions {
    method: Option<String>,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    credentials: Option<String>,
}

impl FetchOptions {
    fn into_request_options(self) -> Result<RequestOptions, JsValue> {
        let mut options = RequestOptions::get();
        if let Some(name) = self.method {
            let method = Method::from_name(&name)
                .ok_or_else(|| js_error(&format!("unsupported method {name:?}")))?;
            options = options.method(method);
        }
        for (name, value) in self.headers {
            options = options.header(name, value);
        }
        if let Some(body) = self.body {
            options = options.body(body);
        }
        if let Some(mode) = self.credentials {
            let credentials = Credentials::from_name(&mode)
                .ok_or_else(|| js_error(&format!("unsupported credentials mode {mode:?}")))?;
            options = options.credentials(credentials);
        }
        Ok(options)
    }
}

/// Resolves with the parsed JSON body; rejects with an `Error` on network
/// failure, non-2xx status, or a malformed body.
#[wasm_bindgen(js_name = makeRequest)]
pub async fn make_request(url: String, options: JsValue) -> Result<JsValue, JsValue> {
    let options = match stringify(&options)? {
        Some(raw) if !options.is_null() => serde_json::from_str::<FetchOptions>(&raw)
            .map_err(|err| js_error(&format!("invalid request options: {err}")))?,
        _ => FetchOptions::default(),
    };
    let client = RequestClient::new(GlooTransport);
    let value = client
        .request(&url, options.into_request_options()?)
        .await
        .map_err(|err| js_error(&err.to_string()))?;
    js_sys::JSON::parse(&value.to_string())
}

#[wasm_bindgen(js_name = saveToStorage)]
pub fn save_to_storage(key: &str, data: JsValue) -> bool {
    let raw = match stringify(&data) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::error!("failed to save {key} to storage: value is not serializable");
            return false;
        }
        Err(err) => {
            log::error!("failed to save {key} to storage: {}", describe(&err));
            return false;
        }
    };
    let value = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::error!("failed to save {key} to storage: {err}");
            return false;
        }
    };
    with_page(|page| page.storage.save(key, &value)).unwrap_or(false)
}

#[wasm_bindgen(js_name = loadFromStorage)]
pub fn load_from_storage(key: &str, default_value: JsValue) -> JsValue {
    let Some(value) = with_page(|page| page.storage.load_value(key)).flatten() else {
        return default_value;
    };
    js_sys::JSON::parse(&value.to_string()).unwrap_or_else(|err| {
        log::error!("failed to load {key} from storage: {}", describe(&err));
        default_value
    })
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub async fn copy_to_clipboard(text: String) -> Result<(), JsValue> {
    let write = match with_page(|page| page.dom.write_clipboard(&text)) {
        Some(write) => write,
        None => WebDom::new()
            .ok_or_else(|| js_error("no document available"))?
            .write_clipboard(&text),
    };
    write.await.map_err(|err| js_error(&err.to_string()))
}

#[wasm_bindgen(js_name = formatFileSize)]
#[must_use]
pub fn format_file_size_js(bytes: f64) -> String {
    format_file_size(whole(bytes))
}

#[wasm_bindgen(js_name = validateEmail)]
#[must_use]
pub fn validate_email_js(email: &str) -> bool {
    validate_email(email)
}

#[wasm_bindgen(js_name = validateURL)]
#[must_use]
pub fn validate_url_js(url: &str) -> bool {
    validate_url(url)
}

/// Returns a function that runs `func` once calls stop for `wait_ms`, with
/// the arguments of the last call.
#[wasm_bindgen(js_name = debounce)]
#[must_use]
pub fn debounce_js(func: Function, wait_ms: f64) -> Function {
    let debounced = debounce(&BrowserScheduler::new(), millis(wait_ms), move |args: Array| {
        invoke(&func, &args);
    });
    let wrapper =
        Closure::wrap(Box::new(move |args: Array| debounced.call(args)) as Box<dyn FnMut(Array)>);
    variadic(&wrapper.into_js_value())
}

/// Returns a function that runs `func` at most once per `limit_ms`; calls
/// during the cooldown are dropped.
#[wasm_bindgen(js_name = throttle)]
#[must_use]
pub fn throttle_js(func: Function, limit_ms: f64) -> Function {
    let throttled = throttle(&BrowserScheduler::new(), millis(limit_ms), move |args: Array| {
        invoke(&func, &args);
    });
    let wrapper = Closure::wrap(Box::new(move |args: Array| {
        if !throttled.call(args) {
            log::debug!("throttled call dropped");
        }
    }) as Box<dyn FnMut(Array)>);
    variadic(&wrapper.into_js_value())
}

fn invoke(func: &Function, args: &Array) {
    if let Err(err) = func.apply(&JsValue::UNDEFINED, args) {
        log::error!("rate-limited callback threw: {}", describe(&err));
    }
}

/// Returns the markup that `hideLoadingState` will restore.
#[wasm_bindgen(js_name = showLoadingState)]
pub fn show_loading_state(element: web_sys::Element, text: Option<String>) -> String {
    let element = WebElement::new(element);
    let token = loading::begin(&element, text.as_deref().unwrap_or(DEFAULT_LOADING_LABEL));
    let original = token.snapshot().to_owned();
    LOADING.with(|tokens| tokens.borrow_mut().push(token));
    original
}

/// Ends the most recent loading state on `element`; no-op when there is none.
#[wasm_bindgen(js_name = hideLoadingState)]
pub fn hide_loading_state(element: web_sys::Element) {
    let element = WebElement::new(element);
    let token = LOADING.with(|tokens| {
        let mut tokens = tokens.borrow_mut();
        let index = tokens.iter().rposition(|t| t.element().same_node(&element))?;
        Some(tokens.remove(index))
    });
    if let Some(token) = token {
        loading::end(token);
    }
}

fn stringify(value: &JsValue) -> Result<Option<String>, JsValue> {
    if value.is_undefined() {
        return Ok(None);
    }
    Ok(js_sys::JSON::stringify(value)?.as_string())
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn millis(ms: f64) -> Duration {
    Duration::from_millis(whole(ms))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 { value as u64 } else { 0 }
}
