//! `window.localStorage` backend.
//!
//! Private browsing modes and sandboxed frames can deny access to storage
//! entirely; the store is still constructible and every call reports
//! [`StoreError::Unavailable`].

use wasm_bindgen::JsCast;

use super::{KeyValueStore, StoreError};
use crate::web::describe;

#[derive(Clone)]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

impl BrowserStore {
    /// Handle to the page's `localStorage`.
    #[must_use]
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| match w.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage access denied: {}", describe(&err));
                None
            }
        });
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|err| {
            let quota = err
                .dyn_ref::<web_sys::DomException>()
                .is_some_and(|ex| ex.name() == "QuotaExceededError");
            if quota {
                StoreError::QuotaExceeded { key: key.to_owned() }
            } else {
                StoreError::Backend(describe(&err))
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }
}
