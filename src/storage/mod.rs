//! Durable key-value storage with JSON values.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`KeyValueStore`] is the raw string store (`localStorage` in the browser,
//! [`memory::MemoryStore`] elsewhere). [`StorageAdapter`] layers serde_json
//! encoding on top and is what widgets use.
//!
//! ERROR HANDLING
//! ==============
//! `save`/`load` never fail: they log the cause and fall back to `false` or the
//! caller's default, so a full or disabled store degrades the page instead of
//! breaking it. `try_save`/`try_load` expose the typed cause for callers that
//! want to react to it.


pub mod memory;

#[cfg(feature = "hydrate")]
pub mod browser;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Failures of the raw store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded { key: String },
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failures of the JSON layer, including the raw store's.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode value for {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    /// Raw value stored under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be modified.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// JSON view over a [`KeyValueStore`].
pub struct StorageAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// Returns `false` (and logs) when encoding fails or the store rejects
    /// the write.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_save(key, value) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to save {key} to storage: {err}");
                false
            }
        }
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `default` (and logs on failure) when the key is absent, holds
    /// an empty string, cannot be read, or does not decode as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                log::error!("failed to load {key} from storage: {err}");
                default
            }
        }
    }

    /// Stored JSON as an untyped value. A stored `null` comes back as
    /// `Some(Value::Null)`; absent, empty and undecodable entries give `None`.
    pub fn load_value(&self, key: &str) -> Option<serde_json::Value> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("failed to load {key} from storage: {err}");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] or [`StorageError::Store`].
    pub fn try_save<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|source| StorageError::Encode { key: key.to_owned(), source })?;
        self.store.set_item(key, &raw)?;
        Ok(())
    }

    /// `Ok(None)` for absent keys and empty stored strings.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] or [`StorageError::Store`].
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Decode { key: key.to_owned(), source })
    }

    /// Raw string under `key`, bypassing JSON.
    pub fn load_text(&self, key: &str) -> Option<String> {
        match self.store.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("failed to read {key} from storage: {err}");
                None
            }
        }
    }

    /// Write a raw string under `key`, bypassing JSON.
    pub fn save_text(&self, key: &str, value: &str) -> bool {
        match self.store.set_item(key, value) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to write {key} to storage: {err}");
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove_item(key) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to remove {key} from storage: {err}");
                false
            }
        }
    }
}
