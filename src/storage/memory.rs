//! Process-local store with an optional byte quota.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStore, StoreError};

#[derive(Default)]
struct Entries {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl Entries {
    fn used_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// Cloning shares the underlying entries, like two handles to the same
/// origin's `localStorage`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<Entries>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push total key+value bytes over `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().quota = Some(bytes);
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().values.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.borrow_mut();
        if let Some(quota) = entries.quota {
            if entries.used_without(key) + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_owned() });
            }
        }
        entries.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().values.remove(key);
        Ok(())
    }
}
