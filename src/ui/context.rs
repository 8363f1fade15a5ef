//! The bundle of services a page's widgets share.
//!
//! Built once at boot (or by a test) and handed around as `Rc<PageContext>`.
//! Event handlers hold a `Weak` to it so the listener registry never keeps the
//! context alive on its own.

use std::rc::Rc;

use super::notify::NotificationCenter;
use super::theme::ThemeManager;
use crate::config::UiConfig;
use crate::dom::Dom;
use crate::schedule::Scheduler;
use crate::storage::{KeyValueStore, StorageAdapter};

pub struct PageContext<D, S, K> {
    pub dom: D,
    pub scheduler: S,
    pub storage: Rc<StorageAdapter<K>>,
    pub notifications: NotificationCenter<D, S>,
    pub theme: ThemeManager<D, K>,
    pub config: UiConfig,
}

impl<D: Dom, S: Scheduler, K: KeyValueStore> PageContext<D, S, K> {
    pub fn new(dom: D, scheduler: S, store: K, config: UiConfig) -> Rc<Self> {
        let storage = Rc::new(StorageAdapter::new(store));
        let notifications =
            NotificationCenter::new(dom.clone(), scheduler.clone(), config.notification.clone());
        let theme = ThemeManager::new(dom.clone(), Rc::clone(&storage), config.theme_key.clone());
        Rc::new(Self { dom, scheduler, storage, notifications, theme, config })
    }
}
