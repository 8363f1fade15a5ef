//! Light/dark theme state.
//!
//! The current theme lives in the manager rather than being read back from
//! the DOM. It is persisted as plain text (`light` / `dark`) so pages that
//! already stored a theme keep it.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, Element};
use crate::storage::{KeyValueStore, StorageAdapter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Toggle icon: the moon offers dark mode, the sun offers light mode.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

pub struct ThemeManager<D, K> {
    dom: D,
    storage: Rc<StorageAdapter<K>>,
    key: String,
    current: Cell<Theme>,
}

impl<D: Dom, K: KeyValueStore> ThemeManager<D, K> {
    pub fn new(dom: D, storage: Rc<StorageAdapter<K>>, key: impl Into<String>) -> Self {
        Self { dom, storage, key: key.into(), current: Cell::new(Theme::default()) }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Restore the stored theme (light when absent or unrecognised) and
    /// apply it.
    pub fn init(&self) -> Theme {
        let theme = match self.storage.load_text(&self.key) {
            None => Theme::default(),
            Some(raw) if raw.is_empty() => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err: UnknownTheme| {
                log::warn!("{err}; falling back to light");
                Theme::default()
            }),
        };
        self.apply(theme);
        theme
    }

    /// Reflect `theme` on the document without persisting it.
    pub fn apply(&self, theme: Theme) {
        self.current.set(theme);
        self.dom.root().set_attribute("data-theme", theme.as_str());
        for toggle in self.dom.query_selector_all(".theme-toggle") {
            if let Some(icon) = toggle.query_selector("i") {
                icon.set_class_name(theme.icon_class());
            }
        }
    }

    /// Flip, apply and persist. Returns the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.apply(next);
        self.storage.save_text(&self.key, next.as_str());
        log::debug!("theme switched to {next}");
        next
    }
}
