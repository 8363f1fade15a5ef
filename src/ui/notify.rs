//! Transient alert notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Any code on the page (wiring, JS callers through the exports, the global
//! fault handler) reports to the user through [`NotificationCenter::notify`].
//! Alerts are appended to `<body>`, pinned top-right, and removed after their
//! duration.
//!
//! DESIGN
//! ======
//! The body owns the alert once appended. The returned [`Notification`] is a
//! non-owning view: dismissing it early, the close button, or a page script
//! replacing the markup all race the expiry timer, so expiry checks that the
//! alert is still attached before removing it.
//!
//! Close buttons are handled by one document-level listener registered when
//! the center is built. Browser listeners are never unregistered, so a
//! per-alert listener would outlive every alert it was made for.
//!
//! ERROR HANDLING
//! ==============
//! Showing a notification never fails.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::NotificationConfig;
use crate::dom::{Dom, Element, Event, EventKind};
use crate::schedule::Scheduler;
use crate::util::html::escape_html;

const DISMISS_SELECTOR: &str = r#"[data-bs-dismiss="alert"]"#;

/// Alert category; controls the `alert-*` styling class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Light,
    Dark,
}

impl Severity {
    pub const ALL: [Self; 8] = [
        Self::Primary,
        Self::Secondary,
        Self::Success,
        Self::Danger,
        Self::Warning,
        Self::Info,
        Self::Light,
        Self::Dark,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity {0:?}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSeverity(s.to_owned()))
    }
}

/// View of a shown alert.
#[derive(Clone, Debug)]
pub struct Notification<E> {
    element: E,
}

impl<E: Element> Notification<E> {
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Still attached to the document.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.element.parent().is_some()
    }

    /// Remove now; the pending expiry becomes a no-op.
    pub fn dismiss(&self) {
        self.element.remove();
    }
}

pub struct NotificationCenter<D, S> {
    dom: D,
    scheduler: S,
    config: NotificationConfig,
}

impl<D: Dom, S: Scheduler> NotificationCenter<D, S> {
    /// Build a center and start handling alert close buttons on `dom`.
    pub fn new(dom: D, scheduler: S, config: NotificationConfig) -> Self {
        dom.listen_document(
            EventKind::Click,
            Rc::new(|event: &D::Event| {
                let close = event.target().and_then(|t| t.closest(DISMISS_SELECTOR));
                if let Some(alert) = close.and_then(|c| c.closest(".alert")) {
                    alert.remove();
                }
            }),
        );
        Self { dom, scheduler, config }
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.config.duration()
    }

    /// Show `message` for `duration`. The message is treated as text.
    pub fn notify(
        &self,
        message: &str,
        severity: Severity,
        duration: Duration,
    ) -> Notification<D::Element> {
        let alert = self.build(message, severity);
        self.dom.body().append_child(&alert);
        log::debug!("notification ({severity}) shown for {}ms", duration.as_millis());

        let expiring = alert.clone();
        self.scheduler.set_timeout(
            duration,
            Box::new(move || {
                if expiring.parent().is_some() {
                    expiring.remove();
                }
            }),
        );
        Notification { element: alert }
    }

    /// `notify` with the configured default duration.
    pub fn show(&self, message: &str, severity: Severity) -> Notification<D::Element> {
        self.notify(message, severity, self.default_duration())
    }

    pub fn info(&self, message: &str) -> Notification<D::Element> {
        self.show(message, Severity::Info)
    }

    pub fn success(&self, message: &str) -> Notification<D::Element> {
        self.show(message, Severity::Success)
    }

    pub fn warning(&self, message: &str) -> Notification<D::Element> {
        self.show(message, Severity::Warning)
    }

    pub fn danger(&self, message: &str) -> Notification<D::Element> {
        self.show(message, Severity::Danger)
    }

    fn build(&self, message: &str, severity: Severity) -> D::Element {
        let alert = self.dom.create_element("div");
        alert.set_class_name(&format!(
            "alert alert-{severity} alert-dismissible fade show position-fixed"
        ));
        alert.set_attribute("role", "alert");
        alert.set_style("top", &format!("{}px", self.config.top_px));
        alert.set_style("right", &format!("{}px", self.config.right_px));
        alert.set_style("z-index", &self.config.z_index.to_string());
        alert.set_style("max-width", &format!("{}px", self.config.max_width_px));
        alert.set_style("box-shadow", "0 4px 12px rgba(0,0,0,0.15)");
        alert.set_inner_html(&escape_html(message));

        let close = self.dom.create_element("button");
        close.set_attribute("type", "button");
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert");
        close.set_attribute("aria-label", "Close");
        alert.append_child(&close);
        alert
    }
}
