//! Reusable widgets: notifications, loading state, theme, and the context
//! that bundles them for a page.

pub mod context;
pub mod loading;
pub mod notify;
pub mod theme;

pub use context::PageContext;
pub use loading::{DEFAULT_LOADING_LABEL, LoadingToken};
pub use notify::{Notification, NotificationCenter, Severity};
pub use theme::{Theme, ThemeManager};
