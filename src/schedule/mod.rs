//! Timers and local task spawning.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything in the page runs on one logical thread. Widgets that need to act
//! later (notification expiry, debounce, copy feedback) go through a
//! [`Scheduler`] instead of calling `setTimeout` or `spawn_local` themselves,
//! so tests can drive time explicitly with [`manual::ManualScheduler`].

pub mod manual;

#[cfg(feature = "hydrate")]
pub mod browser;

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Handle for cancelling a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub type LocalTask = LocalBoxFuture<'static, ()>;

pub trait Scheduler: Clone + 'static {
    /// Run `callback` once, no earlier than `delay` from now.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;
    /// Cancel a pending callback. Unknown or already-fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);
    /// Run a future to completion on the current thread.
    fn spawn_local(&self, task: LocalTask);
}
