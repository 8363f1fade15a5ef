//! Debounce and throttle wrappers for bursty UI callbacks.
//!
//! DESIGN
//! ======
//! Both wrappers own their timer state and nothing else; they are cheap to
//! clone and clones share that state, so a handler captured by several
//! listeners still coalesces as one.

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod rate_limit_test;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::schedule::{Scheduler, TimerId};

/// Wrap `func` so that only the last call in a burst runs, `wait` after it.
pub fn debounce<S, A, F>(scheduler: &S, wait: Duration, func: F) -> Debounced<S, A>
where
    S: Scheduler,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        scheduler: scheduler.clone(),
        wait,
        func: Rc::new(func),
        pending: Rc::new(Cell::new(None)),
    }
}

/// Wrap `func` so that it runs at most once per `limit`; extra calls are dropped.
pub fn throttle<S, A, F>(scheduler: &S, limit: Duration, func: F) -> Throttled<S, A>
where
    S: Scheduler,
    A: 'static,
    F: Fn(A) + 'static,
{
    Throttled {
        scheduler: scheduler.clone(),
        limit,
        func: Rc::new(func),
        cooling: Rc::new(Cell::new(false)),
    }
}

pub struct Debounced<S, A> {
    scheduler: S,
    wait: Duration,
    func: Rc<dyn Fn(A)>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<S: Clone, A> Clone for Debounced<S, A> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            wait: self.wait,
            func: Rc::clone(&self.func),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    /// Replace any pending call with one using `args`.
    pub fn call(&self, args: A) {
        self.cancel();
        let func = Rc::clone(&self.func);
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.set_timeout(
            self.wait,
            Box::new(move || {
                pending.set(None);
                func(args);
            }),
        );
        self.pending.set(Some(id));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

pub struct Throttled<S, A> {
    scheduler: S,
    limit: Duration,
    func: Rc<dyn Fn(A)>,
    cooling: Rc<Cell<bool>>,
}

impl<S: Clone, A> Clone for Throttled<S, A> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            limit: self.limit,
            func: Rc::clone(&self.func),
            cooling: Rc::clone(&self.cooling),
        }
    }
}

impl<S: Scheduler, A: 'static> Throttled<S, A> {
    /// Run immediately unless cooling down. Returns whether `func` ran.
    pub fn call(&self, args: A) -> bool {
        if self.cooling.get() {
            return false;
        }
        self.cooling.set(true);
        let cooling = Rc::clone(&self.cooling);
        self.scheduler
            .set_timeout(self.limit, Box::new(move || cooling.set(false)));
        (self.func)(args);
        true
    }

    #[must_use]
    pub fn is_cooling(&self) -> bool {
        self.cooling.get()
    }
}
