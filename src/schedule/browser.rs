//! Browser scheduler backed by `gloo-timers` and `wasm-bindgen-futures`.
//!
//! Each timeout is a `TimeoutFuture` wrapped in `futures::future::abortable`
//! and spawned onto the microtask queue. Clearing aborts the wrapper, which
//! drops the future and with it the underlying `setTimeout`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{AbortHandle, abortable};
use gloo_timers::future::TimeoutFuture;

use super::{LocalTask, Scheduler, TimerId};

#[derive(Default)]
struct Timers {
    next_id: u64,
    pending: HashMap<TimerId, AbortHandle>,
}

#[derive(Clone, Default)]
pub struct BrowserScheduler {
    timers: Rc<RefCell<Timers>>,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = {
            let mut timers = self.timers.borrow_mut();
            timers.next_id += 1;
            TimerId(timers.next_id)
        };
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let (sleep, handle) = abortable(TimeoutFuture::new(millis));
        self.timers.borrow_mut().pending.insert(id, handle);

        let timers = Rc::clone(&self.timers);
        wasm_bindgen_futures::spawn_local(async move {
            if sleep.await.is_ok() {
                timers.borrow_mut().pending.remove(&id);
                callback();
            }
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(handle) = self.timers.borrow_mut().pending.remove(&id) {
            handle.abort();
        }
    }

    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
