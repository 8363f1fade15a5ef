//! Deterministic virtual-time scheduler.
//!
//! Time only moves when [`ManualScheduler::advance`] is called. Due timers run
//! in deadline order (ties in scheduling order), each seeing the clock set to
//! its own deadline, and timers scheduled by a callback are picked up within
//! the same `advance` if they fall inside the window. Spawned tasks run on a
//! `futures` local pool until they stall.

#[cfg(test)]
#[path = "manual_test.rs"]
mod manual_test;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use super::{LocalTask, Scheduler, TimerId};

type Callback = Box<dyn FnOnce()>;

struct ManualState {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    timers: RefCell<BTreeMap<(Duration, TimerId), Callback>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

#[derive(Clone)]
pub struct ManualScheduler {
    state: Rc<ManualState>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            state: Rc::new(ManualState {
                now: Cell::new(Duration::ZERO),
                next_id: Cell::new(1),
                timers: RefCell::new(BTreeMap::new()),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.now.get()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.timers.borrow().len()
    }

    /// Move the clock forward by `by`, firing every timer that comes due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.run_pending();
        while let Some(callback) = self.pop_due(target) {
            callback();
            self.run_pending();
        }
        self.state.now.set(target);
    }

    /// Poll spawned tasks until none can make progress.
    ///
    /// Re-entrant calls (a task spawning another task) are skipped; the outer
    /// run picks the new task up.
    pub fn run_pending(&self) {
        if let Ok(mut pool) = self.state.pool.try_borrow_mut() {
            pool.run_until_stalled();
        }
    }

    fn pop_due(&self, target: Duration) -> Option<Callback> {
        let mut timers = self.state.timers.borrow_mut();
        let key = *timers.keys().next()?;
        if key.0 > target {
            return None;
        }
        self.state.now.set(key.0);
        timers.remove(&key)
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.state.next_id.get());
        self.state.next_id.set(id.0 + 1);
        let deadline = self.now() + delay;
        self.state.timers.borrow_mut().insert((deadline, id), callback);
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state.timers.borrow_mut().retain(|(_, timer), _| *timer != id);
    }

    fn spawn_local(&self, task: LocalTask) {
        if let Err(err) = self.state.spawner.spawn_local(task) {
            log::error!("failed to spawn local task: {err}");
            return;
        }
        self.run_pending();
    }
}
