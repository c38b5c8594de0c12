//! In-memory storage, color-scheme signal, and a manually driven clock.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::{ColorScheme, Storage, Timers};
use crate::error::{MediaError, StorageError};

// ── Storage ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct StorageState {
    items: HashMap<String, String>,
    failing: bool,
}

/// Key-value store that can be switched into a failing mode, the way
/// `localStorage` throws in private browsing or when blocked.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<StorageState>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent access fail.
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    /// Read an item directly, bypassing the failure switch.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<String> {
        self.state.borrow().items.get(key).cloned()
    }

    /// Seed an item directly, bypassing the failure switch.
    pub fn insert(&self, key: &str, value: &str) {
        self.state.borrow_mut().items.insert(key.to_owned(), value.to_owned());
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let state = self.state.borrow();
        if state.failing {
            return Err(StorageError::Access("storage disabled".to_owned()));
        }
        Ok(state.items.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(StorageError::Access("storage disabled".to_owned()));
        }
        state.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ── Color scheme ────────────────────────────────────────────────

struct SchemeState {
    /// `None` when the environment has no media-query support.
    prefers_dark: Option<bool>,
    change_events: bool,
    watchers: Vec<Rc<dyn Fn(bool)>>,
}

/// Settable "prefers dark" signal that notifies watchers on change.
#[derive(Clone)]
pub struct MemoryColorScheme {
    state: Rc<RefCell<SchemeState>>,
}

impl MemoryColorScheme {
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        Self::build(Some(prefers_dark), true)
    }

    /// Queryable, but without any change-notification API.
    #[must_use]
    pub fn without_change_events(prefers_dark: bool) -> Self {
        Self::build(Some(prefers_dark), false)
    }

    /// No media-query support at all.
    #[must_use]
    pub fn unsupported() -> Self {
        Self::build(None, false)
    }

    fn build(prefers_dark: Option<bool>, change_events: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchemeState { prefers_dark, change_events, watchers: Vec::new() })),
        }
    }

    /// Change the system signal and notify watchers.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let watchers = {
            let mut state = self.state.borrow_mut();
            state.prefers_dark = Some(prefers_dark);
            state.watchers.clone()
        };
        for watcher in watchers {
            watcher(prefers_dark);
        }
    }

    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.state.borrow().watchers.len()
    }
}

impl ColorScheme for MemoryColorScheme {
    fn prefers_dark(&self) -> Result<bool, MediaError> {
        self.state.borrow().prefers_dark.ok_or(MediaError::Unsupported)
    }

    fn watch(&self, listener: Rc<dyn Fn(bool)>) -> Result<(), MediaError> {
        let mut state = self.state.borrow_mut();
        if !state.change_events {
            return Err(MediaError::Unsupported);
        }
        state.watchers.push(listener);
        Ok(())
    }
}

// ── Timers ──────────────────────────────────────────────────────

/// Handle returned by [`ManualTimers::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct PendingTimer {
    id: TimerId,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Virtual clock: timers fire only when [`ManualTimers::advance`] moves time
/// past their due point.
#[derive(Clone, Default)]
pub struct ManualTimers {
    clock: Rc<RefCell<Clock>>,
}

impl ManualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of scheduled, not yet fired or cleared, timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move time forward by `by`, firing due timers in due order.
    ///
    /// Callbacks run with the clock set to their due time and may schedule
    /// or clear other timers.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id.0))
                    .map(|(i, _)| i);
                earliest.map(|i| {
                    let timer = clock.pending.remove(i);
                    clock.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl Timers for ManualTimers {
    type Handle = TimerId;

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.pending.push(PendingTimer { id, due, callback });
        id
    }

    fn clear_timeout(&self, handle: TimerId) {
        self.clock.borrow_mut().pending.retain(|t| t.id != handle);
    }
}
