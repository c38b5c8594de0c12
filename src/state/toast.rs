//! Auto-dismiss bookkeeping for flash toasts.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::time::Duration;

/// Timing rule for auto-dismissal.
///
/// Each toast waits `base + index * stagger` so a batch rendered together
/// leaves one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissPolicy {
    pub base: Duration,
    pub stagger: Duration,
}

impl DismissPolicy {
    #[must_use]
    pub fn from_millis(base_ms: u64, stagger_ms: u64) -> Self {
        Self { base: Duration::from_millis(base_ms), stagger: Duration::from_millis(stagger_ms) }
    }

    /// Full countdown for the toast at `index`.
    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.base.saturating_add(self.stagger.saturating_mul(steps))
    }
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self::from_millis(4000, 250)
    }
}

/// What is keeping a toast on screen: the pointer over it, or keyboard
/// focus inside it. The countdown restarts only once neither holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    Pointer,
    Focus,
}

/// One toast tracked by the manager.
///
/// `timer` is `Some` exactly while a countdown is pending, and never while
/// the toast is held.
#[derive(Debug)]
pub struct ToastEntry<N, H> {
    pub element: N,
    pub index: usize,
    pub timer: Option<H>,
    pub hovered: bool,
    pub focused: bool,
}

impl<N, H> ToastEntry<N, H> {
    #[must_use]
    pub fn new(element: N, index: usize) -> Self {
        Self { element, index, timer: None, hovered: false, focused: false }
    }

    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        self.timer.is_some()
    }

    pub fn set_held(&mut self, hold: Hold, held: bool) {
        match hold {
            Hold::Pointer => self.hovered = held,
            Hold::Focus => self.focused = held,
        }
    }

    /// Held by either the pointer or focus.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.hovered || self.focused
    }
}
