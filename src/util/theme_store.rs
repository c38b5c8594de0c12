//! Theme preference persistence.
//!
//! Wraps a [`Storage`] so that every read or write failure is logged and
//! swallowed here. An unavailable store behaves like an empty one, and an
//! unrecognized stored value is treated as no preference.

#[cfg(test)]
#[path = "theme_store_test.rs"]
mod theme_store_test;

use crate::platform::Storage;
use crate::state::theme::Theme;

pub struct ThemeStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> ThemeStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// The persisted user override, if there is a valid one.
    pub fn load(&self) -> Option<Theme> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("theme preference read failed: {e}");
                return None;
            }
        };
        match raw.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::debug!("ignoring stored theme preference: {e}");
                None
            }
        }
    }

    /// Persist `theme` as the user override.
    pub fn save(&self, theme: Theme) {
        if let Err(e) = self.storage.set(&self.key, theme.as_str()) {
            log::warn!("theme preference write failed: {e}");
        }
    }
}
