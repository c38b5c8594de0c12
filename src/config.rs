//! Element ids, selectors, and timings the components attach with.
//!
//! Defaults match the blog templates. A page can override any subset by
//! embedding JSON in `<script id="blog-ui-config" type="application/json">`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::Dom;
use crate::state::toast::DismissPolicy;

/// Id of the element whose text holds JSON overrides.
pub const CONFIG_ELEMENT_ID: &str = "blog-ui-config";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub nav: NavConfig,
    pub theme: ThemeConfig,
    pub toasts: ToastConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_id: String,
    pub list_selector: String,
    /// Id given to the list when the markup has none, for `aria-controls`.
    pub list_default_id: String,
    pub active_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "nav-toggle".to_owned(),
            list_selector: ".nav__list".to_owned(),
            list_default_id: "primary-navigation".to_owned(),
            active_class: "active".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub toggle_id: String,
    pub attribute: String,
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_id: "theme-toggle".to_owned(),
            attribute: "data-theme".to_owned(),
            storage_key: "theme".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub container_id: String,
    pub item_selector: String,
    pub close_selector: String,
    pub base_delay_ms: u64,
    pub stagger_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            container_id: "flash-messages".to_owned(),
            item_selector: ".toast".to_owned(),
            close_selector: ".toast__close".to_owned(),
            base_delay_ms: 4000,
            stagger_ms: 250,
        }
    }
}

impl ToastConfig {
    #[must_use]
    pub fn dismiss_policy(&self) -> DismissPolicy {
        DismissPolicy::from_millis(self.base_delay_ms, self.stagger_ms)
    }
}

impl WidgetConfig {
    /// Parse overrides; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from the page, falling back to defaults when the
    /// config element is absent, empty, or malformed.
    pub fn from_dom<D: Dom>(dom: &D) -> Self {
        let Some(text) = dom.element_by_id(CONFIG_ELEMENT_ID).and_then(|node| dom.text(&node)) else {
            return Self::default();
        };
        if text.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}
