//! Startup: attach every component to the page.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use std::rc::Rc;

use crate::components::nav_toggle::NavToggle;
use crate::components::theme_toggle::ThemeToggle;
use crate::components::toasts::ToastManager;
use crate::config::WidgetConfig;
use crate::platform::{ColorScheme, Dom, Platform, Storage, Timers};

/// Handles to the components that found their elements.
pub struct Mounted<D: Dom, S: Storage, T: Timers> {
    pub nav: Option<Rc<NavToggle<D>>>,
    pub theme: Option<Rc<ThemeToggle<D, S>>>,
    pub toasts: Option<Rc<ToastManager<D, T>>>,
}

/// Initialize all components now.
pub fn mount<D, S, M, T>(platform: Platform<D, S, M, T>, config: &WidgetConfig) -> Mounted<D, S, T>
where
    D: Dom,
    S: Storage,
    M: ColorScheme,
    T: Timers,
{
    let Platform { dom, storage, color_scheme, timers } = platform;
    let nav = NavToggle::init(&dom, &config.nav, None, None);
    let theme = ThemeToggle::init(&dom, storage, &color_scheme, &config.theme, None, None);
    let toasts = ToastManager::init(&dom, timers, &config.toasts, None);
    log::info!(
        "blog-ui mounted: nav={} theme={} toasts={}",
        nav.is_some(),
        theme.is_some(),
        toasts.is_some()
    );
    Mounted { nav, theme, toasts }
}

/// Once the document is ready, read the page's config overrides and
/// initialize all components.
pub fn install<D, S, M, T>(platform: Platform<D, S, M, T>)
where
    D: Dom,
    S: Storage,
    M: ColorScheme,
    T: Timers,
{
    let dom = platform.dom.clone();
    dom.when_ready(Box::new(move || {
        let config = WidgetConfig::from_dom(&platform.dom);
        mount(platform, &config);
    }));
}

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use crate::platform::web::{DARK_SCHEME_QUERY, LocalStorage, WebColorScheme, WebDom, WebTimers};

    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let Some(dom) = WebDom::new() else {
        return;
    };
    let color_scheme = WebColorScheme::new(DARK_SCHEME_QUERY);
    install(Platform { dom, storage: LocalStorage, color_scheme, timers: WebTimers });
}
