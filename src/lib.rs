//! # blog-ui
//!
//! WebAssembly behavior layer for the blog's server-rendered theme: the
//! mobile navigation toggle, the light/dark theme switcher, and
//! auto-dismissing flash toasts.
//!
//! Components are written against the traits in [`platform`] so the same
//! logic runs in the browser (`hydrate` feature, backed by `web-sys`) and in
//! native tests (backed by the in-memory platform).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`boot`] | Mount all components, on page ready |
//! | [`components`] | `NavToggle`, `ThemeToggle`, `ToastManager` |
//! | [`config`] | Element ids, selectors, and timings |
//! | [`platform`] | DOM, storage, color-scheme, and timer traits plus implementations |
//! | [`state`] | DOM-free state: theme, nav state, toast timing |
//! | [`util`] | Theme preference persistence |
//! | [`error`] | Boundary error types |

pub mod boot;
pub mod components;
pub mod config;
pub mod error;
pub mod platform;
pub mod state;
pub mod util;
