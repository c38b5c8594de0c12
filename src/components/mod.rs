//! Page behaviors attached to server-rendered markup.
//!
//! Each component is initialized once against its elements and then lives
//! as long as the listeners it registered. Missing elements make `init`
//! return `None` without touching the page.

pub mod nav_toggle;
pub mod theme_toggle;
pub mod toasts;
