//! Plain state types shared by the components.
//!
//! DESIGN
//! ======
//! Nothing here touches the DOM. Components own these values and push them
//! into the page through the platform traits, so the transition rules can be
//! tested on their own.

pub mod nav;
pub mod theme;
pub mod toast;
